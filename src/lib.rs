//! dotgit: a minimal local version-control engine
//!
//! Files are staged as whole snapshots and committed into an immutable,
//! content-addressed object store. Branches are plain ref files next to a
//! symbolic `HEAD`, all under a `.dotgit` marker directory.

pub mod areas;
pub mod artifacts;
pub mod commands;
