//! dotgit command implementations
//!
//! Commands are `impl Repository` blocks, split into two groups:
//!
//! - `plumbing`: direct object inspection (cat-file)
//! - `porcelain`: user-facing workflows (init, add, commit, log, branch, ignore)

pub mod plumbing;
pub mod porcelain;
