//! Data structures and pure logic
//!
//! - `branch`: branch and ref names
//! - `core`: errors, default config, pager adapter, atomic writes
//! - `ignore`: path exclusion rules used by `add`
//! - `index`: staged entry format
//! - `objects`: commit objects and ids

pub mod branch;
pub mod core;
pub mod ignore;
pub mod index;
pub mod objects;
