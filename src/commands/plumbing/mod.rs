//! Plumbing commands (low-level object access)
//!
//! - `cat-file`: Pretty-print a stored commit by full or abbreviated id

pub mod cat_file;
