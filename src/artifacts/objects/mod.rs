//! Commit objects and their identifiers
//!
//! The store keeps whole-file snapshots per commit instead of blobs and trees.
//! A commit is serialized as JSON and addressed by the SHA-1 of its canonical
//! encoding: `{message, timestamp, files}` in that order.

pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated id shown in command output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
