//! Staging area file format
//!
//! The index is a JSON array of `[path, entry]` pairs ordered by path:
//!
//! ```text
//! [["a.txt",{"content":"aGVsbG8=","size":5,"stagedAt":"2024-05-01T10:00:00+02:00"}]]
//! ```
//!
//! `content` is the base64 of the bytes captured at stage time.

pub mod staged_entry;
