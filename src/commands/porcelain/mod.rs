//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create the `.dotgit` layout
//! - `ignore`: Show the effective ignore rules
//! - `add`: Stage files for commit
//! - `commit`: Snapshot staging into a commit object
//! - `log`: Show stored commits
//! - `branch`: Create, list, or delete branches

pub mod add;
pub mod branch;
pub mod commit;
pub mod ignore;
pub mod init;
pub mod log;
