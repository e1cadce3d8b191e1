//! Core repository components
//!
//! - `database`: object store for commit objects
//! - `index`: staging area for the next commit
//! - `lock`: advisory lock held by mutating commands
//! - `refs`: branch refs and HEAD
//! - `repository`: discovery and coordination of the areas
//! - `workspace`: working tree file access

pub mod database;
pub mod index;
pub mod lock;
pub mod refs;
pub mod repository;
pub mod workspace;
