//! Git operations for source materialization
//!
//! The registry core only needs "produce a local directory for this remote"
//! and "refresh that directory in place"; this module provides both on top
//! of libgit2. Authentication is delegated to git's native credential
//! system.

mod auth;
mod clone;
mod url;

pub use clone::{clone, refresh};
