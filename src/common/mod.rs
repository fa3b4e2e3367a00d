//! Shared low-level helpers

pub mod fs;
