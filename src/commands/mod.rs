//! Command implementations for the Agentry CLI

pub mod add;
pub mod completions;
pub mod cure;
pub mod helpers;
pub mod link;
pub mod list;
pub mod mcp;
pub mod remove;
pub mod status;
pub mod unlink;
pub mod update;
pub mod version;
