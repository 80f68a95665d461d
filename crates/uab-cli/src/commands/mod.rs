pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod import;
pub mod list;
pub mod log;
pub mod sync;
pub mod tree;
