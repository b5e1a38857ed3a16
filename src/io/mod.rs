pub mod config_io;
pub mod entry_store;
pub mod git;
