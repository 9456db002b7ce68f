pub mod config_io;
pub mod sheet_io;
