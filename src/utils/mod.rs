//! Shared utilities: date parsing, file I/O and logging helpers.

pub mod date_utils;
pub mod io;
pub mod logging;

pub use date_utils::{DateFormatConfig, parse_date_string, parse_datetime_string};
pub use io::{read_visits, write_visits};
