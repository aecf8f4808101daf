//! File input and output
//!
//! The visit table is exchanged between the generator and the dashboard as
//! delimited text.

pub mod visit_csv;

pub use visit_csv::{
    REQUIRED_COLUMNS, VISIT_COLUMNS, read_visits, read_visits_from, write_visits, write_visits_to,
};
