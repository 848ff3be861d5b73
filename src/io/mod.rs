//! Delimited table input and report output.

pub mod reader;
pub mod writer;

pub use reader::{parse_table, read_table, Table};
pub use writer::{render_csv, render_json, write_report};
