pub mod assembler;
pub mod columns;
pub mod formatter;
pub mod summary;

pub use assembler::{assemble_report, Report};
pub use formatter::{format_action_table, format_decision, format_summary};
pub use summary::Summary;
