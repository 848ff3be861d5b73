pub mod batch;

pub use batch::{process_row, BatchRunner, RowOutcome};
