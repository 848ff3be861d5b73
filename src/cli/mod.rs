pub mod commands;
pub mod decide;
pub mod evaluate;
pub mod table;
pub mod validate;

pub use commands::{Cli, Commands};
