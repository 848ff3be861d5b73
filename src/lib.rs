pub mod cli;
pub mod config;
pub mod decision;
pub mod errors;
pub mod io;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod reporting;
pub mod utils;
