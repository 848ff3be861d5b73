pub mod types;
pub mod classification;

pub use types::TriageError;
pub use classification::ErrorClassification;
