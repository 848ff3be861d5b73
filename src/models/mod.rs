pub mod vocabulary;
pub mod metrics;
pub mod validation;
pub mod row;
pub mod decision;

pub use vocabulary::Vocabulary;
pub use metrics::*;
pub use validation::{Metric, ValidationError, ValidationErrors};
pub use row::RawRow;
pub use decision::{Decision, DecisionResult};
