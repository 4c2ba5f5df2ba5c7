mod engine;
mod error;
mod types;
pub mod validation;

pub use engine::project;
pub use error::ProjectionError;
pub use types::{MonthRecord, PlanInputs, ProjectionResult};
pub use validation::validate_inputs;
