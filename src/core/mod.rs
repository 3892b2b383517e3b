mod engine;
mod error;
mod types;

pub use engine::{MAX_PROJECTION_MONTHS, project, validate};
pub use error::ProjectionError;
pub use types::{
    AnnualEntry, Duration, DurationUnit, MonthlyEntry, ProjectionInput, ProjectionResult, Rate,
    RateUnit,
};
