// Typed errors for the rendering core
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("empty snapshot: no series or samples to plot")]
    EmptyData,

    #[error("logarithmic scale undefined for non-positive value {value}")]
    NonPositiveLogValue { value: f64 },

    #[error("degenerate region: {axis} span is empty or inverted (min {min}, max {max})")]
    DegenerateRegion {
        axis: &'static str,
        min: f64,
        max: f64,
    },
}
