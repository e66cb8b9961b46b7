use thiserror::Error;

/// Failures that abort a pipeline run.
///
/// Solver outcomes (no critical point, negative price, minimum) are not errors;
/// they are reported through [`crate::SolveStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The sample cannot determine a slope.
    #[error("insufficient data: need at least 2 distinct prices, found {distinct_prices}")]
    InsufficientData { distinct_prices: usize },
}
