//! Error types for the valuation pipeline

use thiserror::Error;

/// Failure modes of the valuation pipeline
///
/// Any stage failure aborts the run; no partial valuation record is produced.
/// The only sentinel substitution permitted anywhere in the pipeline is the
/// interest-coverage default applied when interest expense is zero; every
/// other zero denominator surfaces as `Undefined` instead of propagating
/// NaN or infinity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Too few historical periods to normalize fundamentals
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A ratio with a zero denominator
    #[error("undefined ratio: {0} has a zero denominator")]
    Undefined(&'static str),

    /// An input that makes the model itself ill-posed
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A collaborator (statement, quote, macro data) could not deliver
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValuationError::Undefined("effective tax rate");
        assert_eq!(
            err.to_string(),
            "undefined ratio: effective tax rate has a zero denominator"
        );
    }
}
