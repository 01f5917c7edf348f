//! Steam property errors.

use crate::quantity::Quantity;
use if97_core::CoreError;
use thiserror::Error;

/// Result type for steam property operations.
pub type If97Result<T> = Result<T, If97Error>;

/// Errors raised by region selection and property evaluation.
///
/// Range violations are detected eagerly, before any correlation is
/// evaluated past the point of detection, and carry the offending
/// quantity, its value, and the limit that was violated so an outer
/// unit-conversion layer can re-express them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum If97Error {
    /// One state variable outside its validity range.
    #[error("{quantity} out of range: {value} violates limit {limit}")]
    OutOfRange {
        quantity: Quantity,
        value: f64,
        limit: f64,
    },

    /// Joint violation of a two-variable envelope corner.
    #[error(
        "{quantity} = {value} together with {other_quantity} = {other_value} \
         violates limits {limit} / {other_limit}"
    )]
    OutOfRangeJoint {
        quantity: Quantity,
        value: f64,
        limit: f64,
        other_quantity: Quantity,
        other_value: f64,
        other_limit: f64,
    },

    /// Capability gap, e.g. enthalpy-driven queries on the metastable
    /// vapor equation. Distinct from invalid input.
    #[error("Unsupported operation: {what}")]
    Unsupported { what: &'static str },

    /// Bounded iterative solve exhausted its iteration budget.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// A correlation produced NaN/Inf, e.g. a degenerate derivative.
    #[error("Non-finite result for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

impl If97Error {
    /// Shorthand for the common single-variable violation.
    pub fn out_of_range(quantity: Quantity, value: f64, limit: f64) -> Self {
        If97Error::OutOfRange {
            quantity,
            value,
            limit,
        }
    }
}

impl From<If97Error> for CoreError {
    fn from(err: If97Error) -> Self {
        match err {
            If97Error::OutOfRange { quantity, .. } | If97Error::OutOfRangeJoint { quantity, .. } => {
                CoreError::InvalidArg {
                    what: Box::leak(
                        format!("steam state out of range: {}", quantity.label()).into_boxed_str(),
                    ),
                }
            }
            If97Error::Unsupported { what } => CoreError::Invariant {
                what: Box::leak(format!("steam operation not supported: {what}").into_boxed_str()),
            },
            If97Error::ConvergenceFailed { what } => CoreError::Invariant {
                what: Box::leak(format!("steam convergence failed: {what}").into_boxed_str()),
            },
            If97Error::NonFinite { what, value } => CoreError::NonFinite { what, value },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_quantity_and_limit() {
        let err = If97Error::out_of_range(Quantity::Temperature, 2300.0, 2273.15);
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("2273.15"));
    }

    #[test]
    fn error_to_core_error() {
        let err = If97Error::Unsupported {
            what: "h/s query on metastable vapor",
        };
        let core: CoreError = err.into();
        assert!(matches!(core, CoreError::Invariant { .. }));
    }
}
