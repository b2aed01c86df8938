//! Tolerance defaults and the small configuration struct.
//!
//! Policy
//! - Defaults are fixed constants; the explicit-accuracy entry points stay the
//!   primary API and `GeomCfg` only bundles the pair callers usually thread
//!   through (accuracy + norm).

use crate::error::{GeomError, GeomResult};
use crate::vector::Norm;

/// Accuracy used when the caller has no better estimate.
pub const DEFAULT_ACCURACY: f64 = 1e-9;
/// Norm used for tolerance-based vector equality by default.
pub const DEFAULT_NORM: Norm = Norm::L1;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    pub accuracy: f64,
    pub norm: Norm,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            norm: DEFAULT_NORM,
        }
    }
}

impl GeomCfg {
    #[inline]
    pub fn with_accuracy(accuracy: f64) -> Self {
        Self {
            accuracy,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GeomResult<()> {
        check_accuracy(self.accuracy)
    }
}

/// NaN → `NotANumber`, negative → `InvalidParameter`.
pub(crate) fn check_accuracy(accuracy: f64) -> GeomResult<()> {
    if accuracy.is_nan() {
        return Err(GeomError::NotANumber { what: "accuracy" });
    }
    if accuracy < 0.0 {
        return Err(GeomError::invalid("accuracy must be non-negative"));
    }
    Ok(())
}
