//! Min-max feature scaling with `svm-scale` semantics.

use crate::error::AttritionError;
use crate::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::types::SvmNode;

/// Observed training range of one feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    /// Smallest value seen during fitting.
    pub min: f64,
    /// Largest value seen during fitting.
    pub max: f64,
}

/// A pre-fit scaler mapping raw feature values into `[lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    /// Target value for a feature at its training minimum.
    pub lower: f64,
    /// Target value for a feature at its training maximum.
    pub upper: f64,
    /// Training range per feature, in model input order. `None` means the
    /// feature was not present in the range file and always scales to 0.
    pub ranges: [Option<FeatureRange>; FEATURE_COUNT],
}

impl FeatureScaler {
    /// Create a scaler with no fitted ranges.
    pub fn new(lower: f64, upper: f64) -> Result<Self, AttritionError> {
        if !lower.is_finite() || !upper.is_finite() || upper <= lower {
            return Err(AttritionError::InvalidScalerBounds { lower, upper });
        }
        Ok(Self {
            lower,
            upper,
            ranges: [None; FEATURE_COUNT],
        })
    }

    /// Scale a single raw value of feature `i` (0-based).
    ///
    /// Values equal to the training bounds map exactly onto `lower` and
    /// `upper`; values outside the training range extrapolate linearly.
    /// The offset is divided by the range before it is stretched, so raw
    /// values near `f64::MAX` still scale to a finite number.
    pub fn scale_value(&self, i: usize, value: f64) -> f64 {
        let Some(range) = self.ranges[i] else {
            return 0.0;
        };
        if range.min == range.max {
            0.0
        } else if value == range.min {
            self.lower
        } else if value == range.max {
            self.upper
        } else {
            self.lower + (self.upper - self.lower) * ((value - range.min) / (range.max - range.min))
        }
    }

    /// Scale a dense record into the sparse form the classifier consumes.
    ///
    /// Zero outputs are dropped. A non-finite output is an internal error.
    pub fn transform(&self, values: &[f64; FEATURE_COUNT]) -> Result<Vec<SvmNode>, AttritionError> {
        let mut nodes = Vec::with_capacity(FEATURE_COUNT);
        for (i, &value) in values.iter().enumerate() {
            let scaled = self.scale_value(i, value);
            if !scaled.is_finite() {
                return Err(AttritionError::Internal(format!(
                    "scaled value of {} is not finite",
                    FEATURE_NAMES[i]
                )));
            }
            if scaled != 0.0 {
                nodes.push(SvmNode {
                    index: i as i32 + 1,
                    value: scaled,
                });
            }
        }
        Ok(nodes)
    }
}
