//! Binary classification metrics for bulk evaluation.
//!
//! The positive class is `Yes` (encoded `1`). A ratio whose denominator is
//! zero reports `1.0` when every prediction was correct and `0.0` otherwise.

use serde::Serialize;

use crate::types::Attrition;

/// Confusion matrix counts for the positive class `Yes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    /// Predicted `Yes`, truth `Yes`.
    pub true_positive: usize,
    /// Predicted `Yes`, truth `No`.
    pub false_positive: usize,
    /// Predicted `No`, truth `No`.
    pub true_negative: usize,
    /// Predicted `No`, truth `Yes`.
    pub false_negative: usize,
}

impl ConfusionCounts {
    /// Tally aligned `(truth, predicted)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Attrition, Attrition)>,
    {
        let mut counts = Self::default();
        for pair in pairs {
            counts.record(pair.0, pair.1);
        }
        counts
    }

    /// Tally aligned binary vectors (`1` = Yes, anything else = No).
    ///
    /// Returns `None` if the lengths differ.
    pub fn from_binary(truth: &[u8], predicted: &[u8]) -> Option<Self> {
        if truth.len() != predicted.len() {
            return None;
        }
        let as_label = |v: u8| if v == 1 { Attrition::Yes } else { Attrition::No };
        Some(Self::from_pairs(
            truth
                .iter()
                .zip(predicted)
                .map(|(&t, &p)| (as_label(t), as_label(p))),
        ))
    }

    /// Count one scored row.
    pub fn record(&mut self, truth: Attrition, predicted: Attrition) {
        match (truth, predicted) {
            (Attrition::Yes, Attrition::Yes) => self.true_positive += 1,
            (Attrition::No, Attrition::Yes) => self.false_positive += 1,
            (Attrition::No, Attrition::No) => self.true_negative += 1,
            (Attrition::Yes, Attrition::No) => self.false_negative += 1,
        }
    }

    /// Number of rows counted.
    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// Fraction of rows predicted correctly; `0.0` for no rows.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positive + self.true_negative) as f64 / total as f64
    }

    /// `tp / (tp + fp)`.
    pub fn precision(&self) -> f64 {
        self.ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// `tp / (tp + fn)`.
    pub fn recall(&self) -> f64 {
        self.ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// Harmonic mean of precision and recall, from the raw counts.
    pub fn f1(&self) -> f64 {
        self.ratio(
            2 * self.true_positive,
            2 * self.true_positive + self.false_positive + self.false_negative,
        )
    }

    /// Snapshot all four metrics together with the counts.
    pub fn report(&self) -> ClassificationReport {
        ClassificationReport {
            accuracy: self.accuracy(),
            precision: self.precision(),
            recall: self.recall(),
            f1: self.f1(),
            counts: *self,
        }
    }

    fn ratio(&self, numerator: usize, denominator: usize) -> f64 {
        if denominator != 0 {
            numerator as f64 / denominator as f64
        } else if self.false_positive + self.false_negative == 0 {
            1.0
        } else {
            0.0
        }
    }
}

/// The four summary metrics plus the counts they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationReport {
    /// See [`ConfusionCounts::accuracy`].
    pub accuracy: f64,
    /// See [`ConfusionCounts::precision`].
    pub precision: f64,
    /// See [`ConfusionCounts::recall`].
    pub recall: f64,
    /// See [`ConfusionCounts::f1`].
    pub f1: f64,
    /// Counts the ratios were computed from.
    pub counts: ConfusionCounts,
}
