//! The immutable scoring context shared by every request.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::error::AttritionError;
use crate::features::{FeatureRecord, FEATURE_COUNT};
use crate::io::{load_classifier, load_scaler};
use crate::predict;
use crate::scale::FeatureScaler;
use crate::types::{Attrition, Classifier};

/// A scaler and classifier pair, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    scaler: FeatureScaler,
    classifier: Classifier,
}

impl ScoringModel {
    /// Pair an already-loaded scaler and classifier.
    pub fn new(scaler: FeatureScaler, classifier: Classifier) -> Result<Self, AttritionError> {
        let max_index = classifier.max_feature_index();
        if max_index > FEATURE_COUNT as i32 {
            return Err(AttritionError::ModelFormatError(format!(
                "classifier uses feature {} but records have {}",
                max_index, FEATURE_COUNT
            )));
        }
        Ok(Self { scaler, classifier })
    }

    /// Load both artifacts from disk.
    pub fn load(classifier_path: &Path, scaler_path: &Path) -> Result<Self, AttritionError> {
        let classifier = load_classifier(classifier_path)?;
        let scaler = load_scaler(scaler_path)?;
        info!(
            classifier = %classifier_path.display(),
            scaler = %scaler_path.display(),
            support_vectors = classifier.support_vector_count(),
            kernel = ?classifier.kernel.kernel_type,
            "loaded scoring artifacts"
        );
        Self::new(scaler, classifier)
    }

    /// The loaded classifier, for reporting model metadata.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Score one record: order, scale, classify.
    pub fn predict(&self, record: &FeatureRecord) -> Result<Attrition, AttritionError> {
        let scaled = self.scaler.transform(&record.to_vector())?;
        predict::predict(&self.classifier, &scaled)
    }

    /// Validate a flat JSON payload and score it.
    pub fn predict_json(&self, payload: &Map<String, Value>) -> Result<Attrition, AttritionError> {
        let record = FeatureRecord::from_json_map(payload)?;
        self.predict(&record)
    }
}
