//! # attrition-rs
//!
//! Employee attrition scoring on top of a pre-trained binary support vector
//! classifier. Artifacts are a LIBSVM model file and an `svm-scale` range
//! file; both are loaded once into a [`ScoringModel`] and shared read-only.
//!
//! Also provides the labelled-CSV reader and binary metrics used for bulk
//! evaluation.

pub mod types;
pub mod error;
pub mod features;
pub mod io;
pub mod kernel;
pub mod scale;
pub mod predict;
pub mod scoring;
pub mod dataset;
pub mod metrics;

pub use error::AttritionError;
pub use features::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};
pub use scoring::ScoringModel;
pub use types::*;
