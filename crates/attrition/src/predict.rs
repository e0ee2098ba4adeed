//! Binary decision function over scaled feature vectors.

use crate::error::AttritionError;
use crate::types::{Attrition, Classifier, SvmNode};

/// Compute the decision value `Σ coef_k · K(x, sv_k) − rho`.
///
/// Positive values vote for `model.label[0]`, everything else for
/// `model.label[1]`, matching LIBSVM's one-vs-one rule for a single pair.
pub fn decision_value(model: &Classifier, x: &[SvmNode]) -> f64 {
    let sum: f64 = model
        .sv
        .iter()
        .zip(&model.sv_coef)
        .map(|(sv, coef)| coef * model.kernel.evaluate(x, sv))
        .sum();
    sum - model.rho
}

/// Predict the class label for a scaled instance.
pub fn predict_label(model: &Classifier, x: &[SvmNode]) -> Result<i32, AttritionError> {
    let dec = decision_value(model, x);
    if !dec.is_finite() {
        return Err(AttritionError::Internal(format!(
            "decision value is not finite: {}",
            dec
        )));
    }
    Ok(if dec > 0.0 { model.label[0] } else { model.label[1] })
}

/// Predict the attrition outcome for a scaled instance.
pub fn predict(model: &Classifier, x: &[SvmNode]) -> Result<Attrition, AttritionError> {
    let label = predict_label(model, x)?;
    Attrition::from_class_label(label)
        .ok_or_else(|| AttritionError::Internal(format!("classifier produced unknown label {}", label)))
}
