use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Classification formulation a model was trained with.
///
/// Integer values match the LIBSVM `svm_type` constants. Only the two
/// classification formulations can drive an attrition prediction; the
/// one-class and regression types are rejected when a model file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SvmType {
    /// C-Support Vector Classification.
    CSvc = 0,
    /// ν-Support Vector Classification.
    NuSvc = 1,
}

/// Type of kernel function.
///
/// Integer values match the LIBSVM `kernel_type` constants. Precomputed
/// kernels are not supported since they cannot score a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum KernelType {
    /// `K(x,y) = x·y`
    Linear = 0,
    /// `K(x,y) = (γ·x·y + coef0)^degree`
    Polynomial = 1,
    /// `K(x,y) = exp(-γ·‖x-y‖²)`
    Rbf = 2,
    /// `K(x,y) = tanh(γ·x·y + coef0)`
    Sigmoid = 3,
}

/// A single sparse feature: `index:value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvmNode {
    /// 1-based feature index. For attrition models this is the position of
    /// the field in [`crate::features::FEATURE_NAMES`] plus one.
    pub index: i32,
    /// Feature value.
    pub value: f64,
}

/// Kernel parameters stored in a model file header.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelParams {
    /// Kernel function type.
    pub kernel_type: KernelType,
    /// Degree for polynomial kernel.
    pub degree: i32,
    /// γ parameter for RBF, polynomial, and sigmoid kernels.
    pub gamma: f64,
    /// Independent term in polynomial and sigmoid kernels.
    pub coef0: f64,
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            kernel_type: KernelType::Rbf,
            degree: 3,
            gamma: 0.0,
            coef0: 0.0,
        }
    }
}

/// A trained binary classifier, loaded from a LIBSVM model file.
///
/// Support vectors are stored grouped by class: the first `n_sv[0]`
/// entries belong to `label[0]`, the remaining `n_sv[1]` to `label[1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    /// Formulation used during training.
    pub svm_type: SvmType,
    /// Kernel parameters used during training.
    pub kernel: KernelParams,
    /// Support vectors (sparse feature vectors).
    pub sv: Vec<Vec<SvmNode>>,
    /// One coefficient per support vector.
    pub sv_coef: Vec<f64>,
    /// Bias term of the single class pair.
    pub rho: f64,
    /// Class labels in the order used by the decision function.
    pub label: [i32; 2],
    /// Number of support vectors per class.
    pub n_sv: [usize; 2],
}

impl Classifier {
    /// Return total number of support vectors.
    pub fn support_vector_count(&self) -> usize {
        self.sv.len()
    }

    /// Highest feature index referenced by any support vector.
    pub fn max_feature_index(&self) -> i32 {
        self.sv
            .iter()
            .flat_map(|sv| sv.iter().map(|node| node.index))
            .max()
            .unwrap_or(0)
    }
}

/// The attrition outcome for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attrition {
    /// The employee is predicted to leave.
    Yes,
    /// The employee is predicted to stay.
    No,
}

impl Attrition {
    /// Map a classifier label to an outcome: `1` is attrition, `0` and the
    /// LIBSVM negative class `-1` are not. Any other label is `None`.
    pub fn from_class_label(label: i32) -> Option<Self> {
        match label {
            1 => Some(Attrition::Yes),
            0 | -1 => Some(Attrition::No),
            _ => None,
        }
    }

    /// Binary encoding used for metrics: `Yes = 1`, `No = 0`.
    pub fn as_binary(self) -> u8 {
        match self {
            Attrition::Yes => 1,
            Attrition::No => 0,
        }
    }

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Attrition::Yes => "Yes",
            Attrition::No => "No",
        }
    }
}

impl fmt::Display for Attrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attrition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Yes" => Ok(Attrition::Yes),
            "No" => Ok(Attrition::No),
            other => Err(format!("expected \"Yes\" or \"No\", got {:?}", other)),
        }
    }
}
