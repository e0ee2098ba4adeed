//! Kernel evaluation over sparse scaled feature vectors.
//!
//! Vectors are slices of [`SvmNode`] sorted by ascending index, as produced
//! by [`crate::scale::FeatureScaler::transform`] and stored in model files.

use crate::types::{KernelParams, KernelType, SvmNode};

/// Sparse dot product of two index-sorted vectors (merge walk).
#[inline]
pub fn dot(x: &[SvmNode], y: &[SvmNode]) -> f64 {
    let mut sum = 0.0;
    let (mut ix, mut iy) = (0, 0);
    while ix < x.len() && iy < y.len() {
        match x[ix].index.cmp(&y[iy].index) {
            std::cmp::Ordering::Equal => {
                sum += x[ix].value * y[iy].value;
                ix += 1;
                iy += 1;
            }
            std::cmp::Ordering::Greater => iy += 1,
            std::cmp::Ordering::Less => ix += 1,
        }
    }
    sum
}

/// Squared Euclidean distance ‖x − y‖² without materializing the difference.
#[inline]
pub fn sq_dist(x: &[SvmNode], y: &[SvmNode]) -> f64 {
    let mut sum = 0.0;
    let (mut ix, mut iy) = (0, 0);
    while ix < x.len() && iy < y.len() {
        match x[ix].index.cmp(&y[iy].index) {
            std::cmp::Ordering::Equal => {
                let d = x[ix].value - y[iy].value;
                sum += d * d;
                ix += 1;
                iy += 1;
            }
            std::cmp::Ordering::Greater => {
                sum += y[iy].value * y[iy].value;
                iy += 1;
            }
            std::cmp::Ordering::Less => {
                sum += x[ix].value * x[ix].value;
                ix += 1;
            }
        }
    }
    sum += x[ix..].iter().map(|n| n.value * n.value).sum::<f64>();
    sum += y[iy..].iter().map(|n| n.value * n.value).sum::<f64>();
    sum
}

impl KernelParams {
    /// Evaluate K(x, y).
    ///
    /// A negative polynomial degree evaluates to 1, as in LIBSVM.
    pub fn evaluate(&self, x: &[SvmNode], y: &[SvmNode]) -> f64 {
        match self.kernel_type {
            KernelType::Linear => dot(x, y),
            KernelType::Polynomial => {
                (self.gamma * dot(x, y) + self.coef0).powi(self.degree.max(0))
            }
            KernelType::Rbf => (-self.gamma * sq_dist(x, y)).exp(),
            KernelType::Sigmoid => (self.gamma * dot(x, y) + self.coef0).tanh(),
        }
    }
}
