//! Per-class Gaussian models and the Mahalanobis decision rule

use crate::linalg::{self, Matrix};
use crate::{ClassifyError, ClassifyResult};
use birads_core::{ClassId, NUM_CLASSES};
use birads_texture::{FEATURE_DIM, FeatureVector};
use tracing::warn;

/// Minimum number of samples for a full-rank covariance without ridge
pub const MIN_SAMPLES_PER_CLASS: usize = FEATURE_DIM + 1;

/// Mean and covariance of one class's training features
#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel {
    class: ClassId,
    mean: FeatureVector,
    covariance: Matrix<FEATURE_DIM>,
    inverse_covariance: Matrix<FEATURE_DIM>,
}

impl ClassModel {
    /// Build a model from a precomputed mean and covariance.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::SingularCovariance`] if `covariance` cannot
    /// be inverted.
    pub fn from_moments(
        class: ClassId,
        mean: FeatureVector,
        covariance: Matrix<FEATURE_DIM>,
    ) -> ClassifyResult<Self> {
        let Some(inverse_covariance) = linalg::invert_covariance(&covariance) else {
            return Err(singular(class, &singular_cause(&covariance)));
        };
        Ok(Self {
            class,
            mean,
            covariance,
            inverse_covariance,
        })
    }

    /// Estimate a model from training samples.
    ///
    /// `ridge` is added to the covariance diagonal before inversion. With
    /// `ridge == 0` at least [`MIN_SAMPLES_PER_CLASS`] samples are required;
    /// with a positive ridge two samples suffice.
    pub fn fit(class: ClassId, samples: &[FeatureVector], ridge: f64) -> ClassifyResult<Self> {
        let required = if ridge > 0.0 { 2 } else { MIN_SAMPLES_PER_CLASS };
        if samples.len() < required {
            let cause = format!("{} training samples, {} required", samples.len(), required);
            return Err(singular(class, &cause));
        }
        let rows: Vec<[f64; FEATURE_DIM]> = samples.iter().map(|v| *v.as_array()).collect();
        let mean = linalg::mean(&rows);
        let mut covariance = linalg::covariance(&rows, &mean);
        if ridge > 0.0 {
            linalg::add_ridge(&mut covariance, ridge);
        }
        Self::from_moments(class, FeatureVector::from(mean), covariance)
    }

    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn mean(&self) -> &FeatureVector {
        &self.mean
    }

    pub fn covariance(&self) -> &Matrix<FEATURE_DIM> {
        &self.covariance
    }

    pub fn inverse_covariance(&self) -> &Matrix<FEATURE_DIM> {
        &self.inverse_covariance
    }

    /// Squared Mahalanobis distance of `v` from this class.
    pub fn distance(&self, v: &FeatureVector) -> f64 {
        let mut diff = [0.0; FEATURE_DIM];
        for (d, (&x, &m)) in diff
            .iter_mut()
            .zip(v.as_array().iter().zip(self.mean.as_array()))
        {
            *d = x - m;
        }
        // rounding can push a zero distance slightly negative
        linalg::quadratic_form(&self.inverse_covariance, &diff).max(0.0)
    }
}

fn singular(class: ClassId, cause: &str) -> ClassifyError {
    warn!(class = %class, cause, "class covariance is singular");
    ClassifyError::SingularCovariance { class }
}

/// Why `cov` could not be inverted.
fn singular_cause(cov: &Matrix<FEATURE_DIM>) -> String {
    match (0..FEATURE_DIM).find(|&i| !(cov[i][i] > 0.0 && cov[i][i].is_finite())) {
        Some(i) => format!("feature {} has no usable variance", i),
        None => "features are linearly dependent".to_string(),
    }
}

/// Outcome of classifying one feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Class with the smallest distance
    pub class: ClassId,
    /// Squared Mahalanobis distance to each class, in class order
    pub distances: [f64; NUM_CLASSES],
}

impl Classification {
    /// Distance to `class`.
    pub fn distance(&self, class: ClassId) -> f64 {
        self.distances[class.index()]
    }
}

/// The four trained class models, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierState {
    models: [ClassModel; NUM_CLASSES],
}

impl ClassifierState {
    /// Bundle four models ordered class 1 to 4.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::InvalidParameter`] if the models are not in
    /// class order.
    pub fn from_models(models: [ClassModel; NUM_CLASSES]) -> ClassifyResult<Self> {
        for (model, expected) in models.iter().zip(ClassId::ALL) {
            if model.class != expected {
                return Err(ClassifyError::InvalidParameter(format!(
                    "model for class {} found in slot of class {}",
                    model.class, expected
                )));
            }
        }
        Ok(Self { models })
    }

    /// Model of one class.
    pub fn model(&self, class: ClassId) -> &ClassModel {
        &self.models[class.index()]
    }

    pub fn models(&self) -> &[ClassModel; NUM_CLASSES] {
        &self.models
    }

    /// Assign `v` to the class with the smallest Mahalanobis distance.
    ///
    /// Equal distances resolve to the lower class.
    pub fn classify(&self, v: &FeatureVector) -> Classification {
        let distances = self.models.each_ref().map(|m| m.distance(v));
        let mut best = 0;
        for (i, &d) in distances.iter().enumerate().skip(1) {
            if d < distances[best] {
                best = i;
            }
        }
        Classification {
            class: ClassId::from_index(best),
            distances,
        }
    }
}
