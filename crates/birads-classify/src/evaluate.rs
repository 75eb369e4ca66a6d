//! Confusion matrix and evaluation report
//!
//! [`EvaluationReport::accuracy`] is the raw count of correctly classified
//! held-out images and [`EvaluationReport::specificity`] is
//! `(100 - accuracy) / 300`. Both are kept in that literal form; the
//! normalized figures are available from [`ConfusionMatrix`].

use crate::model::ClassifierState;
use birads_core::{ClassId, NUM_CLASSES};
use birads_texture::FeatureVector;
use serde::Serialize;
use std::fmt;

/// Counts of `[true class][predicted class]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix([[u32; NUM_CLASSES]; NUM_CLASSES]);

/// Per-class figures derived from a confusion matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    /// Class label, 1 to 4
    pub class: u8,
    /// TP / (TP + FN); 0 if the class has no samples
    pub recall: f64,
    /// TP / (TP + FP); 0 if the class was never predicted
    pub precision: f64,
    /// TN / (TN + FP); 0 if every sample belongs to this class
    pub specificity: f64,
    /// Number of samples whose true class is this one
    pub support: u32,
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one sample of class `truth` predicted as `predicted`.
    pub fn record(&mut self, truth: ClassId, predicted: ClassId) {
        self.0[truth.index()][predicted.index()] += 1;
    }

    /// Count for `(truth, predicted)`.
    pub fn get(&self, truth: ClassId, predicted: ClassId) -> u32 {
        self.0[truth.index()][predicted.index()]
    }

    pub fn rows(&self) -> &[[u32; NUM_CLASSES]; NUM_CLASSES] {
        &self.0
    }

    /// Number of recorded samples
    pub fn total(&self) -> u32 {
        self.0.iter().flatten().sum()
    }

    /// Sum of the diagonal
    pub fn correct(&self) -> u32 {
        (0..NUM_CLASSES).map(|i| self.0[i][i]).sum()
    }

    /// `correct / total`, or 0 with no samples
    pub fn normalized_accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.correct() as f64 / total as f64
        }
    }

    /// Recall, precision and specificity of every class.
    pub fn class_metrics(&self) -> [ClassMetrics; NUM_CLASSES] {
        let total = self.total();
        ClassId::ALL.map(|class| {
            let c = class.index();
            let tp = self.0[c][c];
            let support: u32 = self.0[c].iter().sum();
            let predicted: u32 = (0..NUM_CLASSES).map(|r| self.0[r][c]).sum();
            let fp = predicted - tp;
            let tn = total - support - fp;
            ClassMetrics {
                class: class.label(),
                recall: ratio(tp, support),
                precision: ratio(tp, predicted),
                specificity: ratio(tn, tn + fp),
                support,
            }
        })
    }
}

fn ratio(num: u32, den: u32) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            write!(f, "|")?;
            for v in row {
                write!(f, " {v:02} |")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Result of classifying the held-out images
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub confusion: ConfusionMatrix,
    /// Raw diagonal sum of the confusion matrix
    pub accuracy: f64,
    /// `(100 - accuracy) / 300`
    pub specificity: f64,
}

impl EvaluationReport {
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let accuracy = confusion.correct() as f64;
        Self {
            confusion,
            accuracy,
            specificity: (100.0 - accuracy) / 300.0,
        }
    }
}

/// Classify each held-out feature vector and tally the results.
///
/// `held_out[i]` holds the vectors whose true class is `ClassId::from_index(i)`.
pub fn evaluate(
    state: &ClassifierState,
    held_out: &[Vec<FeatureVector>; NUM_CLASSES],
) -> EvaluationReport {
    let mut confusion = ConfusionMatrix::new();
    for (truth, vectors) in ClassId::ALL.into_iter().zip(held_out) {
        for v in vectors {
            confusion.record(truth, state.classify(v).class);
        }
    }
    EvaluationReport::from_confusion(confusion)
}
