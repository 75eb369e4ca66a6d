//! birads-classify - Per-class Mahalanobis texture classification
//!
//! Each BIRADS class is modeled as a Gaussian over the 11 texture features
//! of its training images. A query is assigned to the class with the
//! smallest squared Mahalanobis distance.
//!
//! # Quick Start
//!
//! ```no_run
//! use birads_classify::{BiradsClassifier, TrainOptions};
//!
//! let mut classifier = BiradsClassifier::with_options(TrainOptions::new().with_seed(7));
//! let report = classifier.train_from_dir("corpus").unwrap();
//! println!("correct: {}", report.accuracy);
//!
//! let result = classifier.classify_file("query.png").unwrap();
//! println!("Class BIRADS: {}", result.class);
//! ```
//!
//! # Modules
//!
//! - [`linalg`]: mean, covariance, inversion and quadratic forms
//! - [`model`]: class models and the decision rule
//! - [`train`]: corpus split and model estimation
//! - [`evaluate`]: confusion matrix and evaluation report
//! - [`classifier`]: the trainable classifier

pub mod classifier;
mod error;
pub mod evaluate;
pub mod linalg;
pub mod model;
pub mod train;

pub use error::{ClassifyError, ClassifyResult};

pub use classifier::{BiradsClassifier, DEFAULT_REGION_SIZE, default_region};
pub use evaluate::{ClassMetrics, ConfusionMatrix, EvaluationReport, evaluate};
pub use model::{ClassModel, Classification, ClassifierState, MIN_SAMPLES_PER_CLASS};
pub use train::{TrainOptions, TrainingOutcome, train, train_count};

// Re-export dependencies for convenience
pub use birads_core;
pub use birads_io;
pub use birads_texture;
