//! Trainable classifier with all-or-nothing publication
//!
//! [`BiradsClassifier`] owns the current [`ClassifierState`] behind an
//! `Arc`. A training run builds a complete new state and replaces the old
//! one only on success, so a failed run leaves the classifier exactly as it
//! was. Published states are immutable and can be shared across threads.

use crate::evaluate::{EvaluationReport, evaluate};
use crate::model::{Classification, ClassifierState};
use crate::train::{TrainOptions, train};
use crate::{ClassifyError, ClassifyResult};
use birads_core::{GrayImage, Rect};
use birads_io::{Corpus, CorpusOptions, load_corpus, load_gray_image};
use birads_texture::{FeatureVector, extract_features_with};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Side length of the default square classification region
pub const DEFAULT_REGION_SIZE: u32 = 128;

/// Square region of side [`DEFAULT_REGION_SIZE`] with its top-left corner at `(x, y)`.
pub fn default_region(x: u32, y: u32) -> ClassifyResult<Rect> {
    Ok(Rect::square(x, y, DEFAULT_REGION_SIZE)?)
}

/// BIRADS texture classifier
#[derive(Debug, Clone, Default)]
pub struct BiradsClassifier {
    options: TrainOptions,
    corpus_options: CorpusOptions,
    state: Option<Arc<ClassifierState>>,
}

impl BiradsClassifier {
    /// Create an untrained classifier with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an untrained classifier with the given training options
    pub fn with_options(options: TrainOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Set the corpus loading options
    pub fn with_corpus_options(mut self, corpus_options: CorpusOptions) -> Self {
        self.corpus_options = corpus_options;
        self
    }

    pub fn options(&self) -> &TrainOptions {
        &self.options
    }

    /// The published state, if training has succeeded
    pub fn state(&self) -> Option<Arc<ClassifierState>> {
        self.state.clone()
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Train on a loaded corpus and evaluate on its held-out images.
    ///
    /// On success the new state is published and the evaluation report is
    /// returned. On failure the previous state, if any, is kept.
    pub fn train(&mut self, corpus: &Corpus) -> ClassifyResult<EvaluationReport> {
        let outcome = train(corpus, &self.options)?;
        let report = evaluate(&outcome.state, &outcome.held_out);
        self.state = Some(Arc::new(outcome.state));
        info!(
            correct = report.confusion.correct(),
            evaluated = report.confusion.total(),
            "published classifier state"
        );
        Ok(report)
    }

    /// Load the corpus under `root` and train on it.
    pub fn train_from_dir<P: AsRef<Path>>(&mut self, root: P) -> ClassifyResult<EvaluationReport> {
        let corpus = load_corpus(root, &self.corpus_options)?;
        self.train(&corpus)
    }

    fn published(&self) -> ClassifyResult<&ClassifierState> {
        self.state.as_deref().ok_or(ClassifyError::UntrainedModel)
    }

    /// Classify a precomputed feature vector.
    pub fn classify(&self, features: &FeatureVector) -> ClassifyResult<Classification> {
        Ok(self.published()?.classify(features))
    }

    /// Classify a whole image.
    pub fn classify_image(&self, img: &GrayImage) -> ClassifyResult<Classification> {
        let state = self.published()?;
        let features = extract_features_with(img, &self.options.texture)?;
        Ok(state.classify(&features))
    }

    /// Read an image file and classify it.
    pub fn classify_file<P: AsRef<Path>>(&self, path: P) -> ClassifyResult<Classification> {
        self.published()?;
        let img = load_gray_image(path.as_ref())?;
        let result = self.classify_image(&img)?;
        debug!(path = %path.as_ref().display(), class = %result.class, "classified file");
        Ok(result)
    }

    /// Classify the part of `img` inside `region`.
    ///
    /// The region is clipped to the image; a region entirely outside the
    /// image is an [`ClassifyError::InvalidParameter`].
    pub fn classify_region(&self, img: &GrayImage, region: Rect) -> ClassifyResult<Classification> {
        self.published()?;
        let crop = img
            .crop(&region)
            .map_err(|e| ClassifyError::InvalidParameter(e.to_string()))?;
        self.classify_image(&crop)
    }
}
