//! Training: corpus split, feature extraction and model estimation
//!
//! Each class's image list is shuffled and cut at the training fraction
//! (75% by default). Features of the training part estimate the class
//! model; the held-out part is returned for evaluation. Either all four
//! models are built or the run fails with the first error.

use crate::model::{ClassModel, ClassifierState};
use crate::{ClassifyError, ClassifyResult};
use birads_core::{ClassId, NUM_CLASSES};
use birads_io::{Corpus, TrainingImage};
use birads_texture::{FeatureVector, TextureOptions, extract_features_with};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Options for a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOptions {
    /// Fraction of each class used for training (default: 0.75)
    pub train_fraction: f64,

    /// Value added to each covariance diagonal before inversion (default: 0.0)
    pub ridge: f64,

    /// Shuffle seed; `None` shuffles non-deterministically (default: None)
    pub seed: Option<u64>,

    /// Extract features on the rayon thread pool (default: true)
    pub parallel: bool,

    /// Texture extraction parameters
    pub texture: TextureOptions,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            train_fraction: 0.75,
            ridge: 0.0,
            seed: None,
            parallel: true,
            texture: TextureOptions::default(),
        }
    }
}

impl TrainOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the training fraction
    pub fn with_train_fraction(mut self, fraction: f64) -> Self {
        self.train_fraction = fraction;
        self
    }

    /// Set the covariance ridge
    pub fn with_ridge(mut self, ridge: f64) -> Self {
        self.ridge = ridge;
        self
    }

    /// Set the shuffle seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable parallel feature extraction
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the texture options
    pub fn with_texture(mut self, texture: TextureOptions) -> Self {
        self.texture = texture;
        self
    }

    /// Validate options
    pub fn validate(&self) -> ClassifyResult<()> {
        if !(self.train_fraction > 0.0 && self.train_fraction <= 1.0) {
            return Err(ClassifyError::InvalidParameter(format!(
                "train_fraction must be in (0, 1], got {}",
                self.train_fraction
            )));
        }
        if !(self.ridge >= 0.0 && self.ridge.is_finite()) {
            return Err(ClassifyError::InvalidParameter(format!(
                "ridge must be a non-negative finite number, got {}",
                self.ridge
            )));
        }
        self.texture.validate()?;
        Ok(())
    }
}

/// Number of training images out of `total`.
///
/// Halves round to even, so 2 of 3 and 2 of 2 at 0.75.
pub fn train_count(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).round_ties_even() as usize).min(total)
}

/// One class's images divided into training and held-out parts
#[derive(Debug, Clone)]
pub struct ClassSplit<'a> {
    pub class: ClassId,
    pub train: Vec<&'a TrainingImage>,
    pub held_out: Vec<&'a TrainingImage>,
}

/// Shuffle each class and cut it at the training fraction.
pub fn split_corpus<'a>(
    corpus: &'a Corpus,
    options: &TrainOptions,
) -> [ClassSplit<'a>; NUM_CLASSES] {
    let mut orders: [Vec<usize>; NUM_CLASSES] =
        ClassId::ALL.map(|c| (0..corpus.class(c).len()).collect());
    match options.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            for order in &mut orders {
                order.shuffle(&mut rng);
            }
        }
        None => {
            let mut rng = rand::rng();
            for order in &mut orders {
                order.shuffle(&mut rng);
            }
        }
    }

    let mut idx = 0;
    orders.map(|order| {
        let class = ClassId::from_index(idx);
        idx += 1;
        let images = &corpus.class(class).images;
        let cut = train_count(order.len(), options.train_fraction);
        let mut shuffled = order.into_iter().map(|i| &images[i]);
        let train: Vec<_> = shuffled.by_ref().take(cut).collect();
        let held_out: Vec<_> = shuffled.collect();
        ClassSplit {
            class,
            train,
            held_out,
        }
    })
}

/// Extract features of `images`, preserving order.
pub fn extract_all(
    images: &[&TrainingImage],
    texture: &TextureOptions,
    parallel: bool,
) -> ClassifyResult<Vec<FeatureVector>> {
    #[cfg(feature = "parallel")]
    if parallel {
        return images
            .par_iter()
            .map(|t| extract_features_with(&t.image, texture).map_err(ClassifyError::from))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    images
        .iter()
        .map(|t| extract_features_with(&t.image, texture).map_err(ClassifyError::from))
        .collect()
}

/// Estimate all four class models from per-class training features.
///
/// # Errors
///
/// Returns [`ClassifyError::SingularCovariance`] for the first class whose
/// covariance cannot be inverted; no state is produced in that case.
pub fn fit_models(
    features: &[Vec<FeatureVector>; NUM_CLASSES],
    ridge: f64,
) -> ClassifyResult<ClassifierState> {
    let mut models = Vec::with_capacity(NUM_CLASSES);
    for (class, samples) in ClassId::ALL.into_iter().zip(features) {
        let model = ClassModel::fit(class, samples, ridge)?;
        debug!(class = %class, samples = samples.len(), "fitted class model");
        models.push(model);
    }
    let models: [ClassModel; NUM_CLASSES] = models
        .try_into()
        .map_err(|_| ClassifyError::InvalidParameter("expected four class models".to_string()))?;
    ClassifierState::from_models(models)
}

/// Trained state plus the held-out features of each class
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub state: ClassifierState,
    pub held_out: [Vec<FeatureVector>; NUM_CLASSES],
}

/// Split the corpus, extract features and fit the class models.
pub fn train(corpus: &Corpus, options: &TrainOptions) -> ClassifyResult<TrainingOutcome> {
    options.validate()?;
    let splits = split_corpus(corpus, options);

    let mut train_features: [Vec<FeatureVector>; NUM_CLASSES] = Default::default();
    let mut held_out: [Vec<FeatureVector>; NUM_CLASSES] = Default::default();
    for split in &splits {
        let i = split.class.index();
        train_features[i] = extract_all(&split.train, &options.texture, options.parallel)?;
        held_out[i] = extract_all(&split.held_out, &options.texture, options.parallel)?;
        if split.held_out.is_empty() {
            warn!(class = %split.class, "class has no held-out images");
        }
        debug!(
            class = %split.class,
            train = split.train.len(),
            held_out = split.held_out.len(),
            "extracted class features"
        );
    }

    let state = fit_models(&train_features, options.ridge)?;
    info!(
        images = corpus.total_images(),
        seed = ?options.seed,
        ridge = options.ridge,
        "trained class models"
    );
    Ok(TrainingOutcome { state, held_out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use birads_core::GrayImage;

    fn tiny_corpus(per_class: [usize; NUM_CLASSES]) -> Corpus {
        let mut n = 0u32;
        let classes = per_class.map(|count| {
            (0..count)
                .map(|_| {
                    n += 1;
                    let img = GrayImage::from_fn(4, 4, |x, y| ((x + y + n) * 9) as u8).unwrap();
                    TrainingImage::new(format!("img{n}.png"), img)
                })
                .collect()
        });
        Corpus::from_classes(classes).unwrap()
    }

    #[test]
    fn test_train_count_rounding() {
        assert_eq!(train_count(100, 0.75), 75);
        assert_eq!(train_count(16, 0.75), 12);
        assert_eq!(train_count(2, 0.75), 2); // 1.5 -> 2
        assert_eq!(train_count(10, 0.75), 8); // 7.5 -> 8
        assert_eq!(train_count(6, 0.75), 4); // 4.5 -> 4
        assert_eq!(train_count(3, 1.0), 3);
    }

    #[test]
    fn test_split_partitions_each_class() {
        let corpus = tiny_corpus([8, 10, 4, 5]);
        let opts = TrainOptions::new().with_seed(3);
        for split in split_corpus(&corpus, &opts) {
            let total = corpus.class(split.class).len();
            assert_eq!(split.train.len(), train_count(total, 0.75));
            assert_eq!(split.train.len() + split.held_out.len(), total);
            let mut paths: Vec<_> = split
                .train
                .iter()
                .chain(&split.held_out)
                .map(|t| t.path.clone())
                .collect();
            paths.sort();
            paths.dedup();
            assert_eq!(paths.len(), total);
        }
    }

    #[test]
    fn test_seeded_split_reproducible() {
        let corpus = tiny_corpus([12, 12, 12, 12]);
        let opts = TrainOptions::new().with_seed(42);
        let a = split_corpus(&corpus, &opts);
        let b = split_corpus(&corpus, &opts);
        for (sa, sb) in a.iter().zip(&b) {
            let pa: Vec<_> = sa.train.iter().map(|t| &t.path).collect();
            let pb: Vec<_> = sb.train.iter().map(|t| &t.path).collect();
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let corpus = tiny_corpus([6, 1, 1, 1]);
        let refs: Vec<_> = corpus.class(ClassId::ALL[0]).images.iter().collect();
        let texture = TextureOptions::default();
        let seq = extract_all(&refs, &texture, false).unwrap();
        let par = extract_all(&refs, &texture, true).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_too_few_images_is_singular() {
        let corpus = tiny_corpus([8, 20, 20, 20]);
        let err = train(&corpus, &TrainOptions::new().with_seed(1)).unwrap_err();
        match err {
            ClassifyError::SingularCovariance { class } => assert_eq!(class, ClassId::ALL[0]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_options() {
        assert!(TrainOptions::new().with_train_fraction(0.0).validate().is_err());
        assert!(TrainOptions::new().with_train_fraction(1.5).validate().is_err());
        assert!(TrainOptions::new().with_ridge(-1.0).validate().is_err());
        assert!(TrainOptions::new().with_ridge(f64::NAN).validate().is_err());
        assert!(TrainOptions::new().validate().is_ok());
    }
}
