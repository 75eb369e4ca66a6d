//! Labeled training corpus
//!
//! A corpus root holds one subdirectory per BIRADS class, named `1` through
//! `4`. Each subdirectory contains the training images of that class:
//!
//! ```text
//! root/
//!   1/ a.png b.png ...
//!   2/ ...
//!   3/ ...
//!   4/ ...
//! ```
//!
//! Only files whose extension is in [`CorpusOptions::extensions`] are read.
//! Images are decoded eagerly so that a bad file is reported before any
//! training starts.

use crate::{IoError, IoResult, load_gray_image};
use birads_core::{ClassId, GrayImage, NUM_CLASSES};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options controlling which files the corpus loader accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusOptions {
    /// Accepted file extensions, compared case-insensitively, without dot.
    pub extensions: Vec<String>,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["png".to_string(), "tif".to_string()],
        }
    }
}

impl CorpusOptions {
    /// Create options with the default extension list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an additional extension.
    pub fn with_extension(mut self, ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if !self.extensions.contains(&ext) {
            self.extensions.push(ext);
        }
        self
    }

    /// Replace the extension list.
    pub fn with_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = exts
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Check that at least one non-empty extension is configured.
    pub fn validate(&self) -> IoResult<()> {
        if self.extensions.is_empty() || self.extensions.iter().any(|e| e.is_empty()) {
            return Err(IoError::InvalidData(
                "corpus extensions must be a non-empty list of non-empty names".to_string(),
            ));
        }
        Ok(())
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }
}

/// A decoded training image and the file it came from.
#[derive(Debug, Clone)]
pub struct TrainingImage {
    pub path: PathBuf,
    pub image: GrayImage,
}

impl TrainingImage {
    pub fn new(path: impl Into<PathBuf>, image: GrayImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }
}

/// All training images of one class, in file-name order.
#[derive(Debug, Clone)]
pub struct ClassCorpus {
    pub class: ClassId,
    pub images: Vec<TrainingImage>,
}

impl ClassCorpus {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// The four class corpora, indexed by class.
#[derive(Debug, Clone)]
pub struct Corpus {
    classes: [ClassCorpus; NUM_CLASSES],
}

impl Corpus {
    /// Build a corpus from per-class image lists, ordered class 1 to 4.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Dataset`] if any class has no images.
    pub fn from_classes(images: [Vec<TrainingImage>; NUM_CLASSES]) -> IoResult<Self> {
        let mut idx = 0;
        let classes = images.map(|images| {
            let class = ClassId::from_index(idx);
            idx += 1;
            ClassCorpus { class, images }
        });
        if let Some(empty) = classes.iter().find(|c| c.is_empty()) {
            return Err(IoError::Dataset {
                path: empty.class.dir_name(),
                message: "class has no images".to_string(),
            });
        }
        Ok(Self { classes })
    }

    /// Images of one class.
    pub fn class(&self, class: ClassId) -> &ClassCorpus {
        &self.classes[class.index()]
    }

    /// Iterate over the class corpora in class order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassCorpus> {
        self.classes.iter()
    }

    /// Total number of images across all classes.
    pub fn total_images(&self) -> usize {
        self.classes.iter().map(ClassCorpus::len).sum()
    }
}

/// Load a labeled corpus from `root`.
///
/// # Errors
///
/// - [`IoError::Dataset`] if `root` is not a directory, a class
///   subdirectory is missing, or a class has no eligible files.
/// - [`IoError::UnsupportedImage`] if an eligible file cannot be decoded.
pub fn load_corpus<P: AsRef<Path>>(root: P, options: &CorpusOptions) -> IoResult<Corpus> {
    let root = root.as_ref();
    options.validate()?;
    if !root.is_dir() {
        return Err(dataset_error(root, "corpus root is not a directory"));
    }

    let mut per_class: [Vec<TrainingImage>; NUM_CLASSES] = Default::default();
    for class in ClassId::ALL {
        let dir = root.join(class.dir_name());
        if !dir.is_dir() {
            return Err(dataset_error(&dir, "class directory is missing"));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir).map_err(|e| dataset_error(&dir, &e.to_string()))? {
            let path = entry.map_err(|e| dataset_error(&dir, &e.to_string()))?.path();
            if path.is_file() && options.accepts(&path) {
                files.push(path);
            } else {
                debug!(path = %path.display(), "skipping corpus entry");
            }
        }
        if files.is_empty() {
            return Err(dataset_error(&dir, "class directory has no eligible images"));
        }
        files.sort();

        let images = &mut per_class[class.index()];
        for path in files {
            let image = load_gray_image(&path)?;
            images.push(TrainingImage::new(path, image));
        }
        debug!(class = %class, count = images.len(), "loaded class images");
    }

    let corpus = Corpus::from_classes(per_class)?;
    info!(
        root = %root.display(),
        total = corpus.total_images(),
        "loaded training corpus"
    );
    Ok(corpus)
}

fn dataset_error(path: &Path, message: &str) -> IoError {
    IoError::Dataset {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageFormat, write_image};
    use tempfile::TempDir;

    fn make_root(per_class: usize) -> TempDir {
        let dir = TempDir::new().unwrap();
        for class in ClassId::ALL {
            let class_dir = dir.path().join(class.dir_name());
            std::fs::create_dir(&class_dir).unwrap();
            for i in 0..per_class {
                let img = GrayImage::from_fn(8, 8, |x, y| (x + y) as u8 * class.label()).unwrap();
                write_image(&img, class_dir.join(format!("img{i}.png")), ImageFormat::Png)
                    .unwrap();
            }
        }
        dir
    }

    #[test]
    fn test_load_counts_and_order() {
        let dir = make_root(3);
        let corpus = load_corpus(dir.path(), &CorpusOptions::default()).unwrap();
        assert_eq!(corpus.total_images(), 12);
        for class in corpus.iter() {
            assert_eq!(class.len(), 3);
            let names: Vec<_> = class
                .images
                .iter()
                .map(|t| t.path.file_name().unwrap().to_string_lossy().into_owned())
                .collect();
            assert_eq!(names, ["img0.png", "img1.png", "img2.png"]);
        }
    }

    #[test]
    fn test_ignores_other_extensions() {
        let dir = make_root(2);
        std::fs::write(dir.path().join("1").join("notes.txt"), b"hello").unwrap();
        let corpus = load_corpus(dir.path(), &CorpusOptions::default()).unwrap();
        assert_eq!(corpus.class(ClassId::ALL[0]).len(), 2);
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = make_root(1);
        let img = GrayImage::new(4, 4).unwrap();
        write_image(&img, dir.path().join("2").join("UPPER.PNG"), ImageFormat::Png).unwrap();
        let corpus = load_corpus(dir.path(), &CorpusOptions::default()).unwrap();
        assert_eq!(corpus.class(ClassId::ALL[1]).len(), 2);
    }

    #[test]
    fn test_missing_class_dir() {
        let dir = make_root(1);
        std::fs::remove_dir_all(dir.path().join("3")).unwrap();
        let err = load_corpus(dir.path(), &CorpusOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Dataset { .. }));
    }

    #[test]
    fn test_empty_class_dir() {
        let dir = make_root(1);
        std::fs::remove_file(dir.path().join("4").join("img0.png")).unwrap();
        let err = load_corpus(dir.path(), &CorpusOptions::default()).unwrap_err();
        match err {
            IoError::Dataset { path, .. } => assert!(path.ends_with('4')),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_root_not_dir() {
        let err = load_corpus("/nonexistent/corpus/root", &CorpusOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::Dataset { .. }));
    }

    #[test]
    fn test_undecodable_file() {
        let dir = make_root(1);
        std::fs::write(dir.path().join("1").join("broken.png"), b"not a png").unwrap();
        let err = load_corpus(dir.path(), &CorpusOptions::default()).unwrap_err();
        match err {
            IoError::UnsupportedImage { path, .. } => assert!(path.ends_with("broken.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_options() {
        let opts = CorpusOptions::new().with_extension(".JPG");
        assert_eq!(opts.extensions, ["png", "tif", "jpg"]);
        assert!(CorpusOptions::new().with_extensions(Vec::<String>::new()).validate().is_err());
    }

    #[test]
    fn test_from_classes_rejects_empty() {
        let img = TrainingImage::new("a.png", GrayImage::new(2, 2).unwrap());
        let err = Corpus::from_classes([vec![img.clone()], vec![img.clone()], vec![], vec![img]])
            .unwrap_err();
        assert!(matches!(err, IoError::Dataset { .. }));
    }
}
