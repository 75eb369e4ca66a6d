//! Seeded synthetic textures and on-disk corpora
//!
//! Each class gets a texture family that is easy to tell apart by its
//! co-occurrence statistics while still varying from image to image:
//!
//! | Class | Texture |
//! |---|---|
//! | 1 | flat field with faint noise |
//! | 2 | moderate noise around mid-gray |
//! | 3 | vertical bars, 2 pixels wide, with noise |
//! | 4 | full-range noise |

use crate::{TestError, TestResult};
use birads_core::{ClassId, GrayImage};
use birads_io::{ImageFormat, write_image};
use rand::SeedableRng;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn draw(rng: &mut StdRng, lo: i32, hi: i32) -> i32 {
    Uniform::new_inclusive(lo, hi)
        .map(|d| d.sample(rng))
        .unwrap_or(lo)
}

fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Draw one `size` x `size` texture of `class`.
pub fn texture_image(class: ClassId, size: u32, rng: &mut StdRng) -> TestResult<GrayImage> {
    let base = match class.label() {
        1 => draw(rng, 90, 110),
        2 => draw(rng, 110, 140),
        3 => draw(rng, 40, 70),
        _ => 0,
    };
    let amplitude = match class.label() {
        1 => draw(rng, 5, 8),
        2 => draw(rng, 28, 36),
        3 => draw(rng, 10, 16),
        _ => 0,
    };
    let bar = draw(rng, 120, 150);

    let img = GrayImage::from_fn(size, size, |x, _| match class.label() {
        1 | 2 => clamp_u8(base + draw(rng, -amplitude, amplitude)),
        3 => {
            let level = if (x / 2) % 2 == 0 { base } else { base + bar };
            clamp_u8(level + draw(rng, -amplitude, amplitude))
        }
        _ => clamp_u8(draw(rng, 0, 255)),
    })
    .map_err(|e| TestError::Fixture(e.to_string()))?;
    Ok(img)
}

/// A corpus written to a temporary directory, removed on drop
pub struct CorpusFixture {
    dir: TempDir,
    per_class: usize,
}

impl CorpusFixture {
    /// Corpus root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Directory of one class
    pub fn class_dir(&self, class: ClassId) -> PathBuf {
        self.dir.path().join(class.dir_name())
    }

    pub fn per_class(&self) -> usize {
        self.per_class
    }
}

/// Write `per_class` seeded textures of `size` pixels square for every
/// class into a fresh temporary directory.
///
/// Even-numbered files are PNG, odd-numbered files TIFF.
pub fn synthetic_corpus(per_class: usize, size: u32, seed: u64) -> TestResult<CorpusFixture> {
    let dir = TempDir::new()?;
    let mut rng = StdRng::seed_from_u64(seed);
    for class in ClassId::ALL {
        let class_dir = dir.path().join(class.dir_name());
        std::fs::create_dir(&class_dir)?;
        for i in 0..per_class {
            let img = texture_image(class, size, &mut rng)?;
            let (format, ext) = if i % 2 == 0 {
                (ImageFormat::Png, "png")
            } else {
                (ImageFormat::Tiff, "tif")
            };
            let path = class_dir.join(format!("img{:03}.{}", i, ext));
            write_image(&img, &path, format).map_err(|e| TestError::ImageWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        }
    }
    Ok(CorpusFixture { dir, per_class })
}
