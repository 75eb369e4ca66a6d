//! birads-test - Regression test framework and fixtures
//!
//! Provides the [`RegParams`] harness used by every `*_reg.rs` test, in one
//! of three modes:
//!
//! - **Generate**: Write golden files for later comparison
//! - **Compare**: Compare outputs with golden files when they exist (default)
//! - **Display**: Run without comparing outputs
//!
//! and the [`fixtures`] module, which draws seeded synthetic textures for
//! each BIRADS class and lays them out as an on-disk corpus.
//!
//! # Usage
//!
//! ```ignore
//! use birads_test::RegParams;
//!
//! let mut rp = RegParams::new("glcm");
//! rp.compare_values(961.0, contrast, 1e-9);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{CorpusFixture, synthetic_corpus, texture_image};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // birads-test is at crates/birads-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
