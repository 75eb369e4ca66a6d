//! BIRADS category identifiers
//!
//! The classifier works with exactly four ordinal categories. On disk and in
//! reports they are numbered 1 to 4; internally every per-class table is
//! indexed 0 to 3. `ClassId` is the only place where the two numberings
//! meet.

use crate::error::{Error, Result};
use std::fmt;

/// Number of BIRADS categories handled by the classifier.
pub const NUM_CLASSES: usize = 4;

/// A BIRADS category, 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u8);

impl ClassId {
    /// All categories in ascending order.
    pub const ALL: [ClassId; NUM_CLASSES] = [ClassId(1), ClassId(2), ClassId(3), ClassId(4)];

    /// Create a class id from its 1-based label.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `label` is in `1..=4`.
    pub fn new(label: u8) -> Result<Self> {
        if (1..=NUM_CLASSES as u8).contains(&label) {
            Ok(ClassId(label))
        } else {
            Err(Error::InvalidParameter(format!(
                "class label must be in 1..={}, got {}",
                NUM_CLASSES, label
            )))
        }
    }

    /// Create a class id from a 0-based table index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= NUM_CLASSES`.
    pub fn from_index(index: usize) -> Self {
        assert!(index < NUM_CLASSES, "class index {} out of range", index);
        ClassId(index as u8 + 1)
    }

    /// The 1-based label (1 to 4).
    #[inline]
    pub fn label(self) -> u8 {
        self.0
    }

    /// The 0-based table index (0 to 3).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Name of the corpus subdirectory holding this class ("1" to "4").
    pub fn dir_name(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ClassId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let label: u8 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidParameter(format!("'{}' is not a class label", s)))?;
        ClassId::new(label)
    }
}
