//! Plate identifiers

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identifier of a physical labware plate
///
/// No structure is assumed beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct PlateId(String);

impl PlateId {
    /// Create a plate id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlateId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for PlateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PlateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
