//! Concept identifiers.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, TesauroError};

/// Stable identifier of a concept: `C0001`, `C0002`, ...
///
/// Identifiers are 1-based and follow creation order. They print zero-padded
/// to four digits and keep growing past `C9999` (`C10000`). [`Ord`] follows
/// the ordinal, which is the key order of a concept map. Index entries list
/// their ids in printed order instead, see [`ConceptId::cmp_printed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptId(u32);

impl ConceptId {
    /// Create an identifier from its 1-based ordinal.
    pub fn from_ordinal(ordinal: u32) -> Result<Self> {
        if ordinal == 0 {
            return Err(TesauroError::invalid_argument(
                "concept ordinals start at 1",
            ));
        }
        Ok(ConceptId(ordinal))
    }

    /// The 1-based ordinal of this identifier.
    pub fn ordinal(&self) -> u32 {
        self.0
    }

    /// Compare the printed forms, so `C10000` sorts before `C9999`.
    pub fn cmp_printed(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{:04}", self.0)
    }
}

impl FromStr for ConceptId {
    type Err = TesauroError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix('C')
            .ok_or_else(|| TesauroError::malformed(format!("concept id '{s}' must start with 'C'")))?;

        if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TesauroError::malformed(format!(
                "concept id '{s}' must be 'C' followed by at least four digits"
            )));
        }

        let ordinal: u32 = digits
            .parse()
            .map_err(|e| TesauroError::malformed(format!("concept id '{s}': {e}")))?;
        let id = ConceptId::from_ordinal(ordinal)
            .map_err(|_| TesauroError::malformed(format!("concept id '{s}' has ordinal 0")))?;

        // Reject non-canonical spellings such as C00012.
        if id.to_string() != s {
            return Err(TesauroError::malformed(format!(
                "concept id '{s}' is not zero-padded to exactly four digits"
            )));
        }

        Ok(id)
    }
}

impl Serialize for ConceptId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ConceptId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}
