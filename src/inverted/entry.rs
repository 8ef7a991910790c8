//! Inverted index entries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::concept::ConceptId;
use crate::error::{Result, TesauroError};

/// The concepts a single term belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Unique concept identifiers, sorted by their printed form.
    pub concept_ids: Vec<ConceptId>,
    /// `true` iff the term belongs to more than one concept.
    pub is_ambiguous: bool,
}

impl IndexEntry {
    /// Create an entry, sorting and deduplicating the identifiers.
    pub fn new(mut concept_ids: Vec<ConceptId>) -> Self {
        concept_ids.sort_unstable_by(ConceptId::cmp_printed);
        concept_ids.dedup();
        let is_ambiguous = concept_ids.len() > 1;
        Self {
            concept_ids,
            is_ambiguous,
        }
    }

    pub fn len(&self) -> usize {
        self.concept_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concept_ids.is_empty()
    }

    pub fn contains(&self, id: &ConceptId) -> bool {
        self.concept_ids
            .binary_search_by(|candidate| candidate.cmp_printed(id))
            .is_ok()
    }

    /// Check the format rules of a persisted entry.
    pub fn validate(&self, term: &str) -> Result<()> {
        if self.concept_ids.is_empty() {
            return Err(TesauroError::malformed(format!(
                "index entry '{term}' has no concept ids"
            )));
        }
        if self
            .concept_ids
            .windows(2)
            .any(|w| w[0].cmp_printed(&w[1]) != Ordering::Less)
        {
            return Err(TesauroError::malformed(format!(
                "index entry '{term}' has unsorted or duplicate concept ids"
            )));
        }
        if self.is_ambiguous != (self.concept_ids.len() > 1) {
            return Err(TesauroError::malformed(format!(
                "index entry '{term}' has is_ambiguous={} with {} concept ids",
                self.is_ambiguous,
                self.concept_ids.len()
            )));
        }
        Ok(())
    }
}
