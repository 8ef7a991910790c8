//! Term to concept inverted index.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::concept::{ConceptId, ConceptMap};
use crate::error::{Result, TesauroError};
use crate::inverted::entry::IndexEntry;

/// Maps each term to the concepts that contain it.
///
/// Keys are kept in plain (case-sensitive) string order so serialized output
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    #[serde(deserialize_with = "crate::storage::deserialize_unique_map")]
    entries: BTreeMap<String, IndexEntry>,
}

impl InvertedIndex {
    /// Build the index from a concept map. Pure and idempotent.
    pub fn build(concepts: &ConceptMap) -> Self {
        let mut owners: BTreeMap<String, Vec<ConceptId>> = BTreeMap::new();
        for (id, terms) in concepts {
            for term in terms {
                let term = term.trim();
                if term.is_empty() {
                    continue;
                }
                owners.entry(term.to_string()).or_default().push(*id);
            }
        }

        let entries: BTreeMap<String, IndexEntry> = owners
            .into_iter()
            .map(|(term, ids)| (term, IndexEntry::new(ids)))
            .collect();

        debug!(
            "Indexed {} terms from {} concepts",
            entries.len(),
            concepts.len()
        );

        Self { entries }
    }

    /// Look up a term exactly as given.
    pub fn get(&self, term: &str) -> Option<&IndexEntry> {
        self.entries.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    /// Whether a term belongs to more than one concept. Unknown terms are not ambiguous.
    pub fn is_ambiguous(&self, term: &str) -> bool {
        self.get(term).is_some_and(|entry| entry.is_ambiguous)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(term, entry)| (term.as_str(), entry))
    }

    /// Terms that belong to more than one concept, in key order.
    pub fn ambiguous_terms(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.iter().filter(|(_, entry)| entry.is_ambiguous)
    }

    /// Number of indexed terms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check the format rules of a persisted index.
    pub fn validate(&self) -> Result<()> {
        for (term, entry) in &self.entries {
            if term.is_empty() || term.trim() != term {
                return Err(TesauroError::malformed(format!(
                    "index key '{term}' is empty or untrimmed"
                )));
            }
            entry.validate(term)?;
        }
        Ok(())
    }

    /// Check that this index was built from `concepts`.
    ///
    /// Every referenced concept must exist and list the term, and every
    /// (concept, term) membership must be indexed. A failure means the two
    /// structures come from different snapshots.
    pub fn validate_against(&self, concepts: &ConceptMap) -> Result<()> {
        self.validate()?;

        for (term, entry) in &self.entries {
            for id in &entry.concept_ids {
                let members = concepts.get(id).ok_or_else(|| {
                    TesauroError::invariant(format!(
                        "index entry '{term}' references unknown concept {id}"
                    ))
                })?;
                if !members.iter().any(|member| member == term) {
                    return Err(TesauroError::invariant(format!(
                        "index entry '{term}' references {id}, which does not contain it"
                    )));
                }
            }
        }

        for (id, terms) in concepts {
            for term in terms {
                let indexed = self.get(term).is_some_and(|entry| entry.contains(id));
                if !indexed {
                    return Err(TesauroError::invariant(format!(
                        "term '{term}' of concept {id} is missing from the index"
                    )));
                }
            }
        }

        Ok(())
    }
}
