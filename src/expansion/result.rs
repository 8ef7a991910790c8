//! Expansion results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::concept::{ConceptId, ConceptMap};

/// Which branch of the expansion a lookup took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionOutcome {
    /// The term is not indexed; search for it literally.
    NotFound,
    /// The term belongs to exactly one concept.
    Found,
    /// The term belongs to several concepts; all of them were expanded.
    Ambiguous,
}

/// The expansion of a single query term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionResult {
    /// The query term after trimming.
    pub original: String,
    pub found: bool,
    pub is_ambiguous: bool,
    /// Matching concepts in index order. Empty when not found.
    pub concept_ids: Vec<ConceptId>,
    /// Union of the members of every matching concept, or the literal term.
    pub expanded_terms: BTreeSet<String>,
    /// Boolean query ready for a search backend.
    pub query: String,
}

impl ExpansionResult {
    pub fn outcome(&self) -> ExpansionOutcome {
        match (self.found, self.is_ambiguous) {
            (false, _) => ExpansionOutcome::NotFound,
            (true, false) => ExpansionOutcome::Found,
            (true, true) => ExpansionOutcome::Ambiguous,
        }
    }

    /// Members of each matching concept, in concept order.
    ///
    /// Lets callers show the separate meanings of an ambiguous term without
    /// expanding it again.
    pub fn breakdown<'a>(&self, concepts: &'a ConceptMap) -> Vec<(ConceptId, &'a [String])> {
        self.concept_ids
            .iter()
            .filter_map(|id| concepts.get(id).map(|terms| (*id, terms)))
            .collect()
    }
}
