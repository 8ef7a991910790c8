//! The published thesaurus: a concept map and its inverted index.
//!
//! A [`Thesaurus`] is only constructed from a consistent pair, either by
//! deriving the index itself or by validating a loaded one. After that it is
//! read-only and can be shared across threads; [`ThesaurusHandle`] swaps in a
//! freshly built one without disturbing readers.

pub mod handle;

pub use handle::ThesaurusHandle;

use rayon::prelude::*;

use crate::concept::{ConceptId, ConceptMap};
use crate::error::Result;
use crate::expansion::{self, ExpansionResult};
use crate::inverted::InvertedIndex;

/// Immutable, validated concept map + inverted index pair.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    concepts: ConceptMap,
    index: InvertedIndex,
}

impl Thesaurus {
    /// Derive the index from a concept map.
    pub fn build(concepts: ConceptMap) -> Self {
        let index = InvertedIndex::build(&concepts);
        Self { concepts, index }
    }

    /// Pair a concept map with an index built elsewhere, checking that the
    /// two agree.
    pub fn new(concepts: ConceptMap, index: InvertedIndex) -> Result<Self> {
        concepts.validate()?;
        index.validate_against(&concepts)?;
        Ok(Self { concepts, index })
    }

    pub fn concepts(&self) -> &ConceptMap {
        &self.concepts
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Member terms of a concept.
    pub fn concept_terms(&self, id: &ConceptId) -> Option<&[String]> {
        self.concepts.get(id)
    }

    /// Expand a single query term.
    pub fn expand(&self, term: &str) -> Result<ExpansionResult> {
        expansion::expand(term, &self.concepts, &self.index)
    }

    /// Expand many terms in parallel. Results keep the input order.
    pub fn expand_batch<S>(&self, terms: &[S]) -> Result<Vec<ExpansionResult>>
    where
        S: AsRef<str> + Sync,
    {
        terms
            .par_iter()
            .map(|term| self.expand(term.as_ref()))
            .collect()
    }

    /// Split into the concept map and index.
    pub fn into_parts(self) -> (ConceptMap, InvertedIndex) {
        (self.concepts, self.index)
    }
}
