//! Summary statistics over a concept map and an inverted index.

use serde::{Deserialize, Serialize};

use crate::concept::{ConceptId, ConceptMap};
use crate::inverted::InvertedIndex;
use crate::term::presentation_cmp;

/// A term that belongs to more than one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguousTerm {
    pub term: String,
    pub concept_ids: Vec<ConceptId>,
}

/// Statistics about a concept map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptMapReport {
    pub total_concepts: usize,
    pub average_terms: f64,
    pub max_terms: usize,
    pub min_terms: usize,
    /// Ordered case-insensitively by term.
    pub ambiguous_terms: Vec<AmbiguousTerm>,
}

impl ConceptMapReport {
    pub fn new(concepts: &ConceptMap) -> Self {
        let sizes: Vec<usize> = concepts.iter().map(|(_, terms)| terms.len()).collect();
        let total_concepts = sizes.len();
        let average_terms = if total_concepts == 0 {
            0.0
        } else {
            sizes.iter().sum::<usize>() as f64 / total_concepts as f64
        };

        let mut ambiguous_terms: Vec<AmbiguousTerm> = concepts
            .shared_terms()
            .into_iter()
            .map(|(term, concept_ids)| AmbiguousTerm { term, concept_ids })
            .collect();
        ambiguous_terms.sort_by(|a, b| presentation_cmp(&a.term, &b.term));

        Self {
            total_concepts,
            average_terms,
            max_terms: sizes.iter().copied().max().unwrap_or(0),
            min_terms: sizes.iter().copied().min().unwrap_or(0),
            ambiguous_terms,
        }
    }
}

/// Statistics about an inverted index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    pub total_terms: usize,
    pub unambiguous_terms: usize,
    pub ambiguous_terms: usize,
    /// First term, in key order, that reaches `max_concepts_per_term`.
    pub most_ambiguous_term: Option<String>,
    pub max_concepts_per_term: usize,
}

impl IndexReport {
    pub fn new(index: &InvertedIndex) -> Self {
        let mut ambiguous_terms = 0;
        let mut most_ambiguous_term = None;
        let mut max_concepts_per_term = 0;

        for (term, entry) in index.iter() {
            if entry.is_ambiguous {
                ambiguous_terms += 1;
            }
            if entry.len() > max_concepts_per_term {
                max_concepts_per_term = entry.len();
                most_ambiguous_term = Some(term.to_string());
            }
        }

        Self {
            total_terms: index.len(),
            unambiguous_terms: index.len() - ambiguous_terms,
            ambiguous_terms,
            most_ambiguous_term,
            max_concepts_per_term,
        }
    }
}
