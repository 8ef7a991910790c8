//! Inverted index over the concept map.
//!
//! For every term the index records which concepts contain it and whether
//! that makes the term ambiguous. The serialized form is a JSON object keyed
//! by term:
//!
//! ```text
//! {
//!   "AM": { "concept_ids": ["C0001", "C0002"], "is_ambiguous": true },
//!   "CIL": { "concept_ids": ["C0003"], "is_ambiguous": false }
//! }
//! ```

pub mod entry;
pub mod index;

pub use entry::IndexEntry;
pub use index::InvertedIndex;

use crate::concept::ConceptMap;

/// Build the inverted index for a concept map.
pub fn build_index(concepts: &ConceptMap) -> InvertedIndex {
    InvertedIndex::build(concepts)
}
