//! Concepts: identifiers and the concept map.
//!
//! A concept is one real-world meaning. The thesaurus groups every surface
//! form of that meaning (abbreviations and expansions) under a single
//! [`ConceptId`], and the [`ConceptMap`] is the persisted result of
//! clustering.

pub mod id;
pub mod map;

pub use id::ConceptId;
pub use map::ConceptMap;
