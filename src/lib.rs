//! # Tesauro
//!
//! A thesaurus of medical and optometric abbreviations with ambiguity-aware
//! query expansion.
//!
//! ## Features
//!
//! - Clusters term groups from several sources into concepts
//! - Keeps canonical meanings apart, even when they share an abbreviation
//! - Inverted index from each term to the concepts it belongs to
//! - Expands a search term into a boolean `OR` query over its synonyms
//! - Validated JSON persistence and lock-free snapshot publishing
//!
//! ## Example
//!
//! ```
//! use tesauro::cluster::{RawTermGroup, cluster};
//! use tesauro::thesaurus::Thesaurus;
//!
//! # fn main() -> tesauro::error::Result<()> {
//! let concepts = cluster(
//!     &[
//!         RawTermGroup::canonical(["AM", "Agujero macular"]),
//!         RawTermGroup::canonical(["AM", "Astigmatismo mixto"]),
//!     ],
//!     &[],
//! )?;
//! let thesaurus = Thesaurus::build(concepts);
//!
//! let result = thesaurus.expand("AM")?;
//! assert!(result.is_ambiguous);
//! assert_eq!(result.query, "(AM OR \"Agujero macular\" OR \"Astigmatismo mixto\")");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod cluster;
pub mod concept;
pub mod config;
pub mod error;
pub mod expansion;
pub mod inverted;
pub mod loader;
pub mod report;
pub mod storage;
pub mod term;
pub mod thesaurus;

pub mod prelude {
    pub use crate::cluster::{RawTermGroup, cluster};
    pub use crate::concept::{ConceptId, ConceptMap};
    pub use crate::error::{Result, TesauroError};
    pub use crate::expansion::{ExpansionOutcome, ExpansionResult, expand};
    pub use crate::inverted::{IndexEntry, InvertedIndex};
    pub use crate::thesaurus::{Thesaurus, ThesaurusHandle};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
