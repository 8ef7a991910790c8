//! Source loaders.
//!
//! Each loader turns one source file into raw term groups:
//!
//! - [`canonical`]: the authoritative abbreviation dictionary (canonical groups)
//! - [`synonyms`]: the bracketed synonym list (mergeable groups)
//! - [`optometry`]: the optometry abbreviation CSV (mergeable groups)
//!
//! [`refine`] is the review filter that keeps questionable CSV rows out of
//! the build.

pub mod canonical;
pub mod optometry;
pub mod refine;
pub mod synonyms;

pub use canonical::{
    CanonicalDictionary, load_abbreviation_list, load_canonical_dictionary,
    parse_abbreviation_list,
};
pub use optometry::{load_optometry_csv, read_optometry_csv};
pub use refine::{FlaggedRow, Refinement, refine, refine_file};
pub use synonyms::{load_synonym_list, parse_synonym_list};

use log::info;
use serde::{Deserialize, Serialize};

use crate::cluster::TermSources;
use crate::config::BuildConfig;
use crate::error::Result;

/// How many groups each source contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    pub canonical_entries: usize,
    pub synonym_groups: usize,
    pub optometry_rows: usize,
}

/// Load the three build sources in folding order: canonical dictionary,
/// then synonym list, then optometry CSV.
pub fn load_sources(config: &BuildConfig) -> Result<(TermSources, SourceCounts)> {
    config.check_sources()?;

    let dictionary = load_canonical_dictionary(&config.canonical_path())?;
    let synonyms = load_synonym_list(&config.synonyms_path())?;
    let optometry = load_optometry_csv(&config.optometry_csv_path())?;

    let counts = SourceCounts {
        canonical_entries: dictionary.len(),
        synonym_groups: synonyms.len(),
        optometry_rows: optometry.len(),
    };
    info!(
        "Loaded {} canonical entries, {} synonym groups, {} CSV rows",
        counts.canonical_entries, counts.synonym_groups, counts.optometry_rows
    );

    let sources = TermSources::new(dictionary.to_groups())
        .with_mergeable(synonyms)
        .with_mergeable(optometry);
    Ok((sources, counts))
}
