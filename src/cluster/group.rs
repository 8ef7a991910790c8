//! Raw term groups as delivered by the source loaders.

use serde::{Deserialize, Serialize};

/// Where a raw term group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Authoritative abbreviation source. Never merged with anything.
    Canonical,
    /// Auxiliary source. Folded into an existing concept when it shares a term.
    Mergeable,
}

/// An ordered sequence of terms believed to denote one concept.
///
/// For canonical groups the first term is conventionally the abbreviation and
/// the rest its expansions. Terms are stored raw; normalization happens when
/// the group is folded into the clusterer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTermGroup {
    pub terms: Vec<String>,
    pub provenance: Provenance,
}

impl RawTermGroup {
    pub fn canonical<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            provenance: Provenance::Canonical,
        }
    }

    pub fn mergeable<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms.into_iter().map(Into::into).collect(),
            provenance: Provenance::Mergeable,
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.provenance == Provenance::Canonical
    }
}

/// Everything the clusterer consumes, in folding order.
///
/// Canonical groups are folded first; mergeable sources follow in the order
/// they were added (synonym list, then the optometry CSV).
#[derive(Debug, Clone, Default)]
pub struct TermSources {
    pub canonical: Vec<RawTermGroup>,
    pub mergeable: Vec<Vec<RawTermGroup>>,
}

impl TermSources {
    pub fn new(canonical: Vec<RawTermGroup>) -> Self {
        Self {
            canonical,
            mergeable: Vec::new(),
        }
    }

    /// Append a mergeable source after the ones already added.
    pub fn with_mergeable(mut self, source: Vec<RawTermGroup>) -> Self {
        self.mergeable.push(source);
        self
    }

    /// Total number of raw groups across all sources.
    pub fn group_count(&self) -> usize {
        self.canonical.len() + self.mergeable.iter().map(Vec::len).sum::<usize>()
    }
}
