//! Incremental concept clustering.
//!
//! Concepts live in an arena addressed by creation index. Next to the arena a
//! lookup table maps every term to the *smallest* arena index whose concept
//! contains it. A mergeable group merges into the earliest concept it shares a
//! term with, and that concept is exactly the minimum of the lookup over the
//! group's terms, so the table reproduces a creation-order scan without
//! rescanning the arena.

use std::collections::BTreeSet;

use ahash::AHashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cluster::group::{Provenance, RawTermGroup};
use crate::concept::ConceptMap;
use crate::error::Result;
use crate::term;

/// What happened to a group when it was folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldOutcome {
    /// A new concept was appended at this arena index.
    Created(usize),
    /// The group was unioned into the concept at this arena index.
    Merged(usize),
    /// The group had no terms left after normalization.
    Dropped,
}

/// Counters collected while folding groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub canonical_groups: usize,
    pub mergeable_groups: usize,
    pub dropped_groups: usize,
    pub merged_groups: usize,
    pub concepts_created: usize,
}

#[derive(Debug, Clone)]
struct ConceptRecord {
    terms: BTreeSet<String>,
    provenance: Provenance,
}

/// Folds raw term groups into concepts.
///
/// Canonical groups always become their own concept. Mergeable groups join
/// the first concept (in creation order) that shares at least one term with
/// them; only that concept grows, even if the group also touches later
/// concepts. Concepts are never merged with each other.
#[derive(Debug, Default)]
pub struct ConceptClusterer {
    concepts: Vec<ConceptRecord>,
    first_owner: AHashMap<String, usize>,
    stats: ClusterStats,
}

impl ConceptClusterer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a group according to its provenance flag.
    pub fn fold(&mut self, group: &RawTermGroup) -> FoldOutcome {
        match group.provenance {
            Provenance::Canonical => self.fold_canonical(&group.terms),
            Provenance::Mergeable => self.fold_mergeable(&group.terms),
        }
    }

    /// Append a canonical group as a new concept, unconditionally.
    pub fn fold_canonical<S: AsRef<str>>(&mut self, terms: &[S]) -> FoldOutcome {
        self.stats.canonical_groups += 1;

        let terms = term::normalize_all(terms);
        if terms.is_empty() {
            self.stats.dropped_groups += 1;
            return FoldOutcome::Dropped;
        }

        FoldOutcome::Created(self.push(terms, Provenance::Canonical))
    }

    /// Union a mergeable group into the first concept it intersects, or
    /// append it as a new concept when it intersects none.
    pub fn fold_mergeable<S: AsRef<str>>(&mut self, terms: &[S]) -> FoldOutcome {
        self.stats.mergeable_groups += 1;

        let terms = term::normalize_all(terms);
        if terms.is_empty() {
            self.stats.dropped_groups += 1;
            return FoldOutcome::Dropped;
        }

        let target = terms
            .iter()
            .filter_map(|t| self.first_owner.get(t.as_str()).copied())
            .min();

        match target {
            Some(index) => {
                for t in terms {
                    self.first_owner
                        .entry(t.clone())
                        .and_modify(|owner| *owner = (*owner).min(index))
                        .or_insert(index);
                    self.concepts[index].terms.insert(t);
                }
                self.stats.merged_groups += 1;
                FoldOutcome::Merged(index)
            }
            None => FoldOutcome::Created(self.push(terms, Provenance::Mergeable)),
        }
    }

    fn push(&mut self, terms: BTreeSet<String>, provenance: Provenance) -> usize {
        let index = self.concepts.len();
        for t in &terms {
            // Every existing owner has a smaller index.
            self.first_owner.entry(t.clone()).or_insert(index);
        }
        self.concepts.push(ConceptRecord { terms, provenance });
        self.stats.concepts_created += 1;
        index
    }

    /// Number of concepts in the arena.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Raw (not yet finalized) terms of the concept at an arena index.
    pub fn terms_at(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.concepts.get(index).map(|c| &c.terms)
    }

    /// Provenance of the group that created the concept at an arena index.
    pub fn provenance_at(&self, index: usize) -> Option<Provenance> {
        self.concepts.get(index).map(|c| c.provenance)
    }

    pub fn stats(&self) -> &ClusterStats {
        &self.stats
    }

    /// Finalize the arena into a concept map.
    ///
    /// The concept at arena index `n` becomes `C{n + 1}`. Member terms lose
    /// their disambiguation suffixes and are sorted for presentation. A
    /// concept whose terms all vanish during cleanup is left out, and its id
    /// stays unused so later concepts keep their numbers.
    pub fn finish(self) -> Result<ConceptMap> {
        let mut slots = Vec::with_capacity(self.concepts.len());
        let mut emptied = 0;
        for record in &self.concepts {
            let finalized = term::finalize_members(&record.terms);
            if finalized.is_empty() {
                warn!(
                    "Leaving out concept whose terms are all empty after cleanup: {:?}",
                    record.terms
                );
                emptied += 1;
                slots.push(None);
            } else {
                slots.push(Some(finalized));
            }
        }

        debug!(
            "Clustered {} canonical and {} mergeable groups into {} concepts ({} merged, {} dropped)",
            self.stats.canonical_groups,
            self.stats.mergeable_groups,
            slots.len() - emptied,
            self.stats.merged_groups,
            self.stats.dropped_groups
        );

        ConceptMap::from_slots(slots)
    }
}
