//! Concept clustering.
//!
//! Turns raw term groups from several sources into a [`ConceptMap`] under the
//! rule "shares a term, same concept", with two exceptions that are part of
//! the contract:
//!
//! - canonical groups are never merged, not even with each other, so an
//!   abbreviation with two meanings stays in two concepts;
//! - a mergeable group is unioned into the *first* concept it intersects
//!   only. Concepts it also touches are left alone; there is no transitive
//!   closure.
//!
//! # Examples
//!
//! ```
//! use tesauro::cluster::{cluster, RawTermGroup};
//!
//! let canonical = vec![RawTermGroup::canonical(["AD", "Adición"])];
//! let synonyms = vec![RawTermGroup::mergeable(["ADD", "Adición"])];
//!
//! let concepts = cluster(&canonical, &[synonyms]).unwrap();
//! let id = "C0001".parse().unwrap();
//! assert_eq!(concepts.get(&id).unwrap(), &["AD", "ADD", "Adición"]);
//! ```

pub mod engine;
pub mod group;

pub use engine::{ClusterStats, ConceptClusterer, FoldOutcome};
pub use group::{Provenance, RawTermGroup, TermSources};

use crate::concept::ConceptMap;
use crate::error::Result;

/// Cluster canonical groups, then each mergeable source in order.
///
/// Groups in `canonical` are treated as canonical and groups in `mergeable`
/// as mergeable, whatever their own provenance flag says.
pub fn cluster(canonical: &[RawTermGroup], mergeable: &[Vec<RawTermGroup>]) -> Result<ConceptMap> {
    cluster_with_stats(canonical, mergeable).map(|(concepts, _)| concepts)
}

/// Like [`cluster`], also returning the folding counters.
pub fn cluster_with_stats(
    canonical: &[RawTermGroup],
    mergeable: &[Vec<RawTermGroup>],
) -> Result<(ConceptMap, ClusterStats)> {
    let mut clusterer = ConceptClusterer::new();

    for group in canonical {
        clusterer.fold_canonical(&group.terms);
    }
    for source in mergeable {
        for group in source {
            clusterer.fold_mergeable(&group.terms);
        }
    }

    let stats = clusterer.stats().clone();
    Ok((clusterer.finish()?, stats))
}

/// Cluster everything held by a [`TermSources`] bundle.
pub fn cluster_sources(sources: &TermSources) -> Result<(ConceptMap, ClusterStats)> {
    cluster_with_stats(&sources.canonical, &sources.mergeable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::ConceptId;

    fn id(s: &str) -> ConceptId {
        s.parse().unwrap()
    }

    #[test]
    fn test_canonical_processed_before_mergeable() {
        let canonical = vec![RawTermGroup::canonical(["OD", "Ojo derecho"])];
        let synonyms = vec![RawTermGroup::mergeable(["AV", "Agudeza visual"])];
        let csv = vec![RawTermGroup::mergeable(["OD", "Oculus dexter"])];

        let concepts = cluster(&canonical, &[synonyms, csv]).unwrap();
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts.get(&id("C0001")).unwrap(), &["Oculus dexter", "OD", "Ojo derecho"]);
        assert_eq!(concepts.get(&id("C0002")).unwrap(), &["Agudeza visual", "AV"]);
    }

    #[test]
    fn test_mergeable_sources_fold_in_order() {
        let synonyms = vec![RawTermGroup::mergeable(["PIO", "Presión intraocular"])];
        let csv = vec![
            RawTermGroup::mergeable(["TIO", "Tensión intraocular"]),
            RawTermGroup::mergeable(["PIO", "Tensión intraocular"]),
        ];

        let (concepts, stats) = cluster_with_stats(&[], &[synonyms, csv]).unwrap();
        assert_eq!(concepts.len(), 2);
        // The last CSV group touches both; only C0001 grows.
        assert_eq!(
            concepts.get(&id("C0001")).unwrap(),
            &["PIO", "Presión intraocular", "Tensión intraocular"]
        );
        assert_eq!(concepts.get(&id("C0002")).unwrap(), &["Tensión intraocular", "TIO"]);
        assert_eq!(stats.merged_groups, 1);
        assert_eq!(stats.concepts_created, 2);
    }

    #[test]
    fn test_cluster_sources() {
        let sources = TermSources::new(vec![RawTermGroup::canonical(["DP", "Distancia pupilar"])])
            .with_mergeable(vec![RawTermGroup::mergeable(["DIP", "Distancia pupilar"])]);
        assert_eq!(sources.group_count(), 2);

        let (concepts, _) = cluster_sources(&sources).unwrap();
        assert_eq!(concepts.get(&id("C0001")).unwrap(), &["DIP", "Distancia pupilar", "DP"]);
    }
}
