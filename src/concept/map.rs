//! The concept map: concept identifier to member terms.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::concept::id::ConceptId;
use crate::error::{Result, TesauroError};

/// Mapping from concept identifier to its member terms.
///
/// Members are trimmed, non-empty, unique and kept in presentation order.
/// Built once by [`cluster`](crate::cluster::cluster) or loaded from disk,
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptMap {
    #[serde(deserialize_with = "crate::storage::deserialize_unique_map")]
    concepts: BTreeMap<ConceptId, Vec<String>>,
}

impl ConceptMap {
    /// Create an empty concept map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from already finalized concepts, numbering them in order.
    pub(crate) fn from_ordered(members: Vec<Vec<String>>) -> Result<Self> {
        Self::from_slots(members.into_iter().map(Some))
    }

    /// Build a map where slot `n` becomes concept `n + 1`. An empty slot
    /// leaves its id unused.
    pub(crate) fn from_slots<I>(slots: I) -> Result<Self>
    where
        I: IntoIterator<Item = Option<Vec<String>>>,
    {
        let mut concepts = BTreeMap::new();
        for (position, slot) in slots.into_iter().enumerate() {
            let Some(terms) = slot else {
                continue;
            };
            let ordinal = u32::try_from(position + 1)
                .map_err(|_| TesauroError::other("too many concepts for a 32-bit id"))?;
            concepts.insert(ConceptId::from_ordinal(ordinal)?, terms);
        }
        Ok(Self { concepts })
    }

    /// Build a map from explicit entries, checking term hygiene.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (ConceptId, Vec<String>)>,
    {
        let map = Self {
            concepts: entries.into_iter().collect(),
        };
        map.validate()?;
        Ok(map)
    }

    /// Member terms of a concept.
    pub fn get(&self, id: &ConceptId) -> Option<&[String]> {
        self.concepts.get(id).map(Vec::as_slice)
    }

    pub fn contains(&self, id: &ConceptId) -> bool {
        self.concepts.contains_key(id)
    }

    /// Iterate concepts in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConceptId, &[String])> {
        self.concepts.iter().map(|(id, terms)| (id, terms.as_slice()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ConceptId> {
        self.concepts.keys()
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Total number of (concept, term) memberships.
    pub fn membership_count(&self) -> usize {
        self.concepts.values().map(Vec::len).sum()
    }

    /// Terms that are members of more than one concept, with their concepts
    /// listed the way the inverted index lists them.
    pub fn shared_terms(&self) -> BTreeMap<String, Vec<ConceptId>> {
        let mut owners: BTreeMap<String, Vec<ConceptId>> = BTreeMap::new();
        for (id, terms) in &self.concepts {
            for term in terms {
                owners.entry(term.clone()).or_default().push(*id);
            }
        }
        owners.retain(|_, ids| ids.len() > 1);
        for ids in owners.values_mut() {
            ids.sort_by(ConceptId::cmp_printed);
        }
        owners
    }

    /// Whether every pair of concepts has disjoint members.
    pub fn is_disjoint(&self) -> bool {
        self.shared_terms().is_empty()
    }

    /// Check the format rules of a persisted concept map.
    pub fn validate(&self) -> Result<()> {
        for (id, terms) in &self.concepts {
            if terms.is_empty() {
                return Err(TesauroError::malformed(format!("concept {id} has no terms")));
            }

            let mut seen = BTreeSet::new();
            for term in terms {
                if term.is_empty() || term.trim() != term {
                    return Err(TesauroError::malformed(format!(
                        "concept {id} has an untrimmed or empty term '{term}'"
                    )));
                }
                if !seen.insert(term.as_str()) {
                    return Err(TesauroError::malformed(format!(
                        "concept {id} lists '{term}' more than once"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ConceptMap {
    type Item = (&'a ConceptId, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, ConceptId, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.concepts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ConceptId {
        s.parse().unwrap()
    }

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_ordered_assigns_dense_ids() {
        let map = ConceptMap::from_ordered(vec![terms(&["AD", "Adición"]), terms(&["OD"])]).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&id("C0001")).unwrap(), &["AD", "Adición"]);
        assert_eq!(map.get(&id("C0002")).unwrap(), &["OD"]);
        assert!(map.get(&id("C0003")).is_none());
    }

    #[test]
    fn test_empty_slot_keeps_later_ids() {
        let map =
            ConceptMap::from_slots(vec![None, Some(terms(&["OD", "Ojo derecho"]))]).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.get(&id("C0001")).is_none());
        assert_eq!(map.get(&id("C0002")).unwrap(), &["OD", "Ojo derecho"]);
    }

    #[test]
    fn test_serialization_shape() {
        let map = ConceptMap::from_ordered(vec![terms(&["AD", "Adición"])]).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"C0001":["AD","Adición"]}"#);

        let parsed: ConceptMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }

    #[test]
    fn test_repeated_key_is_rejected() {
        let result = serde_json::from_str::<ConceptMap>(r#"{"C0001":["A"],"C0001":["B"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_shared_terms() {
        let map = ConceptMap::from_ordered(vec![
            terms(&["AM", "Agujero macular"]),
            terms(&["AM", "Astigmatismo mixto"]),
            terms(&["OD"]),
        ])
        .unwrap();

        let shared = map.shared_terms();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared["AM"], vec![id("C0001"), id("C0002")]);
        assert!(!map.is_disjoint());
    }

    #[test]
    fn test_validate_rejects_bad_terms() {
        assert!(ConceptMap::from_entries(vec![(id("C0001"), terms(&[" AD"]))]).is_err());
        assert!(ConceptMap::from_entries(vec![(id("C0001"), terms(&["AD", "AD"]))]).is_err());
        assert!(ConceptMap::from_entries(vec![(id("C0001"), vec![])]).is_err());
        assert!(ConceptMap::from_entries(vec![(id("C0001"), terms(&["AD"]))]).is_ok());
    }
}
