//! Canonical abbreviation source.
//!
//! The canonical source is an ordered dictionary from an entry key to the
//! entry's terms. It is produced from a plain list of abbreviations:
//!
//! ```text
//! AD: Adición
//! ADD: Adición
//! AM: Agujero macular
//! AM: Astigmatismo mixto
//! ```
//!
//! Abbreviations with identical expansions end up in one entry (`AD` and
//! `ADD` above). The same abbreviation with different expansions yields
//! separate entries; the later ones get keys such as `AM-2` so the
//! dictionary can hold them side by side.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use log::debug;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::cluster::RawTermGroup;
use crate::error::{Result, TesauroError};

/// Ordered dictionary of canonical entries, key to terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalDictionary {
    entries: Vec<(String, Vec<String>)>,
    positions: HashMap<String, usize>,
}

impl CanonicalDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing key keeps its position and gets the new terms.
    pub fn insert(&mut self, key: String, terms: Vec<String>) {
        match self.positions.get(&key) {
            Some(&position) => self.entries[position].1 = terms,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, terms));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.positions
            .get(key)
            .map(|&position| self.entries[position].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, terms)| (key.as_str(), terms.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys carrying a `-N` disambiguation suffix.
    pub fn disambiguated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(key, _)| crate::term::strip_disambiguation_suffix(key) != key)
            .count()
    }

    /// One canonical group per entry: the key followed by its terms.
    pub fn to_groups(&self) -> Vec<RawTermGroup> {
        self.entries
            .iter()
            .map(|(key, terms)| {
                RawTermGroup::canonical(std::iter::once(key.clone()).chain(terms.iter().cloned()))
            })
            .collect()
    }
}

impl Serialize for CanonicalDictionary {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, terms) in &self.entries {
            map.serialize_entry(key, terms)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CanonicalDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DictionaryVisitor;

        impl<'de> Visitor<'de> for DictionaryVisitor {
            type Value = CanonicalDictionary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping abbreviation keys to arrays of terms")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut dictionary = CanonicalDictionary::new();
                while let Some((key, terms)) = access.next_entry::<String, Vec<String>>()? {
                    dictionary.insert(key, terms);
                }
                Ok(dictionary)
            }
        }

        deserializer.deserialize_map(DictionaryVisitor)
    }
}

/// Parse a `SIGLA: expansion, expansion` list into a canonical dictionary.
///
/// Blank lines and lines without a colon are skipped.
pub fn parse_abbreviation_list(text: &str) -> CanonicalDictionary {
    // Sorted expansion tuple -> abbreviations, in first-appearance order.
    let mut groups: Vec<(Vec<String>, BTreeSet<String>)> = Vec::new();
    let mut group_positions: HashMap<Vec<String>, usize> = HashMap::new();

    for line in text.lines() {
        let line = line.trim();
        let Some((abbreviation, expansions)) = line.split_once(':') else {
            continue;
        };

        let mut expansions: Vec<String> = expansions
            .trim()
            .split(',')
            .map(|e| e.trim().to_string())
            .collect();
        expansions.sort();

        let position = *group_positions.entry(expansions.clone()).or_insert_with(|| {
            groups.push((expansions, BTreeSet::new()));
            groups.len() - 1
        });
        groups[position].1.insert(abbreviation.trim().to_string());
    }

    let mut dictionary = CanonicalDictionary::new();
    let mut counters: HashMap<String, usize> = HashMap::new();

    for (expansions, abbreviations) in groups {
        let abbreviations: Vec<String> = abbreviations.into_iter().collect();
        let primary = abbreviations[0].clone();

        let key = if dictionary.contains_key(&primary) {
            let counter = counters.entry(primary.clone()).or_insert(1);
            *counter += 1;
            format!("{primary}-{counter}")
        } else {
            counters.insert(primary.clone(), 1);
            primary
        };

        let mut terms = abbreviations;
        terms.extend(expansions);
        dictionary.insert(key, terms);
    }

    debug!(
        "Parsed {} canonical entries ({} disambiguated)",
        dictionary.len(),
        dictionary.disambiguated_count()
    );
    dictionary
}

/// Read and parse an abbreviation list file.
pub fn load_abbreviation_list(path: &Path) -> Result<CanonicalDictionary> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        TesauroError::parse(format!(
            "Failed to read abbreviation list '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_abbreviation_list(&text))
}

/// Load a canonical dictionary saved as JSON, keeping file order.
pub fn load_canonical_dictionary(path: &Path) -> Result<CanonicalDictionary> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TesauroError::parse(format!(
            "Failed to read canonical dictionary '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TesauroError::parse(format!(
            "Failed to parse canonical dictionary JSON from '{}': {}",
            path.display(),
            e
        ))
    })
}
