//! Persistence of the concept map and inverted index.
//!
//! Both structures are stored as pretty-printed JSON (two-space indent,
//! UTF-8, non-ASCII left unescaped). Writes go to a temporary file in the
//! target directory which is then renamed over the destination, so readers
//! never see a half-written file.
//!
//! Loading validates what was read: a concept map must obey its term rules,
//! an index must have consistent ambiguity flags, and [`load_thesaurus`]
//! additionally checks that the two files belong together.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tesauro::storage::load_thesaurus;
//!
//! # fn main() -> tesauro::error::Result<()> {
//! let thesaurus = load_thesaurus(
//!     Path::new("lista_sinónimos.json"),
//!     Path::new("indice_invertido.json"),
//! )?;
//! println!("{}", thesaurus.expand("AM")?.query);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::fs;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;

use log::info;
use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use tempfile::NamedTempFile;

use crate::concept::ConceptMap;
use crate::error::{Result, TesauroError};
use crate::inverted::InvertedIndex;
use crate::loader::CanonicalDictionary;
use crate::thesaurus::Thesaurus;

/// Write bytes to `path` atomically.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;
    temp_file
        .persist(path)
        .map_err(|e| TesauroError::Io(e.error))?;
    Ok(())
}

/// Serialize a value as pretty JSON and write it atomically.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    write_atomic(path, json.as_bytes())
}

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        TesauroError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {what} '{}': {e}", path.display()),
        ))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        TesauroError::malformed(format!(
            "Failed to parse {what} JSON from '{}': {e}",
            path.display()
        ))
    })
}

/// Deserialize a JSON object into a `BTreeMap`, failing on a repeated key.
pub(crate) fn deserialize_unique_map<'de, D, K, V>(
    deserializer: D,
) -> std::result::Result<BTreeMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord + fmt::Display,
    V: Deserialize<'de>,
{
    struct UniqueMapVisitor<K, V>(PhantomData<(K, V)>);

    impl<'de, K, V> Visitor<'de> for UniqueMapVisitor<K, V>
    where
        K: Deserialize<'de> + Ord + fmt::Display,
        V: Deserialize<'de>,
    {
        type Value = BTreeMap<K, V>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a JSON object without repeated keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
            let mut map = BTreeMap::new();
            while let Some((key, value)) = access.next_entry::<K, V>()? {
                match map.entry(key) {
                    Entry::Occupied(occupied) => {
                        return Err(de::Error::custom(format!(
                            "key '{}' appears more than once",
                            occupied.key()
                        )));
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(value);
                    }
                }
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueMapVisitor(PhantomData))
}

pub fn save_concept_map(path: &Path, concepts: &ConceptMap) -> Result<()> {
    save_json(path, concepts)?;
    info!("Saved {} concepts to {}", concepts.len(), path.display());
    Ok(())
}

pub fn save_inverted_index(path: &Path, index: &InvertedIndex) -> Result<()> {
    save_json(path, index)?;
    info!("Saved {} index terms to {}", index.len(), path.display());
    Ok(())
}

pub fn save_canonical_dictionary(path: &Path, dictionary: &CanonicalDictionary) -> Result<()> {
    save_json(path, dictionary)?;
    info!("Saved {} canonical entries to {}", dictionary.len(), path.display());
    Ok(())
}

/// Load and validate a concept map.
pub fn load_concept_map(path: &Path) -> Result<ConceptMap> {
    let concepts: ConceptMap = load_json(path, "concept map")?;
    concepts.validate()?;
    Ok(concepts)
}

/// Load and validate an inverted index on its own.
pub fn load_inverted_index(path: &Path) -> Result<InvertedIndex> {
    let index: InvertedIndex = load_json(path, "inverted index")?;
    index.validate()?;
    Ok(index)
}

/// Load both structures and check that they were built from the same snapshot.
pub fn load_thesaurus(concept_map_path: &Path, inverted_index_path: &Path) -> Result<Thesaurus> {
    let concepts = load_concept_map(concept_map_path)?;
    let index = load_inverted_index(inverted_index_path)?;
    Thesaurus::new(concepts, index)
}
