//! Build configuration: where the sources and artifacts live.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TesauroError};

/// File locations used by the build pipeline.
///
/// Relative paths are resolved against `base_dir`. Every field has a default,
/// so a config file only needs the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory that relative paths are resolved against.
    pub base_dir: PathBuf,
    /// Plain `SIGLA: expansion` list the canonical dictionary is generated from.
    pub abbreviation_list_file: PathBuf,
    /// Canonical dictionary (JSON).
    pub canonical_file: PathBuf,
    /// Bracketed synonym list.
    pub synonyms_file: PathBuf,
    /// Optometry abbreviation CSV.
    pub optometry_csv_file: PathBuf,
    /// Rows set aside by the CSV review filter.
    pub review_file: PathBuf,
    /// Output concept map (JSON).
    pub concept_map_file: PathBuf,
    /// Output inverted index (JSON).
    pub inverted_index_file: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            abbreviation_list_file: PathBuf::from("siglas_multiples.txt"),
            canonical_file: PathBuf::from("siglas_medicas.json"),
            synonyms_file: PathBuf::from("sinónimos.yml"),
            optometry_csv_file: PathBuf::from("siglas_optometría.csv"),
            review_file: PathBuf::from("a_modificar.txt"),
            concept_map_file: PathBuf::from("lista_sinónimos.json"),
            inverted_index_file: PathBuf::from("indice_invertido.json"),
        }
    }
}

impl BuildConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TesauroError::invalid_argument(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Use a different base directory.
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Resolve a configured path against `base_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn abbreviation_list_path(&self) -> PathBuf {
        self.resolve(&self.abbreviation_list_file)
    }

    pub fn canonical_path(&self) -> PathBuf {
        self.resolve(&self.canonical_file)
    }

    pub fn synonyms_path(&self) -> PathBuf {
        self.resolve(&self.synonyms_file)
    }

    pub fn optometry_csv_path(&self) -> PathBuf {
        self.resolve(&self.optometry_csv_file)
    }

    pub fn review_path(&self) -> PathBuf {
        self.resolve(&self.review_file)
    }

    pub fn concept_map_path(&self) -> PathBuf {
        self.resolve(&self.concept_map_file)
    }

    pub fn inverted_index_path(&self) -> PathBuf {
        self.resolve(&self.inverted_index_file)
    }

    /// Fail early if any of the three build sources is missing.
    pub fn check_sources(&self) -> Result<()> {
        for path in [
            self.synonyms_path(),
            self.canonical_path(),
            self.optometry_csv_path(),
        ] {
            if !path.exists() {
                return Err(TesauroError::invalid_argument(format!(
                    "Source file not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}
