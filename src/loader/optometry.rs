//! Optometry abbreviation CSV source.
//!
//! A header-based CSV with at least the columns `Sigla` and `Expansión`:
//!
//! ```csv
//! Sigla,Expansión
//! OD,Ojo derecho
//! OI,Ojo izquierdo
//! ```
//!
//! Every row with both values present becomes a two-term mergeable group.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, warn};

use crate::cluster::RawTermGroup;
use crate::error::{Result, TesauroError};

pub const ABBREVIATION_COLUMN: &str = "Sigla";
pub const EXPANSION_COLUMN: &str = "Expansión";

/// Read abbreviation rows from any CSV reader.
pub fn read_optometry_csv<R: Read>(input: R) -> Result<Vec<RawTermGroup>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| TesauroError::csv(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| TesauroError::csv(format!("CSV is missing the '{name}' column")))
    };
    let abbreviation_at = column(ABBREVIATION_COLUMN)?;
    let expansion_at = column(EXPANSION_COLUMN)?;

    let mut groups = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| TesauroError::csv(format!("Failed to read CSV record {}: {e}", row + 1)))?;

        let (Some(abbreviation), Some(expansion)) =
            (record.get(abbreviation_at), record.get(expansion_at))
        else {
            warn!("Skipping short CSV record {}", row + 1);
            continue;
        };

        let (abbreviation, expansion) = (abbreviation.trim(), expansion.trim());
        if !abbreviation.is_empty() && !expansion.is_empty() {
            groups.push(RawTermGroup::mergeable([abbreviation, expansion]));
        }
    }

    debug!("Read {} optometry abbreviation rows", groups.len());
    Ok(groups)
}

/// Read abbreviation rows from a CSV file.
pub fn load_optometry_csv(path: &Path) -> Result<Vec<RawTermGroup>> {
    let file = std::fs::File::open(path).map_err(|e| {
        TesauroError::parse(format!(
            "Failed to open optometry CSV '{}': {}",
            path.display(),
            e
        ))
    })?;
    read_optometry_csv(file)
}
