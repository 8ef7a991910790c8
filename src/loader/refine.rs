//! Review filter for the optometry CSV.
//!
//! Rows whose expansion needs a human look (numbered alternatives, slashes,
//! translations, parenthesised notes) are pulled out of the CSV into a
//! review list. The CSV keeps everything else.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use log::info;

use crate::error::{Result, TesauroError};

/// A row set aside for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedRow {
    pub abbreviation: String,
    pub expansion: String,
}

/// The CSV split into kept and flagged rows.
#[derive(Debug, Clone)]
pub struct Refinement {
    pub header: StringRecord,
    /// Kept rows in file order. A blank line is kept as an empty record.
    pub kept: Vec<StringRecord>,
    /// Sorted case-insensitively by abbreviation.
    pub flagged: Vec<FlaggedRow>,
}

/// Whether a row should be reviewed by hand.
pub fn needs_review(abbreviation: &str, expansion: &str) -> bool {
    let numbered = expansion.contains("1)") || expansion.contains("2)");
    let slashed = abbreviation.contains(" / ") || expansion.contains('/');
    let translation = expansion.contains("inglés");
    let parenthesised = expansion.contains('(') || expansion.contains(')');

    numbered || slashed || translation || parenthesised
}

/// For each physical row after leading blank lines, whether it is blank.
///
/// Lines inside a quoted field belong to the row that opened the quote.
fn blank_rows(text: &str) -> Vec<bool> {
    let mut rows = Vec::new();
    let mut in_quotes = false;
    for line in text.lines() {
        if !in_quotes && (!rows.is_empty() || !line.is_empty()) {
            rows.push(line.is_empty());
        }
        if line.bytes().filter(|&b| b == b'"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }
    rows
}

/// Split CSV rows into kept and flagged.
///
/// The first row is the header. Rows with fewer than two cells are kept as is,
/// and so are blank lines between or after rows.
pub fn refine<R: Read>(mut input: R) -> Result<Refinement> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| anyhow::anyhow!("CSV is not valid UTF-8: {e}"))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header = records
        .next()
        .ok_or_else(|| TesauroError::csv("CSV is empty, expected a header row"))??;
    let mut layout = blank_rows(&text).into_iter().skip(1).peekable();

    let mut kept = Vec::new();
    let mut flagged = Vec::new();

    for record in records {
        let record = record?;
        while layout.next_if(|&blank| blank).is_some() {
            kept.push(StringRecord::new());
        }
        layout.next();

        if record.len() < 2 {
            kept.push(record);
            continue;
        }

        let abbreviation = record[0].trim();
        let expansion = record[1].trim();
        if needs_review(abbreviation, expansion) {
            flagged.push(FlaggedRow {
                abbreviation: abbreviation.to_string(),
                expansion: expansion.to_string(),
            });
        } else {
            kept.push(record);
        }
    }

    kept.extend(layout.filter(|&blank| blank).map(|_| StringRecord::new()));

    flagged.sort_by_cached_key(|row| row.abbreviation.to_lowercase());

    Ok(Refinement {
        header,
        kept,
        flagged,
    })
}

impl Refinement {
    /// Render the review list: `SIGLA<TAB>EXPANSION` lines, with a blank line
    /// between initial letters.
    pub fn review_text(&self) -> String {
        let mut out = String::new();
        let mut current_letter: Option<String> = None;

        for row in &self.flagged {
            let letter: String = row
                .abbreviation
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default();

            if let Some(current) = &current_letter
                && !current.is_empty()
                && *current != letter
            {
                out.push('\n');
            }

            out.push_str(&row.abbreviation);
            out.push('\t');
            out.push_str(&row.expansion);
            out.push('\n');
            current_letter = Some(letter);
        }

        out
    }

    /// Render the header and kept rows back to CSV.
    pub fn to_csv(&self) -> Result<String> {
        let mut builder = WriterBuilder::new();
        builder.flexible(true).terminator(Terminator::CRLF);

        let mut out = Vec::new();
        for record in std::iter::once(&self.header).chain(&self.kept) {
            if record.is_empty() {
                // An empty record would be written as `""`.
                out.extend_from_slice(b"\r\n");
                continue;
            }
            let mut writer = builder.from_writer(&mut out);
            writer.write_record(record)?;
            writer.flush()?;
        }

        String::from_utf8(out).map_err(|e| TesauroError::csv(format!("CSV is not UTF-8: {e}")))
    }
}

/// Refine a CSV file in place and write the review list next to it.
pub fn refine_file(csv_path: &Path, review_path: &Path) -> Result<Refinement> {
    let file = std::fs::File::open(csv_path)?;
    let refinement = refine(file)?;

    crate::storage::write_atomic(review_path, refinement.review_text().as_bytes())?;
    crate::storage::write_atomic(csv_path, refinement.to_csv()?.as_bytes())?;

    info!(
        "Kept {} rows in {}, flagged {} rows into {}",
        refinement.kept.len(),
        csv_path.display(),
        refinement.flagged.len(),
        review_path.display()
    );
    Ok(refinement)
}
