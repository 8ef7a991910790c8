//! Synonym list source.
//!
//! One group per line, written as a bracketed, comma separated list:
//!
//! ```text
//! [CIL, CYL, Cilindro, Astigmatismo]
//! [NM, No mejora]
//! ```
//!
//! Lines that are not bracketed are ignored.

use std::path::Path;

use log::debug;

use crate::cluster::RawTermGroup;
use crate::error::{Result, TesauroError};

/// Parse a single line into its terms, or `None` if it is not a group.
pub fn parse_line(line: &str) -> Option<Vec<String>> {
    let content = line.trim().strip_prefix('[')?.strip_suffix(']')?;

    let terms: Vec<String> = content
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect();

    if terms.is_empty() { None } else { Some(terms) }
}

/// Parse a whole synonym list into mergeable groups.
pub fn parse_synonym_list(text: &str) -> Vec<RawTermGroup> {
    let groups: Vec<RawTermGroup> = text
        .lines()
        .filter_map(parse_line)
        .map(RawTermGroup::mergeable)
        .collect();

    debug!("Parsed {} synonym groups", groups.len());
    groups
}

/// Read and parse a synonym list file.
pub fn load_synonym_list(path: &Path) -> Result<Vec<RawTermGroup>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        TesauroError::parse(format!(
            "Failed to read synonym list '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(parse_synonym_list(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("  [CIL, CYL , Cilindro]  ").unwrap(),
            vec!["CIL", "CYL", "Cilindro"]
        );
        assert_eq!(parse_line("[a,,b, ]").unwrap(), vec!["a", "b"]);
        assert_eq!(parse_line("[ ]"), None);
        assert_eq!(parse_line("["), None);
        assert_eq!(parse_line("# comentario"), None);
        assert_eq!(parse_line("- [a, b"), None);
    }

    #[test]
    fn test_parse_synonym_list() {
        let text = "synonyms:\n  [NM, No mejora]\n\n  [AV, Agudeza visual]\n";
        let groups = parse_synonym_list(text);
        assert_eq!(groups.len(), 2);
        assert!(!groups[0].is_canonical());
        assert_eq!(groups[1].terms, vec!["AV", "Agudeza visual"]);
    }
}
