//! Ambiguity-aware term expansion.

use std::collections::BTreeSet;

use crate::concept::ConceptMap;
use crate::error::{Result, TesauroError};
use crate::expansion::result::ExpansionResult;
use crate::inverted::InvertedIndex;
use crate::term;

/// Expand a query term into all of its synonyms.
///
/// - Unknown term: the result holds the literal term and the query is that
///   term in double quotes.
/// - Known term: the expanded terms are the union of the members of every
///   concept the term belongs to, and the query is their disjunction.
///
/// Neither structure is modified. The only error is an index entry pointing
/// at a concept the map does not have.
pub fn expand(term: &str, concepts: &ConceptMap, index: &InvertedIndex) -> Result<ExpansionResult> {
    let original = term.trim().to_string();

    let Some(entry) = index.get(&original) else {
        return Ok(ExpansionResult {
            query: term::quote(&original),
            expanded_terms: BTreeSet::from([original.clone()]),
            original,
            found: false,
            is_ambiguous: false,
            concept_ids: Vec::new(),
        });
    };

    let mut expanded_terms = BTreeSet::new();
    for id in &entry.concept_ids {
        let members = concepts.get(id).ok_or_else(|| {
            TesauroError::invariant(format!(
                "index entry '{original}' references unknown concept {id}"
            ))
        })?;
        expanded_terms.extend(members.iter().cloned());
    }

    let query = disjunction(&expanded_terms).unwrap_or_else(|| term::quote(&original));

    Ok(ExpansionResult {
        original,
        found: true,
        is_ambiguous: entry.is_ambiguous,
        concept_ids: entry.concept_ids.clone(),
        expanded_terms,
        query,
    })
}

/// Render `(t1 OR t2 OR ...)` in sorted term order, quoting terms that
/// contain whitespace. Returns `None` for an empty set.
pub fn disjunction(terms: &BTreeSet<String>) -> Option<String> {
    if terms.is_empty() {
        return None;
    }

    let clauses: Vec<String> = terms
        .iter()
        .map(|t| {
            if term::needs_quoting(t) {
                term::quote(t)
            } else {
                t.clone()
            }
        })
        .collect();

    Some(format!("({})", clauses.join(" OR ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::ConceptId;
    use crate::expansion::result::ExpansionOutcome;
    use crate::inverted::IndexEntry;

    fn fixture() -> (ConceptMap, InvertedIndex) {
        let concepts = ConceptMap::from_ordered(vec![
            vec!["CIL".into(), "Cilindro".into(), "CYL".into()],
            vec!["NM".into(), "No mejora".into()],
            vec!["NM".into(), "Nistagmus manifiesto".into()],
        ])
        .unwrap();
        let index = InvertedIndex::build(&concepts);
        (concepts, index)
    }

    #[test]
    fn test_not_found() {
        let (concepts, index) = fixture();
        let result = expand("XYZ123", &concepts, &index).unwrap();

        assert_eq!(result.outcome(), ExpansionOutcome::NotFound);
        assert!(!result.found);
        assert!(!result.is_ambiguous);
        assert!(result.concept_ids.is_empty());
        assert_eq!(result.expanded_terms, BTreeSet::from(["XYZ123".to_string()]));
        assert_eq!(result.query, "\"XYZ123\"");
    }

    #[test]
    fn test_found_unambiguous() {
        let (concepts, index) = fixture();
        let result = expand("  CIL ", &concepts, &index).unwrap();

        assert_eq!(result.outcome(), ExpansionOutcome::Found);
        assert_eq!(result.original, "CIL");
        assert_eq!(result.concept_ids, vec!["C0001".parse::<ConceptId>().unwrap()]);
        assert_eq!(result.query, "(CIL OR CYL OR Cilindro)");
    }

    #[test]
    fn test_found_ambiguous_unions_all_concepts() {
        let (concepts, index) = fixture();
        let result = expand("NM", &concepts, &index).unwrap();

        assert_eq!(result.outcome(), ExpansionOutcome::Ambiguous);
        assert_eq!(result.concept_ids.len(), 2);
        assert_eq!(result.expanded_terms.len(), 3);
        assert_eq!(result.query, "(NM OR \"Nistagmus manifiesto\" OR \"No mejora\")");

        let breakdown = result.breakdown(&concepts);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].1, &["NM", "No mejora"]);
        assert_eq!(breakdown[1].1, &["NM", "Nistagmus manifiesto"]);
    }

    #[test]
    fn test_unknown_concept_is_an_error() {
        let (_, index) = fixture();
        let err = expand("NM", &ConceptMap::new(), &index).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_disjunction() {
        assert_eq!(disjunction(&BTreeSet::new()), None);
        let terms = BTreeSet::from(["b".to_string(), "A c".to_string()]);
        assert_eq!(disjunction(&terms).unwrap(), "(\"A c\" OR b)");
    }

    #[test]
    fn test_entry_without_members_falls_back_to_literal() {
        // Not reachable through build(); exercises the empty-union branch.
        let concepts = ConceptMap::new();
        let index: InvertedIndex = serde_json::from_value(serde_json::json!({
            "X": IndexEntry::new(vec![]),
        }))
        .unwrap();
        let result = expand("X", &concepts, &index).unwrap();
        assert!(result.found);
        assert_eq!(result.query, "\"X\"");
    }
}
