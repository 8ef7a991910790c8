//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TesauroArgs};
use crate::cluster::ClusterStats;
use crate::concept::{ConceptId, ConceptMap};
use crate::error::Result;
use crate::expansion::{ExpansionOutcome, ExpansionResult};
use crate::loader::{FlaggedRow, SourceCounts};
use crate::report::{ConceptMapReport, IndexReport};

/// Result types that know how to print themselves for a terminal.
pub trait HumanOutput {
    fn print_human(&self, args: &TesauroArgs);
}

/// Result structure for canonical dictionary generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct DictionaryResult {
    pub input: String,
    pub output: String,
    pub entries: usize,
    pub disambiguated_entries: usize,
}

/// Result structure for a concept map build.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub concept_map_path: String,
    pub sources: SourceCounts,
    pub clustering: ClusterStats,
    pub report: ConceptMapReport,
    pub index: Option<IndexResult>,
}

/// Result structure for an inverted index build.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResult {
    pub inverted_index_path: String,
    pub report: IndexReport,
}

/// One concept matched by an expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConceptBreakdown {
    pub concept_id: ConceptId,
    pub terms: Vec<String>,
}

/// An expansion together with the concepts it came from.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionView {
    #[serde(flatten)]
    pub result: ExpansionResult,
    pub concepts: Vec<ConceptBreakdown>,
}

impl ExpansionView {
    pub fn new(result: ExpansionResult, concepts: &ConceptMap) -> Self {
        let breakdown = result
            .breakdown(concepts)
            .into_iter()
            .map(|(concept_id, terms)| ConceptBreakdown {
                concept_id,
                terms: terms.to_vec(),
            })
            .collect();
        Self {
            result,
            concepts: breakdown,
        }
    }
}

/// Result structure for term expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionResults {
    pub expansions: Vec<ExpansionView>,
}

/// Result structure for statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub concepts: ConceptMapReport,
    pub index: IndexReport,
    #[serde(skip)]
    pub detailed: bool,
}

/// Result structure for the CSV review filter.
#[derive(Debug, Serialize, Deserialize)]
pub struct RefineResult {
    pub csv_path: String,
    pub review_path: String,
    pub kept_rows: usize,
    pub flagged_rows: Vec<FlaggedRowView>,
    pub dry_run: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlaggedRowView {
    pub abbreviation: String,
    pub expansion: String,
}

impl From<&FlaggedRow> for FlaggedRowView {
    fn from(row: &FlaggedRow) -> Self {
        Self {
            abbreviation: row.abbreviation.clone(),
            expansion: row.expansion.clone(),
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TesauroArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            output_human(message, result, args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

fn output_human<T: HumanOutput>(message: &str, result: &T, args: &TesauroArgs) {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }
    result.print_human(args);
}

fn output_json<T: Serialize>(result: &T, args: &TesauroArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn print_title(title: &str) {
    println!("{title}");
    println!("{}", "═".repeat(title.chars().count()));
}

fn print_subtitle(title: &str) {
    println!("{title}");
    println!("{}", "─".repeat(title.chars().count()));
}

impl HumanOutput for DictionaryResult {
    fn print_human(&self, _args: &TesauroArgs) {
        print_title("Canonical Dictionary:");
        println!("Source: {}", self.input);
        println!("Output: {}", self.output);
        println!("Entries: {}", self.entries);
        println!("Disambiguated entries: {}", self.disambiguated_entries);
    }
}

impl HumanOutput for ConceptMapReport {
    fn print_human(&self, args: &TesauroArgs) {
        print_title("Concept Map:");
        println!("Total concepts: {}", self.total_concepts);
        println!("Terms per concept:");
        println!("  Average: {:.1}", self.average_terms);
        println!("  Maximum: {}", self.max_terms);
        println!("  Minimum: {}", self.min_terms);

        println!();
        if self.ambiguous_terms.is_empty() {
            println!("Ambiguous terms: none");
            return;
        }
        println!("Ambiguous terms: {}", self.ambiguous_terms.len());
        if args.verbosity() > 1 {
            for ambiguous in &self.ambiguous_terms {
                println!(
                    "  {} (in {} concepts: {})",
                    ambiguous.term,
                    ambiguous.concept_ids.len(),
                    format_ids(&ambiguous.concept_ids)
                );
            }
        }
    }
}

impl HumanOutput for IndexReport {
    fn print_human(&self, _args: &TesauroArgs) {
        print_title("Inverted Index:");
        println!("Total terms: {}", self.total_terms);
        println!(
            "Unambiguous terms: {} ({})",
            self.unambiguous_terms,
            format_percentage(self.unambiguous_terms, self.total_terms)
        );
        println!(
            "Ambiguous terms: {} ({})",
            self.ambiguous_terms,
            format_percentage(self.ambiguous_terms, self.total_terms)
        );
        if let Some(term) = &self.most_ambiguous_term {
            println!(
                "Most ambiguous term: {term} ({} concepts)",
                self.max_concepts_per_term
            );
        }
    }
}

impl HumanOutput for BuildResult {
    fn print_human(&self, args: &TesauroArgs) {
        print_title("Sources:");
        println!("Canonical entries: {}", self.sources.canonical_entries);
        println!("Synonym groups: {}", self.sources.synonym_groups);
        println!("Optometry rows: {}", self.sources.optometry_rows);
        println!(
            "Groups merged into earlier concepts: {}",
            self.clustering.merged_groups
        );
        println!();
        self.report.print_human(args);
        println!();
        println!("Concept map saved to {}", self.concept_map_path);

        if let Some(index) = &self.index {
            println!();
            index.print_human(args);
        }
    }
}

impl HumanOutput for IndexResult {
    fn print_human(&self, args: &TesauroArgs) {
        self.report.print_human(args);
        println!();
        println!("Inverted index saved to {}", self.inverted_index_path);
    }
}

impl HumanOutput for ExpansionView {
    fn print_human(&self, _args: &TesauroArgs) {
        let result = &self.result;
        print_title(&format!("Expansion of '{}'", result.original));

        match result.outcome() {
            ExpansionOutcome::NotFound => {
                println!("Not found in the index, searching literally");
            }
            ExpansionOutcome::Found => {
                println!("Concept: {}", format_ids(&result.concept_ids));
            }
            ExpansionOutcome::Ambiguous => {
                println!(
                    "Ambiguous: expanding to {} concepts",
                    result.concept_ids.len()
                );
                for concept in &self.concepts {
                    println!("  {}: {}", concept.concept_id, concept.terms.join(", "));
                }
            }
        }

        println!();
        print_subtitle(&format!("Expanded terms ({}):", result.expanded_terms.len()));
        for (i, term) in result.expanded_terms.iter().enumerate() {
            println!("{:>4}. {term}", i + 1);
        }
        println!();
        println!("Query: {}", result.query);
    }
}

impl HumanOutput for ExpansionResults {
    fn print_human(&self, args: &TesauroArgs) {
        for (i, expansion) in self.expansions.iter().enumerate() {
            if i > 0 {
                println!();
            }
            expansion.print_human(args);
        }
    }
}

impl HumanOutput for StatsResult {
    fn print_human(&self, args: &TesauroArgs) {
        self.concepts.print_human(args);
        if self.detailed && args.verbosity() <= 1 {
            for ambiguous in &self.concepts.ambiguous_terms {
                println!(
                    "  {} ({})",
                    ambiguous.term,
                    format_ids(&ambiguous.concept_ids)
                );
            }
        }
        println!();
        self.index.print_human(args);
    }
}

impl HumanOutput for RefineResult {
    fn print_human(&self, args: &TesauroArgs) {
        print_title("CSV Review:");
        println!("Kept rows: {}", self.kept_rows);
        println!("Flagged rows: {}", self.flagged_rows.len());
        if args.verbosity() > 1 || self.dry_run {
            for row in &self.flagged_rows {
                println!("  {}\t{}", row.abbreviation, row.expansion);
            }
        }
        println!();
        if self.dry_run {
            println!("Dry run: {} was not modified", self.csv_path);
        } else {
            println!("Updated {}", self.csv_path);
            println!("Review list written to {}", self.review_path);
        }
    }
}

/// Format concept ids as a comma-separated list.
fn format_ids(ids: &[ConceptId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format `part` as a percentage of `total`.
fn format_percentage(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ids() {
        let ids = vec![
            ConceptId::from_ordinal(1).unwrap(),
            ConceptId::from_ordinal(42).unwrap(),
        ];
        assert_eq!(format_ids(&ids), "C0001, C0042");
        assert_eq!(format_ids(&[]), "");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0, 0), "0.0%");
        assert_eq!(format_percentage(1, 4), "25.0%");
        assert_eq!(format_percentage(2, 3), "66.7%");
    }

    #[test]
    fn test_expansion_view_json_is_flat() {
        let concepts = ConceptMap::from_ordered(vec![vec![
            "Agudeza visual".to_string(),
            "AV".to_string(),
        ]])
        .unwrap();
        let index = crate::inverted::InvertedIndex::build(&concepts);
        let result = crate::expansion::expand("AV", &concepts, &index).unwrap();

        let view = ExpansionView::new(result, &concepts);
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["original"], "AV");
        assert_eq!(value["query"], "(AV OR \"Agudeza visual\")");
        assert_eq!(value["concepts"][0]["concept_id"], "C0001");
    }
}
