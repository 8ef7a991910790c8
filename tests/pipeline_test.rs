//! End-to-end tests: source files to persisted thesaurus to expansion.

use std::fs;

use tempfile::TempDir;

use tesauro::cluster::cluster_sources;
use tesauro::config::BuildConfig;
use tesauro::error::Result;
use tesauro::expansion::ExpansionOutcome;
use tesauro::inverted::build_index;
use tesauro::loader::{
    load_abbreviation_list, load_canonical_dictionary, load_sources, refine_file,
};
use tesauro::report::{ConceptMapReport, IndexReport};
use tesauro::storage;
use tesauro::thesaurus::{Thesaurus, ThesaurusHandle};

const ABBREVIATIONS: &str = "\
AD: Adición
ADD: Adición
AM: Agujero macular

AM: Astigmatismo mixto
sin dos puntos
AV: Agudeza visual
";

const SYNONYMS: &str = "\
# grupos de sinónimos
[Agudeza visual, AV, Visión]
[OD, Ojo derecho]
no es un grupo
";

const OPTOMETRY_CSV: &str = "\
Sigla,Expansión
OD,Oculus dexter
PIO,Presión intraocular
BUT,Break-up time (inglés)
";

fn setup() -> Result<(TempDir, BuildConfig)> {
    let dir = TempDir::new()?;
    let config = BuildConfig::default().with_base_dir(dir.path());

    fs::write(config.abbreviation_list_path(), ABBREVIATIONS)?;
    fs::write(config.synonyms_path(), SYNONYMS)?;
    fs::write(config.optometry_csv_path(), OPTOMETRY_CSV)?;

    let dictionary = load_abbreviation_list(&config.abbreviation_list_path())?;
    storage::save_canonical_dictionary(&config.canonical_path(), &dictionary)?;

    Ok((dir, config))
}

fn build(config: &BuildConfig) -> Result<Thesaurus> {
    let (sources, _) = load_sources(config)?;
    let (concepts, _) = cluster_sources(&sources)?;
    let index = build_index(&concepts);

    storage::save_concept_map(&config.concept_map_path(), &concepts)?;
    storage::save_inverted_index(&config.inverted_index_path(), &index)?;

    storage::load_thesaurus(&config.concept_map_path(), &config.inverted_index_path())
}

#[test]
fn test_canonical_dictionary_keeps_file_order() -> Result<()> {
    let (_dir, config) = setup()?;

    let dictionary = load_canonical_dictionary(&config.canonical_path())?;
    let keys: Vec<&str> = dictionary.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["AD", "AM", "AM-2", "AV"]);
    assert_eq!(dictionary.get("AD").unwrap(), ["AD", "ADD", "Adición"]);
    assert_eq!(dictionary.disambiguated_count(), 1);

    Ok(())
}

#[test]
fn test_full_pipeline() -> Result<()> {
    let (_dir, config) = setup()?;

    let (sources, counts) = load_sources(&config)?;
    assert_eq!(counts.canonical_entries, 4);
    assert_eq!(counts.synonym_groups, 2);
    assert_eq!(counts.optometry_rows, 3);

    let (concepts, stats) = cluster_sources(&sources)?;
    assert_eq!(concepts.len(), 7);
    assert_eq!(stats.merged_groups, 2);

    let thesaurus = build(&config)?;
    assert_eq!(thesaurus.concepts(), &concepts);

    let od = thesaurus.expand("OD")?;
    assert_eq!(od.outcome(), ExpansionOutcome::Found);
    assert_eq!(od.query, "(OD OR \"Oculus dexter\" OR \"Ojo derecho\")");

    let am = thesaurus.expand("AM")?;
    assert_eq!(am.outcome(), ExpansionOutcome::Ambiguous);
    assert_eq!(
        am.concept_ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["C0002", "C0003"]
    );

    let av = thesaurus.expand("Visión")?;
    assert_eq!(av.query, "(AV OR \"Agudeza visual\" OR Visión)");

    assert_eq!(
        thesaurus.expand("sin dos puntos")?.outcome(),
        ExpansionOutcome::NotFound
    );

    Ok(())
}

#[test]
fn test_reports_over_built_thesaurus() -> Result<()> {
    let (_dir, config) = setup()?;
    let thesaurus = build(&config)?;

    let concepts = ConceptMapReport::new(thesaurus.concepts());
    assert_eq!(concepts.total_concepts, 7);
    assert_eq!(concepts.max_terms, 3);
    assert_eq!(concepts.min_terms, 2);
    assert_eq!(concepts.ambiguous_terms.len(), 1);

    let index = IndexReport::new(thesaurus.index());
    assert_eq!(index.ambiguous_terms, 1);
    assert_eq!(index.most_ambiguous_term.as_deref(), Some("AM"));

    Ok(())
}

#[test]
fn test_rebuild_produces_identical_files() -> Result<()> {
    let (_dir, config) = setup()?;

    build(&config)?;
    let concepts_first = fs::read_to_string(config.concept_map_path())?;
    let index_first = fs::read_to_string(config.inverted_index_path())?;

    build(&config)?;
    assert_eq!(fs::read_to_string(config.concept_map_path())?, concepts_first);
    assert_eq!(fs::read_to_string(config.inverted_index_path())?, index_first);

    Ok(())
}

#[test]
fn test_refined_csv_drops_flagged_rows_from_build() -> Result<()> {
    let (_dir, config) = setup()?;

    let refinement = refine_file(&config.optometry_csv_path(), &config.review_path())?;
    assert_eq!(refinement.flagged.len(), 1);
    assert_eq!(
        fs::read_to_string(config.review_path())?,
        "BUT\tBreak-up time (inglés)\n"
    );

    let thesaurus = build(&config)?;
    assert_eq!(thesaurus.concepts().len(), 6);
    assert!(!thesaurus.expand("BUT")?.found);

    Ok(())
}

#[test]
fn test_handle_publishes_rebuilt_thesaurus() -> Result<()> {
    let (_dir, config) = setup()?;
    let handle = ThesaurusHandle::new(build(&config)?);
    let before = handle.snapshot();

    fs::write(
        config.synonyms_path(),
        format!("{SYNONYMS}[PIO, Tonometría]\n"),
    )?;
    handle.publish(build(&config)?);

    assert!(!before.expand("Tonometría")?.found);
    assert!(handle.snapshot().expand("Tonometría")?.found);
    assert_eq!(handle.generation(), 1);

    Ok(())
}

#[test]
fn test_missing_source_is_reported() -> Result<()> {
    let (_dir, config) = setup()?;
    fs::remove_file(config.optometry_csv_path())?;

    assert!(load_sources(&config).is_err());

    Ok(())
}
