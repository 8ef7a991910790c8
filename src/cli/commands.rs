//! Command implementations for the tesauro CLI.

use std::fs::File;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::cluster::cluster_sources;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::inverted::InvertedIndex;
use crate::loader::{load_abbreviation_list, load_sources, refine, refine_file};
use crate::report::{ConceptMapReport, IndexReport};
use crate::storage;

/// Execute a CLI command.
pub fn execute_command(args: TesauroArgs) -> Result<()> {
    let config = args.build_config()?;
    debug!("Using base directory {}", config.base_dir.display());

    match &args.command {
        Command::Siglas(siglas_args) => generate_dictionary(siglas_args.clone(), &config, &args),
        Command::Build(build_args) => build_concept_map(build_args.clone(), &config, &args),
        Command::Index(_) => build_inverted_index(&config, &args),
        Command::Expand(expand_args) => expand_terms(expand_args.clone(), &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &config, &args),
        Command::RefineCsv(refine_args) => refine_csv(refine_args.clone(), &config, &args),
    }
}

/// Generate the canonical dictionary from the plain abbreviation list.
fn generate_dictionary(
    args: SiglasArgs,
    config: &BuildConfig,
    cli_args: &TesauroArgs,
) -> Result<()> {
    let input = args
        .input
        .map(|path| config.resolve(&path))
        .unwrap_or_else(|| config.abbreviation_list_path());
    let output = args
        .output
        .map(|path| config.resolve(&path))
        .unwrap_or_else(|| config.canonical_path());

    let dictionary = load_abbreviation_list(&input)?;
    storage::save_canonical_dictionary(&output, &dictionary)?;

    output_result(
        "Canonical dictionary generated",
        &DictionaryResult {
            input: input.display().to_string(),
            output: output.display().to_string(),
            entries: dictionary.len(),
            disambiguated_entries: dictionary.disambiguated_count(),
        },
        cli_args,
    )
}

/// Cluster the three sources into the concept map and save it.
fn build_concept_map(args: BuildArgs, config: &BuildConfig, cli_args: &TesauroArgs) -> Result<()> {
    let (sources, counts) = load_sources(config)?;
    let (concepts, clustering) = cluster_sources(&sources)?;

    let concept_map_path = config.concept_map_path();
    storage::save_concept_map(&concept_map_path, &concepts)?;

    let index = if args.with_index {
        let index = InvertedIndex::build(&concepts);
        let path = config.inverted_index_path();
        storage::save_inverted_index(&path, &index)?;
        Some(IndexResult {
            inverted_index_path: path.display().to_string(),
            report: IndexReport::new(&index),
        })
    } else {
        None
    };

    output_result(
        "Concept map built",
        &BuildResult {
            concept_map_path: concept_map_path.display().to_string(),
            sources: counts,
            clustering,
            report: ConceptMapReport::new(&concepts),
            index,
        },
        cli_args,
    )
}

/// Build the inverted index from the saved concept map.
fn build_inverted_index(config: &BuildConfig, cli_args: &TesauroArgs) -> Result<()> {
    let concepts = storage::load_concept_map(&config.concept_map_path())?;
    info!("Loaded {} concepts", concepts.len());

    let index = InvertedIndex::build(&concepts);
    let path = config.inverted_index_path();
    storage::save_inverted_index(&path, &index)?;

    output_result(
        "Inverted index built",
        &IndexResult {
            inverted_index_path: path.display().to_string(),
            report: IndexReport::new(&index),
        },
        cli_args,
    )
}

/// Expand each term against the saved thesaurus.
fn expand_terms(args: ExpandArgs, config: &BuildConfig, cli_args: &TesauroArgs) -> Result<()> {
    let thesaurus =
        storage::load_thesaurus(&config.concept_map_path(), &config.inverted_index_path())?;
    info!(
        "Loaded {} concepts and {} index terms",
        thesaurus.concepts().len(),
        thesaurus.index().len()
    );

    let expansions = thesaurus
        .expand_batch(&args.terms)?
        .into_iter()
        .map(|result| ExpansionView::new(result, thesaurus.concepts()))
        .collect();

    output_result(
        "Expansion complete",
        &ExpansionResults { expansions },
        cli_args,
    )
}

/// Report on the saved concept map and index.
fn show_stats(args: StatsArgs, config: &BuildConfig, cli_args: &TesauroArgs) -> Result<()> {
    let thesaurus =
        storage::load_thesaurus(&config.concept_map_path(), &config.inverted_index_path())?;

    output_result(
        "Thesaurus statistics",
        &StatsResult {
            concepts: ConceptMapReport::new(thesaurus.concepts()),
            index: IndexReport::new(thesaurus.index()),
            detailed: args.detailed,
        },
        cli_args,
    )
}

/// Pull questionable rows out of the optometry CSV.
fn refine_csv(args: RefineCsvArgs, config: &BuildConfig, cli_args: &TesauroArgs) -> Result<()> {
    let csv_path = config.optometry_csv_path();
    let review_path = config.review_path();

    let refinement = if args.dry_run {
        refine(File::open(&csv_path)?)?
    } else {
        refine_file(&csv_path, &review_path)?
    };

    output_result(
        "CSV refinement complete",
        &RefineResult {
            csv_path: csv_path.display().to_string(),
            review_path: review_path.display().to_string(),
            kept_rows: refinement.kept.len(),
            flagged_rows: refinement.flagged.iter().map(FlaggedRowView::from).collect(),
            dry_run: args.dry_run,
        },
        cli_args,
    )
}
