//! maladex — symptom→disease matching from the command line.
//!
//! Loads the reference tables named in maladex.toml, reconciles the user's
//! symptoms (known names via --select, free text via --text) against the
//! vocabulary, ranks candidate diseases by profile overlap and prints the top
//! results with precaution texts. The full ranked set can be exported as CSV,
//! JSON or plain text.

mod config;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use maladex_core::normalize::{display_name, manual_key};
use maladex_core::{
    export, index_rows, predict, resolve, DiseaseIndex, EngineError, MappingChoice, MatchResult,
    MatchTier, PendingMapping, ResolutionOutcome, ResolverConfig, TranslationTable, Vocabulary,
};
use maladex_datasets::{translations, DiseaseDataset, ImageMap, PrecautionTable};

#[derive(Parser)]
#[command(name = "maladex")]
#[command(version)]
#[command(about = "Symptom→disease matching and ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show loaded dataset metrics
    Info,
    /// List every known symptom display name
    Symptoms,
    /// Preview fuzzy candidates for free-text symptoms without predicting
    Resolve {
        /// Free-text symptoms, separated by comma, semicolon or newline
        #[arg(value_name = "TEXT")]
        text: String,

        /// Similarity cutoff in [0, 1]; overrides the config value
        #[arg(long, value_name = "CUTOFF")]
        cutoff: Option<f64>,
    },
    /// Rank diseases against the selected symptoms
    Predict(PredictArgs),
}

#[derive(Args)]
struct PredictArgs {
    /// Known symptom, by display or raw name. Repeatable.
    #[arg(short = 's', long = "select", value_name = "SYMPTOM")]
    select: Vec<String>,

    /// Free-text symptoms, separated by comma, semicolon or newline
    #[arg(long, value_name = "TEXT")]
    text: Option<String>,

    /// Similarity cutoff in [0, 1]; overrides the config value
    #[arg(long, value_name = "CUTOFF")]
    cutoff: Option<f64>,

    /// Explicit mapping TOKEN=DISPLAY or TOKEN=manual for a free-text token.
    /// Repeatable; unlisted tokens take their top candidate.
    #[arg(long = "choose", value_name = "TOKEN=CHOICE")]
    choose: Vec<String>,

    /// How many ranked results to print; exports always carry the full set
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Write the full ranked set as CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write the full ranked set as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Write a plain-text summary
    #[arg(long, value_name = "FILE")]
    txt: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("maladex=debug,info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::Config::load().context("Failed to load maladex.toml")?;

    match cli.command {
        Commands::Info => cmd_info(&config),
        Commands::Symptoms => cmd_symptoms(&config),
        Commands::Resolve { text, cutoff } => cmd_resolve(&config, &text, cutoff),
        Commands::Predict(args) => cmd_predict(&config, args),
    }
}

// ── Table loading ───────────────────────────────────────────────────────────

struct Tables {
    dataset: DiseaseDataset,
    index: DiseaseIndex,
    vocabulary: Vocabulary,
    translations: Option<TranslationTable>,
    precautions: PrecautionTable,
    images: ImageMap,
}

/// Load every configured table, degrading instead of aborting.
///
/// A missing dataset yields an empty index and vocabulary; callers must treat
/// that as "no predictions possible". Missing side tables just lose their
/// feature.
fn load_tables(config: &config::Config) -> Tables {
    let symptoms_path = Path::new(&config.data.symptoms);
    let dataset = match DiseaseDataset::load(symptoms_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!("Could not load disease dataset: {e:#}");
            DiseaseDataset::empty(symptoms_path)
        }
    };
    let indexed = index_rows(dataset.rows.clone());

    let translations = config.data.translations.as_deref().and_then(|path| {
        match translations::load(Path::new(path)) {
            Ok(table) => Some(table),
            Err(e) => {
                warn!("Could not load translation table: {e:#}");
                None
            }
        }
    });
    let vocabulary = Vocabulary::from_tokens(&indexed.vocabulary_tokens, translations.as_ref());

    let precautions = match PrecautionTable::load(Path::new(&config.data.precautions)) {
        Ok(table) => table,
        Err(e) => {
            warn!("Could not load precaution table: {e:#}");
            PrecautionTable::default()
        }
    };
    let images = match config.data.images.as_deref() {
        Some(path) => match ImageMap::load(Path::new(path)) {
            Ok(map) => map,
            Err(e) => {
                warn!("Could not load image map: {e:#}");
                ImageMap::default()
            }
        },
        None => ImageMap::default(),
    };

    Tables {
        dataset,
        index: indexed.diseases,
        vocabulary,
        translations,
        precautions,
        images,
    }
}

// ── Commands ────────────────────────────────────────────────────────────────

fn cmd_info(config: &config::Config) -> Result<()> {
    let tables = load_tables(config);
    println!("Dataset: {}", tables.dataset.source_file.display());
    println!("  rows:      {}", tables.dataset.row_count());
    println!("  diseases:  {}", tables.dataset.distinct_diseases());
    println!("  symptoms:  {}", tables.vocabulary.len());
    println!("  loaded at: {}", tables.dataset.loaded_at.to_rfc3339());
    match &tables.translations {
        Some(table) => println!("Translations: {} labels", table.len()),
        None => println!("Translations: none"),
    }
    println!("Precautions:  {} diseases", tables.precautions.len());
    println!("Images:       {} diseases", tables.images.len());
    Ok(())
}

fn cmd_symptoms(config: &config::Config) -> Result<()> {
    let tables = load_tables(config);
    if tables.vocabulary.is_empty() {
        println!("⚠️ No symptom data loaded. Check [data].symptoms in maladex.toml.");
        return Ok(());
    }
    println!("{} known symptoms:", tables.vocabulary.len());
    for display in tables.vocabulary.display_names() {
        println!("  {}", display);
    }
    Ok(())
}

fn cmd_resolve(config: &config::Config, text: &str, cutoff: Option<f64>) -> Result<()> {
    let tables = load_tables(config);
    if tables.vocabulary.is_empty() {
        println!("⚠️ No symptom data loaded. Check [data].symptoms in maladex.toml.");
        return Ok(());
    }
    let resolver = resolver_config(config, cutoff);
    let tokens = resolve::split_bulk_input(text);
    if tokens.is_empty() {
        println!("⚠️ No symptom tokens found in the input.");
        return Ok(());
    }
    let pending = resolve::propose_mappings(
        &tokens,
        &tables.vocabulary,
        &resolver,
        tables.translations.as_ref(),
    );
    print_pending(&pending);
    Ok(())
}

fn cmd_predict(config: &config::Config, args: PredictArgs) -> Result<()> {
    let tables = load_tables(config);
    if tables.vocabulary.is_empty() {
        println!("⚠️ No symptom data loaded. Check [data].symptoms in maladex.toml.");
        return Ok(());
    }
    let resolver = resolver_config(config, args.cutoff);

    // Known symptoms picked by name.
    let mut selected: Vec<String> = Vec::new();
    for input in &args.select {
        match tables
            .vocabulary
            .raw_for_display(input)
            .or_else(|| tables.vocabulary.raw_for_token(input))
        {
            Some(raw) => selected.push(raw.to_string()),
            None => println!(
                "⚠️ Unknown symptom '{}'; pass it through --text to fuzzy-match it.",
                input
            ),
        }
    }

    // Free text goes through the resolver.
    let tokens = args
        .text
        .as_deref()
        .map(resolve::split_bulk_input)
        .unwrap_or_default();
    if !tokens.is_empty() {
        let confirm = config.matching.confirm_before_map || !args.choose.is_empty();
        if confirm {
            let pending = resolve::propose_mappings(
                &tokens,
                &tables.vocabulary,
                &resolver,
                tables.translations.as_ref(),
            );
            if args.choose.is_empty() {
                print_pending(&pending);
                println!("\nRe-run with --choose TOKEN=CHOICE to confirm the mappings.");
                return Ok(());
            }
            let choices = build_choices(&pending, &args.choose)?;
            let outcome = resolve::confirm_mappings(&pending, &choices, &tables.vocabulary);
            report_outcome(&outcome);
            selected.extend(outcome.resolved);
        } else {
            let outcome = resolve::resolve_auto(&tokens, &tables.vocabulary, &resolver);
            report_outcome(&outcome);
            selected.extend(outcome.resolved);
        }
    }

    // The selection is a set; drop repeats but keep first-pick order.
    let mut seen: HashSet<String> = HashSet::new();
    selected.retain(|raw| seen.insert(raw.clone()));

    let results = match predict(&selected, &tables.index, tables.translations.as_ref()) {
        Ok(results) => results,
        Err(EngineError::EmptySelection) => {
            println!("⚠️ Select at least one symptom first (use --select or --text).");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let shown: Vec<String> = selected
        .iter()
        .map(|raw| display_name(raw, tables.translations.as_ref()))
        .collect();
    println!("🔍 Selected symptoms: {}", shown.join(", "));

    if results.is_empty() {
        println!("ℹ️ No diseases matched the selected symptoms.");
        return Ok(());
    }

    let top_n = args.top.unwrap_or(config.output.top_n);
    render_results(&results, top_n, &tables);

    if let Some(path) = &args.csv {
        try_export("csv", path, |p| {
            let file = File::create(p)?;
            Ok(export::write_csv(&results, file)?)
        });
    }
    if let Some(path) = &args.json {
        try_export("json", path, |p| {
            Ok(std::fs::write(p, export::to_json(&results)?)?)
        });
    }
    if let Some(path) = &args.txt {
        try_export("txt", path, |p| {
            Ok(std::fs::write(p, export::text_summary(&results))?)
        });
    }
    Ok(())
}

// ── Rendering ───────────────────────────────────────────────────────────────

fn render_results(results: &[MatchResult], top_n: usize, tables: &Tables) {
    println!(
        "\n✅ {} candidate disease(s), showing up to {}.",
        results.len(),
        top_n
    );
    for (position, result) in results.iter().take(top_n).enumerate() {
        let marker = tier_marker(MatchTier::for_score(result.score));
        println!("\n{} {}. {}", marker, position + 1, result.disease);
        println!(
            "   {}/{} symptoms matched ({:.0}%)",
            result.matched,
            result.total,
            result.score * 100.0
        );
        println!("   Symptoms: {}", result.matched_names.join("; "));
        if let Some(items) = tables.precautions.get(&result.disease) {
            println!("   Precautions:");
            for (index, item) in items.iter().enumerate() {
                println!("     {}. {}", index + 1, item);
            }
        }
        if let Some(image) = tables.images.get(&result.disease) {
            println!("   Image: {}", image);
        }
    }
}

fn print_pending(pending: &[PendingMapping]) {
    for entry in pending {
        println!("\nInput: {} (reads as '{}')", entry.token, entry.display);
        if entry.candidates.is_empty() {
            println!(
                "  no close matches; 'manual' would add it as '{}'",
                manual_key(&entry.token)
            );
        } else {
            for (index, candidate) in entry.candidates.iter().enumerate() {
                println!("  {}) {}", index + 1, candidate);
            }
            println!("  or 'manual' to add it as '{}'", manual_key(&entry.token));
        }
    }
}

fn report_outcome(outcome: &ResolutionOutcome) {
    for (token, display) in &outcome.mapped {
        println!("✅ '{}' mapped to known symptom '{}'", token, display);
    }
    for (token, key) in &outcome.added {
        println!("➕ '{}' added as new symptom '{}'", token, key);
    }
    for (token, candidates) in &outcome.ambiguous {
        println!(
            "ℹ️ '{}' matched several symptoms: {}",
            token,
            candidates.join(", ")
        );
    }
}

fn tier_marker(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::High => "🔴",
        MatchTier::Medium => "🟠",
        MatchTier::Low => "🟡",
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn resolver_config(config: &config::Config, cutoff: Option<f64>) -> ResolverConfig {
    ResolverConfig {
        cutoff: cutoff.unwrap_or(config.matching.fuzzy_cutoff),
        max_candidates: config.matching.max_candidates,
    }
}

/// Pair one decision with each pending token. Tokens without an explicit
/// --choose take their top candidate, or manual when there is none; this
/// mirrors the default selection a confirmation dialog would show.
fn build_choices(pending: &[PendingMapping], specs: &[String]) -> Result<Vec<MappingChoice>> {
    let mut explicit: HashMap<&str, &str> = HashMap::new();
    for spec in specs {
        let (token, choice) = spec
            .split_once('=')
            .with_context(|| format!("invalid --choose {:?}, expected TOKEN=CHOICE", spec))?;
        explicit.insert(token.trim(), choice.trim());
    }
    for token in explicit.keys() {
        if !pending.iter().any(|entry| entry.token == *token) {
            warn!(token = %token, "--choose names a token that is not in the input text");
        }
    }
    Ok(pending
        .iter()
        .map(|entry| match explicit.get(entry.token.as_str()) {
            Some(choice) if choice.eq_ignore_ascii_case("manual") => MappingChoice::Manual,
            Some(choice) => MappingChoice::Vocabulary((*choice).to_string()),
            None => match entry.candidates.first() {
                Some(top) => MappingChoice::Vocabulary(top.clone()),
                None => MappingChoice::Manual,
            },
        })
        .collect())
}

fn try_export(label: &str, path: &Path, write: impl FnOnce(&Path) -> Result<()>) {
    match write(path) {
        Ok(()) => info!(file = %path.display(), format = label, "Wrote export"),
        Err(e) => warn!(file = %path.display(), format = label, "Export failed: {e:#}"),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
