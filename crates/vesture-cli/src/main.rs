//! `vesture` command line interface.
//!
//! Loads a catalog and two profile documents, collects the body and style
//! type (interactively when not given), and prints the ranked
//! recommendations. The engine itself lives in `vesture-core`; everything
//! here is glue.

mod interactive;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vesture_core::{validate_profile_schema, Catalog, ProfileSet, RecommendRequest, Recommender};

#[derive(Parser)]
#[command(name = "vesture", version, about = "Rule-based outfit recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score the catalog and print the top-ranked outfits
    Recommend(RecommendArgs),
    /// Run the 11-question style survey and print the inferred style type
    Survey,
    /// List the profile keys available in a profile document
    Profiles {
        /// Profile document (JSON or YAML)
        path: PathBuf,
    },
    /// Validate a profile document against the profile schema
    Lint {
        /// Profile document (JSON or YAML)
        path: PathBuf,
    },
}

#[derive(Args)]
struct RecommendArgs {
    /// Item catalog (JSON or YAML)
    #[arg(long)]
    catalog: PathBuf,

    /// Body profile document
    #[arg(long)]
    body_profiles: PathBuf,

    /// Style profile document
    #[arg(long)]
    style_profiles: PathBuf,

    /// Body type key; prompts interactively when omitted
    #[arg(long)]
    body_type: Option<String>,

    /// Style type key; runs the survey when omitted
    #[arg(long)]
    style_type: Option<String>,

    /// Number of outfits to return
    #[arg(long, default_value_t = 5)]
    top_k: usize,

    /// Drop outfits scoring below this threshold
    #[arg(long)]
    min_score: Option<f64>,

    /// Write the outfit payload JSON to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Avatar id recorded in the outfit payload
    #[arg(long, default_value = "kr_female_20s_01")]
    avatar_id: String,

    /// Age group recorded in the outfit payload
    #[arg(long, default_value_t = 20)]
    age_group: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Recommend(args) => recommend(args),
        Command::Survey => survey(),
        Command::Profiles { path } => profiles(&path),
        Command::Lint { path } => lint(&path),
    }
}

fn recommend(args: RecommendArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let body_profiles = load_profiles(&args.body_profiles)?;
    let style_profiles = load_profiles(&args.style_profiles)?;
    let recommender = Recommender::new(catalog, body_profiles, style_profiles);
    debug!(
        items = recommender.catalog().len(),
        body_types = recommender.body_types().len(),
        style_types = recommender.style_types().len(),
        "inputs loaded"
    );

    let body_type = match args.body_type {
        Some(key) => key,
        None => interactive::choose_body_type(&recommender.body_types())?,
    };

    let mut survey_answers = None;
    let style_type = match args.style_type {
        Some(key) => key,
        None => {
            let (style, answers) = interactive::run_style_survey()?;
            survey_answers = Some(answers);
            style.to_string()
        }
    };

    let request = RecommendRequest {
        body_type,
        style_type,
        top_k: args.top_k,
        min_score: args.min_score,
    };
    let recommendation = recommender.recommend(&request)?;

    report::print_ranking(&recommendation);

    if let Some(path) = args.output {
        let payload = report::outfit_payload(
            &recommendation,
            &args.avatar_id,
            args.age_group,
            survey_answers.as_deref(),
        );
        let rendered = serde_json::to_string_pretty(&payload)?;
        fs::write(&path, rendered)
            .with_context(|| format!("writing outfit payload to {}", path.display()))?;
        println!("\nSaved outfit payload to {}", path.display());
    }

    Ok(())
}

fn survey() -> Result<()> {
    let (style, answers) = interactive::run_style_survey()?;
    println!("\nstyle_type = {style}");
    println!("answers    = {answers:?}");
    Ok(())
}

fn profiles(path: &Path) -> Result<()> {
    let set = load_profiles(path)?;
    if set.is_empty() {
        bail!("no profiles recognized in {}", path.display());
    }
    for key in set.keys() {
        println!("{key}");
    }
    Ok(())
}

fn lint(path: &Path) -> Result<()> {
    let document = load_document(path)?;
    match validate_profile_schema(&document) {
        Ok(()) => {
            println!("{}: OK", path.display());
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("{}: {}", path.display(), error);
            }
            bail!("{} schema violation(s)", errors.len());
        }
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    let catalog = if is_yaml(path) {
        Catalog::from_yaml_file(path)
    } else {
        Catalog::from_json_file(path)
    };
    catalog.with_context(|| format!("loading catalog {}", path.display()))
}

fn load_profiles(path: &Path) -> Result<ProfileSet> {
    let profiles = if is_yaml(path) {
        ProfileSet::from_yaml_file(path)
    } else {
        ProfileSet::from_json_file(path)
    };
    profiles.with_context(|| format!("loading profiles {}", path.display()))
}

fn load_document(path: &Path) -> Result<serde_json::Value> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let document = if is_yaml(path) {
        serde_yaml::from_str(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };
    Ok(document)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
