//! Command-line front end.
//!
//! `buildcost estimate` prints a breakdown (optionally with AI insights);
//! `buildcost catalog` lists the materials and base rates.

mod render;

pub use render::{advisor_text, catalog_text, estimate_text, EstimateReport};

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use crate::adapters::ai::provider_from_config;
use crate::application::{AdvisorSession, RequestInsightsHandler};
use crate::config::AppConfig;
use crate::domain::catalog::{MaterialCatalog, QualityGrade};
use crate::domain::estimate::EstimateSheet;
use crate::domain::foundation::Area;

#[derive(Parser, Debug)]
#[command(name = "buildcost", version, about = "Construction cost estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute a material and labor cost breakdown
    Estimate(EstimateArgs),

    /// List the materials in the active catalog
    Catalog {
        /// Read materials from this YAML or JSON file
        #[arg(long, value_name = "FILE")]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Built-up area in sq.ft; anything non-numeric counts as 0
    #[arg(short, long, value_name = "SQFT")]
    pub area: Option<String>,

    /// Quality grade: budget, standard, premium or luxury
    #[arg(short, long, value_name = "GRADE")]
    pub grade: Option<QualityGrade>,

    /// Leave a material out of the total (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "ID")]
    pub exclude: Vec<String>,

    /// Replace a material's rate, e.g. `--rate cement=400` (repeatable)
    #[arg(short, long = "rate", value_name = "ID=VALUE", value_parser = parse_rate_override)]
    pub rates: Vec<(String, f64)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Ask the AI advisor to review the estimate
    #[arg(long)]
    pub advise: bool,

    /// Read materials from this YAML or JSON file
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parses `id=value` for `--rate`.
fn parse_rate_override(input: &str) -> Result<(String, f64), String> {
    let (id, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{}'", input))?;
    let id = id.trim();
    if id.is_empty() {
        return Err("material id is empty".to_string());
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", value.trim()))?;
    Ok((id.to_string(), value))
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    match cli.command {
        Command::Estimate(args) => run_estimate(&config, args).await,
        Command::Catalog { catalog, format } => run_catalog(&config, catalog, format),
    }
}

fn load_catalog(config: &AppConfig, path: Option<PathBuf>) -> anyhow::Result<MaterialCatalog> {
    let catalog = match path {
        Some(path) => MaterialCatalog::from_path(&path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => config.estimate.load_catalog().context("failed to load catalog")?,
    };
    debug!(materials = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Builds the sheet and applies exclusions and overrides from the arguments.
fn build_sheet(config: &AppConfig, args: &EstimateArgs) -> anyhow::Result<EstimateSheet> {
    let catalog = load_catalog(config, args.catalog.clone())?;
    let area = match &args.area {
        Some(input) => Area::parse_lenient(input),
        None => Area::new(config.estimate.default_area),
    };
    let grade = args.grade.unwrap_or(config.estimate.default_grade);

    let mut sheet = EstimateSheet::new(Arc::new(catalog), area, grade);

    for id in &args.exclude {
        sheet
            .set_selected(id, false)
            .with_context(|| format!("cannot exclude '{}'", id))?;
    }
    for (id, rate) in &args.rates {
        sheet
            .override_rate(id, *rate)
            .with_context(|| format!("cannot set rate for '{}'", id))?;
    }

    Ok(sheet)
}

/// Wires the Gemini-backed advisor from the `ai` settings.
fn advisor_session(config: &AppConfig) -> anyhow::Result<AdvisorSession> {
    config
        .ai
        .validate()
        .context("AI advisor is not configured (set BUILDCOST__AI__API_KEY)")?;
    let provider = provider_from_config(&config.ai)?;
    let handler = RequestInsightsHandler::new(Arc::new(provider)).with_timeout(config.ai.timeout());
    Ok(AdvisorSession::new(handler))
}

async fn run_estimate(config: &AppConfig, args: EstimateArgs) -> anyhow::Result<()> {
    let sheet = build_sheet(config, &args)?;
    let currency = config.estimate.currency();

    let advisor = if args.advise {
        let session = advisor_session(config)?;
        info!(area = sheet.area().sq_ft(), grade = %sheet.grade(), "Requesting AI review");
        Some(session.analyze(sheet.snapshot(&currency)).await)
    } else {
        None
    };

    match args.format {
        OutputFormat::Json => {
            let report = EstimateReport::new(&sheet, &currency, advisor.as_ref());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print!("{}", estimate_text(&sheet, &currency));
            if let Some(status) = &advisor {
                println!();
                print!("{}", advisor_text(status));
            }
        }
    }

    Ok(())
}

fn run_catalog(
    config: &AppConfig,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = load_catalog(config, path)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
        OutputFormat::Text => print!("{}", catalog_text(&catalog, &config.estimate.currency())),
    }
    Ok(())
}
