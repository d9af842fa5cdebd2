use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use offerly_core::{PricingResult, ProjectDraft, ProjectSpecification, SettingsOverrides};
use offerly_pricing::{currency_name_ar, money_en, PricingEngine, RateCard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "offerly")]
#[command(about = "Offerly freelance pricing engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a project described by a JSON file.
    Estimate {
        #[arg(long)]
        spec: PathBuf,
        /// JSON settings overrides; fields set here win over the spec's `user_settings`.
        #[arg(long)]
        settings: Option<PathBuf>,
        /// YAML rate card replacing the built-in rates.
        #[arg(long)]
        rates: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        #[arg(long, value_enum, default_value = "en")]
        lang: Lang,
    },
    /// Check a project JSON file and list every problem found.
    Validate {
        #[arg(long)]
        spec: PathBuf,
    },
    /// Print the active rate card as YAML.
    Rates {
        #[arg(long)]
        rates: Option<PathBuf>,
    },
    /// Run the HTTP endpoint.
    Serve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Lang {
    En,
    Ar,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            spec,
            settings,
            rates,
            format,
            lang,
        } => {
            let draft = read_draft(&spec)?;
            let mut overrides = draft.user_settings.clone().unwrap_or_default();
            if let Some(path) = settings {
                let file: SettingsOverrides = read_json(&path)?;
                overrides = overrides.merged_with(&file);
            }
            let spec = into_specification(draft, &spec)?;
            let engine = load_engine(rates.as_deref())?;
            let result = engine.calculate(&spec, &overrides);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print!("{}", render_text(&result, &spec.currency, lang)),
            }
        }
        Commands::Validate { spec } => {
            let report = offerly_core::validate(&read_draft(&spec)?);
            if !report.valid {
                for message in &report.errors {
                    eprintln!("error: {message}");
                }
                bail!("{} has {} validation error(s)", spec.display(), report.errors.len());
            }
            println!("{} is valid", spec.display());
        }
        Commands::Rates { rates } => {
            let engine = load_engine(rates.as_deref())?;
            print!("{}", engine.rates().to_yaml_string()?);
        }
        Commands::Serve => {
            offerly_web::serve_from_env().await?;
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("offerly=info,tower_http=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn read_draft(path: &Path) -> Result<ProjectDraft> {
    read_json(path)
}

/// Messages are printed one per line; the returned error only summarizes them.
fn into_specification(draft: ProjectDraft, path: &Path) -> Result<ProjectSpecification> {
    match draft.into_specification() {
        Ok(spec) => Ok(spec),
        Err(err) => {
            for message in &err.report.errors {
                eprintln!("error: {message}");
            }
            bail!(
                "{} has {} validation error(s)",
                path.display(),
                err.report.errors.len()
            );
        }
    }
}

fn load_engine(rates: Option<&Path>) -> Result<PricingEngine> {
    let card = match rates {
        Some(path) => RateCard::from_yaml_path(path)
            .with_context(|| format!("failed to load rate card {}", path.display()))?,
        None => RateCard::default(),
    };
    Ok(PricingEngine::new(card))
}

fn render_text(result: &PricingResult, currency: &str, lang: Lang) -> String {
    let mut out = match lang {
        Lang::En => result.pricing_paragraph_en.clone(),
        Lang::Ar => result.pricing_paragraph_ar.clone(),
    };
    out.push('\n');
    for package in &result.packages {
        let line = match lang {
            Lang::En => format!(
                "{}: {} ({} days)\n",
                package.name,
                money_en(package.price, currency),
                package.duration_days
            ),
            Lang::Ar => format!(
                "{}: {} {} ({} أيام)\n",
                package.name_ar,
                package.price,
                currency_name_ar(currency),
                package.duration_days
            ),
        };
        out.push_str(&line);
    }
    out
}
