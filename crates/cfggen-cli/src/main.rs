//! cfggen CLI - Main entry point

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cfggen::{MemoryEnvironment, ProcessEnvironment, Value, evaluate_merged, load_template};

/// Generate configurations from templates
#[derive(Parser, Debug)]
#[command(name = "cfggen")]
#[command(version)]
#[command(about = "Expand configuration templates into concrete configurations", long_about = None)]
struct Args {
    /// Template files (.json, .json5, .yml, .yaml). Later files override
    /// top-level keys of earlier ones.
    #[arg(required = true, value_name = "TEMPLATE")]
    templates: Vec<PathBuf>,

    /// Write output to FILE instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Emit single-line JSON (JSON only; ignored with --format yaml)
    #[arg(long)]
    compact: bool,

    /// Set an environment variable for `$env` (KEY=VALUE)
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    env: Vec<(String, String)>,

    /// Do not expose the process environment to `$env`
    #[arg(long)]
    clean_env: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn parse_env_pair(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing variable name in '{}'", s)),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

fn main() {
    // Logs go to stderr; stdout carries only the generated configuration
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cfggen=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    if args.compact && args.format == OutputFormat::Yaml {
        warn!("--compact has no effect on YAML output");
    }

    let mut environment = if args.clean_env {
        MemoryEnvironment::new()
    } else {
        MemoryEnvironment::from(ProcessEnvironment::snapshot())
    };
    for (key, value) in &args.env {
        environment.set(key.as_str(), value.as_str());
    }

    let templates = args
        .templates
        .iter()
        .map(|path| {
            load_template(path)
                .with_context(|| format!("Failed to load template: {}", path.display()))
        })
        .collect::<Result<Vec<Value>>>()?;

    let result =
        evaluate_merged(templates, &environment).context("Failed to evaluate template")?;

    let rendered = render(&result, args.format, args.compact)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            std::io::stdout()
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn render(value: &Value, format: OutputFormat, compact: bool) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json if compact => serde_json::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    Ok(rendered)
}
