//! PRIME CVD: secondary-prevention risk calculator.
//!
//! Usage:
//!
//! ```bash
//! prime-cvd [--json] <request.json | ->
//! ```
//!
//! The request holds a patient profile, an optional treatment plan and the
//! horizon. Without a plan only the baseline is reported.

use std::io::Read;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use prime_cvd::adapters::sanitize::SanitizingMakeWriter;
use prime_cvd::config::{LogMode, RuntimeConfig};
use prime_cvd::report::{AssessmentReport, BaselineReport};
use prime_cvd::{AssessmentRequest, RiskEngine};

struct Args {
    json: bool,
    input: String,
}

fn parse_args() -> Result<Args> {
    let mut json = false;
    let mut input = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                println!("Usage: prime-cvd [--json] <request.json | ->");
                std::process::exit(0);
            }
            other if input.is_none() => input = Some(other.to_string()),
            other => bail!("Unexpected argument: {other}"),
        }
    }

    match input {
        Some(input) => Ok(Args { json, input }),
        None => bail!("Usage: prime-cvd [--json] <request.json | ->"),
    }
}

fn read_request(input: &str) -> Result<AssessmentRequest> {
    let content = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
    };

    AssessmentRequest::from_json(&content).context("Invalid assessment request")
}

fn main() -> Result<()> {
    let config = RuntimeConfig::from_env()?;

    // stdout carries the report, so logs go to stderr or a file.
    let (writer, _guard) = match &config.log_mode {
        LogMode::File(path) => {
            if let Some(parent) = path.parent() {
                // Best-effort: a missing directory surfaces on open below.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    let args = parse_args()?;
    let request = read_request(&args.input)?;

    let engine = RiskEngine::from_source(config.catalog_source().as_ref())
        .context("Failed to load intervention catalog")?;

    match &request.plan {
        Some(plan) => {
            let result = engine.assess(&request.patient, plan, request.horizon)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!(
                    "{}",
                    AssessmentReport {
                        profile: &request.patient,
                        result: &result,
                        catalog: engine.catalog(),
                    }
                );
            }
        }
        None => {
            let baseline = engine.baseline(&request.patient, request.horizon)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&baseline)?);
            } else {
                print!(
                    "{}",
                    BaselineReport {
                        profile: &request.patient,
                        baseline: &baseline,
                    }
                );
            }
        }
    }

    Ok(())
}
