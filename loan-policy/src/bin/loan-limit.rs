//! Loan-limit command-line tool
//!
//! Reads a JSON loan request from a file (or stdin) and prints the evaluated
//! limit as JSON.
//!
//! ```text
//! loan-limit [--compare] [--config <file>] [<request.json>]
//! ```

use anyhow::Context;
use clap::Parser;
use loan_policy::{Config, LoanLimitEvaluator, LoanRequest, RateScenarioComparator};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "loan-limit", version, about = "Mortgage loan-limit calculator")]
struct Args {
    /// Evaluate the request under every rate product
    #[arg(long)]
    compare: bool,

    /// Configuration TOML file (defaults to LOAN_POLICY_* environment variables)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON loan request (reads stdin when omitted)
    request: Option<PathBuf>,
}

fn read_request(path: Option<&PathBuf>) -> anyhow::Result<LoanRequest> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            buf
        }
    };

    serde_json::from_str(&content).context("request is not a valid loan request")
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::from_env()?,
    };
    let policy = config.load_policy().context("failed to load policy table")?;

    let request = read_request(args.request.as_ref())?;
    tracing::info!(
        region = %request.region_type,
        rate_type = %request.rate_type,
        compare = args.compare,
        "Evaluating loan request"
    );

    let output = if args.compare {
        let comparison = RateScenarioComparator::new(&policy).compare(&request);
        serde_json::to_string_pretty(&comparison)?
    } else {
        let result = LoanLimitEvaluator::new(&policy).evaluate(&request);
        tracing::info!(
            bottleneck = ?result.bottleneck,
            final_limit = %result.final_limit,
            "Loan limit evaluated"
        );
        serde_json::to_string_pretty(&result)?
    };

    println!("{output}");
    Ok(())
}
