mod bulk;
mod client;
mod form;
mod render;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use attrition_rs::dataset::LabeledDataset;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use client::ApiClient;
use form::EmployeeForm;

#[derive(Debug, Parser)]
#[command(
    name = "attrition-dashboard",
    version,
    about = "Score employees for attrition risk against a running scoring service"
)]
struct Cli {
    /// Base URL of the scoring service.
    #[arg(long, env = "ATTRITION_API_URL", default_value = "http://127.0.0.1:8000", global = true)]
    api_url: String,

    /// Per-request timeout in seconds.
    #[arg(
        long,
        env = "ATTRITION_TIMEOUT_SECS",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict attrition risk for one employee.
    Predict(EmployeeForm),
    /// Score every row of a labelled CSV and report accuracy, precision, recall and F1.
    Evaluate {
        /// CSV file with a header row and an `Attrition` column.
        path: PathBuf,
        /// Maximum number of requests in flight.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=64))]
        concurrency: u16,
        /// Number of rows shown before scoring.
        #[arg(long, default_value_t = 5)]
        preview_rows: usize,
    },
    /// Check that the scoring service is reachable.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        print!("{}", render::prompt());
        return Ok(());
    };

    let client = ApiClient::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;

    match command {
        Command::Predict(form) => {
            let payload = match serde_json::to_value(form.to_record()).context("failed to encode record")? {
                Value::Object(map) => map,
                other => anyhow::bail!("record encoded as {} instead of an object", other),
            };
            let outcome = client.predict(&payload).await?;
            print!("{}", render::prediction_panel(&form.summary(), outcome));
        }
        Command::Evaluate {
            path,
            concurrency,
            preview_rows,
        } => {
            let dataset = LabeledDataset::from_path(&path)
                .with_context(|| format!("failed to load dataset '{}'", path.display()))?;
            println!("{}", render::preview(&dataset, preview_rows));
            let evaluation = bulk::evaluate(&client, &dataset, usize::from(concurrency)).await?;
            println!("Scored {} rows", evaluation.predictions.len());
            print!("{}", render::report(&evaluation.report));
        }
        Command::Health => {
            let message = client.status().await?;
            println!("{}: {}", client.base_url(), message);
        }
    }

    Ok(())
}
