//! get-papers-list - Entry Point
//!
//! Fetches PubMed papers with pharmaceutical/biotech co-authors and writes them as CSV.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pharma_papers::{
    Config, PubMedClient, RecordParser,
    config::api,
    pipeline::fetch_industry_papers,
    report::{OutputSink, ReportOutcome, serialize},
};

#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(about = "Fetch research papers from PubMed with pharmaceutical/biotech affiliations.")]
#[command(version)]
struct Cli {
    /// PubMed search query
    query: String,

    /// Output CSV file path (default: print to stdout)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of results to fetch
    #[arg(long, default_value_t = api::DEFAULT_MAX_RESULTS, value_parser = clap::value_parser!(u32).range(1..))]
    max_results: u32,

    /// Email address for PubMed API (required by NCBI usage policy)
    #[arg(long, env = "PUBMED_EMAIL", default_value = api::DEFAULT_EMAIL)]
    email: String,

    /// PubMed API key (optional, enables higher rate limits)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(debug: bool, json: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries the CSV report, so logs go to stderr
    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.debug, cli.json_logs);

    tracing::debug!(query = %cli.query, max_results = cli.max_results, "Fetching papers");

    let config = Config::new(cli.email, cli.api_key.filter(|k| !k.trim().is_empty()));
    let client = PubMedClient::new(config)?;
    let parser = RecordParser::new();

    let summary = fetch_industry_papers(&client, &parser, &cli.query, cli.max_results).await?;
    tracing::debug!(
        before_filtering = summary.parsed,
        after_filtering = summary.papers.len(),
        "Filtered papers"
    );

    match serialize(&summary.papers, &OutputSink::from_path(cli.file))? {
        ReportOutcome::NoMatchingRecords => eprintln!("No papers found matching the criteria."),
        ReportOutcome::Written { sink: OutputSink::File(path), .. } => {
            eprintln!("Results saved to {}", path.display());
        }
        ReportOutcome::Written { sink: OutputSink::Stdout, .. } => {}
    }

    Ok(())
}
