//! PubMed industry-affiliation report
//!
//! Searches PubMed through the NCBI E-utilities, parses the returned article
//! records, and reports papers with at least one author affiliated with a
//! pharmaceutical or biotech company.
//!
//! # Features
//!
//! - **Two-phase retrieval**: ESearch for PMIDs, one batched EFetch for records
//! - **Rate-limited**: fixed delay before each request, 3 req/s by default
//! - **Fail-soft parsing**: a malformed record is dropped, the batch continues
//! - **CSV output**: to a file or standard output
//!
//! # Example
//!
//! ```no_run
//! use pharma_papers::{
//!     Config, PubMedClient, RecordParser,
//!     pipeline::fetch_industry_papers,
//!     report::{OutputSink, serialize},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PubMedClient::new(Config::from_env()?)?;
//!     let summary =
//!         fetch_industry_papers(&client, &RecordParser::new(), "cancer immunotherapy", 20).await?;
//!     serialize(&summary.papers, &OutputSink::Stdout)?;
//!     Ok(())
//! }
//! ```

pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use client::PubMedClient;
pub use config::Config;
pub use error::{ClientError, RecordError, ReportError};
pub use models::{Author, Paper};
pub use parser::{RawRecord, RecordParser};
