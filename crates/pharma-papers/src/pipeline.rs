//! Search → parse → filter, in one call.

use crate::client::PubMedClient;
use crate::error::ClientResult;
use crate::models::Paper;
use crate::parser::{Clock, RecordParser};
use crate::report::filter_industry;

/// Papers retained by a query, with counts from each stage.
#[derive(Debug, Clone, Default)]
pub struct PipelineSummary {
    /// Raw records returned by EFetch.
    pub fetched: usize,
    /// Records dropped as malformed.
    pub rejected: usize,
    /// Papers parsed before filtering.
    pub parsed: usize,
    /// Papers with at least one industry author.
    pub papers: Vec<Paper>,
}

/// Fetch up to `max_results` papers for `query` and keep those with industry authors.
///
/// # Errors
///
/// Returns error when either E-utilities request fails.
pub async fn fetch_industry_papers<C: Clock>(
    client: &PubMedClient,
    parser: &RecordParser<C>,
    query: &str,
    max_results: u32,
) -> ClientResult<PipelineSummary> {
    let records = client.search(query, max_results).await?;
    let batch = parser.parse_batch(&records);
    let parsed = batch.papers.len();
    let papers = filter_industry(batch.papers);

    tracing::debug!(
        query,
        fetched = records.len(),
        rejected = batch.rejected.len(),
        parsed,
        retained = papers.len(),
        "Pipeline finished"
    );

    Ok(PipelineSummary { fetched: records.len(), rejected: batch.rejected.len(), parsed, papers })
}
