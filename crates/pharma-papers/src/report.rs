//! Filtering papers to industry co-authorship and writing the report.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use crate::error::ReportResult;
use crate::formatters::write_csv;
use crate::models::Paper;

/// Where the CSV report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Standard output.
    Stdout,
    /// A file, created or truncated.
    File(PathBuf),
}

impl OutputSink {
    /// `None` means standard output.
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// What [`serialize`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// There were no papers; nothing was written and no file was created.
    NoMatchingRecords,
    /// The report was written.
    Written {
        /// Data rows, excluding the header.
        rows: usize,
        /// Destination.
        sink: OutputSink,
    },
}

/// Keep papers with at least one pharma/biotech-affiliated author, preserving order.
#[must_use]
pub fn filter_industry(papers: Vec<Paper>) -> Vec<Paper> {
    papers.into_iter().filter(Paper::has_industry_author).collect()
}

/// Write `papers` as CSV to `sink`.
pub fn serialize(papers: &[Paper], sink: &OutputSink) -> ReportResult<ReportOutcome> {
    if papers.is_empty() {
        return Ok(ReportOutcome::NoMatchingRecords);
    }

    let rows = match sink {
        OutputSink::Stdout => write_csv(papers, io::stdout().lock())?,
        OutputSink::File(path) => write_csv(papers, BufWriter::new(File::create(path)?))?,
    };

    tracing::debug!(rows, sink = %sink, "Report written");
    Ok(ReportOutcome::Written { rows, sink: sink.clone() })
}
