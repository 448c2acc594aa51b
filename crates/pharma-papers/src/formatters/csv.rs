//! CSV layout of the industry-affiliation report.

use std::io::Write;

use serde::Serialize;

use crate::error::ReportResult;
use crate::models::{Author, Paper};

/// Column titles, in output order.
pub const HEADER: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// Separator between names or affiliations inside one cell.
pub const LIST_SEPARATOR: &str = "; ";

/// One report line. Field renames produce [`HEADER`].
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    #[serde(rename = "PubmedID")]
    pubmed_id: &'a str,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Publication Date")]
    publication_date: String,
    #[serde(rename = "Non-academic Author(s)")]
    non_academic_authors: String,
    #[serde(rename = "Company Affiliation(s)")]
    company_affiliations: String,
    #[serde(rename = "Corresponding Author Email")]
    corresponding_author_email: &'a str,
}

impl<'a> From<&'a Paper> for ReportRow<'a> {
    fn from(paper: &'a Paper) -> Self {
        let non_academic: Vec<&str> = paper.non_academic_authors().map(Author::name).collect();
        Self {
            pubmed_id: paper.pubmed_id(),
            title: paper.title(),
            publication_date: paper.publication_date().format("%Y-%m-%d").to_string(),
            non_academic_authors: non_academic.join(LIST_SEPARATOR),
            company_affiliations: paper.company_affiliations().join(LIST_SEPARATOR),
            corresponding_author_email: paper.corresponding_author_email().unwrap_or(""),
        }
    }
}

/// Write the header and one row per paper. Returns the number of rows written.
///
/// Nothing at all is written for an empty slice.
pub fn write_csv<W: Write>(papers: &[Paper], writer: W) -> ReportResult<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    for paper in papers {
        writer.serialize(ReportRow::from(paper))?;
    }
    writer.flush()?;
    Ok(papers.len())
}
