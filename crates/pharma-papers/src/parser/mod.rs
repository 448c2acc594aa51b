//! Conversion of raw PubMed article records into [`Paper`]s.
//!
//! A record missing its PMID is rejected; every other field degrades to a
//! default. Batch parsing sets rejected records aside and keeps going.

pub mod document;

use chrono::{Local, NaiveDate};

use crate::error::{DocumentError, RecordError, RecordResult};
use crate::models::{Author, Paper, collapse_whitespace, display_name};

pub use document::Element;

/// Source of "today" for records without a usable publication date.
pub trait Clock {
    /// Current calendar date.
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// One `<PubmedArticle>` element as returned by EFetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord(Element);

impl RawRecord {
    /// Wrap an article element.
    #[must_use]
    pub const fn new(element: Element) -> Self {
        Self(element)
    }

    /// Parse a single record from XML text.
    pub fn from_xml(xml: &str) -> Result<Self, DocumentError> {
        Element::parse(xml.as_bytes()).map(Self)
    }

    /// The underlying element tree.
    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.0
    }
}

impl From<Element> for RawRecord {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

/// Result of parsing a batch of records.
#[derive(Debug, Clone, Default)]
pub struct ParsedBatch {
    /// Successfully parsed papers, in input order.
    pub papers: Vec<Paper>,
    /// Why each rejected record was dropped.
    pub rejected: Vec<RecordError>,
}

/// Builds [`Paper`]s from [`RawRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct RecordParser<C = SystemClock> {
    clock: C,
}

impl RecordParser<SystemClock> {
    /// Parser that falls back to the system date.
    #[must_use]
    pub const fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> RecordParser<C> {
    /// Parser with an explicit clock.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Parse one record.
    pub fn parse(&self, record: &RawRecord) -> RecordResult<Paper> {
        let article = record.element();

        let pubmed_id = article
            .descendant("PMID")
            .and_then(Element::text)
            .ok_or(RecordError::MissingField("PMID"))?;

        let title =
            article.descendant("ArticleTitle").map(Element::text_content).unwrap_or_default();

        let publication_date = article
            .descendant("PubDate")
            .and_then(date_of)
            .unwrap_or_else(|| self.clock.today());

        let authors = article
            .descendant("AuthorList")
            .map(|list| list.children_named("Author").filter_map(parse_author).collect())
            .unwrap_or_default();

        Ok(Paper::new(pubmed_id, title, publication_date, authors))
    }

    /// Parse many records, collecting rejects instead of failing.
    pub fn parse_batch(&self, records: &[RawRecord]) -> ParsedBatch {
        let mut batch = ParsedBatch::default();
        for (index, record) in records.iter().enumerate() {
            match self.parse(record) {
                Ok(paper) => batch.papers.push(paper),
                Err(error) => {
                    tracing::warn!(index, %error, "Skipping malformed PubMed record");
                    batch.rejected.push(error);
                }
            }
        }
        batch
    }
}

/// Year, Month and Day must all be numeric and form a real date.
fn date_of(pub_date: &Element) -> Option<NaiveDate> {
    let part = |name: &str| pub_date.child(name).and_then(Element::text);
    let year = part("Year")?.parse().ok()?;
    let month = part("Month")?.parse().ok()?;
    let day = part("Day")?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_author(entry: &Element) -> Option<Author> {
    let last = entry.child("LastName").and_then(Element::text);
    let fore = entry.child("ForeName").and_then(Element::text);
    let name = display_name(fore.as_deref(), last.as_deref())?;

    let is_corresponding = entry.attr("ValidYN").unwrap_or("N") == "Y";
    let affiliation = entry
        .find("AffiliationInfo/Affiliation")
        .map(|a| collapse_whitespace(&a.text_content()))
        .filter(|a| !a.is_empty());

    Author::with_affiliation(name, affiliation, is_corresponding)
}
