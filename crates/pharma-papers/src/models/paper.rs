//! Paper data model.

use chrono::NaiveDate;
use serde::Serialize;

use super::Author;

/// Title used when the record has none.
pub const UNTITLED: &str = "No title available";

/// A PubMed article reduced to the fields the report needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pubmed_id: String,
    title: String,
    publication_date: NaiveDate,
    authors: Vec<Author>,
}

impl Paper {
    /// Create a paper. A blank title is replaced by [`UNTITLED`].
    #[must_use]
    pub fn new(
        pubmed_id: impl Into<String>,
        title: impl Into<String>,
        publication_date: NaiveDate,
        authors: Vec<Author>,
    ) -> Self {
        let title = collapse_whitespace(&title.into());
        let title = if title.is_empty() { UNTITLED.to_string() } else { title };
        Self { pubmed_id: pubmed_id.into(), title, publication_date, authors }
    }

    /// PubMed identifier (PMID).
    #[must_use]
    pub fn pubmed_id(&self) -> &str {
        &self.pubmed_id
    }

    /// Whitespace-normalized title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Publication date.
    #[must_use]
    pub const fn publication_date(&self) -> NaiveDate {
        self.publication_date
    }

    /// Authors in document order.
    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Authors whose affiliation names no academic institution.
    pub fn non_academic_authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.iter().filter(|a| a.is_non_academic())
    }

    /// Distinct pharma/biotech affiliations, in first-seen order.
    #[must_use]
    pub fn company_affiliations(&self) -> Vec<&str> {
        let mut companies: Vec<&str> = Vec::new();
        let industry = self.authors.iter().filter(|a| a.is_industry());
        for affiliation in industry.filter_map(Author::affiliation) {
            if !companies.contains(&affiliation) {
                companies.push(affiliation);
            }
        }
        companies
    }

    /// Email of the first corresponding author that has one.
    #[must_use]
    pub fn corresponding_author_email(&self) -> Option<&str> {
        self.authors.iter().filter(|a| a.is_corresponding()).find_map(Author::email)
    }

    /// True when at least one author has an industry affiliation.
    #[must_use]
    pub fn has_industry_author(&self) -> bool {
        self.authors.iter().any(Author::is_industry)
    }
}

/// Collapse runs of whitespace to single spaces and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn author(name: &str, affiliation: Option<&str>, corresponding: bool) -> Author {
        Author::with_affiliation(name, affiliation.map(String::from), corresponding).unwrap()
    }

    #[test]
    fn test_title_is_normalized() {
        let paper = Paper::new("1", "  A\n  study\tof   things ", date(), vec![]);
        assert_eq!(paper.title(), "A study of things");

        let paper = Paper::new("1", " \n ", date(), vec![]);
        assert_eq!(paper.title(), UNTITLED);
    }

    #[test]
    fn test_derived_views() {
        let paper = Paper::new(
            "42",
            "Title",
            date(),
            vec![
                author("Ann Academic", Some("Stanford University"), true),
                author("Bob Industry", Some("Genentech, South San Francisco. bob@gene.com"), false),
                author("Cat Industry", Some("Pfizer Inc. cat@pfizer.com"), true),
                author("Dan Duplicate", Some("Genentech, South San Francisco. bob@gene.com"), false),
                author("Eve Unaffiliated", None, false),
            ],
        );

        let names: Vec<&str> = paper.non_academic_authors().map(Author::name).collect();
        assert_eq!(names, vec!["Bob Industry", "Cat Industry", "Dan Duplicate"]);

        assert_eq!(
            paper.company_affiliations(),
            vec!["Genentech, South San Francisco. bob@gene.com", "Pfizer Inc. cat@pfizer.com"]
        );

        // Ann is corresponding but has no email in her affiliation.
        assert_eq!(paper.corresponding_author_email(), Some("cat@pfizer.com"));
        assert!(paper.has_industry_author());
    }

    #[test]
    fn test_paper_without_authors() {
        let paper = Paper::new("7", "Lonely", date(), vec![]);
        assert_eq!(paper.non_academic_authors().count(), 0);
        assert!(paper.company_affiliations().is_empty());
        assert_eq!(paper.corresponding_author_email(), None);
        assert!(!paper.has_industry_author());
    }
}
