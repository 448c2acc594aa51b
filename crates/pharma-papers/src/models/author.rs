//! Author data model.

use serde::Serialize;

use crate::classifier;

/// Characters trimmed from both ends of an email token found in an affiliation.
const EMAIL_TRIM: &[char] = &['.', ',', ';'];

/// An author of a PubMed article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    name: String,
    affiliation: Option<String>,
    is_corresponding: bool,
    email: Option<String>,
}

impl Author {
    /// Create an author. Returns `None` when the name is blank.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        affiliation: Option<String>,
        is_corresponding: bool,
        email: Option<String>,
    ) -> Option<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return None;
        }
        Some(Self { name, affiliation, is_corresponding, email })
    }

    /// Create an author from an affiliation, deriving the email from it.
    #[must_use]
    pub fn with_affiliation(
        name: impl Into<String>,
        affiliation: Option<String>,
        is_corresponding: bool,
    ) -> Option<Self> {
        let email = affiliation.as_deref().and_then(email_from_affiliation);
        Self::new(name, affiliation, is_corresponding, email)
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text affiliation, if the record carried one.
    #[must_use]
    pub fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref()
    }

    /// Whether the source entry was marked valid (`ValidYN="Y"`).
    #[must_use]
    pub const fn is_corresponding(&self) -> bool {
        self.is_corresponding
    }

    /// Email found in the affiliation text.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// True when the affiliation names no academic institution.
    #[must_use]
    pub fn is_non_academic(&self) -> bool {
        classifier::is_non_academic(self.affiliation())
    }

    /// True when the affiliation names a pharmaceutical or biotech company.
    #[must_use]
    pub fn is_industry(&self) -> bool {
        classifier::is_pharma_biotech(self.affiliation())
    }
}

/// Combine given and family names.
///
/// "Jane" + "Doe" gives "Jane Doe"; a family name alone is used as is.
/// Without a family name there is no usable name.
#[must_use]
pub fn display_name(fore_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let last = last_name.map(str::trim).filter(|s| !s.is_empty())?;
    match fore_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(fore) => Some(format!("{fore} {last}")),
        None => Some(last.to_string()),
    }
}

/// First whitespace-separated token containing `@`, trimmed of `.,;`.
#[must_use]
pub fn email_from_affiliation(affiliation: &str) -> Option<String> {
    affiliation
        .split_whitespace()
        .find(|token| token.contains('@'))
        .map(|token| token.trim_matches(EMAIL_TRIM))
        .filter(|email| !email.is_empty())
        .map(String::from)
}
