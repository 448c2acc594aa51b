//! Keyword heuristics for author affiliations.
//!
//! Both predicates lower-case the affiliation and look for plain substrings,
//! with no word-boundary checks. "Instituteburg Pharma" therefore counts as
//! academic because it contains "institute".

/// Markers of an academic or non-profit institution.
///
/// `lab` stands in for the `labs?` pattern and also matches "Laboratories".
pub const ACADEMIC_KEYWORDS: &[&str] = &[
    "university",
    "college",
    "institute",
    "school",
    "academy",
    "hospital",
    "lab",
    "research",
    "foundation",
];

/// Generic industry terms followed by a roster of named companies.
pub const INDUSTRY_KEYWORDS: &[&str] = &[
    "pharma",
    "biotech",
    "pharmaceutical",
    "bio-tech",
    "genentech",
    "pfizer",
    "novartis",
    "roche",
    "merck",
    "gsk",
    "sanofi",
    "astrazeneca",
    "bayer",
    "eli lilly",
    "bristol-myers",
    "abbvie",
    "amgen",
    "biogen",
    "gilead",
];

/// Returns true when the affiliation names no academic institution.
///
/// Absent or empty affiliations are never non-academic.
#[must_use]
pub fn is_non_academic(affiliation: Option<&str>) -> bool {
    match non_empty_lowercase(affiliation) {
        Some(text) => !contains_any(&text, ACADEMIC_KEYWORDS),
        None => false,
    }
}

/// Returns true when the affiliation mentions a pharmaceutical or biotech company.
#[must_use]
pub fn is_pharma_biotech(affiliation: Option<&str>) -> bool {
    non_empty_lowercase(affiliation).is_some_and(|text| contains_any(&text, INDUSTRY_KEYWORDS))
}

fn non_empty_lowercase(affiliation: Option<&str>) -> Option<String> {
    affiliation.filter(|a| !a.is_empty()).map(str::to_lowercase)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
