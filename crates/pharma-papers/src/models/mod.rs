//! Normalized article model built from PubMed records.
//!
//! Both types are immutable once built; the derived views on [`Paper`] are
//! computed from the [`crate::classifier`] on every call.

mod author;
mod paper;

pub use author::{Author, display_name, email_from_affiliation};
pub use paper::{Paper, UNTITLED, collapse_whitespace};
