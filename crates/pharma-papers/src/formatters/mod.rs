//! Output formatters for papers.

pub mod csv;

pub use self::csv::{HEADER, LIST_SEPARATOR, write_csv};
