mod analyzer;
mod constants;
mod container;
mod parse_order;
mod parse_rels;
mod parse_xml;
mod parser_config;
mod types;

pub use analyzer::{analyze, analyze_file, analyze_with_config};
pub use container::PptxArchive;
pub use parse_order::resolve_order;
pub use parse_rels::{parse_presentation_rels, rels_path_for, Relationship};
pub use parse_xml::extract_inventory;
pub use parser_config::{AnalyzerConfig, AnalyzerConfigBuilder};
pub use types::*;

/// Errors raised by the individual pipeline stages.
///
/// The assembler only gives up on [`Error::CorruptArchive`] and on an absent
/// ordering part; a missing or unreadable slide part becomes a partial record.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Slide part {name} for slide {position} is missing")]
    SlidePartMissing { name: String, position: usize },

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::FileNotFound => Error::EntryNotFound(err.to_string()),
            other => Error::CorruptArchive(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The two conditions that halt an analysis before any report exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisErrorKind {
    CorruptArchive,
    MissingOrderingPart,
}

impl std::fmt::Display for AnalysisErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisErrorKind::CorruptArchive => f.write_str("corrupt archive"),
            AnalysisErrorKind::MissingOrderingPart => f.write_str("missing ordering part"),
        }
    }
}

/// Fatal failure of [`analyze`]; no report is produced.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    pub detail: String,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: detail.into() }
    }
}
