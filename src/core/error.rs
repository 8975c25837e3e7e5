use std::path::PathBuf;
use thiserror::Error;

use crate::core::descriptor::ValidationReport;

/// Central error type for descriptor loading.
/// Every module returns `Result<T, DescriptorError>`.
#[derive(Debug, Error)]
pub enum DescriptorError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Source ──────────────────────────────────────────
    #[error("Unsupported descriptor format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Malformed source at {location}: {message}")]
    MalformedSource { location: String, message: String },

    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingRequiredField(Vec<String>),

    // ── Validation ──────────────────────────────────────
    #[error("Descriptor is invalid:\n{0}")]
    Invalid(ValidationReport),

    // ── Publication ─────────────────────────────────────
    #[error("No version given and none set at load time")]
    MissingVersion,

    // ── Maven ───────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),

    #[error("POM render error: {0}")]
    PomRender(String),
}

/// Convenience alias used throughout the crate.
pub type DescriptorResult<T> = Result<T, DescriptorError>;

impl From<quick_xml::SeError> for DescriptorError {
    fn from(e: quick_xml::SeError) -> Self {
        DescriptorError::PomRender(e.to_string())
    }
}

impl DescriptorError {
    /// The validation report carried by an `Invalid` error, if any.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            DescriptorError::Invalid(report) => Some(report),
            _ => None,
        }
    }
}
