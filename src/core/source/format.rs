use std::path::Path;

use serde::{Deserialize, Serialize};

use super::raw::RawDescriptor;
use crate::core::error::{DescriptorError, DescriptorResult};

/// Concrete encodings of the declarative source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Json,
    Toml,
}

impl SourceFormat {
    /// Detect the format from a file extension (`.json` / `.toml`).
    pub fn from_path(path: &Path) -> DescriptorResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(SourceFormat::Json),
            Some("toml") => Ok(SourceFormat::Toml),
            _ => Err(DescriptorError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Parse source text into the raw model.
    ///
    /// Failures are `MalformedSource` with a 1-based `line:column` location
    /// when the underlying parser reports one.
    pub fn parse(self, text: &str) -> DescriptorResult<RawDescriptor> {
        match self {
            SourceFormat::Json => serde_json::from_str(text).map_err(|e| {
                let location = if e.line() > 0 {
                    format!("{}:{}", e.line(), e.column())
                } else {
                    "<source>".to_string()
                };
                DescriptorError::MalformedSource {
                    location,
                    message: strip_json_position(&e.to_string()),
                }
            }),
            SourceFormat::Toml => toml::from_str(text).map_err(|e| {
                let location = match e.span() {
                    Some(span) => line_column(text, span.start),
                    None => "<source>".to_string(),
                };
                DescriptorError::MalformedSource {
                    location,
                    message: e.message().to_string(),
                }
            }),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Toml => write!(f, "toml"),
        }
    }
}

/// serde_json appends " at line X column Y"; the location is reported separately.
fn strip_json_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

fn line_column(text: &str, offset: usize) -> String {
    let offset = offset.min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|b| **b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|b| *b == b'\n')
        .map(|p| p + 1)
        .unwrap_or(0);
    let column = text[line_start..offset].chars().count() + 1;
    format!("{}:{}", line, column)
}
