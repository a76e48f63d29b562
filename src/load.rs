//! Diagnostic intake: parses the JSON stream the front end emits and
//! anchors every position in the run's main file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::diagnostic::{Diagnostic, Hint, Location, Range, Severity};
use crate::source::FileId;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDiagnostic {
    severity: String,
    message: String,
    #[serde(default)]
    at: Option<usize>,
    #[serde(default)]
    hints: Vec<RawHint>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHint {
    #[serde(default)]
    at: Option<usize>,
    #[serde(default)]
    range: Option<RawRange>,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRange {
    begin: usize,
    end: usize,
}

pub fn load_diagnostics(path: &Path, file: FileId) -> Result<Vec<Diagnostic>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_diagnostics(&json, file)
        .with_context(|| format!("malformed diagnostic stream in {}", path.display()))
}

/// Parse a JSON diagnostic stream, anchoring all positions in `file`.
pub fn parse_diagnostics(json: &str, file: FileId) -> Result<Vec<Diagnostic>> {
    let raw: Vec<RawDiagnostic> = serde_json::from_str(json)?;
    raw.into_iter().map(|d| convert(d, file)).collect()
}

fn convert(raw: RawDiagnostic, file: FileId) -> Result<Diagnostic> {
    let Some(severity) = Severity::from_str(&raw.severity) else {
        bail!("unknown severity {:?}", raw.severity);
    };
    Ok(Diagnostic {
        severity,
        at: raw.at.map(|offset| Location::new(file, offset)),
        message: raw.message,
        hints: raw
            .hints
            .into_iter()
            .map(|h| Hint {
                at: h.at.map(|offset| Location::new(file, offset)),
                range: h.range.map(|r| {
                    Range::new(Location::new(file, r.begin), Location::new(file, r.end))
                }),
                text: h.text,
            })
            .collect(),
    })
}
