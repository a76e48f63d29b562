//! Downstream diagnostic consumers: render the diagnostics the applier
//! forwards. The applier wraps one of these and delegates unconditionally.

use std::io::Write;

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::source::SourceMap;

pub trait DiagnosticConsumer {
    /// Called once per diagnostic, in emission order.
    fn handle_diagnostic(&mut self, diag: &Diagnostic, sources: &SourceMap);

    /// Whether forwarded diagnostics should count toward external
    /// diagnostic statistics.
    fn include_in_diagnostic_counts(&self) -> bool {
        true
    }

    /// Called once after the last diagnostic; batching consumers emit
    /// their document here.
    fn finish(&mut self, _sources: &SourceMap) {}
}

pub fn create_consumer(format: &str) -> Box<dyn DiagnosticConsumer> {
    match format {
        "json" => Box::new(JsonConsumer::new(std::io::stderr())),
        "quiet" => Box::new(QuietConsumer),
        // "text" and any unknown value
        _ => Box::new(TextConsumer::new(std::io::stderr())),
    }
}

/// One line per diagnostic: `path:line:col: S: message`.
pub struct TextConsumer<W: Write> {
    out: W,
}

impl<W: Write> TextConsumer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DiagnosticConsumer for TextConsumer<W> {
    fn handle_diagnostic(&mut self, diag: &Diagnostic, sources: &SourceMap) {
        match diag.at {
            Some(at) => {
                let file = sources.file(at.file);
                let (line, col) = file.offset_to_line_col(at.offset);
                let _ = writeln!(
                    self.out,
                    "{}:{line}:{col}: {}: {}",
                    file.path_str(),
                    diag.severity,
                    diag.message
                );
            }
            None => {
                let _ = writeln!(self.out, "{}: {}", diag.severity, diag.message);
            }
        }
    }
}

/// Collects diagnostics and emits a single JSON document on finish.
pub struct JsonConsumer<W: Write> {
    out: W,
    diagnostics: Vec<JsonDiagnostic>,
}

impl<W: Write> JsonConsumer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            diagnostics: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct JsonOutput {
    metadata: Metadata,
    diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Serialize)]
struct Metadata {
    diagnostic_count: usize,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    severity: String,
    message: String,
    hint_count: usize,
}

impl<W: Write> DiagnosticConsumer for JsonConsumer<W> {
    fn handle_diagnostic(&mut self, diag: &Diagnostic, sources: &SourceMap) {
        let (path, line, column) = match diag.at {
            Some(at) => {
                let file = sources.file(at.file);
                let (line, col) = file.offset_to_line_col(at.offset);
                (Some(file.path_str().to_string()), Some(line), Some(col))
            }
            None => (None, None, None),
        };
        self.diagnostics.push(JsonDiagnostic {
            path,
            line,
            column,
            severity: diag.severity.letter().to_string(),
            message: diag.message.clone(),
            hint_count: diag.hints.len(),
        });
    }

    fn finish(&mut self, _sources: &SourceMap) {
        let output = JsonOutput {
            metadata: Metadata {
                diagnostic_count: self.diagnostics.len(),
            },
            diagnostics: std::mem::take(&mut self.diagnostics),
        };
        // These types always serialize.
        let _ = writeln!(
            self.out,
            "{}",
            serde_json::to_string_pretty(&output).unwrap()
        );
    }
}

/// Drops every diagnostic; useful when only the rewrite is wanted.
pub struct QuietConsumer;

impl DiagnosticConsumer for QuietConsumer {
    fn handle_diagnostic(&mut self, _diag: &Diagnostic, _sources: &SourceMap) {}
}
