use std::fmt;

use crate::source::FileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn letter(&self) -> char {
        match self {
            Severity::Note => 'N',
            Severity::Warning => 'W',
            Severity::Error => 'E',
            Severity::Fatal => 'F',
        }
    }

    pub fn from_str(s: &str) -> Option<Severity> {
        match s.to_lowercase().as_str() {
            "note" | "n" => Some(Severity::Note),
            "warning" | "w" => Some(Severity::Warning),
            "error" | "e" => Some(Severity::Error),
            "fatal" | "f" => Some(Severity::Fatal),
            _ => None,
        }
    }

    /// A rejected diagnostic at this severity makes the whole run
    /// unrecoverable: the fixed file will not be written.
    pub fn is_unrecoverable(&self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A byte position within one source file's original text.
///
/// Ordering is only meaningful between locations in the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub file: FileId,
    pub offset: usize,
}

impl Location {
    pub fn new(file: FileId, offset: usize) -> Self {
        Self { file, offset }
    }
}

/// Half-open range `[begin, end)` within one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub begin: Location,
    pub end: Location,
}

impl Range {
    pub fn new(begin: Location, end: Location) -> Self {
        Self { begin, end }
    }
}

/// One suggested edit attached to a diagnostic, stored as the front end
/// emits it: an optional insertion point, an optional removal range, and
/// the code to insert. The operation kind is derived, never stored.
#[derive(Debug, Clone)]
pub struct Hint {
    pub at: Option<Location>,
    pub range: Option<Range>,
    pub text: String,
}

impl Hint {
    pub fn insertion(at: Location, text: impl Into<String>) -> Self {
        Self {
            at: Some(at),
            range: None,
            text: text.into(),
        }
    }

    pub fn removal(range: Range) -> Self {
        Self {
            at: None,
            range: Some(range),
            text: String::new(),
        }
    }

    pub fn replacement(range: Range, text: impl Into<String>) -> Self {
        Self {
            at: None,
            range: Some(range),
            text: text.into(),
        }
    }

    /// Classify the hint: no range means insertion, a range with empty
    /// text means removal, anything else is a replacement. `None` when
    /// the hint carries no anchor at all.
    pub fn op(&self) -> Option<EditOperation<'_>> {
        match self.range {
            None => self.at.map(|at| EditOperation::Insert {
                at,
                text: &self.text,
            }),
            Some(range) if self.text.is_empty() => Some(EditOperation::Remove { range }),
            Some(range) => Some(EditOperation::Replace {
                range,
                text: &self.text,
            }),
        }
    }
}

/// The edit a hint resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOperation<'a> {
    Insert { at: Location, text: &'a str },
    Remove { range: Range },
    Replace { range: Range, text: &'a str },
}

/// One diagnostic as received from the front end, in emission order.
///
/// `at` is the primary location, used only when rendering the diagnostic
/// for display; it plays no role in edit application.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub at: Option<Location>,
    pub message: String,
    pub hints: Vec<Hint>,
}
