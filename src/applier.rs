//! Diagnostic client adaptor: applies fix-it hints as diagnostics arrive
//! and forwards every diagnostic, unmodified, to the wrapped consumer.
//! Rewriting is a side effect, never a filter on diagnostic visibility.

use crate::consumer::DiagnosticConsumer;
use crate::diagnostic::{Diagnostic, EditOperation};
use crate::rewrite::{RewriteError, Rewriter};
use crate::source::SourceMap;

pub struct FixItRewriter<'src> {
    rewrite: Rewriter<'src>,
    consumer: Option<Box<dyn DiagnosticConsumer>>,
    num_failures: usize,
    advice_warning_emitted: bool,
}

impl<'src> FixItRewriter<'src> {
    pub fn new(sources: &'src SourceMap, consumer: Option<Box<dyn DiagnosticConsumer>>) -> Self {
        Self {
            rewrite: Rewriter::new(sources),
            consumer,
            num_failures: 0,
            advice_warning_emitted: false,
        }
    }

    /// Count of diagnostics whose fix-its could not be fully honored.
    /// Any nonzero value suppresses output at write time.
    pub fn num_failures(&self) -> usize {
        self.num_failures
    }

    pub fn rewriter(&self) -> &Rewriter<'src> {
        &self.rewrite
    }

    /// Pass-through for external diagnostic statistics: delegates to the
    /// wrapped consumer, defaulting to true without one.
    pub fn include_in_diagnostic_counts(&self) -> bool {
        self.consumer
            .as_ref()
            .map_or(true, |c| c.include_in_diagnostic_counts())
    }

    /// Handle one diagnostic in emission order.
    pub fn handle_diagnostic(&mut self, diag: &Diagnostic) {
        let sources = self.rewrite.sources();
        if let Some(consumer) = self.consumer.as_mut() {
            consumer.handle_diagnostic(diag, sources);
        }

        // All-or-nothing at validation granularity: one malformed hint
        // (or a diagnostic with no hints at all) rejects the whole
        // diagnostic before anything is applied.
        let can_rewrite =
            !diag.hints.is_empty() && diag.hints.iter().all(|h| self.rewrite.can_apply(h));

        if !can_rewrite {
            if diag.severity.is_unrecoverable() {
                self.num_failures += 1;
                if !self.advice_warning_emitted {
                    self.advice_warning_emitted = true;
                    eprintln!(
                        "warning: error without fix-it advice detected; \
                         fix-it will produce no output"
                    );
                }
            }
            return;
        }

        // Best-effort from here: a failed splice drops that hint's edit
        // but the remaining hints of the same diagnostic still apply.
        let mut failed = false;
        for hint in &diag.hints {
            let Some(op) = hint.op() else { continue };
            if self.apply(op).is_err() {
                failed = true;
            }
        }
        if failed {
            self.num_failures += 1;
        }
    }

    fn apply(&mut self, op: EditOperation<'_>) -> Result<(), RewriteError> {
        match op {
            EditOperation::Insert { at, text } => self.rewrite.insert_before(at, text),
            EditOperation::Remove { range } => match self.rewrite.range_size(range) {
                Some(size) => self.rewrite.remove_text(range.begin, size),
                None => Err(RewriteError::Conflict(range.begin.offset)),
            },
            EditOperation::Replace { range, text } => match self.rewrite.range_size(range) {
                Some(size) => self.rewrite.replace_text(range.begin, size, text),
                None => Err(RewriteError::Conflict(range.begin.offset)),
            },
        }
    }

    /// Flush the wrapped consumer. Call once after the last diagnostic.
    pub fn finish(&mut self) {
        let sources = self.rewrite.sources();
        if let Some(consumer) = self.consumer.as_mut() {
            consumer.finish(sources);
        }
    }
}
