//! Diagnostics reporting.

use tracing::debug;

use crate::{Diagnostic, DiagnosticSink};

/// Forwards errors and warnings to the host's sink as they happen.
///
/// Every call produces exactly one diagnostic, in call order. Reporting
/// never influences what the caller does next.
pub struct Reporter<'a> {
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { sink }
    }

    pub fn report_error(&mut self, message: &str) {
        debug!(severity = "error", message, "reporting diagnostic");
        self.sink.emit(Diagnostic::error(message));
    }

    pub fn report_warning(&mut self, message: &str) {
        debug!(severity = "warning", message, "reporting diagnostic");
        self.sink.emit(Diagnostic::warning(message));
    }
}
