//! Diagnostics sink for recoverable map problems.

use crate::error::TileError;
use tracing::warn;

/// A recoverable problem and the 1-based source line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// What went wrong.
    pub error: TileError,
}

/// Receives per-line and per-token problems while a map is decoded.
pub trait Reporter {
    /// Called once for every skipped header, line or token.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards every diagnostic to `tracing` at `WARN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(line = diagnostic.line, error = %diagnostic.error, "skipping map entry");
    }
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
