//! User-facing diagnostics
//!
//! The exporter never talks to a UI directly. It reports through a
//! [`Reporter`], which the caller passes by reference.

/// Sink for user-visible info and warning messages
pub trait Reporter {
    fn info(&mut self, text: &str);
    fn warn(&mut self, text: &str);
}

/// Reporter that forwards to `tracing`
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&mut self, text: &str) {
        tracing::info!("{}", text);
    }

    fn warn(&mut self, text: &str) {
        tracing::warn!("{}", text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
}

/// Reporter that accumulates every line (and still forwards to `tracing`)
#[derive(Debug, Default)]
pub struct ReportLog {
    lines: Vec<(Severity, String)>,
}

impl ReportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(Severity, String)] {
        &self.lines
    }

    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|(severity, _)| *severity == Severity::Warn)
            .map(|(_, text)| text.as_str())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

impl Reporter for ReportLog {
    fn info(&mut self, text: &str) {
        tracing::info!("{}", text);
        self.lines.push((Severity::Info, text.to_string()));
    }

    fn warn(&mut self, text: &str) {
        tracing::warn!("{}", text);
        self.lines.push((Severity::Warn, text.to_string()));
    }
}
