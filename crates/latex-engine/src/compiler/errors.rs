//! Error types for worksheet compilation

use thiserror::Error;

/// One failed compilation attempt, kept for the exhaustion diagnostic.
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    /// Name of the strategy that failed (e.g. `pdflatex`, `latexonline.cc`).
    pub strategy: &'static str,
    /// Most diagnostic message available: stderr tail, HTTP status + body.
    pub detail: String,
}

impl AttemptFailure {
    pub fn new(strategy: &'static str, detail: impl Into<String>) -> Self {
        Self {
            strategy,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.strategy, self.detail)
    }
}

/// Compilation engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("all compilation strategies failed: {}", format_attempts(.0))]
    Exhausted(Vec<AttemptFailure>),
}

fn format_attempts(attempts: &[AttemptFailure]) -> String {
    attempts
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Keep at most the last `limit` characters of subprocess or HTTP output,
/// on a char boundary.
pub(crate) fn tail(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut start = text.len() - limit;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
