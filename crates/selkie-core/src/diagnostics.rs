//! Diagnostic records produced by the linter.
//!
//! Records are produced fresh on every lint call and kept in insertion order
//! (heuristic checks first, then secondary-parser findings); consumers that
//! want line order must sort themselves.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The diagram will almost certainly fail to render; blocks auto-render.
    Error,
    /// Likely mistake; advisory only.
    Warning,
    /// Reserved for style-level findings; currently unused by the heuristics.
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Whether diagnostics of this severity should block auto-rendering.
    pub fn blocks_render(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding against a diagram source buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, best-effort (heuristics report the position that made
    /// them fire, not a parsed token span).
    pub column: usize,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(
        line: usize,
        column: usize,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity,
        }
    }

    pub fn error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::new(line, column, message, Severity::Error)
    }

    pub fn warning(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::new(line, column, message, Severity::Warning)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line, self.column, self.severity, self.message
        )
    }
}
