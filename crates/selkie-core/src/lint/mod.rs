//! Line-oriented heuristic linting, plus an optional secondary pass that
//! consults the external renderer's own parse check.
//!
//! The heuristics are deliberately lenient: they only flag patterns that are
//! wrong on a single line (unbalanced brackets with both sides present, arrow
//! operators from the wrong grammar). Anything subtler is left to the
//! secondary pass.

use crate::detect::{DetectorRegistry, DiagramKind};
use crate::diagnostics::Diagnostic;
use regex::Regex;
use std::fmt::Display;
use std::future::Future;
use std::sync::OnceLock;
use tracing::debug;

/// Failure signal from the external renderer's parse check.
///
/// Adapters wrapping a concrete renderer can use this as the error side of
/// the future handed to [`Linter::lint_with_renderer`]; any `Display` error
/// type works.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct RendererParseError {
    pub message: String,
}

impl RendererParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Arrow operators accepted in flowchart/graph edges.
const VALID_FLOWCHART_ARROWS: &[&str] = &["-->", "-.->", "==>", "--x", "--o", "---"];

/// Substrings that make a line look like it is trying to draw an edge.
const ARROW_LIKE: &[&str] = &["->", "->>", "-->", "-.->", "==>", "--x", "--o"];

const INVALID_ARROW_MESSAGE: &str = "Use valid arrow syntax: -->, -.->, ==>, --x, --o, or ---";
const SEQUENCE_ARROW_MESSAGE: &str =
    "Sequence diagram arrows (->> or ->>) should only be used in sequence diagrams";

/// Heuristic syntax checker for Mermaid diagram source.
///
/// A `Linter` is a cheap value type: it owns nothing but its detector table
/// and keeps no state between calls. Construct one per editing surface or
/// one per call; the results are identical.
#[derive(Debug, Clone)]
pub struct Linter {
    registry: DetectorRegistry,
}

impl Default for Linter {
    fn default() -> Self {
        Self {
            registry: DetectorRegistry::default_table(),
        }
    }
}

impl Linter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &DetectorRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DetectorRegistry {
        &mut self.registry
    }

    /// Runs the per-line heuristics over `text`.
    ///
    /// Returns findings in insertion order. Empty or whitespace-only input
    /// yields no findings. This never fails: malformed input produces
    /// diagnostics, not errors.
    pub fn lint(&self, text: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        if text.trim().is_empty() {
            return diagnostics;
        }

        let kind = self.registry.detect(text);
        debug!(kind = %kind, "linting diagram source");

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("%%") {
                continue;
            }

            check_bracket_balance(line, line_no, &mut diagnostics);

            if kind == DiagramKind::Flowchart && has_invalid_flowchart_arrow(line) {
                diagnostics.push(Diagnostic::error(
                    line_no,
                    bare_arrow_column(line),
                    INVALID_ARROW_MESSAGE,
                ));
            }

            if kind != DiagramKind::Sequence && has_sequence_arrow(line) {
                diagnostics.push(Diagnostic::warning(
                    line_no,
                    sequence_arrow_column(line),
                    SEQUENCE_ARROW_MESSAGE,
                ));
            }
        }

        diagnostics
    }

    /// Heuristics plus the renderer's own parse check as a secondary pass.
    ///
    /// `parse` is the renderer's parse-check future for the same `text`; the
    /// caller constructs it, so the linter stays executor-agnostic and the
    /// caller keeps control of debouncing and stale-result handling. A parse
    /// failure becomes one more diagnostic (never a returned error) unless
    /// its message overlaps a domain the heuristics already cover.
    pub async fn lint_with_renderer<F, E>(&self, text: &str, parse: F) -> Vec<Diagnostic>
    where
        F: Future<Output = Result<(), E>>,
        E: Display,
    {
        let mut diagnostics = self.lint(text);
        if text.trim().is_empty() {
            return diagnostics;
        }

        if let Err(err) = parse.await {
            let message = err.to_string();
            if !overlaps_heuristic_domain(&message) {
                diagnostics.push(Diagnostic::error(
                    renderer_error_line(&message),
                    1,
                    clean_renderer_message(&message),
                ));
            }
        }

        diagnostics
    }
}

fn count_occurrence(haystack: &str, needle: char) -> usize {
    haystack.chars().filter(|c| *c == needle).count()
}

/// Same-line bracket balance, lenient on purpose: a bracket type entirely
/// absent from one side is assumed to continue on another line (multi-line
/// node labels are legal), and parentheses are never checked because labels
/// routinely contain unbalanced parens.
fn check_bracket_balance(line: &str, line_no: usize, out: &mut Vec<Diagnostic>) {
    let column = line.chars().count();

    let open_square = count_occurrence(line, '[');
    let close_square = count_occurrence(line, ']');
    if open_square > 0 && close_square > 0 && open_square != close_square {
        out.push(Diagnostic::warning(
            line_no,
            column,
            "Unmatched square brackets detected",
        ));
    }

    let open_curly = count_occurrence(line, '{');
    let close_curly = count_occurrence(line, '}');
    if open_curly > 0 && close_curly > 0 && open_curly != close_curly {
        out.push(Diagnostic::warning(
            line_no,
            column,
            "Unmatched curly brackets detected",
        ));
    }
}

fn has_invalid_flowchart_arrow(line: &str) -> bool {
    let arrow_like = ARROW_LIKE.iter().any(|arrow| line.contains(arrow));
    if !arrow_like {
        return false;
    }
    let has_valid = VALID_FLOWCHART_ARROWS
        .iter()
        .any(|arrow| line.contains(arrow));
    // Sequence-style arrows on a flowchart line are reported by the
    // cross-grammar check instead.
    !has_valid && !has_sequence_arrow(line)
}

fn has_sequence_arrow(line: &str) -> bool {
    // `-->>` contains `->>`, so one probe covers both spellings.
    line.contains("->>")
}

/// 1-based column of the first `->` that is not part of `->>`.
fn bare_arrow_column(line: &str) -> usize {
    for (idx, _) in line.match_indices("->") {
        if line.as_bytes().get(idx + 2) != Some(&b'>') {
            return line[..idx].chars().count() + 1;
        }
    }
    1
}

fn sequence_arrow_column(line: &str) -> usize {
    line.find("->>")
        .map(|idx| line[..idx].chars().count() + 1)
        .unwrap_or(1)
}

/// Words that mark a renderer message as overlapping a heuristic finding;
/// such messages are suppressed to avoid double reporting.
fn overlaps_heuristic_domain(message: &str) -> bool {
    let lowered = message.to_lowercase();
    ["arrow", "bracket", "syntax"]
        .iter()
        .any(|word| lowered.contains(word))
}

fn renderer_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)line (\d+)").expect("valid regex"))
}

fn renderer_error_line(message: &str) -> usize {
    renderer_line_regex()
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(1)
}

fn parse_boilerplate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Parse error on line \d+:").expect("valid regex"))
}

fn expecting_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Expecting .* got .*").expect("valid regex"))
}

/// Strips renderer boilerplate down to something worth showing inline.
fn clean_renderer_message(message: &str) -> String {
    let stripped = parse_boilerplate_regex().replace(message, "");
    let stripped = expecting_regex().replace(&stripped, "Syntax error");
    stripped.trim().to_string()
}
