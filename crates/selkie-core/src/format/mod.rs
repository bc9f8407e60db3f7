//! Structural re-indentation and cosmetic cleanup for Mermaid source.
//!
//! Formatting is a single top-to-bottom scan with one indent counter, not a
//! parse. Both entry points are total: any input, however malformed, comes
//! back as text.

use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

const INDENT_UNIT: usize = 4;

/// Prefixes that introduce a new diagram and reset indentation, so multiple
/// diagrams pasted into one buffer each start at column zero.
const DECLARATION_KEYWORDS: &[&str] = &[
    "graph",
    "flowchart",
    "sequenceDiagram",
    "classDiagram",
    "stateDiagram",
    "erDiagram",
    "journey",
    "gantt",
    "pie",
    "gitgraph",
    "mindmap",
    "timeline",
];

/// Re-indents `text` line by line.
///
/// Idempotent: formatting already-formatted text is a no-op.
pub fn format_source(text: &str) -> String {
    trace!(bytes = text.len(), "formatting diagram source");

    let mut formatted: Vec<String> = Vec::new();
    let mut indent_level = 0usize;

    for raw in text.split('\n') {
        let line = raw.trim();

        if line.is_empty() {
            formatted.push(String::new());
            continue;
        }

        if is_diagram_declaration(line) {
            indent_level = 0;
            formatted.push(line.to_string());
            continue;
        }

        if line.starts_with("subgraph") {
            formatted.push(indented(indent_level, line));
            indent_level += 1;
            continue;
        }

        if line == "end" {
            indent_level = indent_level.saturating_sub(1);
            formatted.push(indented(indent_level, line));
            continue;
        }

        if is_style_line(line) {
            formatted.push(indented(indent_level, line));
            continue;
        }

        if is_node_or_connection(line) {
            // Body lines sit at least one level deep even at top level.
            formatted.push(indented(indent_level.max(1), line));
            continue;
        }

        let level = if indent_level > 0 {
            indent_level
        } else if needs_indent(line) {
            1
        } else {
            0
        };
        formatted.push(indented(level, line));
    }

    formatted.join("\n")
}

/// [`format_source`] plus cosmetic normalization: spaces around bare `-->`
/// and `---` operators, inner whitespace-run collapsing, per-line trailing
/// trim, blank-run collapsing, and a whole-document trim.
pub fn beautify_source(text: &str) -> String {
    let formatted = format_source(text);
    let spaced = space_arrow_operators(&formatted);

    let cleaned: Vec<String> = spaced
        .split('\n')
        .map(|line| collapse_inner_spaces(line).trim_end().to_string())
        .collect();

    let joined = cleaned.join("\n");
    let collapsed = blank_run_regex().replace_all(&joined, "\n\n");
    collapsed.trim().to_string()
}

fn indented(level: usize, line: &str) -> String {
    let mut out = String::with_capacity(level * INDENT_UNIT + line.len());
    for _ in 0..level * INDENT_UNIT {
        out.push(' ');
    }
    out.push_str(line);
    out
}

fn is_diagram_declaration(line: &str) -> bool {
    DECLARATION_KEYWORDS
        .iter()
        .any(|keyword| line.starts_with(keyword))
}

fn is_style_line(line: &str) -> bool {
    // The trailing space on `class ` keeps `classDiagram` out of this branch.
    line.starts_with("style") || line.starts_with("classDef") || line.starts_with("class ")
}

fn node_pattern_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9]+[\[({]").expect("valid regex"))
}

fn is_node_or_connection(line: &str) -> bool {
    line.contains("-->")
        || line.contains("---")
        || line.contains("-.->")
        || line.contains("==>")
        || node_pattern_regex().is_match(line)
}

fn needs_indent(line: &str) -> bool {
    !line.starts_with("%%")
        && !is_diagram_declaration(line)
        && !is_style_line(line)
}

fn arrow_before_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w)-->").expect("valid regex"))
}

fn arrow_after_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-->(\w)").expect("valid regex"))
}

fn link_before_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w)---").expect("valid regex"))
}

fn link_after_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"---(\w)").expect("valid regex"))
}

fn space_arrow_operators(text: &str) -> String {
    let text = arrow_before_regex().replace_all(text, "$1 -->");
    let text = arrow_after_regex().replace_all(&text, "--> $1");
    let text = link_before_regex().replace_all(&text, "$1 ---");
    link_after_regex().replace_all(&text, "--- $1").into_owned()
}

fn multi_space_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" {2,}").expect("valid regex"))
}

fn blank_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid regex"))
}

/// Collapses 2+ space runs to one, leaving the line's leading indentation
/// alone so the structural pass survives the cosmetic one.
fn collapse_inner_spaces(line: &str) -> String {
    let content_start = line.len() - line.trim_start_matches(' ').len();
    let (indent, content) = line.split_at(content_start);
    let mut out = String::with_capacity(line.len());
    out.push_str(indent);
    out.push_str(&multi_space_regex().replace_all(content, " "));
    out
}
