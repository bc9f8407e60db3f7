use crate::*;
use futures::executor::block_on;

fn errors(diags: &[Diagnostic]) -> Vec<&Diagnostic> {
    diags
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect()
}

#[test]
fn empty_input_yields_no_diagnostics() {
    let linter = Linter::new();
    assert!(linter.lint("").is_empty());
    assert!(linter.lint("   \n\t\n").is_empty());
}

#[test]
fn bare_arrow_in_flowchart_is_an_error() {
    let linter = Linter::new();
    let diags = linter.lint("graph TD\n A->B");
    let errs = errors(&diags);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].line, 2);
    assert_eq!(errs[0].column, 3);
    assert!(errs[0].message.contains("valid arrow syntax"));
}

#[test]
fn valid_flowchart_arrow_is_clean() {
    let linter = Linter::new();
    assert!(linter.lint("graph TD\n A-->B").is_empty());
    assert!(linter.lint("graph TD\n A-.->B\n B==>C\n C--xD\n D--oE\n E---F").is_empty());
}

#[test]
fn sequence_arrows_are_legal_in_sequence_diagrams() {
    let linter = Linter::new();
    assert!(linter.lint("sequenceDiagram\n A->>B: hi").is_empty());
}

#[test]
fn sequence_arrow_in_flowchart_is_a_warning_not_an_error() {
    let linter = Linter::new();
    let diags = linter.lint("graph TD\n A->>B");
    assert!(errors(&diags).is_empty());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[0].line, 2);
    assert_eq!(diags[0].column, 3);
    assert!(diags[0].message.contains("sequence diagrams"));
}

#[test]
fn parens_are_never_checked() {
    let linter = Linter::new();
    assert!(linter.lint("graph TD\n A[Label (with parens)]-->B").is_empty());
    assert!(linter.lint("graph TD\n A[a ( b ( c]-->B").is_empty());
}

#[test]
fn unbalanced_square_brackets_on_one_line_warn() {
    let linter = Linter::new();
    let diags = linter.lint("graph TD\n A[Text]]-->B");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(diags[0].line, 2);
    assert!(diags[0].message.contains("square brackets"));
}

#[test]
fn unbalanced_curly_brackets_on_one_line_warn() {
    let linter = Linter::new();
    let diags = linter.lint("graph TD\n A{Choice}}-->B");
    assert!(diags.iter().any(|d| d.message.contains("curly brackets")));
}

#[test]
fn cross_line_brackets_are_not_flagged() {
    // One side of the pair absent on the line: assumed to continue elsewhere.
    let linter = Linter::new();
    let diags = linter.lint("graph TD\n A[Multi\n line label]-->B");
    assert!(
        diags.iter().all(|d| !d.message.contains("brackets")),
        "cross-line brackets must stay unflagged: {diags:?}"
    );
}

#[test]
fn comment_lines_are_skipped() {
    let linter = Linter::new();
    assert!(linter.lint("graph TD\n%% A->B would be invalid\n A-->B").is_empty());
}

#[test]
fn sequence_arrow_misuse_flags_other_kinds_too() {
    let linter = Linter::new();
    let diags = linter.lint("stateDiagram-v2\n S1->>S2");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Warning);
}

#[test]
fn renderer_pass_translates_parse_failures() {
    let linter = Linter::new();
    let text = "graph TD\n A-->B";
    let probe = std::future::ready(Err::<(), _>(RendererParseError::new(
        "Parse error on line 2: Expecting 'SEMI' got 'NEWLINE'",
    )));
    let diags = block_on(linter.lint_with_renderer(text, probe));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 2);
    assert_eq!(diags[0].column, 1);
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].message, "Syntax error");
}

#[test]
fn renderer_pass_defaults_to_line_one() {
    let linter = Linter::new();
    let probe = std::future::ready(Err::<(), _>(RendererParseError::new("renderer exploded")));
    let diags = block_on(linter.lint_with_renderer("graph TD\n A-->B", probe));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 1);
    assert_eq!(diags[0].message, "renderer exploded");
}

#[test]
fn renderer_pass_suppresses_overlapping_findings() {
    let linter = Linter::new();
    let text = "graph TD\n A->B";
    let heuristic_only = linter.lint(text);
    let probe = std::future::ready(Err::<(), _>(RendererParseError::new(
        "Invalid arrow near 'A->B'",
    )));
    let diags = block_on(linter.lint_with_renderer(text, probe));
    // The probe message mentions "arrow", already covered by the heuristics.
    assert_eq!(diags, heuristic_only);
}

#[test]
fn renderer_pass_keeps_heuristics_on_success() {
    let linter = Linter::new();
    let text = "graph TD\n A->B";
    let probe = std::future::ready(Ok::<(), RendererParseError>(()));
    let diags = block_on(linter.lint_with_renderer(text, probe));
    assert_eq!(diags, linter.lint(text));
}

#[test]
fn renderer_pass_skips_probe_for_blank_input() {
    let linter = Linter::new();
    let probe = std::future::ready(Err::<(), _>(RendererParseError::new("should not surface")));
    assert!(block_on(linter.lint_with_renderer("   ", probe)).is_empty());
}

#[test]
fn heuristics_precede_renderer_findings() {
    let linter = Linter::new();
    let text = "graph TD\n A[x]]-->B";
    let probe = std::future::ready(Err::<(), _>(RendererParseError::new("line 2: bad edge")));
    let diags = block_on(linter.lint_with_renderer(text, probe));
    assert_eq!(diags.len(), 2);
    assert!(diags[0].message.contains("square brackets"));
    assert_eq!(diags[1].message, "line 2: bad edge");
    assert_eq!(diags[1].line, 2);
}

#[test]
fn swapped_registry_changes_detection() {
    let mut linter = Linter::new();
    *linter.registry_mut() = DetectorRegistry::new();
    assert_eq!(linter.registry().detect("graph TD"), DiagramKind::Unknown);
    // With no detectors the kind is unknown, so flowchart arrow grammar
    // does not apply.
    assert!(linter.lint("graph TD\n A->B").is_empty());
}

#[test]
fn lint_is_total_on_garbage() {
    let linter = Linter::new();
    let _ = linter.lint("\u{0}\u{1}binary\r\n\t{{{{");
    let _ = linter.lint("日本語のテキスト -> まだテキスト");
}

#[test]
fn diagnostics_render_and_serialize() {
    let d = Diagnostic::error(2, 3, "Use valid arrow syntax");
    assert_eq!(d.to_string(), "2:3: error: Use valid arrow syntax");
    assert!(Severity::Error.blocks_render());
    assert!(!Severity::Warning.blocks_render());
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["severity"], "error");
    assert_eq!(json["line"], 2);
}
