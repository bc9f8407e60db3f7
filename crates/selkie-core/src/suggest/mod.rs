//! Context-sensitive completion candidates for the editing surface.
//!
//! All candidates come from fixed tables, declared in the order they should
//! surface; context selection and filtering preserve that order. Insert texts
//! may carry TextMate-style `${n:placeholder}` markers for editors that
//! support snippet expansion.

use serde::Serialize;

/// Hard cap on the number of items returned per request.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Keyword,
    Snippet,
    Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionItem {
    pub label: &'static str,
    pub kind: SuggestionKind,
    pub insert_text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<&'static str>,
}

const fn item(
    label: &'static str,
    kind: SuggestionKind,
    insert_text: &'static str,
    documentation: &'static str,
) -> SuggestionItem {
    SuggestionItem {
        label,
        kind,
        insert_text,
        documentation: Some(documentation),
    }
}

const DECLARATION_SUGGESTIONS: &[SuggestionItem] = &[
    item(
        "graph TD",
        SuggestionKind::Keyword,
        "graph TD\n    A[Start] --> B[Process]\n    B --> C[End]",
        "Top-down flowchart",
    ),
    item(
        "graph LR",
        SuggestionKind::Keyword,
        "graph LR\n    A[Start] --> B[Process]\n    B --> C[End]",
        "Left-to-right flowchart",
    ),
    item(
        "sequenceDiagram",
        SuggestionKind::Keyword,
        "sequenceDiagram\n    participant A\n    participant B\n    A->>B: Message",
        "Sequence diagram",
    ),
    item(
        "classDiagram",
        SuggestionKind::Keyword,
        "classDiagram\n    class Animal {\n        +String name\n        +makeSound()\n    }",
        "Class diagram",
    ),
    item(
        "stateDiagram-v2",
        SuggestionKind::Keyword,
        "stateDiagram-v2\n    [*] --> State1\n    State1 --> State2\n    State2 --> [*]",
        "State diagram",
    ),
    item(
        "erDiagram",
        SuggestionKind::Keyword,
        "erDiagram\n    CUSTOMER {\n        string name\n        string email\n    }\n    ORDER {\n        int id\n        date created\n    }\n    CUSTOMER ||--o{ ORDER : places",
        "Entity relationship diagram",
    ),
];

const SHAPE_SUGGESTIONS: &[SuggestionItem] = &[
    item(
        "A[Rectangle]",
        SuggestionKind::Snippet,
        "A[${1:Text}]",
        "Rectangle node",
    ),
    item(
        "A(Round)",
        SuggestionKind::Snippet,
        "A(${1:Text})",
        "Round node",
    ),
    item(
        "A{Diamond}",
        SuggestionKind::Snippet,
        "A{${1:Text}}",
        "Diamond node",
    ),
    item(
        "A((Circle))",
        SuggestionKind::Snippet,
        "A((${1:Text}))",
        "Circle node",
    ),
    item(
        "A>Flag]",
        SuggestionKind::Snippet,
        "A>${1:Text}]",
        "Flag node",
    ),
    item(
        "A[[Subroutine]]",
        SuggestionKind::Snippet,
        "A[[${1:Text}]]",
        "Subroutine node",
    ),
];

const ARROW_SUGGESTIONS: &[SuggestionItem] = &[
    item("-->", SuggestionKind::Operator, "-->", "Arrow"),
    item("---", SuggestionKind::Operator, "---", "Line"),
    item("-.->", SuggestionKind::Operator, "-.->", "Dotted arrow"),
    item("==>", SuggestionKind::Operator, "==>", "Thick arrow"),
    item("--x", SuggestionKind::Operator, "--x", "Arrow with cross"),
    item("--o", SuggestionKind::Operator, "--o", "Arrow with circle"),
];

const STYLE_SUGGESTIONS: &[SuggestionItem] = &[
    item(
        "style",
        SuggestionKind::Keyword,
        "style ${1:nodeId} fill:${2:#f9f9f9},stroke:${3:#333},stroke-width:${4:2px}",
        "Style a node",
    ),
    item(
        "classDef",
        SuggestionKind::Keyword,
        "classDef ${1:className} fill:${2:#f9f9f9},stroke:${3:#333},stroke-width:${4:2px}",
        "Define a CSS class",
    ),
    item(
        "class",
        SuggestionKind::Keyword,
        "class ${1:nodeId} ${2:className}",
        "Apply class to node",
    ),
];

/// Returns up to [`MAX_SUGGESTIONS`] completion candidates for the buffer
/// `text` with the caret at byte offset `cursor`.
///
/// Offsets past the end of the buffer, or landing inside a multi-byte
/// character, are clamped to the nearest valid boundary; the function never
/// panics.
pub fn suggest(text: &str, cursor: usize) -> Vec<SuggestionItem> {
    let cursor = floor_char_boundary(text, cursor.min(text.len()));
    let before_cursor = &text[..cursor];
    let current_line = before_cursor.rsplit('\n').next().unwrap_or("");
    let last_word = current_line.split_whitespace().next_back().unwrap_or("");

    let mut filter_by_last_word = true;
    let items: Vec<SuggestionItem> = if before_cursor.trim().is_empty()
        || current_line.trim().is_empty()
    {
        // Start of document or a fresh line: offer whole-diagram skeletons.
        DECLARATION_SUGGESTIONS.to_vec()
    } else if is_bare_identifier(last_word) && last_word != "style" && !current_line.contains("-->")
    {
        // The token is a node id about to be connected; it is not a prefix
        // of any operator, so it does not participate in label filtering.
        filter_by_last_word = false;
        ARROW_SUGGESTIONS.to_vec()
    } else if before_cursor.contains("graph") && !current_line.contains("style") {
        [SHAPE_SUGGESTIONS, ARROW_SUGGESTIONS].concat()
    } else if current_line.contains("style") || last_word == "style" {
        STYLE_SUGGESTIONS.to_vec()
    } else {
        [
            DECLARATION_SUGGESTIONS,
            SHAPE_SUGGESTIONS,
            ARROW_SUGGESTIONS,
            STYLE_SUGGESTIONS,
        ]
        .concat()
    };

    let mut items = items;
    if filter_by_last_word && !last_word.is_empty() {
        let needle = last_word.to_lowercase();
        items.retain(|item| item.label.to_lowercase().contains(&needle));
    }

    items.truncate(MAX_SUGGESTIONS);
    items
}

fn is_bare_identifier(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
