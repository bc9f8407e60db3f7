#![forbid(unsafe_code)]

//! `selkie` is a headless editor-assist engine for Mermaid diagram text.
//!
//! It bundles four independent, per-call transforms behind one crate:
//! diagram-kind detection, heuristic linting (with an optional secondary
//! pass through an external renderer's parse check), structural + cosmetic
//! formatting, and context-sensitive completion candidates.
//!
//! ```
//! use selkie::{Linter, Severity, format_source, suggest};
//!
//! let linter = Linter::new();
//! let diagnostics = linter.lint("graph TD\n A->B");
//! assert!(diagnostics.iter().any(|d| d.severity == Severity::Error));
//!
//! assert_eq!(format_source("graph TD\nA-->B"), "graph TD\n    A-->B");
//! assert!(!suggest("", 0).is_empty());
//! ```

pub use selkie_core::*;
