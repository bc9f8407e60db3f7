#![forbid(unsafe_code)]

//! Editor-assist engine for Mermaid diagram text (headless).
//!
//! Design goals:
//! - lightweight line-oriented heuristics, not a full Mermaid grammar
//! - deterministic per-call outputs (no shared state, no caching, nothing
//!   survives between calls)
//! - runtime-agnostic async at the single external seam: the renderer's
//!   parse check feeding the linter's secondary pass
//!
//! Four independent transforms cover the editing surface's needs:
//! [`detect::detect_kind`] classifies a buffer, [`lint::Linter`] produces
//! ordered diagnostics, [`format::format_source`] / [`format::beautify_source`]
//! re-indent and normalize, and [`suggest::suggest`] ranks completion
//! candidates for the caret position. Callers gate auto-render on "no
//! diagnostic with [`Severity::Error`]"; warnings never block rendering.

pub mod detect;
pub mod diagnostics;
pub mod format;
pub mod lint;
pub mod suggest;

pub use detect::{DetectorRegistry, DiagramKind, KindDetector, detect_kind};
pub use diagnostics::{Diagnostic, Severity};
pub use format::{beautify_source, format_source};
pub use lint::{Linter, RendererParseError};
pub use suggest::{MAX_SUGGESTIONS, SuggestionItem, SuggestionKind, suggest};

#[cfg(test)]
mod tests;
