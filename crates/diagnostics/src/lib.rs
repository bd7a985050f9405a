//! Diagnostics for recruitbook command parsing.
//!
//! Provides [`Diagnostic`], [`Severity`], and [`Span`] types used to report
//! errors and warnings produced while parsing a command's argument string.
//! Diagnostic codes are defined in the [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic ID constants.
pub mod codes;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Severity {
    /// Hard error — the command cannot be executed.
    Error,
    /// Warning — the command is accepted but part of the input had no effect.
    Warn,
    /// Informational note.
    Info,
}

/// Byte span in the argument string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Byte offset of the first character (0-based).
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

impl Span {
    /// Create a span covering `[start, end)`.
    ///
    /// Panics if `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(end >= start, "Span end ({end}) < start ({start})");
        Self { start, end }
    }

    /// Create a zero-width span at the given position.
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A diagnostic message produced while parsing a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique diagnostic code (e.g., `"RB1202"`).
    pub id: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable diagnostic message.
    pub message: String,
    /// Optional byte span in the argument string that this diagnostic relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// Machine-readable context for tooling (`"field"`, `"prefix"`, `"value"`, ...).
    ///
    /// Uses `BTreeMap` for deterministic key ordering in serialized output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<BTreeMap<String, String>>,
}

impl Diagnostic {
    /// Create a diagnostic with the given fields.
    pub fn new(
        id: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            message: message.into(),
            span,
            context: None,
        }
    }

    /// Shorthand for an `Error` diagnostic.
    pub fn error(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Error, message, span)
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(
        id: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self::new(id, Severity::Warn, message, span)
    }

    /// Attach machine-readable context metadata (builder pattern).
    pub fn with_context(mut self, ctx: BTreeMap<String, String>) -> Self {
        self.context = Some(ctx);
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Returns the human-readable explanation for this diagnostic's code, if available.
    pub fn explain(&self) -> Option<&'static str> {
        explain(&self.id)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.id, self.message)
    }
}

/// Returns the human-readable explanation for a diagnostic code, if known.
pub fn explain(id: &str) -> Option<&'static str> {
    codes::explain(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Span ────────────────────────────────────────────────────────────

    #[test]
    fn span_new_valid() {
        let s = Span::new(5, 10);
        assert_eq!(s.start, 5);
        assert_eq!(s.end, 10);
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn span_empty() {
        let s = Span::empty(7);
        assert_eq!(s.start, 7);
        assert!(s.is_empty());
    }

    #[test]
    #[should_panic(expected = "Span end (3) < start (5)")]
    fn span_new_inverted_panics() {
        Span::new(5, 3);
    }

    #[test]
    fn span_join_covers_both() {
        let s = Span::new(8, 12).join(Span::new(2, 4));
        assert_eq!(s, Span::new(2, 12));
    }

    // ── Severity Display ────────────────────────────────────────────────

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warn), "warn");
        assert_eq!(format!("{}", Severity::Info), "info");
    }

    // ── Diagnostic constructors ─────────────────────────────────────────

    #[test]
    fn diagnostic_error_constructor() {
        let d = Diagnostic::error(codes::NOT_EDITED, "nothing to edit", None);
        assert_eq!(d.id, "RB1201");
        assert!(d.is_error());
        assert_eq!(d.message, "nothing to edit");
        assert!(d.span.is_none());
    }

    #[test]
    fn diagnostic_warn_constructor() {
        let d = Diagnostic::warn(codes::REPEATED_TAG, "repeated", Some(Span::new(0, 5)));
        assert_eq!(d.severity, Severity::Warn);
        assert!(!d.is_error());
        assert_eq!(d.span, Some(Span::new(0, 5)));
    }

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::error(codes::DUPLICATE_PREFIX, "duplicate n/", None);
        assert_eq!(format!("{}", d), "error[RB1202]: duplicate n/");
    }

    #[test]
    fn diagnostic_context_serializes_sorted() {
        let ctx = BTreeMap::from([
            ("prefix".to_string(), "n/".to_string()),
            ("field".to_string(), "name".to_string()),
        ]);
        let d = Diagnostic::error(codes::INVALID_FIELD, "bad", None).with_context(ctx);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.find("\"field\"").unwrap() < json.find("\"prefix\"").unwrap());
        assert!(!json.contains("\"span\""));
    }

    // ── explain() ───────────────────────────────────────────────────────

    #[test]
    fn all_codes_have_explanations() {
        for code in codes::ALL {
            assert!(explain(code).is_some(), "missing explanation for {code}");
        }
    }

    #[test]
    fn diagnostic_explain_unknown() {
        let d = Diagnostic::error("UNKNOWN_CODE", "test", None);
        assert!(d.explain().is_none());
    }
}
