use std::collections::BTreeMap;

use thiserror::Error;

use crate::args::prefix::Prefix;
use crate::fields::FieldError;
use recruitbook_diagnostics::{Diagnostic, Span, codes};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// The preamble is not a positive 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Index is not a non-zero unsigned integer.")]
pub struct IndexError;

/// One or more single-valued prefixes were given more than once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Multiple values specified for the following single-valued field(s): {}",
    join_tags(.prefixes)
)]
pub struct DuplicatePrefixError {
    /// Every repeated prefix, once each, in check order.
    pub prefixes: Vec<Prefix>,
    /// Tag spans of every occurrence of the repeated prefixes.
    pub spans: Vec<Span>,
}

fn join_tags(prefixes: &[Prefix]) -> String {
    prefixes
        .iter()
        .map(Prefix::tag)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A command argument string could not be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The preamble is not a valid index.
    #[error("Invalid command format! \n{usage}")]
    InvalidIndex {
        /// The trimmed preamble text.
        preamble: String,
        /// Span of the preamble.
        span: Span,
        /// Usage text of the command being parsed.
        usage: &'static str,
        /// Why the preamble was rejected.
        #[source]
        source: IndexError,
    },

    /// A field value failed its validator.
    #[error("{source}")]
    InvalidField {
        /// The prefix the value followed.
        prefix: Prefix,
        /// The rejected value.
        value: String,
        /// Span of the rejected value.
        span: Span,
        /// The validator's error.
        source: FieldError,
    },

    /// No field was given a value.
    #[error("At least one field to edit must be provided.")]
    NotEdited,

    /// A single-valued prefix was repeated.
    #[error(transparent)]
    DuplicatePrefix(#[from] DuplicatePrefixError),
}

impl ParseError {
    /// The diagnostic code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidIndex { .. } => codes::INVALID_INDEX,
            ParseError::InvalidField { .. } => codes::INVALID_FIELD,
            ParseError::NotEdited => codes::NOT_EDITED,
            ParseError::DuplicatePrefix(_) => codes::DUPLICATE_PREFIX,
        }
    }

    /// Convert into a structured [`Diagnostic`] located in the argument string.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::InvalidIndex {
                preamble,
                span,
                source,
                ..
            } => {
                let message = if preamble.is_empty() {
                    "Invalid command format! Missing index.".to_string()
                } else {
                    format!("Invalid command format! {source}")
                };
                Diagnostic::error(self.code(), message, Some(*span))
                    .with_context(ctx!("preamble" => preamble.as_str()))
            }
            ParseError::InvalidField {
                prefix,
                value,
                span,
                source,
            } => Diagnostic::error(self.code(), source.message.as_str(), Some(*span))
                .with_context(ctx!(
                    "field" => source.field.label(),
                    "prefix" => prefix.tag(),
                    "value" => value.as_str(),
                )),
            ParseError::NotEdited => Diagnostic::error(self.code(), self.to_string(), None),
            ParseError::DuplicatePrefix(dup) => {
                // Point at the first repeat; the context names all of them.
                let span = dup.spans.get(1).or(dup.spans.first()).copied();
                Diagnostic::error(self.code(), dup.to_string(), span)
                    .with_context(ctx!("prefixes" => join_tags(&dup.prefixes)))
            }
        }
    }

    /// Usage text to show alongside the error, if the error calls for it.
    pub fn usage(&self) -> Option<&'static str> {
        match self {
            ParseError::InvalidIndex { usage, .. } => Some(*usage),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    #[test]
    fn duplicate_message_lists_all_prefixes() {
        let err = DuplicatePrefixError {
            prefixes: vec![Prefix::new("n/"), Prefix::new("p/")],
            spans: vec![Span::new(2, 4), Span::new(9, 11), Span::new(5, 7), Span::new(12, 14)],
        };
        assert_eq!(
            err.to_string(),
            "Multiple values specified for the following single-valued field(s): n/ p/"
        );

        let diag = ParseError::from(err).to_diagnostic();
        assert_eq!(diag.id, codes::DUPLICATE_PREFIX);
        assert_eq!(diag.span, Some(Span::new(9, 11)));
        assert_eq!(diag.context.unwrap()["prefixes"], "n/ p/");
    }

    #[test]
    fn invalid_index_shows_usage() {
        let err = ParseError::InvalidIndex {
            preamble: "-5".into(),
            span: Span::new(0, 2),
            usage: "edit: usage",
            source: IndexError,
        };
        assert_eq!(err.to_string(), "Invalid command format! \nedit: usage");
        assert_eq!(err.usage(), Some("edit: usage"));

        let diag = err.to_diagnostic();
        assert_eq!(diag.id, codes::INVALID_INDEX);
        assert_eq!(
            diag.message,
            "Invalid command format! Index is not a non-zero unsigned integer."
        );
    }

    #[test]
    fn invalid_field_carries_context() {
        let err = ParseError::InvalidField {
            prefix: Prefix::new("p/"),
            value: "12a".into(),
            span: Span::new(4, 7),
            source: FieldError {
                field: FieldKind::Phone,
                message: "digits only".into(),
            },
        };
        assert_eq!(err.to_string(), "digits only");
        assert!(err.usage().is_none());

        let diag = err.to_diagnostic();
        assert_eq!(diag.span, Some(Span::new(4, 7)));
        let ctx = diag.context.unwrap();
        assert_eq!(ctx["field"], "phone");
        assert_eq!(ctx["prefix"], "p/");
        assert_eq!(ctx["value"], "12a");
    }

    #[test]
    fn not_edited_has_no_span() {
        let diag = ParseError::NotEdited.to_diagnostic();
        assert_eq!(diag.message, "At least one field to edit must be provided.");
        assert!(diag.span.is_none());
    }
}
