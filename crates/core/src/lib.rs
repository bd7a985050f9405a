//! recruitbook core library.
//!
//! Turns a free-form command argument string such as
//! `1 n/John Doe p/91234567 t/` into a typed, sparse edit request. The main
//! entry points are [`tokenize`] for splitting an argument string on
//! `prefix/value` segments and [`EditCommandParser`] for building an
//! [`EditDescriptor`] that records exactly which fields the user asked to
//! change.

#![warn(missing_docs)]

/// Prefix-tagged argument tokenizer and its output table.
pub mod args;
/// Command parsers and the shared [`CommandParser`] capability.
pub mod command;
/// Sparse per-field update descriptor.
pub mod descriptor;
/// Parse errors and their diagnostic mapping.
pub mod error;
/// Typed field values and their validators.
pub mod fields;
/// The candidate record an edit is applied to.
pub mod record;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Tokenizer
pub use args::prefix::Prefix;
pub use args::table::{ArgValue, ArgumentTable};
pub use args::tokenizer::tokenize;

// Commands
pub use command::edit::{EDIT_PREFIXES, EDIT_USAGE, EditCommandParser, EditRequest, parse_edit};
pub use command::{CommandParser, Index};

// Descriptor and record
pub use descriptor::EditDescriptor;
pub use record::Candidate;

// Errors
pub use error::{DuplicatePrefixError, IndexError, ParseError};
pub use fields::{FieldError, FieldKind};

// Diagnostics and rules (re-exported from their crates)
pub use recruitbook_diagnostics::{Diagnostic, Severity, Span, codes};
pub use recruitbook_rules::FieldRules;
