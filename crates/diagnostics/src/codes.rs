//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

/// The preamble of a command is not a positive 1-based index.
pub const INVALID_INDEX: &str = "RB1001";

/// A field value was rejected by its validator.
pub const INVALID_FIELD: &str = "RB1101";

/// An edit command supplied no field to change.
pub const NOT_EDITED: &str = "RB1201";

/// A single-valued field prefix was given more than once.
pub const DUPLICATE_PREFIX: &str = "RB1202";

/// The same tag was listed more than once and has been collapsed.
pub const REPEATED_TAG: &str = "RB2001";

/// Every known diagnostic code, in numeric order.
pub const ALL: &[&str] = &[
    INVALID_INDEX,
    INVALID_FIELD,
    NOT_EDITED,
    DUPLICATE_PREFIX,
    REPEATED_TAG,
];

pub(crate) fn explain(id: &str) -> Option<&'static str> {
    match id {
        INVALID_INDEX => Some(
            "The text before the first field prefix must be the 1-based index of the \
             candidate to edit, as shown in the displayed list. Zero, negative numbers, \
             and anything that is not a whole number are rejected.",
        ),
        INVALID_FIELD => Some(
            "A field value does not satisfy that field's format rules. The message names \
             the field and the expected format; the label points at the offending value.",
        ),
        NOT_EDITED => Some(
            "An edit command must change at least one field. Supply one or more \
             prefix/value segments after the index, e.g. `edit 1 p/91234567`.",
        ),
        DUPLICATE_PREFIX => Some(
            "Single-valued fields (everything except tags) may appear at most once per \
             command. Remove the repeated prefixes; only tags may be repeated.",
        ),
        REPEATED_TAG => Some(
            "The same tag was given more than once. Tags form a set, so the duplicates \
             have no effect.",
        ),
        _ => None,
    }
}
