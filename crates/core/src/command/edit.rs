use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::{CommandParser, Index};
use crate::args::prefix::Prefix;
use crate::args::syntax::*;
use crate::args::table::ArgumentTable;
use crate::args::tokenizer::tokenize;
use crate::descriptor::EditDescriptor;
use crate::error::ParseError;
use crate::fields::{
    Address, DesiredRole, Email, Experience, FieldError, Name, Note, Phone, Skills, Status, Tag,
};
use recruitbook_diagnostics::{Diagnostic, codes};
use recruitbook_rules::FieldRules;

/// Every prefix the edit command understands.
pub const EDIT_PREFIXES: [Prefix; 10] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_DESIRED_ROLE,
    PREFIX_SKILLS,
    PREFIX_EXPERIENCE,
    PREFIX_STATUS,
    PREFIX_NOTE,
    PREFIX_TAG,
];

/// Prefixes that may appear at most once. Tags are repeatable.
const SINGLE_VALUED_PREFIXES: [Prefix; 9] = [
    PREFIX_NAME,
    PREFIX_PHONE,
    PREFIX_EMAIL,
    PREFIX_ADDRESS,
    PREFIX_DESIRED_ROLE,
    PREFIX_SKILLS,
    PREFIX_EXPERIENCE,
    PREFIX_STATUS,
    PREFIX_NOTE,
];

/// Usage text shown when the edit command is malformed.
pub const EDIT_USAGE: &str = "edit: Edits the details of the candidate identified \
by the index number used in the displayed candidate list. \
Existing values will be overwritten by the input values.\n\
Parameters: INDEX (must be a positive integer) \
[n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [dr/DESIRED_ROLE] [s/SKILLS] \
[ex/EXPERIENCE] [st/STATUS] [note/NOTE] [t/TAG]...\n\
Example: edit 1 p/91234567 e/johndoe@example.com";

/// A parsed edit command: which candidate, and what to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRequest {
    /// The candidate to edit.
    pub index: Index,
    /// The fields to change.
    pub descriptor: EditDescriptor,
    /// Non-fatal findings, e.g. a tag listed twice.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Diagnostic>,
}

/// Parses `edit` arguments into an [`EditRequest`].
#[derive(Debug, Clone, Default)]
pub struct EditCommandParser {
    rules: FieldRules,
}

impl EditCommandParser {
    /// A parser that validates fields against `rules`.
    pub fn new(rules: FieldRules) -> Self {
        Self { rules }
    }

    /// The rules this parser validates against.
    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    fn populate(&self, table: &ArgumentTable<'_>) -> Result<EditDescriptor, ParseError> {
        let rules = &self.rules;
        let mut descriptor = EditDescriptor::new();

        if let Some(name) = field(table, PREFIX_NAME, Name::parse)? {
            descriptor.set_name(name);
        }
        if let Some(phone) = field(table, PREFIX_PHONE, |raw| Phone::parse(raw, rules))? {
            descriptor.set_phone(phone);
        }
        if let Some(email) = field(table, PREFIX_EMAIL, Email::parse)? {
            descriptor.set_email(email);
        }
        if let Some(address) = field(table, PREFIX_ADDRESS, Address::parse)? {
            descriptor.set_address(address);
        }
        if let Some(role) = field(table, PREFIX_DESIRED_ROLE, DesiredRole::parse)? {
            descriptor.set_desired_role(role);
        }
        if let Some(skills) = field(table, PREFIX_SKILLS, Skills::parse)? {
            descriptor.set_skills(skills);
        }
        if let Some(years) = field(table, PREFIX_EXPERIENCE, |raw| Experience::parse(raw, rules))? {
            descriptor.set_experience(years);
        }
        if let Some(status) = field(table, PREFIX_STATUS, |raw| Status::parse(raw, rules))? {
            descriptor.set_status(status);
        }
        if let Some(note) = field(table, PREFIX_NOTE, |raw| Note::parse(raw, rules))? {
            descriptor.set_note(note);
        }

        Ok(descriptor)
    }
}

impl CommandParser for EditCommandParser {
    type Output = EditRequest;

    /// Parse `INDEX [prefix/value]...`.
    ///
    /// Checks run in a fixed order: index, field values, "nothing to edit",
    /// then repeated single-valued prefixes. A command that edits nothing is
    /// therefore reported as such even if it also repeats a prefix.
    fn parse(&self, args: &str) -> Result<EditRequest, ParseError> {
        let table = tokenize(args, &EDIT_PREFIXES);

        let index: Index = table
            .preamble()
            .parse()
            .map_err(|source| ParseError::InvalidIndex {
                preamble: table.preamble().to_string(),
                span: table.preamble_span(),
                usage: EDIT_USAGE,
                source,
            })?;

        let mut descriptor = self.populate(&table)?;
        let mut warnings = Vec::new();
        if let Some(tags) = tags_for_edit(&table, &mut warnings)? {
            descriptor.set_tags(tags);
        }

        if !descriptor.is_any_field_edited() {
            return Err(ParseError::NotEdited);
        }

        table.verify_no_duplicate_prefixes(&SINGLE_VALUED_PREFIXES)?;

        debug!(
            index = index.one_based(),
            fields = ?descriptor.edited_fields(),
            "parsed edit request"
        );
        Ok(EditRequest {
            index,
            descriptor,
            warnings,
        })
    }
}

/// Parse `args` as an edit command with the default rules.
pub fn parse_edit(args: &str) -> Result<EditRequest, ParseError> {
    EditCommandParser::default().parse(args)
}

/// Validate the last value for `prefix`, if the prefix appeared.
fn field<T>(
    table: &ArgumentTable<'_>,
    prefix: Prefix,
    validate: impl FnOnce(&str) -> Result<T, FieldError>,
) -> Result<Option<T>, ParseError> {
    let Some(arg) = table.last_occurrence(prefix) else {
        return Ok(None);
    };
    validate(arg.value).map(Some).map_err(|source| {
        debug!(%prefix, value = arg.value, error = %source, "field rejected");
        ParseError::InvalidField {
            prefix,
            value: arg.value.to_string(),
            span: arg.span,
            source,
        }
    })
}

/// Resolve the tag slot from every `t/` value.
///
/// - no `t/` at all: `None`, the record's tags are untouched
/// - exactly one `t/` with an empty value: `Some(empty)`, clearing the tags
/// - otherwise every value must be a valid tag; an empty value among several
///   is rejected like any other invalid tag
fn tags_for_edit(
    table: &ArgumentTable<'_>,
    warnings: &mut Vec<Diagnostic>,
) -> Result<Option<BTreeSet<Tag>>, ParseError> {
    let occurrences = table.occurrences(PREFIX_TAG);
    match occurrences {
        [] => return Ok(None),
        [only] if only.value.is_empty() => return Ok(Some(BTreeSet::new())),
        _ => {}
    }

    let mut tags = BTreeSet::new();
    for arg in occurrences {
        let tag = Tag::parse(arg.value).map_err(|source| ParseError::InvalidField {
            prefix: PREFIX_TAG,
            value: arg.value.to_string(),
            span: arg.span,
            source,
        })?;
        if let Some(repeat) = tags.replace(tag) {
            warnings.push(Diagnostic::warn(
                codes::REPEATED_TAG,
                format!("Tag `{repeat}` is listed more than once"),
                Some(arg.span),
            ));
        }
    }
    Ok(Some(tags))
}
