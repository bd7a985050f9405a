//! Each editable field is a newtype whose constructor validates raw text.
//!
//! Validators trim their input first. Messages describe the expected format
//! and are shown to the user unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::args::prefix::Prefix;
use crate::args::syntax::*;
use recruitbook_rules::FieldRules;

/// The editable fields of a candidate, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Candidate name.
    Name,
    /// Phone number.
    Phone,
    /// Email address.
    Email,
    /// Postal address.
    Address,
    /// Role applied for.
    DesiredRole,
    /// Skill set.
    Skills,
    /// Years of experience.
    Experience,
    /// Pipeline status.
    Status,
    /// Free-text note.
    Note,
    /// Tag set.
    Tags,
}

impl FieldKind {
    /// All fields, in declaration order.
    pub const ALL: [FieldKind; 10] = [
        FieldKind::Name,
        FieldKind::Phone,
        FieldKind::Email,
        FieldKind::Address,
        FieldKind::DesiredRole,
        FieldKind::Skills,
        FieldKind::Experience,
        FieldKind::Status,
        FieldKind::Note,
        FieldKind::Tags,
    ];

    /// Lower-case human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Phone => "phone",
            FieldKind::Email => "email",
            FieldKind::Address => "address",
            FieldKind::DesiredRole => "desired role",
            FieldKind::Skills => "skills",
            FieldKind::Experience => "experience",
            FieldKind::Status => "status",
            FieldKind::Note => "note",
            FieldKind::Tags => "tags",
        }
    }

    /// The prefix that introduces this field in an argument string.
    pub fn prefix(self) -> Prefix {
        match self {
            FieldKind::Name => PREFIX_NAME,
            FieldKind::Phone => PREFIX_PHONE,
            FieldKind::Email => PREFIX_EMAIL,
            FieldKind::Address => PREFIX_ADDRESS,
            FieldKind::DesiredRole => PREFIX_DESIRED_ROLE,
            FieldKind::Skills => PREFIX_SKILLS,
            FieldKind::Experience => PREFIX_EXPERIENCE,
            FieldKind::Status => PREFIX_STATUS,
            FieldKind::Note => PREFIX_NOTE,
            FieldKind::Tags => PREFIX_TAG,
        }
    }

    /// Whether the field may be given more than once in one command.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, FieldKind::Tags)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw value was rejected by its field's validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// The field whose validator failed.
    pub field: FieldKind,
    /// Description of the expected format.
    pub message: String,
}

impl FieldError {
    fn new(field: FieldKind, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Defines a string-backed field newtype with the common accessors.
macro_rules! text_field {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// The validated text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_field!(
    /// A candidate name: alphanumeric words separated by spaces.
    Name
);
text_field!(
    /// A phone number made of digits only.
    Phone
);
text_field!(
    /// An email address of the form `local@domain`.
    Email
);
text_field!(
    /// A non-blank postal address.
    Address
);
text_field!(
    /// A non-blank role title.
    DesiredRole
);
text_field!(
    /// A pipeline status, stored with its configured spelling.
    Status
);
text_field!(
    /// Free text; may be empty.
    Note
);
text_field!(
    /// A single alphanumeric tag.
    Tag
);

const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
const DESIRED_ROLE_CONSTRAINTS: &str =
    "Desired roles can take any values, and it should not be blank";
const SKILLS_CONSTRAINTS: &str =
    "Skills should be a comma-separated list, and no skill should be blank";
const TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";
const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain. \
    The local-part should only contain alphanumeric characters and the special characters +_.-, \
    and may not start or end with a special character. The domain is made of labels separated \
    by periods; each label starts and ends with an alphanumeric character and may contain \
    hyphens in between, and the last label is at least 2 characters long";

impl Name {
    /// Validate a name.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let name = raw.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == ' ') {
            return Err(FieldError::new(FieldKind::Name, NAME_CONSTRAINTS));
        }
        Ok(Self(name.to_string()))
    }
}

impl Phone {
    /// Validate a phone number against `rules.min_phone_digits`.
    pub fn parse(raw: &str, rules: &FieldRules) -> Result<Self, FieldError> {
        let phone = raw.trim();
        if phone.len() < rules.min_phone_digits || !phone.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::new(
                FieldKind::Phone,
                format!(
                    "Phone numbers should only contain numbers, and it should be at least {} digits long",
                    rules.min_phone_digits
                ),
            ));
        }
        Ok(Self(phone.to_string()))
    }
}

impl Email {
    /// Validate an email address.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let email = raw.trim();
        let valid = match email.split_once('@') {
            Some((local, domain)) => is_valid_local_part(local) && is_valid_domain(domain),
            None => false,
        };
        if !valid {
            return Err(FieldError::new(FieldKind::Email, EMAIL_CONSTRAINTS));
        }
        Ok(Self(email.to_string()))
    }
}

fn is_valid_local_part(local: &str) -> bool {
    let starts_and_ends_alnum = local.chars().next().is_some_and(char::is_alphanumeric)
        && local.chars().next_back().is_some_and(char::is_alphanumeric);
    starts_and_ends_alnum
        && local
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '+' | '_' | '.' | '-'))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let label_ok = |label: &&str| {
        label.chars().next().is_some_and(char::is_alphanumeric)
            && label.chars().next_back().is_some_and(char::is_alphanumeric)
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    labels.iter().all(label_ok) && labels.last().is_some_and(|l| l.chars().count() >= 2)
}

impl Address {
    /// Validate an address.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        non_blank(raw, FieldKind::Address, ADDRESS_CONSTRAINTS).map(Self)
    }
}

impl DesiredRole {
    /// Validate a role title.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        non_blank(raw, FieldKind::DesiredRole, DESIRED_ROLE_CONSTRAINTS).map(Self)
    }
}

fn non_blank(raw: &str, field: FieldKind, message: &str) -> Result<String, FieldError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(FieldError::new(field, message));
    }
    Ok(text.to_string())
}

/// A set of skills, given as a comma-separated list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Skills(BTreeSet<String>);

impl Skills {
    /// Validate a comma-separated skill list. Every entry must be non-blank;
    /// repeated entries collapse.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let mut skills = BTreeSet::new();
        for entry in raw.split(',') {
            let skill = entry.trim();
            if skill.is_empty() {
                return Err(FieldError::new(FieldKind::Skills, SKILLS_CONSTRAINTS));
            }
            skills.insert(skill.to_string());
        }
        Ok(Self(skills))
    }

    /// Iterate the skills in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of distinct skills.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no skills.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Skills {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.iter().collect::<Vec<_>>().join(", "))
    }
}

/// Whole years of experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Experience(u32);

impl Experience {
    /// Validate a year count against `rules.max_experience_years`.
    pub fn parse(raw: &str, rules: &FieldRules) -> Result<Self, FieldError> {
        let text = raw.trim();
        let years = text
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| text.parse::<u32>().ok())
            .flatten()
            .filter(|&y| y <= rules.max_experience_years);
        years.map(Self).ok_or_else(|| {
            FieldError::new(
                FieldKind::Experience,
                format!(
                    "Experience should be a whole number of years between 0 and {}",
                    rules.max_experience_years
                ),
            )
        })
    }

    /// The number of years.
    pub fn years(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Experience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Status {
    /// Validate a status against `rules.statuses`, ignoring case.
    pub fn parse(raw: &str, rules: &FieldRules) -> Result<Self, FieldError> {
        match rules.canonical_status(raw.trim()) {
            Some(status) => Ok(Self(status.to_string())),
            None => Err(FieldError::new(
                FieldKind::Status,
                format!("Status should be one of: {}", rules.statuses.join(", ")),
            )),
        }
    }
}

impl Default for Note {
    fn default() -> Self {
        Self(String::new())
    }
}

impl Note {
    /// Validate a note against `rules.max_note_length` (in characters).
    /// An empty note is accepted.
    pub fn parse(raw: &str, rules: &FieldRules) -> Result<Self, FieldError> {
        let note = raw.trim();
        if note.chars().count() > rules.max_note_length {
            return Err(FieldError::new(
                FieldKind::Note,
                format!(
                    "Notes can take any values, and should be at most {} characters long",
                    rules.max_note_length
                ),
            ));
        }
        Ok(Self(note.to_string()))
    }
}

impl Tag {
    /// Validate a tag.
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let tag = raw.trim();
        if tag.is_empty() || !tag.chars().all(char::is_alphanumeric) {
            return Err(FieldError::new(FieldKind::Tags, TAG_CONSTRAINTS));
        }
        Ok(Self(tag.to_string()))
    }
}
