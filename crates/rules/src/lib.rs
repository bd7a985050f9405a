//! Field validation rules for recruitbook command parsing.
//!
//! A [`FieldRules`] value carries the tunable limits the field validators
//! consult: minimum phone length, the accepted pipeline statuses, and so on.
//! Every setting has a default, so an empty JSON object is a valid rules file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or validating a rules file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RulesError {
    /// JSON deserialization failed.
    #[error("invalid rules JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A setting is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the setting that failed validation.
        field: String,
        /// A human-readable explanation of why the value is invalid.
        reason: String,
    },
}

/// Default pipeline statuses, in pipeline order.
pub const DEFAULT_STATUSES: &[&str] = &[
    "Applied",
    "Screening",
    "Interview",
    "Offered",
    "Hired",
    "Rejected",
];

/// Tunable limits consulted by the field validators.
///
/// # Example
/// ```
/// let rules = recruitbook_rules::load_rules_from_str(r#"{ "min_phone_digits": 8 }"#).unwrap();
/// assert_eq!(rules.min_phone_digits, 8);
/// assert_eq!(rules.max_note_length, 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRules {
    /// Minimum number of digits in a phone number.
    pub min_phone_digits: usize,
    /// Largest accepted value for years of experience.
    pub max_experience_years: u32,
    /// Maximum note length in characters.
    pub max_note_length: usize,
    /// Accepted statuses. Matching is case-insensitive; the stored value uses
    /// the spelling given here.
    pub statuses: Vec<String>,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            min_phone_digits: 3,
            max_experience_years: 60,
            max_note_length: 500,
            statuses: DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FieldRules {
    /// Look up the configured spelling of `raw` among the accepted statuses,
    /// ignoring ASCII case.
    pub fn canonical_status(&self, raw: &str) -> Option<&str> {
        self.statuses
            .iter()
            .find(|s| s.eq_ignore_ascii_case(raw))
            .map(String::as_str)
    }
}

/// Load and validate [`FieldRules`] from a JSON string.
///
/// Missing settings take their defaults. After deserialization:
/// - `min_phone_digits` must be > 0
/// - `max_note_length` must be > 0
/// - `statuses` must be non-empty, with no blank entries and no two entries
///   equal ignoring ASCII case
pub fn load_rules_from_str(s: &str) -> Result<FieldRules, RulesError> {
    let rules: FieldRules = serde_json::from_str(s)?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Check the invariants documented on [`load_rules_from_str`].
pub fn validate_rules(rules: &FieldRules) -> Result<(), RulesError> {
    if rules.min_phone_digits == 0 {
        return Err(RulesError::InvalidField {
            field: "min_phone_digits".into(),
            reason: "must be > 0".into(),
        });
    }
    if rules.max_note_length == 0 {
        return Err(RulesError::InvalidField {
            field: "max_note_length".into(),
            reason: "must be > 0".into(),
        });
    }

    if rules.statuses.is_empty() {
        return Err(RulesError::InvalidField {
            field: "statuses".into(),
            reason: "must list at least one status".into(),
        });
    }
    for (i, status) in rules.statuses.iter().enumerate() {
        if status.trim().is_empty() {
            return Err(RulesError::InvalidField {
                field: format!("statuses[{i}]"),
                reason: "must not be blank".into(),
            });
        }
        if rules.statuses[..i]
            .iter()
            .any(|earlier| earlier.eq_ignore_ascii_case(status))
        {
            return Err(RulesError::InvalidField {
                field: format!("statuses[{i}]"),
                reason: format!("'{status}' is listed more than once"),
            });
        }
    }

    Ok(())
}
