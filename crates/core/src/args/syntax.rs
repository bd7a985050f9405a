//! Prefixes understood by the edit command.

use super::prefix::Prefix;

/// Candidate name.
pub const PREFIX_NAME: Prefix = Prefix::new("n/");
/// Phone number.
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
/// Email address.
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
/// Postal address.
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
/// Role the candidate is applying for.
pub const PREFIX_DESIRED_ROLE: Prefix = Prefix::new("dr/");
/// Comma-separated skills.
pub const PREFIX_SKILLS: Prefix = Prefix::new("s/");
/// Years of experience.
pub const PREFIX_EXPERIENCE: Prefix = Prefix::new("ex/");
/// Pipeline status.
pub const PREFIX_STATUS: Prefix = Prefix::new("st/");
/// Free-text note.
pub const PREFIX_NOTE: Prefix = Prefix::new("note/");
/// Tag; may be repeated.
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
