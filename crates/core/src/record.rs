use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fields::{
    Address, DesiredRole, Email, Experience, Name, Note, Phone, Skills, Status, Tag,
};

/// A candidate as stored in the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Full name.
    pub name: Name,
    /// Phone number.
    pub phone: Phone,
    /// Email address.
    pub email: Email,
    /// Postal address.
    pub address: Address,
    /// Role applied for.
    pub desired_role: DesiredRole,
    /// Skills.
    #[serde(default)]
    pub skills: Skills,
    /// Years of experience.
    #[serde(default)]
    pub experience: Experience,
    /// Pipeline status.
    pub status: Status,
    /// Free-text note.
    #[serde(default)]
    pub note: Note,
    /// Tags.
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

