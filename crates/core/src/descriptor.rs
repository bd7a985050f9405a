use std::collections::BTreeSet;

use serde::Serialize;

use crate::fields::{
    Address, DesiredRole, Email, Experience, FieldKind, Name, Note, Phone, Skills, Status, Tag,
};
use crate::record::Candidate;

/// The fields an edit command asked to change.
///
/// Each slot is `None` until its setter is called; a `None` slot means "keep
/// the record's value". Tags have three states:
/// - `None` — keep the record's tags
/// - `Some(empty set)` — remove every tag
/// - `Some(non-empty set)` — replace the tags with this set
///
/// Serializes only the slots that are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<Name>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<Phone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desired_role: Option<DesiredRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skills: Option<Skills>,
    #[serde(skip_serializing_if = "Option::is_none")]
    experience: Option<Experience>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<Note>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<BTreeSet<Tag>>,
}

impl EditDescriptor {
    /// An empty descriptor with no slot set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name slot.
    pub fn set_name(&mut self, name: Name) {
        self.name = Some(name);
    }

    /// Set the phone slot.
    pub fn set_phone(&mut self, phone: Phone) {
        self.phone = Some(phone);
    }

    /// Set the email slot.
    pub fn set_email(&mut self, email: Email) {
        self.email = Some(email);
    }

    /// Set the address slot.
    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Set the desired role slot.
    pub fn set_desired_role(&mut self, desired_role: DesiredRole) {
        self.desired_role = Some(desired_role);
    }

    /// Set the skills slot.
    pub fn set_skills(&mut self, skills: Skills) {
        self.skills = Some(skills);
    }

    /// Set the experience slot.
    pub fn set_experience(&mut self, experience: Experience) {
        self.experience = Some(experience);
    }

    /// Set the status slot.
    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    /// Set the note slot.
    pub fn set_note(&mut self, note: Note) {
        self.note = Some(note);
    }

    /// Set the tag slot. An empty set clears the record's tags.
    pub fn set_tags(&mut self, tags: BTreeSet<Tag>) {
        self.tags = Some(tags);
    }

    /// The name slot.
    pub fn name(&self) -> Option<&Name> {
        self.name.as_ref()
    }

    /// The phone slot.
    pub fn phone(&self) -> Option<&Phone> {
        self.phone.as_ref()
    }

    /// The email slot.
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// The address slot.
    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// The desired role slot.
    pub fn desired_role(&self) -> Option<&DesiredRole> {
        self.desired_role.as_ref()
    }

    /// The skills slot.
    pub fn skills(&self) -> Option<&Skills> {
        self.skills.as_ref()
    }

    /// The experience slot.
    pub fn experience(&self) -> Option<Experience> {
        self.experience
    }

    /// The status slot.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// The note slot.
    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// The tag slot; see the type docs for the three states.
    pub fn tags(&self) -> Option<&BTreeSet<Tag>> {
        self.tags.as_ref()
    }

    /// Whether any slot is set.
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.desired_role.is_some()
            || self.skills.is_some()
            || self.experience.is_some()
            || self.status.is_some()
            || self.note.is_some()
            || self.tags.is_some()
    }

    /// The set slots, in field declaration order.
    pub fn edited_fields(&self) -> Vec<FieldKind> {
        FieldKind::ALL
            .into_iter()
            .filter(|&field| self.is_edited(field))
            .collect()
    }

    /// Whether the slot for `field` is set.
    pub fn is_edited(&self, field: FieldKind) -> bool {
        match field {
            FieldKind::Name => self.name.is_some(),
            FieldKind::Phone => self.phone.is_some(),
            FieldKind::Email => self.email.is_some(),
            FieldKind::Address => self.address.is_some(),
            FieldKind::DesiredRole => self.desired_role.is_some(),
            FieldKind::Skills => self.skills.is_some(),
            FieldKind::Experience => self.experience.is_some(),
            FieldKind::Status => self.status.is_some(),
            FieldKind::Note => self.note.is_some(),
            FieldKind::Tags => self.tags.is_some(),
        }
    }

    /// Build the edited copy of `candidate`: set slots replace the record's
    /// values, unset slots keep them.
    pub fn apply_to(&self, candidate: &Candidate) -> Candidate {
        Candidate {
            name: self.name.clone().unwrap_or_else(|| candidate.name.clone()),
            phone: self.phone.clone().unwrap_or_else(|| candidate.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| candidate.email.clone()),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| candidate.address.clone()),
            desired_role: self
                .desired_role
                .clone()
                .unwrap_or_else(|| candidate.desired_role.clone()),
            skills: self
                .skills
                .clone()
                .unwrap_or_else(|| candidate.skills.clone()),
            experience: self.experience.unwrap_or(candidate.experience),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| candidate.status.clone()),
            note: self.note.clone().unwrap_or_else(|| candidate.note.clone()),
            tags: self.tags.clone().unwrap_or_else(|| candidate.tags.clone()),
        }
    }
}
