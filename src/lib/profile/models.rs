use std::fmt;

use serde::{Deserialize, Serialize};

/// One bookable qualification with its hourly rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    pub name: String,
    pub rate: f64,
}

impl Qualification {
    pub fn new(name: impl Into<String>, rate: f64) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }

    /// The placeholder appended by "add qualification", invalid until filled in.
    pub fn placeholder() -> Self {
        Self::new("", 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QualificationKind {
    Private,
    Group,
}

impl QualificationKind {
    pub fn card(self) -> Card {
        match self {
            QualificationKind::Private => Card::Private,
            QualificationKind::Group => Card::Group,
        }
    }
}

impl fmt::Display for QualificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualificationKind::Private => write!(f, "private"),
            QualificationKind::Group => write!(f, "group"),
        }
    }
}

/// Model for the `teacherDetails` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub private_qualifications: Vec<Qualification>,
    pub group_qualifications: Vec<Qualification>,
}

impl Teacher {
    pub fn qualifications(&self, kind: QualificationKind) -> &Vec<Qualification> {
        match kind {
            QualificationKind::Private => &self.private_qualifications,
            QualificationKind::Group => &self.group_qualifications,
        }
    }

    pub fn qualifications_mut(&mut self, kind: QualificationKind) -> &mut Vec<Qualification> {
        match kind {
            QualificationKind::Private => &mut self.private_qualifications,
            QualificationKind::Group => &mut self.group_qualifications,
        }
    }

    /// Current value of a string field. `None` only for an unset birth date.
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Role => Some(&self.role),
            Field::BirthDate => self.birth_date.as_deref(),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::Address => Some(&self.address),
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Role => self.role = value,
            Field::BirthDate => self.birth_date = Some(value),
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Address => self.address = value,
        }
    }
}

impl Default for Teacher {
    /// The record a fresh session starts from.
    fn default() -> Self {
        Self {
            name: "Alynia Allan".to_owned(),
            role: "Teacher".to_owned(),
            birth_date: None,
            email: "alyniaallan@example.com".to_owned(),
            phone: "4168489057".to_owned(),
            address: "56 Oswald De Santos Cr, North York, Ontario, Canada".to_owned(),
            private_qualifications: vec![
                Qualification::new("Vocal Contemporary", 28.0),
                Qualification::new("Vocal Core", 28.0),
                Qualification::new("Vocal Plus", 28.0),
                Qualification::new("Instrument", 28.0),
            ],
            group_qualifications: Vec::new(),
        }
    }
}

/// Independently editable section of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Card {
    Details,
    Contact,
    Private,
    Group,
}

impl Card {
    /// The string fields this card edits, in validation order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Card::Details => &[Field::Name, Field::Role, Field::BirthDate],
            Card::Contact => &[Field::Email, Field::Phone, Field::Address],
            Card::Private | Card::Group => &[],
        }
    }

    pub fn qualification_kind(self) -> Option<QualificationKind> {
        match self {
            Card::Private => Some(QualificationKind::Private),
            Card::Group => Some(QualificationKind::Group),
            Card::Details | Card::Contact => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Card::Details => "details",
            Card::Contact => "contact",
            Card::Private => "private",
            Card::Group => "group",
        };
        write!(f, "{}", name)
    }
}

/// A string field of the teacher record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Field {
    Name,
    Role,
    #[value(name = "birthDate", alias = "birth-date")]
    BirthDate,
    Email,
    Phone,
    Address,
}

impl Field {
    pub fn card(self) -> Card {
        match self {
            Field::Name | Field::Role | Field::BirthDate => Card::Details,
            Field::Email | Field::Phone | Field::Address => Card::Contact,
        }
    }

    /// Key of the field in the stored JSON.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Role => "role",
            Field::BirthDate => "birthDate",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
