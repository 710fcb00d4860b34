//! Field-level rules a card must pass before it can be committed.
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;
use thiserror::Error;

use crate::profile::models::{Field, Qualification, QualificationKind};

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone regex"));

/// The rule a card failed. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(Field),
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Phone must be 10 digits")]
    InvalidPhone,
    #[error("Invalid birth date")]
    InvalidBirthDate,
    #[error("Please remove or complete empty qualifications")]
    IncompleteQualifications(QualificationKind),
    /// Same rule as `IncompleteQualifications`, reported when closing a card
    /// without saving.
    #[error("Please complete or remove invalid qualifications")]
    InvalidQualifications(QualificationKind),
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Accepts a calendar date (`2024-02-29`) or a full RFC 3339 timestamp.
pub fn is_valid_date(date: &str) -> bool {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(date).is_ok()
}

pub fn is_complete_qualification(qualification: &Qualification) -> bool {
    !qualification.name.trim().is_empty()
        && qualification.rate.is_finite()
        && qualification.rate > 0.0
}

/// Checks one string field: non-empty first, then the field's format rule.
pub fn validate_field(field: Field, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    match field {
        Field::Email if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        Field::Phone if !is_valid_phone(value) => Err(ValidationError::InvalidPhone),
        Field::BirthDate if !is_valid_date(value) => Err(ValidationError::InvalidBirthDate),
        _ => Ok(()),
    }
}

/// Checks fields in order; the first failure wins. `None` values are
/// optional fields left unset and always pass.
pub fn validate_fields<'a, I>(fields: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (Field, Option<&'a str>)>,
{
    fields
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .try_for_each(|(field, value)| validate_field(field, value))
}

pub fn validate_qualifications(
    kind: QualificationKind,
    qualifications: &[Qualification],
) -> Result<(), ValidationError> {
    if qualifications.iter().all(is_complete_qualification) {
        Ok(())
    } else {
        Err(ValidationError::IncompleteQualifications(kind))
    }
}
