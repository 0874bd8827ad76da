//! Contact form field validation.
//!
//! Each field is checked against a fixed list of rules and the first failing
//! rule produces the [`FieldError`] shown next to the control. The validators
//! are pure; showing and clearing errors is left to the caller through
//! [`FieldErrorDisplay`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum trimmed length of the name field
pub const NAME_MIN_LEN: usize = 2;
/// Minimum trimmed length of the subject field
pub const SUBJECT_MIN_LEN: usize = 3;
/// Minimum trimmed length of the message field
pub const MESSAGE_MIN_LEN: usize = 10;

/// The contact form fields that take part in validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldName {
    /// Required fields, in the order they are validated on submit
    pub const REQUIRED: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Subject,
        FieldName::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Subject => "subject",
            FieldName::Message => "message",
        }
    }

    /// Id of the element that displays this field's error
    pub fn error_element_id(&self) -> String {
        format!("{}-error", self.as_str())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(FieldName::Name),
            "email" => Ok(FieldName::Email),
            "subject" => Ok(FieldName::Subject),
            "message" => Ok(FieldName::Message),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

/// A field value as read from the form, re-read on every validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: FieldName,
    pub raw_value: String,
    pub trimmed_value: String,
}

impl FormField {
    pub fn new(name: FieldName, raw_value: impl Into<String>) -> Self {
        let raw_value = raw_value.into();
        let trimmed_value = raw_value.trim().to_string();
        Self {
            name,
            raw_value,
            trimmed_value,
        }
    }
}

/// Why a single field failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldErrorKind {
    #[error("{} is required", capitalize(.0.as_str()))]
    Required(FieldName),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Message should be at least 10 characters long")]
    MessageTooShort,
    #[error("Name should be at least 2 characters long")]
    NameTooShort,
    #[error("Subject should be at least 3 characters long")]
    SubjectTooShort,
}

/// A failed validation for one field; `Display` is the user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct FieldError {
    pub field: FieldName,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Validates a single field. Rules run in a fixed order and the first failure wins.
pub fn validate_field(field: &FormField) -> Result<(), FieldError> {
    let value = field.trimmed_value.as_str();
    let fail = |kind| {
        Err(FieldError {
            field: field.name,
            kind,
        })
    };

    if value.is_empty() {
        return fail(FieldErrorKind::Required(field.name));
    }

    // Lengths count characters, not bytes
    let len = value.chars().count();
    match field.name {
        FieldName::Email if !is_valid_email(value) => fail(FieldErrorKind::InvalidEmail),
        FieldName::Message if len < MESSAGE_MIN_LEN => fail(FieldErrorKind::MessageTooShort),
        FieldName::Name if len < NAME_MIN_LEN => fail(FieldErrorKind::NameTooShort),
        FieldName::Subject if len < SUBJECT_MIN_LEN => fail(FieldErrorKind::SubjectTooShort),
        _ => Ok(()),
    }
}

/// Convenience wrapper over [`validate_field`] for a raw value
pub fn validate_value(name: FieldName, raw_value: &str) -> Result<(), FieldError> {
    validate_field(&FormField::new(name, raw_value))
}

/// Checks the `local@domain.tld` shape: ASCII, no whitespace, exactly one `@`,
/// and a dot inside the domain with characters on both sides.
pub fn is_valid_email(value: &str) -> bool {
    if !value.is_ascii() || value.chars().any(|c| c.is_ascii_whitespace()) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Upper-cases the first character of `s`
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// What the error container and the control should look like for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorDisplay {
    pub text: String,
    pub display: &'static str,
    pub border_color: &'static str,
}

impl FieldErrorDisplay {
    pub fn for_result(result: &Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => Self::cleared(),
            Err(err) => Self::showing(err),
        }
    }

    pub fn showing(err: &FieldError) -> Self {
        Self {
            text: err.message(),
            display: "block",
            border_color: "var(--color-error)",
        }
    }

    pub fn cleared() -> Self {
        Self {
            text: String::new(),
            display: "none",
            border_color: "",
        }
    }
}
