//! Contact form validation
//!
//! Rules are checked in a fixed order and the first failure wins, so a
//! payload with several problems always reports the same one.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::contact::models::ContactRequest;

/// Minimum trimmed name length in characters
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum trimmed message length in characters
pub const MIN_MESSAGE_LENGTH: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Reasons a contact submission is rejected
///
/// The display text is shown to the visitor as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of name, email, message is absent or empty
    #[error("All fields are required")]
    MissingFields,

    /// Email does not look like `local@domain.tld`
    #[error("Please provide a valid email address")]
    InvalidEmail,

    /// Name is shorter than [`MIN_NAME_LENGTH`] after trimming
    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    /// Message is shorter than [`MIN_MESSAGE_LENGTH`] after trimming
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

/// A submission that passed every rule, normalized for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    /// Trimmed name
    pub name: String,
    /// Trimmed, lower-cased email
    pub email: String,
    /// Trimmed message
    pub message: String,
}

/// Validate and normalize a contact payload
pub fn validate(request: ContactRequest) -> Result<ValidContact, ValidationError> {
    let (Some(name), Some(email), Some(message)) = (
        non_empty(request.name),
        non_empty(request.email),
        non_empty(request.message),
    ) else {
        return Err(ValidationError::MissingFields);
    };

    let email = email.trim();
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }

    let name = name.trim();
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort);
    }

    let message = message.trim();
    if message.chars().count() < MIN_MESSAGE_LENGTH {
        return Err(ValidationError::MessageTooShort);
    }

    Ok(ValidContact {
        name: name.to_string(),
        email: email.to_lowercase(),
        message: message.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
