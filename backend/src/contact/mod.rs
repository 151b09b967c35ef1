//! Contact module
//!
//! Contact-form submissions: wire payload, validation rules and the
//! persisted record.

pub mod models;
pub mod validation;

pub use models::{ContactRequest, ContactSubmission, RequestMetadata};
pub use validation::{validate, ValidContact, ValidationError};
