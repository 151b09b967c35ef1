//! Contact form API handler
//!
//! Validates a submission, persists it, and reports the generated id.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::contact::{validate, ContactRequest, ContactSubmission, RequestMetadata};
use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;

/// Shown after a submission is stored
pub const SUBMISSION_ACCEPTED_MESSAGE: &str = "Message sent successfully!";

/// Contact submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    /// Always true on this path
    pub success: bool,
    /// Human-readable confirmation
    pub message: String,
    /// Identifier of the stored record
    pub message_id: String,
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim().to_ascii_lowercase();
            essence == "application/json"
                || (essence.starts_with("application/") && essence.ends_with("+json"))
        })
        .unwrap_or(false)
}

/// Decode the request body into a contact payload
///
/// A body that is absent, empty or not declared as JSON carries no fields,
/// so it decodes to an empty payload and fails validation as missing fields.
/// Only a declared JSON body that does not parse is rejected outright.
pub fn read_contact_body(headers: &HeaderMap, body: &[u8]) -> Result<ContactRequest, AppError> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ContactRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Rejected malformed contact payload");
        AppError::InvalidBody(e.to_string())
    })
}

/// POST /api/contact - Store a contact-form submission
///
/// The write runs on its own task so a client disconnecting mid-request
/// does not abort a submission that already passed validation.
pub async fn submit_contact(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ContactResponse>, AppError> {
    let request = read_contact_body(&headers, &body)?;

    let contact = validate(request).map_err(|e| {
        info!(reason = %e, "Contact submission failed validation");
        e
    })?;

    let store = state.store.get().ok_or_else(|| {
        warn!("Contact submission received before the document store connected");
        AppError::StoreUnavailable
    })?;

    let metadata = RequestMetadata::from_request(&headers, peer.map(|ConnectInfo(addr)| addr));
    let submission = ContactSubmission::new(contact, metadata);
    let message_id = submission.id.to_hex();

    tokio::spawn(async move {
        store.insert(&submission).await?;
        info!(message_id = %submission.id.to_hex(), "Contact submission stored");
        Ok::<_, StoreError>(())
    })
    .await
    .map_err(|e| anyhow::Error::new(e).context("contact insert task failed"))??;

    Ok(Json(ContactResponse {
        success: true,
        message: SUBMISSION_ACCEPTED_MESSAGE.to_string(),
        message_id,
    }))
}
