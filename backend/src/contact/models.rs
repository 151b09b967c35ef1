//! Contact data models
//!
//! Defines the inbound payload, request metadata and the stored document.

use std::net::SocketAddr;

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

use crate::contact::validation::ValidContact;

const UNKNOWN: &str = "unknown";

/// Contact form payload as received on the wire
///
/// Every field is optional here; absence is reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    /// Sender name
    #[serde(default)]
    pub name: Option<String>,
    /// Sender email address
    #[serde(default)]
    pub email: Option<String>,
    /// Message body
    #[serde(default)]
    pub message: Option<String>,
}

/// Advisory metadata captured from the inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMetadata {
    /// Client address (first forwarded hop if behind a proxy)
    pub ip_address: String,
    /// Client user agent
    pub user_agent: String,
}

impl RequestMetadata {
    /// Extract metadata from request headers and the peer address
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        let ip_address = forwarded
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            ip_address,
            user_agent,
        }
    }
}

/// A persisted contact-form entry
///
/// Created exactly once per accepted submission and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Store-level identifier
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Trimmed sender name
    pub name: String,
    /// Trimmed, lower-cased email
    pub email: String,
    /// Trimmed message body
    pub message: String,
    /// Server-side creation time
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
    /// Advisory client address
    pub ip_address: String,
    /// Advisory client user agent
    pub user_agent: String,
}

impl ContactSubmission {
    /// Create a new submission with a fresh identifier and timestamp
    pub fn new(contact: ValidContact, metadata: RequestMetadata) -> Self {
        Self {
            id: ObjectId::new(),
            name: contact.name,
            email: contact.email,
            message: contact.message,
            timestamp: Utc::now(),
            ip_address: metadata.ip_address,
            user_agent: metadata.user_agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_metadata_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));

        let peer: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let metadata = RequestMetadata::from_request(&headers, Some(peer));

        assert_eq!(metadata.ip_address, "203.0.113.7");
        assert_eq!(metadata.user_agent, "curl/8.0");
    }

    #[test]
    fn test_metadata_falls_back_to_peer_then_unknown() {
        let headers = HeaderMap::new();
        let peer: SocketAddr = "192.0.2.10:5555".parse().unwrap();

        let with_peer = RequestMetadata::from_request(&headers, Some(peer));
        assert_eq!(with_peer.ip_address, "192.0.2.10");
        assert_eq!(with_peer.user_agent, "unknown");

        let without_peer = RequestMetadata::from_request(&headers, None);
        assert_eq!(without_peer.ip_address, "unknown");
    }

    #[test]
    fn test_submission_serializes_camel_case() {
        let submission = ContactSubmission::new(
            ValidContact {
                name: "Jane".to_string(),
                email: "jane@x.com".to_string(),
                message: "Hello there!".to_string(),
            },
            RequestMetadata {
                ip_address: "::1".to_string(),
                user_agent: "test".to_string(),
            },
        );

        let document = mongodb::bson::to_document(&submission).unwrap();
        assert!(document.contains_key("_id"));
        assert!(document.contains_key("ipAddress"));
        assert!(document.contains_key("userAgent"));
        assert!(document.get_datetime("timestamp").is_ok());
    }
}
