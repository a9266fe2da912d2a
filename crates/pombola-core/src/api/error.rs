//! Failures of a PMG API page request.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest slice of a response body carried in an error
const BODY_EXCERPT_BYTES: usize = 500;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("PMG API unavailable ({status}): {body}")]
    Unavailable { status: u16, body: String },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let body = excerpt(body);
        match status.as_u16() {
            404 => ApiError::NotFound(body),
            code @ 500..=599 => ApiError::Unavailable { status: code, body },
            code => ApiError::UnexpectedStatus { status: code, body },
        }
    }
}

fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_BYTES {
        return body.to_string();
    }
    let end = (0..=BODY_EXCERPT_BYTES)
        .rev()
        .find(|&i| body.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... ({} bytes)", &body[..end], body.len())
}
