// This file is part of the terraform-provider-azurerm project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::auth::AuthError;

/// Error document returned by ARM: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArmError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub details: Vec<ArmError>,
}

impl ArmError {
    /// Extract the error document out of a response body, if any.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            error: ArmError,
        }

        serde_json::from_slice::<Envelope>(body)
            .map(|envelope| envelope.error)
            .ok()
    }
}

impl fmt::Display for ArmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        for detail in &self.details {
            write!(f, "\n  - {detail}")?;
        }
        Ok(())
    }
}

fn suffix(error: &Option<ArmError>) -> String {
    error
        .as_ref()
        .map(|error| format!(": {error}"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("parsing URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid header {name}: {message}")]
    InvalidHeader { name: String, message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("sending {method} {url}: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} for {method} {url}{}", suffix(.error))]
    UnexpectedStatus {
        method: Method,
        url: String,
        status: StatusCode,
        error: Option<ArmError>,
        body: Bytes,
    },

    #[error("decoding response of {method} {url}: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("long running operation ended with status {status:?}{}", suffix(.error))]
    LongRunningOperationFailed {
        status: String,
        error: Option<ArmError>,
    },

    #[error("polling the long running operation was cancelled")]
    Cancelled,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn was_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn was_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_envelope() {
        let body = br#"{"error": {"code": "ResourceNotFound", "message": "gone", "details": [{"code": "Inner", "message": "why"}]}}"#;
        let error = ArmError::from_body(body).unwrap();
        assert_eq!(error.code, "ResourceNotFound");
        assert_eq!(error.details.len(), 1);
        assert_eq!(error.to_string(), "ResourceNotFound: gone\n  - Inner: why");
    }

    #[test]
    fn ignores_non_arm_bodies() {
        assert_eq!(ArmError::from_body(b"<html></html>"), None);
        assert_eq!(ArmError::from_body(b""), None);
    }

    #[test]
    fn not_found_is_detected() {
        let err = ClientError::UnexpectedStatus {
            method: Method::GET,
            url: "https://management.azure.com/x".into(),
            status: StatusCode::NOT_FOUND,
            error: None,
            body: Bytes::new(),
        };
        assert!(err.was_not_found());
        assert!(!err.was_conflict());
        assert_eq!(
            err.to_string(),
            "unexpected status 404 Not Found for GET https://management.azure.com/x"
        );
    }
}
