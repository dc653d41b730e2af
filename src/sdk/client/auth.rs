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

//! Azure AD credentials.
//!
//! Only the OAuth2 client-credentials grant is implemented; a pre-acquired
//! bearer token can be supplied with [`StaticTokenCredential`].

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

/// Tokens this close to expiry are refreshed.
const EXPIRY_MARGIN: Duration = Duration::minutes(5);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is required for client secret authentication")]
    MissingField(&'static str),

    #[error("building token endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("requesting token from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("token endpoint {url} returned {status}: {body}")]
    Rejected {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("decoding token response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_on: Option<OffsetDateTime>,
}

impl AccessToken {
    pub fn is_expired(&self) -> bool {
        self.expires_on
            .map_or(false, |expires_on| expires_on - EXPIRY_MARGIN <= OffsetDateTime::now_utc())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

#[async_trait]
pub trait TokenCredential: Send + Sync + fmt::Debug {
    /// Bearer token valid for `scope`, e.g. `https://management.azure.com/.default`
    async fn token(&self, scope: &str) -> Result<AccessToken, AuthError>;
}

/// A bearer token acquired out of band.
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenCredential").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn token(&self, _scope: &str) -> Result<AccessToken, AuthError> {
        Ok(AccessToken {
            token: self.token.clone(),
            expires_on: None,
        })
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Service principal authenticating with a client secret.
pub struct ClientSecretCredential {
    http: reqwest::Client,
    authority: Url,
    tenant_id: String,
    client_id: String,
    client_secret: String,
    cache: Mutex<HashMap<String, AccessToken>>,
}

impl ClientSecretCredential {
    pub fn new(
        http: reqwest::Client,
        authority: Url,
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let credential = Self {
            http,
            authority,
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cache: Default::default(),
        };
        if credential.tenant_id.is_empty() {
            return Err(AuthError::MissingField("tenant_id"));
        }
        if credential.client_id.is_empty() {
            return Err(AuthError::MissingField("client_id"));
        }
        if credential.client_secret.is_empty() {
            return Err(AuthError::MissingField("client_secret"));
        }
        Ok(credential)
    }

    fn token_url(&self) -> Result<Url, AuthError> {
        Ok(self
            .authority
            .join(&format!("{}/oauth2/v2.0/token", self.tenant_id))?)
    }

    async fn request_token(&self, scope: &str) -> Result<AccessToken, AuthError> {
        let url = self.token_url()?;
        debug!(url = %url, scope, "requesting access token");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope),
        ];
        let response = self
            .http
            .post(url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|source| AuthError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                url: url.to_string(),
                status,
                body,
            });
        }

        let decoded: TokenResponse =
            response.json().await.map_err(|source| AuthError::Decode {
                url: url.to_string(),
                source,
            })?;
        Ok(AccessToken {
            token: decoded.access_token,
            expires_on: decoded
                .expires_in
                .map(|secs| OffsetDateTime::now_utc() + Duration::seconds(secs)),
        })
    }
}

impl fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("authority", &self.authority.as_str())
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn token(&self, scope: &str) -> Result<AccessToken, AuthError> {
        let mut cache = self.cache.lock().await;
        if let Some(token) = cache.get(scope) {
            if !token.is_expired() {
                return Ok(token.clone());
            }
        }

        let token = self.request_token(scope).await?;
        cache.insert(scope.to_owned(), token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_honours_margin() {
        let fresh = AccessToken {
            token: "t".into(),
            expires_on: Some(OffsetDateTime::now_utc() + Duration::hours(1)),
        };
        let nearly = AccessToken {
            token: "t".into(),
            expires_on: Some(OffsetDateTime::now_utc() + Duration::minutes(2)),
        };
        let forever = AccessToken {
            token: "t".into(),
            expires_on: None,
        };
        assert!(!fresh.is_expired());
        assert!(nearly.is_expired());
        assert!(!forever.is_expired());
    }

    #[test]
    fn debug_redacts_secrets() {
        let token = AccessToken {
            token: "super-secret".into(),
            expires_on: None,
        };
        assert!(!format!("{token:?}").contains("super-secret"));

        let credential = ClientSecretCredential::new(
            reqwest::Client::new(),
            Url::parse("https://login.microsoftonline.com/").unwrap(),
            "tenant",
            "client",
            "hunter2",
        )
        .unwrap();
        assert!(!format!("{credential:?}").contains("hunter2"));
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = ClientSecretCredential::new(
            reqwest::Client::new(),
            Url::parse("https://login.microsoftonline.com/").unwrap(),
            "tenant",
            "",
            "secret",
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::MissingField("client_id")));
    }

    #[test]
    fn token_url_uses_tenant() {
        let credential = ClientSecretCredential::new(
            reqwest::Client::new(),
            Url::parse("https://login.microsoftonline.us/").unwrap(),
            "my-tenant",
            "client",
            "secret",
        )
        .unwrap();
        assert_eq!(
            credential.token_url().unwrap().as_str(),
            "https://login.microsoftonline.us/my-tenant/oauth2/v2.0/token"
        );
    }

    #[tokio::test]
    async fn static_token_never_expires() {
        let credential = StaticTokenCredential::new("abc");
        let token = credential.token("scope").await.unwrap();
        assert_eq!(token.token, "abc");
        assert!(!token.is_expired());
    }
}
