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

//! Shared HTTP plumbing of the service clients.
//!
//! [`ArmClient`] injects the bearer token, the `api-version` query parameter
//! and the user agent, retries transient failures and turns unexpected
//! status codes into [`ClientError::UnexpectedStatus`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace, warn};
use url::Url;

pub mod auth;
mod error;
mod pager;
mod poller;

pub use auth::{AccessToken, AuthError, ClientSecretCredential, StaticTokenCredential, TokenCredential};
pub use error::{ArmError, ClientError};
pub use pager::{Page, Pager};
pub use poller::{PollStrategy, Poller};

pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com/";
pub const DEFAULT_SCOPE: &str = "https://management.azure.com/.default";
pub const DEFAULT_USER_AGENT: &str = concat!("terraform-provider-azurerm/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Query parameters and headers attached to a single operation.
pub trait OperationOptions {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
    fn to_headers(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl OperationOptions for () {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn should_retry(&self, status: StatusCode) -> bool {
        matches!(status.as_u16(), 408 | 429 | 500 | 502 | 503 | 504)
    }

    /// Delay before retry number `attempt` (starting at 0).
    ///
    /// The server's `Retry-After` wins over the exponential backoff.
    pub fn delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let delay = match retry_after {
            Some(delay) => delay,
            None => {
                let backoff = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
                let jitter_ms = self.base_delay.as_millis() as u64 / 2;
                let jitter = if jitter_ms > 0 {
                    Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
                } else {
                    Duration::ZERO
                };
                backoff + jitter
            }
        };
        delay.min(self.max_delay)
    }
}

/// Client for the Azure Resource Manager endpoint.
#[derive(Clone)]
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: Url,
    scope: String,
    credential: Arc<dyn TokenCredential>,
    retry: RetryPolicy,
    poll_interval: Duration,
    user_agent: String,
}

impl fmt::Debug for ArmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArmClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("scope", &self.scope)
            .field("credential", &self.credential)
            .field("retry", &self.retry)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl ArmClient {
    pub fn builder(credential: Arc<dyn TokenCredential>) -> ArmClientBuilder {
        ArmClientBuilder {
            http: None,
            endpoint: None,
            scope: DEFAULT_SCOPE.to_owned(),
            credential,
            retry: Default::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Request to `path` (a resource ID, possibly followed by an action)
    /// with the given `api-version`.
    pub fn new_request(&self, method: Method, path: &str, api_version: &str) -> Request<'_> {
        let mut url = self.endpoint.clone();
        url.set_path(path);
        url.query_pairs_mut().append_pair("api-version", api_version);
        self.new_request_from_url(method, url)
    }

    /// Request to an absolute URL handed out by the service (`nextLink`,
    /// `Location`, `Azure-AsyncOperation`).
    pub fn new_request_from_url(&self, method: Method, url: Url) -> Request<'_> {
        Request {
            client: self,
            method,
            url,
            expected: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Resolve a link returned by the service against the endpoint.
    pub fn resolve(&self, link: &str) -> Result<Url, ClientError> {
        Ok(self.endpoint.join(link)?)
    }
}

pub struct ArmClientBuilder {
    http: Option<reqwest::Client>,
    endpoint: Option<Url>,
    scope: String,
    credential: Arc<dyn TokenCredential>,
    retry: RetryPolicy,
    poll_interval: Duration,
    user_agent: String,
}

impl ArmClientBuilder {
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ArmClient, ClientError> {
        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => Url::parse(DEFAULT_ENDPOINT)?,
        };
        Ok(ArmClient {
            http: self.http.unwrap_or_default(),
            endpoint,
            scope: self.scope,
            credential: self.credential,
            retry: self.retry,
            poll_interval: self.poll_interval,
            user_agent: self.user_agent,
        })
    }
}

pub struct Request<'c> {
    client: &'c ArmClient,
    method: Method,
    url: Url,
    expected: Vec<StatusCode>,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl<'c> Request<'c> {
    /// Accepted status codes; any 2xx when left empty.
    pub fn expect(mut self, statuses: &[StatusCode]) -> Self {
        self.expected = statuses.to_vec();
        self
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, ClientError> {
        let invalid = |message: String| ClientError::InvalidHeader {
            name: name.to_owned(),
            message,
        };
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| invalid(err.to_string()))?;
        let header_value = HeaderValue::from_str(value).map_err(|err| invalid(err.to_string()))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_options(mut self, options: &impl OperationOptions) -> Result<Self, ClientError> {
        for (name, value) in options.to_query() {
            self = self.query(name, &value);
        }
        for (name, value) in options.to_headers() {
            self = self.header(name, &value)?;
        }
        Ok(self)
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ClientError> {
        let encoded = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        self.body = Some(Bytes::from(encoded));
        Ok(self)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send the request and check the status against the expected ones.
    pub async fn execute(mut self) -> Result<Response, ClientError> {
        let expected = std::mem::take(&mut self.expected);
        let response = self.send().await?;
        let accepted = if expected.is_empty() {
            response.status.is_success()
        } else {
            expected.contains(&response.status)
        };
        if accepted {
            Ok(response)
        } else {
            Err(response.into_error())
        }
    }

    /// Send the request, retrying transient failures, whatever the final
    /// status code.
    pub async fn send(self) -> Result<Response, ClientError> {
        let client = self.client;
        let retry = &client.retry;
        let mut attempt = 0;
        loop {
            let token = client.credential.token(&client.scope).await?;
            let mut builder = client
                .http
                .request(self.method.clone(), self.url.clone())
                .bearer_auth(&token.token)
                .header(USER_AGENT, client.user_agent.as_str())
                .header(ACCEPT, "application/json")
                .headers(self.headers.clone());
            if let Some(body) = &self.body {
                builder = builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            debug!(method = %self.method, url = %self.url, attempt, "sending request");
            let response = match builder.send().await {
                Ok(response) => Response::read(self.method.clone(), self.url.clone(), response).await?,
                Err(source) if attempt < retry.max_retries && (source.is_connect() || source.is_timeout()) => {
                    let delay = retry.delay(attempt, None);
                    warn!(method = %self.method, url = %self.url, error = %source, ?delay, "transport error, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                Err(source) => {
                    return Err(ClientError::Transport {
                        method: self.method,
                        url: self.url.to_string(),
                        source,
                    })
                }
            };

            if retry.should_retry(response.status) && attempt < retry.max_retries {
                let delay = retry.delay(attempt, response.retry_after());
                warn!(
                    method = %self.method,
                    url = %self.url,
                    status = %response.status,
                    ?delay,
                    "transient status, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            trace!(method = %self.method, url = %self.url, status = %response.status, "received response");
            return Ok(response);
        }
    }
}

/// Fully read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    async fn read(method: Method, url: Url, response: reqwest::Response) -> Result<Self, ClientError> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                method: method.clone(),
                url: url.to_string(),
                source,
            })?;
        Ok(Self {
            method,
            url,
            status,
            headers,
            body,
        })
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body).map_err(|source| ClientError::Decode {
            method: self.method.clone(),
            url: self.url.to_string(),
            source,
        })
    }

    pub fn has_body(&self) -> bool {
        !self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Decode the body, `None` when the service returned nothing.
    pub fn json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, ClientError> {
        if !self.has_body() {
            Ok(None)
        } else {
            self.json().map(Some)
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
    }

    /// `Retry-After` expressed in seconds.
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    pub fn into_error(self) -> ClientError {
        ClientError::UnexpectedStatus {
            error: ArmError::from_body(&self.body),
            method: self.method,
            url: self.url.to_string(),
            status: self.status,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ArmClient {
        ArmClient::builder(Arc::new(StaticTokenCredential::new("token")))
            .build()
            .unwrap()
    }

    #[test]
    fn request_url_carries_api_version() {
        let client = client();
        let request = client.new_request(
            Method::GET,
            "/subscriptions/sub1/resourceGroups/rg1",
            "2023-01-31",
        );
        assert_eq!(
            request.url().as_str(),
            "https://management.azure.com/subscriptions/sub1/resourceGroups/rg1?api-version=2023-01-31"
        );
    }

    #[test]
    fn options_are_applied() {
        struct Expand;
        impl OperationOptions for Expand {
            fn to_query(&self) -> Vec<(&'static str, String)> {
                vec![("$expand", "frontendIPConfigurations".into())]
            }
            fn to_headers(&self) -> Vec<(&'static str, String)> {
                vec![("If-Match", "*".into())]
            }
        }

        let client = client();
        let request = client
            .new_request(Method::GET, "/x", "v1")
            .with_options(&Expand)
            .unwrap();
        assert!(request
            .url()
            .as_str()
            .ends_with("?api-version=v1&%24expand=frontendIPConfigurations"));
        assert_eq!(request.headers.get("if-match").unwrap(), "*");
    }

    #[test]
    fn invalid_header_values_are_rejected() {
        let client = client();
        let err = client
            .new_request(Method::GET, "/x", "v1")
            .header("If-Match", "bad\nvalue")
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::InvalidHeader { .. }));
    }

    #[test]
    fn retry_policy_statuses() {
        let policy = RetryPolicy::default();
        for status in [408, 429, 500, 502, 503, 504] {
            assert!(policy.should_retry(StatusCode::from_u16(status).unwrap()));
        }
        for status in [200, 400, 401, 404, 409, 501] {
            assert!(!policy.should_retry(StatusCode::from_u16(status).unwrap()));
        }
    }

    #[test]
    fn retry_delay_grows_and_is_capped() {
        let policy = RetryPolicy {
            max_retries: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
        };
        let first = policy.delay(0, None);
        assert!(first >= Duration::from_millis(100) && first <= Duration::from_millis(150));
        let second = policy.delay(1, None);
        assert!(second >= Duration::from_millis(200) && second <= Duration::from_millis(250));
        assert_eq!(policy.delay(4, None), Duration::from_millis(350));
        assert_eq!(
            policy.delay(0, Some(Duration::from_millis(10))),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn response_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("7"));
        let response = Response {
            method: Method::GET,
            url: Url::parse("https://management.azure.com/x").unwrap(),
            status: StatusCode::TOO_MANY_REQUESTS,
            headers,
            body: Bytes::from_static(b"  "),
        };
        assert_eq!(response.retry_after(), Some(Duration::from_secs(7)));
        assert_eq!(response.json_opt::<serde_json::Value>().unwrap(), None);
        assert_eq!(response.into_error().status(), Some(StatusCode::TOO_MANY_REQUESTS));
    }
}
