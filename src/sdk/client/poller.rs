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

//! Long-running operations.
//!
//! The initial response of a PUT, PATCH, POST or DELETE tells how to follow
//! the operation: an `Azure-AsyncOperation` status document, a `Location`
//! answering 202 until done, or the `provisioningState` of the resource.

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use super::{ArmClient, ArmError, ClientError, Response};

const SUCCEEDED: &str = "Succeeded";
const FAILED: &str = "Failed";
const CANCELED: &[&str] = &["Canceled", "Cancelled"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStrategy {
    /// Nothing to wait for
    Done,
    AsyncOperation {
        status_url: Url,
        location: Option<Url>,
    },
    Location {
        url: Url,
    },
    ProvisioningState {
        url: Url,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OperationStatus {
    InProgress(String),
    Succeeded,
    Failed(String),
}

impl OperationStatus {
    fn parse(status: &str) -> Self {
        if status.eq_ignore_ascii_case(SUCCEEDED) {
            Self::Succeeded
        } else if status.eq_ignore_ascii_case(FAILED)
            || CANCELED.iter().any(|c| status.eq_ignore_ascii_case(c))
        {
            Self::Failed(status.to_owned())
        } else {
            Self::InProgress(status.to_owned())
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatusDocument {
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<ArmError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProvisioningProperties {
    #[serde(default)]
    provisioning_state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProvisioningDocument {
    #[serde(default)]
    properties: Option<ProvisioningProperties>,
}

fn provisioning_state(response: &Response) -> Option<String> {
    serde_json::from_slice::<ProvisioningDocument>(&response.body)
        .ok()
        .and_then(|doc| doc.properties)
        .and_then(|properties| properties.provisioning_state)
}

pub struct Poller<'c> {
    client: &'c ArmClient,
    method: Method,
    resource_url: Url,
    strategy: PollStrategy,
    last: Response,
}

impl<'c> Poller<'c> {
    /// Pick the polling strategy out of the initial response.
    pub fn new(client: &'c ArmClient, initial: Response) -> Result<Self, ClientError> {
        let strategy = if let Some(status_url) = initial.header("azure-asyncoperation") {
            PollStrategy::AsyncOperation {
                status_url: client.resolve(status_url)?,
                location: initial
                    .header("location")
                    .map(|location| client.resolve(location))
                    .transpose()?,
            }
        } else if let Some(location) = initial.header("location") {
            PollStrategy::Location {
                url: client.resolve(location)?,
            }
        } else if matches!(initial.method, Method::PUT | Method::PATCH)
            && matches!(initial.status, StatusCode::OK | StatusCode::CREATED)
            && provisioning_state(&initial)
                .map_or(false, |state| matches!(OperationStatus::parse(&state), OperationStatus::InProgress(_)))
        {
            PollStrategy::ProvisioningState {
                url: initial.url.clone(),
            }
        } else {
            PollStrategy::Done
        };

        debug!(method = %initial.method, url = %initial.url, ?strategy, "long running operation started");
        Ok(Self {
            client,
            method: initial.method.clone(),
            resource_url: initial.url.clone(),
            strategy,
            last: initial,
        })
    }

    pub fn strategy(&self) -> &PollStrategy {
        &self.strategy
    }

    pub fn is_done(&self) -> bool {
        self.strategy == PollStrategy::Done
    }

    /// Poll until a terminal state, returning the final response.
    ///
    /// A PUT or PATCH finishing without a body is followed by a GET of the
    /// resource, so the response always describes it.
    ///
    /// Waits for `Retry-After` between polls when the service sends it, the
    /// client's poll interval otherwise.
    pub async fn poll_until_done(&mut self, cancel: &CancellationToken) -> Result<Response, ClientError> {
        while !self.is_done() {
            let delay = self
                .last
                .retry_after()
                .unwrap_or_else(|| self.client.poll_interval());
            tokio::select! {
                _ = cancel.cancelled() => return Err(ClientError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
            self.poll_once().await?;
        }
        if matches!(self.method, Method::PUT | Method::PATCH) && !self.last.has_body() {
            debug!(url = %self.resource_url, "operation ended without a body, reading the resource");
            let resource = self.get(self.resource_url.clone()).await?;
            if !resource.status.is_success() {
                return Err(resource.into_error());
            }
            self.last = resource;
        }
        info!(method = %self.method, url = %self.resource_url, "long running operation completed");
        Ok(self.last.clone())
    }

    /// Poll without any way to cancel other than dropping the future.
    pub async fn wait(mut self) -> Result<Response, ClientError> {
        self.poll_until_done(&CancellationToken::new()).await
    }

    async fn get(&self, url: Url) -> Result<Response, ClientError> {
        self.client
            .new_request_from_url(Method::GET, url)
            .send()
            .await
    }

    async fn poll_once(&mut self) -> Result<(), ClientError> {
        match self.strategy.clone() {
            PollStrategy::Done => Ok(()),
            PollStrategy::AsyncOperation {
                status_url,
                location,
            } => {
                let response = self.get(status_url).await?;
                if !response.status.is_success() {
                    return Err(response.into_error());
                }
                let document: StatusDocument = response.json_opt()?.unwrap_or_default();
                debug!(status = %document.status, "polled operation status");
                match OperationStatus::parse(&document.status) {
                    OperationStatus::InProgress(_) => {
                        self.last = response;
                        Ok(())
                    }
                    OperationStatus::Failed(status) => Err(ClientError::LongRunningOperationFailed {
                        status,
                        error: document.error,
                    }),
                    OperationStatus::Succeeded => {
                        self.last = self.final_response(response, location).await?;
                        self.strategy = PollStrategy::Done;
                        Ok(())
                    }
                }
            }
            PollStrategy::Location { url } => {
                let response = self.get(url.clone()).await?;
                match response.status {
                    StatusCode::ACCEPTED => {
                        if let Some(next) = response.header("location") {
                            let next = self.client.resolve(next)?;
                            self.strategy = PollStrategy::Location { url: next };
                        }
                        self.last = response;
                        Ok(())
                    }
                    StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => {
                        self.last = response;
                        self.strategy = PollStrategy::Done;
                        Ok(())
                    }
                    StatusCode::NOT_FOUND if self.method == Method::DELETE => {
                        self.last = response;
                        self.strategy = PollStrategy::Done;
                        Ok(())
                    }
                    _ => Err(response.into_error()),
                }
            }
            PollStrategy::ProvisioningState { url } => {
                let response = self.get(url).await?;
                if !response.status.is_success() {
                    return Err(response.into_error());
                }
                let state = provisioning_state(&response).unwrap_or_else(|| SUCCEEDED.to_owned());
                debug!(provisioning_state = %state, "polled provisioning state");
                match OperationStatus::parse(&state) {
                    OperationStatus::InProgress(_) => {
                        self.last = response;
                        Ok(())
                    }
                    OperationStatus::Failed(status) => Err(ClientError::LongRunningOperationFailed {
                        status,
                        error: None,
                    }),
                    OperationStatus::Succeeded => {
                        self.last = response;
                        self.strategy = PollStrategy::Done;
                        Ok(())
                    }
                }
            }
        }
    }

    /// Response carrying the result once the status document said done.
    async fn final_response(&self, status: Response, location: Option<Url>) -> Result<Response, ClientError> {
        let url = match self.method {
            Method::PUT | Method::PATCH => Some(self.resource_url.clone()),
            Method::POST => location,
            _ => None,
        };
        let Some(url) = url else {
            return Ok(status);
        };
        let response = self.get(url).await?;
        if response.status.is_success() {
            Ok(response)
        } else {
            Err(response.into_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use reqwest::header::{HeaderMap, HeaderValue};

    use super::*;
    use crate::sdk::client::StaticTokenCredential;

    fn client() -> ArmClient {
        ArmClient::builder(Arc::new(StaticTokenCredential::new("token")))
            .build()
            .unwrap()
    }

    fn response(method: Method, status: StatusCode, headers: &[(&'static str, &'static str)], body: &'static str) -> Response {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(*name, HeaderValue::from_static(value));
        }
        Response {
            method,
            url: Url::parse("https://management.azure.com/subscriptions/s/resourceGroups/rg?api-version=1").unwrap(),
            status,
            headers: map,
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn async_operation_header_wins() {
        let client = client();
        let poller = Poller::new(
            &client,
            response(
                Method::DELETE,
                StatusCode::ACCEPTED,
                &[
                    ("azure-asyncoperation", "https://management.azure.com/ops/1"),
                    ("location", "/results/1"),
                ],
                "",
            ),
        )
        .unwrap();
        assert_eq!(
            poller.strategy(),
            &PollStrategy::AsyncOperation {
                status_url: Url::parse("https://management.azure.com/ops/1").unwrap(),
                location: Some(Url::parse("https://management.azure.com/results/1").unwrap()),
            }
        );
    }

    #[test]
    fn location_header() {
        let client = client();
        let poller = Poller::new(
            &client,
            response(Method::POST, StatusCode::ACCEPTED, &[("location", "https://management.azure.com/loc")], ""),
        )
        .unwrap();
        assert!(matches!(poller.strategy(), PollStrategy::Location { .. }));
    }

    #[test]
    fn provisioning_state_in_progress() {
        let client = client();
        let poller = Poller::new(
            &client,
            response(Method::PUT, StatusCode::CREATED, &[], r#"{"properties": {"provisioningState": "Updating"}}"#),
        )
        .unwrap();
        assert!(matches!(poller.strategy(), PollStrategy::ProvisioningState { .. }));

        let poller = Poller::new(
            &client,
            response(Method::PUT, StatusCode::OK, &[], r#"{"properties": {"provisioningState": "succeeded"}}"#),
        )
        .unwrap();
        assert!(poller.is_done());
    }

    #[tokio::test]
    async fn done_returns_initial_response() {
        let client = client();
        let poller = Poller::new(&client, response(Method::DELETE, StatusCode::NO_CONTENT, &[], "")).unwrap();
        let last = poller.wait().await.unwrap();
        assert_eq!(last.status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn operation_status_is_case_insensitive() {
        assert_eq!(OperationStatus::parse("SUCCEEDED"), OperationStatus::Succeeded);
        assert_eq!(OperationStatus::parse("canceled"), OperationStatus::Failed("canceled".into()));
        assert_eq!(
            OperationStatus::parse("InProgress"),
            OperationStatus::InProgress("InProgress".into())
        );
    }
}
