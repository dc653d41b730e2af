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

//! Container Registry task runs, API version 2019-06-01-preview.

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use super::client::{ArmClient, ClientError, OperationOptions, Pager, Poller};
use super::resourceids::ResourceId;

mod constants;
mod ids;
mod models;

pub use constants::*;
pub use ids::{RegistryId, RunId};
pub use models::*;

pub const API_VERSION: &str = "2019-06-01-preview";

#[derive(Debug, Clone, Default)]
pub struct ListOperationOptions {
    /// OData filter, e.g. `TaskName eq 'build'`
    pub filter: Option<String>,
    pub top: Option<i64>,
}

impl OperationOptions for ListOperationOptions {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(filter) = &self.filter {
            query.push(("$filter", filter.clone()));
        }
        if let Some(top) = self.top {
            query.push(("$top", top.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone)]
pub struct RunsClient {
    client: ArmClient,
}

impl RunsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// Queue a new run on the registry.
    pub async fn schedule_run(
        &self,
        id: &RegistryId,
        input: &RunRequest,
    ) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::POST, &format!("{}/scheduleRun", id.id()), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn schedule_run_then_poll(
        &self,
        id: &RegistryId,
        input: &RunRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<Run>, ClientError> {
        self.schedule_run(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json_opt()
    }

    pub async fn get(&self, id: &RunId) -> Result<Run, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn update(&self, id: &RunId, input: &RunUpdateParameters) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::PATCH, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::CREATED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn update_then_poll(
        &self,
        id: &RunId,
        input: &RunUpdateParameters,
        cancel: &CancellationToken,
    ) -> Result<Run, ClientError> {
        self.update(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json()
    }

    pub async fn cancel(&self, id: &RunId) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::POST, &format!("{}/cancel", id.id()), API_VERSION)
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn cancel_then_poll(&self, id: &RunId, cancel: &CancellationToken) -> Result<(), ClientError> {
        self.cancel(id).await?.poll_until_done(cancel).await?;
        Ok(())
    }

    /// Link to the log of a run.
    pub async fn get_log_sas_url(&self, id: &RunId) -> Result<RunGetLogResult, ClientError> {
        self.client
            .new_request(Method::POST, &format!("{}/listLogSasUrl", id.id()), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub fn list(
        &self,
        id: &RegistryId,
        options: &ListOperationOptions,
    ) -> Result<Pager<'_, Run>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/runs", id.id()), API_VERSION, options)
    }

    pub async fn list_complete(
        &self,
        id: &RegistryId,
        options: &ListOperationOptions,
    ) -> Result<Vec<Run>, ClientError> {
        self.list(id, options)?.collect_all().await
    }

    pub async fn list_complete_matching(
        &self,
        id: &RegistryId,
        options: &ListOperationOptions,
        predicate: impl Fn(&Run) -> bool,
    ) -> Result<Vec<Run>, ClientError> {
        self.list(id, options)?.collect_matching(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn run_request_round_trips_concrete_variants() {
        let request = RunRequest::from(DockerBuildRequest {
            docker_file_path: "Dockerfile".into(),
            platform: PlatformProperties {
                os: Os::LINUX,
                architecture: Some(Architecture::AMD64),
                variant: None,
            },
            image_names: Some(vec!["app:{{.Run.ID}}".into()]),
            is_push_enabled: Some(true),
            no_cache: None,
            target: None,
            arguments: None,
            timeout: Some(3600),
            agent_configuration: None,
            source_location: Some("https://github.com/example/app.git".into()),
            is_archive_enabled: None,
            agent_pool_name: None,
            log_template: None,
        });
        let encoded = serde_json::to_vec(&request).unwrap();
        let decoded = RunRequest::from_slice(&encoded).unwrap();
        assert_eq!(decoded, request);
        assert_eq!(decoded.discriminator(), "DockerBuildRequest");
    }

    #[test]
    fn run_request_keeps_unknown_kinds() {
        let input = json!({"type": "RemoteBuildRequest", "agentPoolName": "pool", "extra": {"k": 1}});
        let decoded = RunRequest::from_slice(input.to_string().as_bytes()).unwrap();
        match &decoded {
            RunRequest::Raw(raw) => {
                assert_eq!(raw.base.kind, "RemoteBuildRequest");
                assert_eq!(raw.base.agent_pool_name.as_deref(), Some("pool"));
            }
            other => panic!("expected raw variant, got {other:?}"),
        }
        assert_eq!(serde_json::to_value(&decoded).unwrap(), input);
    }

    #[test]
    fn list_options() {
        let options = ListOperationOptions {
            filter: Some("TaskName eq 'build'".into()),
            top: Some(10),
        };
        assert_eq!(
            options.to_query(),
            vec![
                ("$filter", "TaskName eq 'build'".to_owned()),
                ("$top", "10".to_owned())
            ]
        );
    }
}
