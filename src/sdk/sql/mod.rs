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

//! SQL failover groups, API version 2023-02-01-preview.
//!
//! Every mutating operation is long running.

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use super::client::{ArmClient, ClientError, Pager, Poller};
use super::resourceids::ResourceId;

mod ids;
mod models;

pub use ids::{FailoverGroupId, ServerId};
pub use models::*;

pub const API_VERSION: &str = "2023-02-01-preview";

#[derive(Debug, Clone)]
pub struct FailoverGroupsClient {
    client: ArmClient,
}

impl FailoverGroupsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &FailoverGroupId) -> Result<FailoverGroup, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn create_or_update(
        &self,
        id: &FailoverGroupId,
        input: &FailoverGroup,
    ) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::CREATED, StatusCode::ACCEPTED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn create_or_update_then_poll(
        &self,
        id: &FailoverGroupId,
        input: &FailoverGroup,
        cancel: &CancellationToken,
    ) -> Result<FailoverGroup, ClientError> {
        self.create_or_update(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json()
    }

    pub async fn update(
        &self,
        id: &FailoverGroupId,
        input: &FailoverGroupUpdate,
    ) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::PATCH, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn update_then_poll(
        &self,
        id: &FailoverGroupId,
        input: &FailoverGroupUpdate,
        cancel: &CancellationToken,
    ) -> Result<FailoverGroup, ClientError> {
        self.update(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json()
    }

    pub async fn delete(&self, id: &FailoverGroupId) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::DELETE, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn delete_then_poll(
        &self,
        id: &FailoverGroupId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        self.delete(id).await?.poll_until_done(cancel).await?;
        Ok(())
    }

    /// Planned failover to the secondary server this request is sent to.
    pub async fn failover(&self, id: &FailoverGroupId) -> Result<Poller<'_>, ClientError> {
        self.action(id, "failover").await
    }

    pub async fn failover_then_poll(
        &self,
        id: &FailoverGroupId,
        cancel: &CancellationToken,
    ) -> Result<Option<FailoverGroup>, ClientError> {
        self.failover(id).await?.poll_until_done(cancel).await?.json_opt()
    }

    /// Forced failover; may lose data not yet replicated.
    pub async fn force_failover_allow_data_loss(
        &self,
        id: &FailoverGroupId,
    ) -> Result<Poller<'_>, ClientError> {
        self.action(id, "forceFailoverAllowDataLoss").await
    }

    pub async fn force_failover_allow_data_loss_then_poll(
        &self,
        id: &FailoverGroupId,
        cancel: &CancellationToken,
    ) -> Result<Option<FailoverGroup>, ClientError> {
        self.force_failover_allow_data_loss(id)
            .await?
            .poll_until_done(cancel)
            .await?
            .json_opt()
    }

    pub async fn try_planned_before_forced_failover(
        &self,
        id: &FailoverGroupId,
    ) -> Result<Poller<'_>, ClientError> {
        self.action(id, "tryPlannedBeforeForcedFailover").await
    }

    pub async fn try_planned_before_forced_failover_then_poll(
        &self,
        id: &FailoverGroupId,
        cancel: &CancellationToken,
    ) -> Result<Option<FailoverGroup>, ClientError> {
        self.try_planned_before_forced_failover(id)
            .await?
            .poll_until_done(cancel)
            .await?
            .json_opt()
    }

    async fn action(&self, id: &FailoverGroupId, action: &str) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::POST, &format!("{}/{action}", id.id()), API_VERSION)
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub fn list_by_server(&self, id: &ServerId) -> Result<Pager<'_, FailoverGroup>, ClientError> {
        Pager::for_path(
            &self.client,
            &format!("{}/failoverGroups", id.id()),
            API_VERSION,
            &(),
        )
    }

    pub async fn list_by_server_complete(
        &self,
        id: &ServerId,
    ) -> Result<Vec<FailoverGroup>, ClientError> {
        self.list_by_server(id)?.collect_all().await
    }

    pub async fn list_by_server_complete_matching(
        &self,
        id: &ServerId,
        predicate: impl Fn(&FailoverGroup) -> bool,
    ) -> Result<Vec<FailoverGroup>, ClientError> {
        self.list_by_server(id)?.collect_matching(predicate).await
    }
}
