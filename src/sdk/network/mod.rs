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

//! Load balancers, API version 2023-09-01.

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use super::client::{ArmClient, ClientError, OperationOptions, Pager, Poller};
use super::common::TagsObject;
use super::resourceids::{ResourceGroupId, ResourceId, SubscriptionId};

mod constants;
mod ids;
mod models;

pub use constants::*;
pub use ids::LoadBalancerId;
pub use models::*;

pub const API_VERSION: &str = "2023-09-01";

#[derive(Debug, Clone, Default)]
pub struct GetOperationOptions {
    /// Child resources to expand in the response
    pub expand: Option<String>,
}

impl OperationOptions for GetOperationOptions {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        self.expand
            .iter()
            .map(|expand| ("$expand", expand.clone()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct LoadBalancersClient {
    client: ArmClient,
}

impl LoadBalancersClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(
        &self,
        id: &LoadBalancerId,
        options: &GetOperationOptions,
    ) -> Result<LoadBalancer, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .with_options(options)?
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn create_or_update(
        &self,
        id: &LoadBalancerId,
        input: &LoadBalancer,
    ) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::CREATED])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn create_or_update_then_poll(
        &self,
        id: &LoadBalancerId,
        input: &LoadBalancer,
        cancel: &CancellationToken,
    ) -> Result<LoadBalancer, ClientError> {
        self.create_or_update(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json()
    }

    pub async fn update_tags(
        &self,
        id: &LoadBalancerId,
        input: &TagsObject,
    ) -> Result<LoadBalancer, ClientError> {
        self.client
            .new_request(Method::PATCH, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn delete(&self, id: &LoadBalancerId) -> Result<Poller<'_>, ClientError> {
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
        id: &LoadBalancerId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        self.delete(id).await?.poll_until_done(cancel).await?;
        Ok(())
    }

    /// Load balancers of a resource group.
    pub fn list(&self, id: &ResourceGroupId) -> Result<Pager<'_, LoadBalancer>, ClientError> {
        Pager::for_path(
            &self.client,
            &format!("{}/providers/Microsoft.Network/loadBalancers", id.id()),
            API_VERSION,
            &(),
        )
    }

    pub async fn list_complete(&self, id: &ResourceGroupId) -> Result<Vec<LoadBalancer>, ClientError> {
        self.list(id)?.collect_all().await
    }

    pub async fn list_complete_matching(
        &self,
        id: &ResourceGroupId,
        predicate: impl Fn(&LoadBalancer) -> bool,
    ) -> Result<Vec<LoadBalancer>, ClientError> {
        self.list(id)?.collect_matching(predicate).await
    }

    /// Load balancers of the whole subscription.
    pub fn list_all(&self, id: &SubscriptionId) -> Result<Pager<'_, LoadBalancer>, ClientError> {
        Pager::for_path(
            &self.client,
            &format!("{}/providers/Microsoft.Network/loadBalancers", id.id()),
            API_VERSION,
            &(),
        )
    }

    pub async fn list_all_complete(&self, id: &SubscriptionId) -> Result<Vec<LoadBalancer>, ClientError> {
        self.list_all(id)?.collect_all().await
    }

    pub async fn list_all_complete_matching(
        &self,
        id: &SubscriptionId,
        predicate: impl Fn(&LoadBalancer) -> bool,
    ) -> Result<Vec<LoadBalancer>, ClientError> {
        self.list_all(id)?.collect_matching(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_fields_keep_their_casing() {
        let frontend = FrontendIpConfiguration {
            name: Some("fe".into()),
            properties: Some(FrontendIpConfigurationProperties {
                private_ip_address: Some("10.0.0.4".into()),
                private_ip_allocation_method: Some(IpAllocationMethod::STATIC),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&frontend).unwrap(),
            serde_json::json!({
                "name": "fe",
                "properties": {"privateIPAddress": "10.0.0.4", "privateIPAllocationMethod": "Static"}
            })
        );
    }

    #[test]
    fn unknown_sku_passes_through() {
        let sku: LoadBalancerSku = serde_json::from_str(r#"{"name": "Premium", "tier": "regional"}"#).unwrap();
        assert_eq!(sku.name.unwrap().as_str(), "Premium");
        assert_eq!(sku.tier, Some(LoadBalancerSkuTier::REGIONAL));
    }
}
