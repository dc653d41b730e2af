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

//! Azure Digital Twins instances, API version 2023-01-31.

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use super::client::{ArmClient, ClientError, Pager, Poller};
use super::resourceids::{ResourceGroupId, ResourceId, SubscriptionId};

mod ids;
mod models;

pub use ids::DigitalTwinsInstanceId;
pub use models::*;

pub const API_VERSION: &str = "2023-01-31";

const INSTANCES: &str = "providers/Microsoft.DigitalTwins/digitalTwinsInstances";

#[derive(Debug, Clone)]
pub struct DigitalTwinsClient {
    client: ArmClient,
}

impl DigitalTwinsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &DigitalTwinsInstanceId) -> Result<DigitalTwinsDescription, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn create_or_update(
        &self,
        id: &DigitalTwinsInstanceId,
        input: &DigitalTwinsDescription,
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
        id: &DigitalTwinsInstanceId,
        input: &DigitalTwinsDescription,
        cancel: &CancellationToken,
    ) -> Result<DigitalTwinsDescription, ClientError> {
        self.create_or_update(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json()
    }

    pub async fn update(
        &self,
        id: &DigitalTwinsInstanceId,
        input: &DigitalTwinsPatchDescription,
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
        id: &DigitalTwinsInstanceId,
        input: &DigitalTwinsPatchDescription,
        cancel: &CancellationToken,
    ) -> Result<DigitalTwinsDescription, ClientError> {
        self.update(id, input)
            .await?
            .poll_until_done(cancel)
            .await?
            .json()
    }

    pub async fn delete(&self, id: &DigitalTwinsInstanceId) -> Result<Poller<'_>, ClientError> {
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
        id: &DigitalTwinsInstanceId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        self.delete(id).await?.poll_until_done(cancel).await?;
        Ok(())
    }

    pub fn list_by_resource_group(
        &self,
        id: &ResourceGroupId,
    ) -> Result<Pager<'_, DigitalTwinsDescription>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/{INSTANCES}", id.id()), API_VERSION, &())
    }

    pub async fn list_by_resource_group_complete(
        &self,
        id: &ResourceGroupId,
    ) -> Result<Vec<DigitalTwinsDescription>, ClientError> {
        self.list_by_resource_group(id)?.collect_all().await
    }

    pub async fn list_by_resource_group_complete_matching(
        &self,
        id: &ResourceGroupId,
        predicate: impl Fn(&DigitalTwinsDescription) -> bool,
    ) -> Result<Vec<DigitalTwinsDescription>, ClientError> {
        self.list_by_resource_group(id)?.collect_matching(predicate).await
    }

    pub fn list(&self, id: &SubscriptionId) -> Result<Pager<'_, DigitalTwinsDescription>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/{INSTANCES}", id.id()), API_VERSION, &())
    }

    pub async fn list_complete(
        &self,
        id: &SubscriptionId,
    ) -> Result<Vec<DigitalTwinsDescription>, ClientError> {
        self.list(id)?.collect_all().await
    }

    pub async fn list_complete_matching(
        &self,
        id: &SubscriptionId,
        predicate: impl Fn(&DigitalTwinsDescription) -> bool,
    ) -> Result<Vec<DigitalTwinsDescription>, ClientError> {
        self.list(id)?.collect_matching(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;
    use crate::sdk::common::IdentityType;

    #[test]
    fn description_decodes_timestamps_and_identity() {
        let description: DigitalTwinsDescription = serde_json::from_value(json!({
            "id": "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DigitalTwins/digitalTwinsInstances/dt1",
            "name": "dt1",
            "location": "westeurope",
            "identity": {"type": "SystemAssigned", "principalId": "p1", "tenantId": "t1"},
            "properties": {
                "hostName": "dt1.api.weu.digitaltwins.azure.net",
                "provisioningState": "succeeded",
                "publicNetworkAccess": "Enabled",
                "createdTime": "2024-03-01T10:15:00Z"
            }
        }))
        .unwrap();
        let properties = description.properties.unwrap();
        assert_eq!(properties.provisioning_state, Some(ProvisioningState::SUCCEEDED));
        assert_eq!(properties.created_time, Some(datetime!(2024-03-01 10:15:00 UTC)));
        assert_eq!(properties.last_updated_time, None);
        assert_eq!(
            description.identity.unwrap().kind,
            Some(IdentityType::SYSTEM_ASSIGNED)
        );
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = DigitalTwinsPatchDescription {
            properties: Some(DigitalTwinsPatchProperties {
                public_network_access: Some(PublicNetworkAccess::DISABLED),
            }),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"properties": {"publicNetworkAccess": "Disabled"}})
        );
    }
}
