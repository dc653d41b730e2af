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

//! Attestation providers, API version 2020-10-01.

use reqwest::{Method, StatusCode};

use super::client::{ArmClient, ClientError};
use super::resourceids::{ResourceGroupId, ResourceId, SubscriptionId};

mod ids;
mod models;

pub use ids::AttestationProviderId;
pub use models::*;

pub const API_VERSION: &str = "2020-10-01";

#[derive(Debug, Clone)]
pub struct AttestationProvidersClient {
    client: ArmClient,
}

impl AttestationProvidersClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &AttestationProviderId) -> Result<AttestationProvider, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn create(
        &self,
        id: &AttestationProviderId,
        input: &AttestationServiceCreationParams,
    ) -> Result<AttestationProvider, ClientError> {
        self.client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::CREATED])
            .execute()
            .await?
            .json()
    }

    pub async fn update(
        &self,
        id: &AttestationProviderId,
        input: &AttestationServicePatchParams,
    ) -> Result<AttestationProvider, ClientError> {
        self.client
            .new_request(Method::PATCH, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn delete(&self, id: &AttestationProviderId) -> Result<(), ClientError> {
        self.client
            .new_request(Method::DELETE, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK, StatusCode::NO_CONTENT])
            .execute()
            .await?;
        Ok(())
    }

    pub async fn list_by_resource_group(
        &self,
        id: &ResourceGroupId,
    ) -> Result<Vec<AttestationProvider>, ClientError> {
        self.list_at(&id.id()).await
    }

    pub async fn list(&self, id: &SubscriptionId) -> Result<Vec<AttestationProvider>, ClientError> {
        self.list_at(&id.id()).await
    }

    async fn list_at(&self, parent: &str) -> Result<Vec<AttestationProvider>, ClientError> {
        let path = format!("{parent}/providers/Microsoft.Attestation/attestationProviders");
        let result: AttestationProviderListResult = self
            .client
            .new_request(Method::GET, &path, API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()?;
        Ok(result.value)
    }
}
