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

//! Cost Management exports, API version 2023-08-01.

use reqwest::{Method, StatusCode};

use super::client::{ArmClient, ClientError, OperationOptions};
use super::resourceids::{ResourceId, ScopeId};

mod constants;
mod ids;
mod models;

pub use constants::*;
pub use ids::ScopedExportId;
pub use models::*;

pub const API_VERSION: &str = "2023-08-01";

#[derive(Debug, Clone, Default)]
pub struct GetOperationOptions {
    /// `runHistory` to include the last executions
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

#[derive(Debug, Clone, Default)]
pub struct ListOperationOptions {
    pub expand: Option<String>,
}

impl OperationOptions for ListOperationOptions {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        self.expand
            .iter()
            .map(|expand| ("$expand", expand.clone()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ExportsClient {
    client: ArmClient,
}

impl ExportsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(
        &self,
        id: &ScopedExportId,
        options: &GetOperationOptions,
    ) -> Result<Export, ClientError> {
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
        id: &ScopedExportId,
        input: &Export,
    ) -> Result<Export, ClientError> {
        self.client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::CREATED])
            .execute()
            .await?
            .json()
    }

    pub async fn delete(&self, id: &ScopedExportId) -> Result<(), ClientError> {
        self.client
            .new_request(Method::DELETE, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?;
        Ok(())
    }

    /// Run the export now, outside of its schedule.
    pub async fn execute(&self, id: &ScopedExportId) -> Result<(), ClientError> {
        self.client
            .new_request(Method::POST, &format!("{}/run", id.id()), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?;
        Ok(())
    }

    /// Exports of a scope. The service returns them in a single response.
    pub async fn list(
        &self,
        scope: &ScopeId,
        options: &ListOperationOptions,
    ) -> Result<Vec<Export>, ClientError> {
        let path = format!("{}/providers/Microsoft.CostManagement/exports", scope.id());
        let result: ExportListResult = self
            .client
            .new_request(Method::GET, &path, API_VERSION)
            .with_options(options)?
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()?;
        Ok(result.value)
    }

    pub async fn get_execution_history(
        &self,
        id: &ScopedExportId,
    ) -> Result<Vec<ExportExecution>, ClientError> {
        let result: ExportExecutionListResult = self
            .client
            .new_request(Method::GET, &format!("{}/runHistory", id.id()), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()?;
        Ok(result.value)
    }
}
