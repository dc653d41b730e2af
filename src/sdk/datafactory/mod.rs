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

//! Data Factory data flows, API version 2018-06-01.

use reqwest::{Method, StatusCode};

use super::client::{ArmClient, ClientError, OperationOptions, Pager};
use super::resourceids::ResourceId;

mod ids;
mod models;

pub use ids::{DataFlowId, FactoryId};
pub use models::*;

pub const API_VERSION: &str = "2018-06-01";

#[derive(Debug, Clone, Default)]
pub struct GetOperationOptions {
    /// ETag of a cached copy; the service answers 304 when unchanged
    pub if_none_match: Option<String>,
}

impl OperationOptions for GetOperationOptions {
    fn to_headers(&self) -> Vec<(&'static str, String)> {
        self.if_none_match
            .iter()
            .map(|etag| ("If-None-Match", etag.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateOrUpdateOperationOptions {
    /// ETag the existing entity must match, `*` for any
    pub if_match: Option<String>,
}

impl OperationOptions for CreateOrUpdateOperationOptions {
    fn to_headers(&self) -> Vec<(&'static str, String)> {
        self.if_match
            .iter()
            .map(|etag| ("If-Match", etag.clone()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct DataFlowsClient {
    client: ArmClient,
}

impl DataFlowsClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    /// `None` when `If-None-Match` matched and the service sent no body.
    pub async fn get(
        &self,
        id: &DataFlowId,
        options: &GetOperationOptions,
    ) -> Result<Option<DataFlowResource>, ClientError> {
        let response = self
            .client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .with_options(options)?
            .expect(&[StatusCode::OK, StatusCode::NOT_MODIFIED])
            .execute()
            .await?;
        if response.status == StatusCode::NOT_MODIFIED {
            return Ok(None);
        }
        response.json().map(Some)
    }

    pub async fn create_or_update(
        &self,
        id: &DataFlowId,
        input: &DataFlowResource,
        options: &CreateOrUpdateOperationOptions,
    ) -> Result<DataFlowResource, ClientError> {
        self.client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .with_options(options)?
            .json(input)?
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn delete(&self, id: &DataFlowId) -> Result<(), ClientError> {
        self.client
            .new_request(Method::DELETE, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK, StatusCode::NO_CONTENT])
            .execute()
            .await?;
        Ok(())
    }

    pub fn list_by_factory(&self, id: &FactoryId) -> Result<Pager<'_, DataFlowResource>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/dataflows", id.id()), API_VERSION, &())
    }

    pub async fn list_by_factory_complete(
        &self,
        id: &FactoryId,
    ) -> Result<Vec<DataFlowResource>, ClientError> {
        self.list_by_factory(id)?.collect_all().await
    }

    pub async fn list_by_factory_complete_matching(
        &self,
        id: &FactoryId,
        predicate: impl Fn(&DataFlowResource) -> bool,
    ) -> Result<Vec<DataFlowResource>, ClientError> {
        self.list_by_factory(id)?.collect_matching(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn data_flow_resource_dispatches_on_type() {
        let resource: DataFlowResource = serde_json::from_value(json!({
            "name": "flow1",
            "etag": "0a00",
            "properties": {
                "type": "MappingDataFlow",
                "description": "copy",
                "typeProperties": {
                    "sources": [{"name": "in", "dataset": {"type": "DatasetReference", "referenceName": "ds1"}}],
                    "scriptLines": ["source(allowSchemaDrift: true) ~> in"]
                }
            }
        }))
        .unwrap();
        let DataFlow::Mapping(flow) = &resource.properties else {
            panic!("expected a mapping data flow");
        };
        let sources = flow.type_properties.as_ref().unwrap().sources.as_ref().unwrap();
        assert_eq!(sources[0].dataset.as_ref().unwrap().kind, ReferenceType::DATASET_REFERENCE);
        assert_eq!(resource.properties.discriminator(), "MappingDataFlow");
    }

    #[test]
    fn etag_options_become_headers() {
        assert_eq!(
            CreateOrUpdateOperationOptions {
                if_match: Some("*".into())
            }
            .to_headers(),
            vec![("If-Match", "*".to_owned())]
        );
        assert!(GetOperationOptions::default().to_headers().is_empty());
    }
}
