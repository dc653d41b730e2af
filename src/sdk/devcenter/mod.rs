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

//! Dev Center gallery images, API version 2023-04-01.

use reqwest::{Method, StatusCode};

use super::client::{ArmClient, ClientError, Pager};
use super::resourceids::ResourceId;

mod ids;
mod models;

pub use ids::{DevCenterId, GalleryId, ImageId};
pub use models::*;

pub const API_VERSION: &str = "2023-04-01";

#[derive(Debug, Clone)]
pub struct ImagesClient {
    client: ArmClient,
}

impl ImagesClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &ImageId) -> Result<Image, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub fn list_by_gallery(&self, id: &GalleryId) -> Result<Pager<'_, Image>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/images", id.id()), API_VERSION, &())
    }

    pub async fn list_by_gallery_complete(&self, id: &GalleryId) -> Result<Vec<Image>, ClientError> {
        self.list_by_gallery(id)?.collect_all().await
    }

    pub async fn list_by_gallery_complete_matching(
        &self,
        id: &GalleryId,
        predicate: impl Fn(&Image) -> bool,
    ) -> Result<Vec<Image>, ClientError> {
        self.list_by_gallery(id)?.collect_matching(predicate).await
    }

    /// Images of every gallery attached to the dev center.
    pub fn list_by_dev_center(&self, id: &DevCenterId) -> Result<Pager<'_, Image>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/images", id.id()), API_VERSION, &())
    }

    pub async fn list_by_dev_center_complete(&self, id: &DevCenterId) -> Result<Vec<Image>, ClientError> {
        self.list_by_dev_center(id)?.collect_all().await
    }

    pub async fn list_by_dev_center_complete_matching(
        &self,
        id: &DevCenterId,
        predicate: impl Fn(&Image) -> bool,
    ) -> Result<Vec<Image>, ClientError> {
        self.list_by_dev_center(id)?.collect_matching(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn image_decodes_machine_configuration() {
        let image: Image = serde_json::from_value(json!({
            "name": "win11",
            "properties": {
                "publisher": "MicrosoftWindowsDesktop",
                "offer": "windows-ent-cpc",
                "sku": "win11-22h2-ent-cpc-m365",
                "recommendedMachineConfiguration": {
                    "memory": {"min": 8, "max": 32},
                    "vCPUs": {"min": 2, "max": 8}
                },
                "hibernateSupport": "ENABLED",
                "provisioningState": "Succeeded"
            }
        }))
        .unwrap();
        let properties = image.properties.unwrap();
        assert_eq!(properties.hibernate_support, Some(HibernateSupport::ENABLED));
        let machine = properties.recommended_machine_configuration.unwrap();
        assert_eq!(machine.v_cpus.unwrap().max, Some(8));
        assert_eq!(machine.memory.unwrap().min, Some(8));
    }
}
