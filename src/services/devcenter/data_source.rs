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

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::schema::{AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty, ValueString};
use tf_provider::{map, AttributePath, DataSource, Diagnostics};

use crate::clients::ProviderData;
use crate::sdk::devcenter::{GalleryId, HibernateSupport, Image, ImageId};
use crate::sdk::recaser::Registry;
use crate::sdk::resourceids::ResourceId;
use crate::services::{found, report, within};
use crate::utils::{attribute, known_str, owned, owned_opt, report_all, WithSchema, WithValidate};

const READ_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImageState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub gallery_id: ValueString<'a>,
    pub description: ValueString<'a>,
    pub publisher: ValueString<'a>,
    pub offer: ValueString<'a>,
    pub sku: ValueString<'a>,
    pub hibernate_support_enabled: Value<bool>,
}

impl<'a> WithSchema for GalleryImageState<'a> {
    fn schema() -> Schema {
        use AttributeConstraint::*;
        use AttributeType::*;
        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "id"          => attribute(String, Computed, "Resource ID of the image"),
                    "name"        => attribute(String, Required, "Name of the image"),
                    "gallery_id"  => attribute(String, Required, "Resource ID of the Dev Center gallery"),
                    "description" => attribute(String, Computed, "Description of the image"),
                    "publisher"   => attribute(String, Computed, "Publisher of the image"),
                    "offer"       => attribute(String, Computed, "Offer of the image"),
                    "sku"         => attribute(String, Computed, "SKU of the image"),
                    "hibernate_support_enabled" => attribute(Bool, Computed, "Whether Dev Boxes built from the image can hibernate"),
                },
                description: Description::plain("Image of a Dev Center gallery"),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl<'a> WithValidate for GalleryImageState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Value::Value(name) = &self.name {
            if name.is_empty() {
                diags.error_short("`name` must not be empty", attr_path.clone().attribute("name"));
            }
        }
        if let Some(gallery_id) = known_str(&self.gallery_id) {
            report_all(
                diags,
                "Invalid gallery ID",
                GalleryId::validate(gallery_id, "gallery_id"),
                attr_path.clone().attribute("gallery_id"),
            );
        }
    }
}

impl<'a> GalleryImageState<'a> {
    pub fn image_id(&self) -> Result<ImageId> {
        let gallery_id = known_str(&self.gallery_id).ok_or_else(|| anyhow!("`gallery_id` is not known"))?;
        let name = known_str(&self.name).ok_or_else(|| anyhow!("`name` is not known"))?;
        let gallery = GalleryId::parse(gallery_id).context("Parsing `gallery_id`")?;
        Ok(ImageId::new(
            gallery.subscription_id,
            gallery.resource_group_name,
            gallery.dev_center_name,
            gallery.gallery_name,
            name,
        ))
    }

    pub fn refresh(&mut self, recaser: &Registry, id: &ImageId, image: Image) {
        self.id = owned(
            image
                .id
                .map_or_else(|| id.id(), |returned| recaser.recase(&returned)),
        );
        let properties = image.properties.unwrap_or_default();
        self.description = owned_opt(properties.description);
        self.publisher = owned_opt(properties.publisher);
        self.offer = owned_opt(properties.offer);
        self.sku = owned_opt(properties.sku);
        self.hibernate_support_enabled =
            Value::Value(properties.hibernate_support == Some(HibernateSupport::ENABLED));
    }
}

#[derive(Debug, Default, Clone)]
pub struct GalleryImageDataSource {
    data: ProviderData,
}

impl GalleryImageDataSource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for GalleryImageDataSource {
    type State<'a> = GalleryImageState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(GalleryImageState::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        config.validate(diags, AttributePath::default()).await;

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let clients = self.data.clients(diags)?;
        let id = match config.image_id() {
            Ok(id) => id,
            Err(err) => {
                report(diags, "Invalid gallery image", &err, AttributePath::new("gallery_id"));
                return None;
            }
        };

        let image = within(READ_TIMEOUT, "Reading the gallery image", async {
            Ok(found(clients.dev_center_images.get(&id).await)?)
        })
        .await;

        let mut state = config;
        match image {
            Ok(Some(image)) => state.refresh(&clients.recaser, &id, image),
            Ok(None) => {
                diags.error(
                    "Gallery image not found",
                    format!("{} was not found", id.id()),
                    AttributePath::new("name"),
                );
                return None;
            }
            Err(err) => {
                report(diags, "Could not read the gallery image", &err, AttributePath::default());
                return None;
            }
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sdk::resource_id_registry;

    const GALLERY: &str =
        "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DevCenter/devCenters/dc1/galleries/default";

    #[tokio::test]
    async fn gallery_id_is_validated() {
        let mut diags = Diagnostics::default();
        GalleryImageState {
            name: owned("win11"),
            gallery_id: owned(GALLERY),
            ..Default::default()
        }
        .validate(&mut diags, AttributePath::default())
        .await;
        assert!(diags.errors.is_empty());

        GalleryImageState {
            name: owned("win11"),
            gallery_id: owned("/subscriptions/sub1/resourceGroups/rg1"),
            ..Default::default()
        }
        .validate(&mut diags, AttributePath::default())
        .await;
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn refresh_fills_computed_attributes() {
        let mut state = GalleryImageState {
            name: owned("win11"),
            gallery_id: owned(GALLERY),
            ..Default::default()
        };
        let id = state.image_id().unwrap();
        assert_eq!(id.id(), format!("{GALLERY}/images/win11"));

        let image: Image = serde_json::from_value(serde_json::json!({
            "id": format!("{GALLERY}/images/win11"),
            "properties": {
                "publisher": "MicrosoftWindowsDesktop",
                "offer": "windows-ent-cpc",
                "sku": "win11-22h2-ent-cpc-m365",
                "hibernateSupport": "enabled"
            }
        }))
        .unwrap();
        state.refresh(&resource_id_registry(), &id, image);
        assert_eq!(state.publisher, owned("MicrosoftWindowsDesktop"));
        assert_eq!(state.hibernate_support_enabled, Value::Value(true));
        assert!(state.description.is_null());
    }
}
