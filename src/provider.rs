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

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;

use tf_provider::value::ValueEmpty;
use tf_provider::schema::Schema;
use tf_provider::{map, AttributePath, Diagnostics, Provider};

use crate::clients::{Clients, ProviderData};
use crate::config::{ProviderConfig, Settings};
use crate::services::{
    attestation::AttestationProviderResource,
    devcenter::GalleryImageDataSource,
    digitaltwins::{DigitalTwinsInstanceDataSource, DigitalTwinsInstanceResource},
    labservice::LabServiceScheduleResource,
};
use crate::utils::WithSchema;

/// Name under which Terraform knows the provider.
pub const PROVIDER_NAME: &str = "azurerm";

#[derive(Debug, Default, Clone)]
pub struct AzureRmProvider {
    data: ProviderData,
}

impl AzureRmProvider {
    pub fn new() -> Self {
        Default::default()
    }

    /// Provider whose clients are already built, skipping `configure`.
    pub fn with_clients(clients: Clients) -> Self {
        Self {
            data: ProviderData::configured(clients),
        }
    }
}

#[async_trait]
impl Provider for AzureRmProvider {
    type Config<'a> = ProviderConfig<'a>;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ProviderConfig::schema())
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        config.validate(diags);

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        let settings = match Settings::from_env(&config) {
            Ok(settings) => settings,
            Err(err) => {
                diags.error(
                    "Invalid provider configuration",
                    err.to_string(),
                    AttributePath::new(err.attribute()),
                );
                return None;
            }
        };

        let clients = match Clients::from_settings(&settings) {
            Ok(clients) => clients,
            Err(err) => {
                diags.root_error("Could not configure the provider", format!("{err:#}"));
                return None;
            }
        };

        info!(
            terraform_version = %terraform_version,
            subscription_id = %settings.subscription_id,
            environment = settings.environment.name,
            "provider configured"
        );
        if !self.data.set(clients) {
            diags.root_warning(
                "Provider already configured",
                "The provider was configured more than once, the first configuration is kept.",
            );
        }
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn tf_provider::DynamicResource>>> {
        Some(map! {
            "azurerm_attestation_provider"   => AttestationProviderResource::new(self.data.clone()),
            "azurerm_digital_twins_instance" => DigitalTwinsInstanceResource::new(self.data.clone()),
            "azurerm_lab_service_schedule"   => LabServiceScheduleResource::new(self.data.clone()),
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn tf_provider::DynamicDataSource>>> {
        Some(map! {
            "azurerm_dev_center_gallery_image" => GalleryImageDataSource::new(self.data.clone()),
            "azurerm_digital_twins_instance"   => DigitalTwinsInstanceDataSource::new(self.data.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;

    use super::*;
    use crate::utils::owned;

    #[test]
    fn every_type_is_registered() {
        let provider = AzureRmProvider::new();
        let mut diags = Diagnostics::default();
        let resources = provider.get_resources(&mut diags).unwrap();
        let data_sources = provider.get_data_sources(&mut diags).unwrap();

        let mut names: Vec<_> = resources.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            [
                "azurerm_attestation_provider",
                "azurerm_digital_twins_instance",
                "azurerm_lab_service_schedule"
            ]
        );
        assert!(data_sources.contains_key("azurerm_dev_center_gallery_image"));
        assert!(data_sources.contains_key("azurerm_digital_twins_instance"));
    }

    #[tokio::test]
    async fn unknown_environment_fails_validation() {
        let provider = AzureRmProvider::new();
        let mut diags = Diagnostics::default();
        let config = ProviderConfig {
            environment: owned("mars"),
            ..Default::default()
        };
        assert!(provider.validate(&mut diags, config).await.is_none());

        let mut diags = Diagnostics::default();
        let config = ProviderConfig {
            environment: Value::Unknown,
            ..Default::default()
        };
        assert!(provider.validate(&mut diags, config).await.is_some());
    }
}
