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

use async_trait::async_trait;

use tf_provider::schema::Schema;
use tf_provider::value::ValueEmpty;
use tf_provider::{AttributePath, DataSource, Diagnostics};

use crate::clients::ProviderData;
use crate::sdk::resourceids::ResourceId;
use crate::services::{found, report, within};
use crate::utils::WithValidate;

use super::state::{data_source_schema, DigitalTwinsState};

const READ_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5 * 60);

#[derive(Debug, Default, Clone)]
pub struct DigitalTwinsInstanceDataSource {
    data: ProviderData,
}

impl DigitalTwinsInstanceDataSource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl DataSource for DigitalTwinsInstanceDataSource {
    type State<'a> = DigitalTwinsState<'a>;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(data_source_schema())
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
        let id = match config.instance_id(&clients.subscription_id) {
            Ok(id) => id,
            Err(err) => {
                report(diags, "Invalid Digital Twins instance", &err, AttributePath::default());
                return None;
            }
        };

        let instance = within(READ_TIMEOUT, "Reading the Digital Twins instance", async {
            Ok(found(clients.digital_twins.get(&id).await)?)
        })
        .await;

        let mut state = config;
        match instance {
            Ok(Some(instance)) => state.refresh(&clients.recaser, &id, instance),
            Ok(None) => {
                diags.root_error(
                    "Digital Twins instance not found",
                    format!("{} was not found", id.id()),
                );
                return None;
            }
            Err(err) => {
                report(diags, "Could not read the Digital Twins instance", &err, AttributePath::default());
                return None;
            }
        }
        Some(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::owned;

    #[tokio::test]
    async fn lookup_names_are_validated() {
        let data_source = DigitalTwinsInstanceDataSource::default();
        let mut diags = Diagnostics::default();
        let config = DigitalTwinsState {
            name: owned("twins-1"),
            resource_group_name: owned("rg1"),
            ..Default::default()
        };
        assert!(data_source.validate(&mut diags, config).await.is_some());

        let config = DigitalTwinsState {
            name: owned("-twins"),
            resource_group_name: owned("rg 1/"),
            ..Default::default()
        };
        assert!(data_source.validate(&mut diags, config).await.is_none());
        assert_eq!(diags.errors.len(), 2);
    }
}
