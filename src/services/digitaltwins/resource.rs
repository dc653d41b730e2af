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
use tokio_util::sync::CancellationToken;
use tracing::info;

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource};

use crate::clients::ProviderData;
use crate::sdk::digitaltwins::DigitalTwinsInstanceId;
use crate::sdk::resourceids::ResourceId;
use crate::services::{found, gone, report, requires_import, within, Timeouts};
use crate::utils::{owned, WithNormalize, WithSchema, WithValidate};

use super::state::DigitalTwinsState;

pub const RESOURCE_TYPE: &str = "azurerm_digital_twins_instance";

const TIMEOUTS: Timeouts = Timeouts::minutes(30, 5, 30, 30);

#[derive(Debug, Default, Clone)]
pub struct DigitalTwinsInstanceResource {
    data: ProviderData,
}

impl DigitalTwinsInstanceResource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Resource for DigitalTwinsInstanceResource {
    type State<'a> = DigitalTwinsState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(DigitalTwinsState::schema())
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
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let clients = self.data.clients(diags)?;
        let id = match state.stored_id() {
            Ok(id) => id,
            Err(err) => {
                report(diags, "Invalid Digital Twins instance ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        let instance = within(TIMEOUTS.read, "Reading the Digital Twins instance", async {
            Ok(found(clients.digital_twins.get(&id).await)?)
        })
        .await;

        let mut state = state;
        match instance {
            Ok(Some(instance)) => state.refresh(&clients.recaser, &id, instance),
            Ok(None) => {
                gone(diags, RESOURCE_TYPE, &id.id());
                state.id = Value::Null;
            }
            Err(err) => {
                report(diags, "Could not read the Digital Twins instance", &err, AttributePath::new("id"));
                return None;
            }
        }
        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let mut state = proposed_state;
        state.id = Value::Unknown;
        state.normalize(diags);

        Some((state, Default::default()))
    }

    async fn plan_update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>, Vec<AttributePath>)> {
        let mut state = proposed_state;
        let trigger_replace = state.replaced_by(&prior_state);
        if trigger_replace.is_empty() {
            state.id = prior_state.id;
            state.host_name = prior_state.host_name;
            if state.identity_type == prior_state.identity_type {
                state.identity_principal_id = prior_state.identity_principal_id;
                state.identity_tenant_id = prior_state.identity_tenant_id;
            } else {
                state.identity_principal_id = Value::Null;
                state.identity_tenant_id = Value::Null;
            }
            if state.public_network_access_enabled.is_null() {
                state.public_network_access_enabled = prior_state.public_network_access_enabled;
            }
        } else {
            state.id = Value::Unknown;
            state.host_name = Value::Unknown;
            state.identity_principal_id = Value::Null;
            state.identity_tenant_id = Value::Null;
        }
        state.normalize(diags);

        Some((state, prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let clients = self.data.clients(diags)?;
        let (id, description) = match planned_state
            .instance_id(&clients.subscription_id)
            .and_then(|id| Ok((id, planned_state.to_description()?)))
        {
            Ok(input) => input,
            Err(err) => {
                report(diags, "Invalid Digital Twins instance", &err, AttributePath::default());
                return None;
            }
        };

        let existing = within(TIMEOUTS.read, "Checking for an existing Digital Twins instance", async {
            Ok(found(clients.digital_twins.get(&id).await)?)
        })
        .await;
        match existing {
            Ok(None) => (),
            Ok(Some(_)) => {
                requires_import(diags, RESOURCE_TYPE, &id.id());
                return None;
            }
            Err(err) => {
                report(
                    diags,
                    "Could not check for an existing Digital Twins instance",
                    &err,
                    AttributePath::default(),
                );
                return None;
            }
        }

        info!(id = %id, "creating Digital Twins instance");
        let cancel = CancellationToken::new();
        let created = within(TIMEOUTS.create, "Creating the Digital Twins instance", async {
            clients
                .digital_twins
                .create_or_update(&id, &description)
                .await?
                .poll_until_done(&cancel)
                .await?;
            // the final poll may answer with the operation status only
            Ok(clients.digital_twins.get(&id).await?)
        })
        .await;

        let mut state = planned_state;
        match created {
            Ok(instance) => state.refresh(&clients.recaser, &id, instance),
            Err(err) => {
                report(diags, "Could not create the Digital Twins instance", &err, AttributePath::default());
                return None;
            }
        }
        Some((state, private_state))
    }

    async fn update<'a>(
        &self,
        diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config_state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let clients = self.data.clients(diags)?;
        let id = match prior_state.stored_id() {
            Ok(id) => id,
            Err(err) => {
                report(diags, "Invalid Digital Twins instance ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        info!(id = %id, "updating Digital Twins instance");
        let patch = planned_state.to_patch();
        let cancel = CancellationToken::new();
        let updated = within(TIMEOUTS.update, "Updating the Digital Twins instance", async {
            clients
                .digital_twins
                .update(&id, &patch)
                .await?
                .poll_until_done(&cancel)
                .await?;
            Ok(clients.digital_twins.get(&id).await?)
        })
        .await;

        let mut state = planned_state;
        match updated {
            Ok(instance) => state.refresh(&clients.recaser, &id, instance),
            Err(err) => {
                report(diags, "Could not update the Digital Twins instance", &err, AttributePath::default());
                return None;
            }
        }
        Some((state, private_state))
    }

    async fn destroy<'a>(
        &self,
        diags: &mut Diagnostics,
        state: Self::State<'a>,
        _planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        let clients = self.data.clients(diags)?;
        let id = match state.stored_id() {
            Ok(id) => id,
            Err(err) => {
                report(diags, "Invalid Digital Twins instance ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        info!(id = %id, "deleting Digital Twins instance");
        let cancel = CancellationToken::new();
        let deleted = within(TIMEOUTS.delete, "Deleting the Digital Twins instance", async {
            Ok(clients.digital_twins.delete_then_poll(&id, &cancel).await?)
        })
        .await;

        match deleted {
            Ok(()) => Some(()),
            Err(err) => {
                report(diags, "Could not delete the Digital Twins instance", &err, AttributePath::new("id"));
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = match DigitalTwinsInstanceId::parse(&id) {
            Ok(id) => id,
            Err(err) => {
                diags.root_error(
                    "Invalid import ID",
                    format!("{err} (for example {})", DigitalTwinsInstanceId::format_example()),
                );
                return None;
            }
        };

        let state = DigitalTwinsState {
            id: owned(id.id()),
            name: owned(id.digital_twins_instance_name.as_str()),
            resource_group_name: owned(id.resource_group_name.as_str()),
            ..Default::default()
        };
        Some((state, Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prior() -> DigitalTwinsState<'static> {
        DigitalTwinsState {
            id: owned(DigitalTwinsInstanceId::new("sub1", "rg1", "twins-1").id()),
            name: owned("twins-1"),
            resource_group_name: owned("rg1"),
            location: owned("westeurope"),
            public_network_access_enabled: Value::Value(true),
            host_name: owned("twins-1.api.weu.digitaltwins.azure.net"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn enabling_identity_is_in_place() {
        let resource = DigitalTwinsInstanceResource::default();
        let mut diags = Diagnostics::default();
        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior(),
                DigitalTwinsState {
                    identity_type: owned("SystemAssigned"),
                    host_name: Value::Unknown,
                    ..prior()
                },
                Default::default(),
                Default::default(),
                Default::default(),
            )
            .await
            .unwrap();
        assert!(replace.is_empty());
        assert_eq!(planned.host_name, prior().host_name);
        assert!(planned.identity_principal_id.is_unknown());
    }

    #[tokio::test]
    async fn respelled_region_keeps_the_configured_value() {
        let resource = DigitalTwinsInstanceResource::default();
        let mut diags = Diagnostics::default();
        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior(),
                DigitalTwinsState {
                    location: owned("West Europe"),
                    ..prior()
                },
                Default::default(),
                Default::default(),
                Default::default(),
            )
            .await
            .unwrap();
        assert!(replace.is_empty());
        assert_eq!(planned.location, owned("West Europe"));
        assert_eq!(planned.id, prior().id);
    }

    #[tokio::test]
    async fn moving_region_replaces() {
        let resource = DigitalTwinsInstanceResource::default();
        let mut diags = Diagnostics::default();
        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior(),
                DigitalTwinsState {
                    location: owned("northeurope"),
                    ..prior()
                },
                Default::default(),
                Default::default(),
                Default::default(),
            )
            .await
            .unwrap();
        assert_eq!(replace.len(), 1);
        assert!(planned.id.is_unknown());
    }
}
