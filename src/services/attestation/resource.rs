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
use tracing::info;

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource};

use crate::clients::ProviderData;
use crate::sdk::attestation::{AttestationProviderId, AttestationServicePatchParams};
use crate::sdk::resourceids::ResourceId;
use crate::services::{found, gone, report, requires_import, within, Timeouts};
use crate::utils::{owned, tags_from, WithNormalize, WithSchema, WithValidate};

use super::state::AttestationProviderState;

pub const RESOURCE_TYPE: &str = "azurerm_attestation_provider";

const TIMEOUTS: Timeouts = Timeouts::minutes(30, 5, 30, 30);

#[derive(Debug, Default, Clone)]
pub struct AttestationProviderResource {
    data: ProviderData,
}

impl AttestationProviderResource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Resource for AttestationProviderResource {
    type State<'a> = AttestationProviderState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(AttestationProviderState::schema())
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
                report(diags, "Invalid attestation provider ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        let provider = within(TIMEOUTS.read, "Reading the attestation provider", async {
            Ok(found(clients.attestation.get(&id).await)?)
        })
        .await;

        let mut state = state;
        match provider {
            Ok(Some(provider)) => state.refresh(&clients.recaser, &id, provider),
            Ok(None) => {
                gone(diags, RESOURCE_TYPE, &id.id());
                state.id = Value::Null;
            }
            Err(err) => {
                report(diags, "Could not read the attestation provider", &err, AttributePath::new("id"));
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
            state.attestation_uri = prior_state.attestation_uri;
            state.trust_model = prior_state.trust_model;
        } else {
            state.id = Value::Unknown;
            state.attestation_uri = Value::Unknown;
            state.trust_model = Value::Unknown;
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
        let (id, params) = match planned_state
            .provider_id(&clients.subscription_id)
            .and_then(|id| Ok((id, planned_state.to_params()?)))
        {
            Ok(input) => input,
            Err(err) => {
                report(diags, "Invalid attestation provider", &err, AttributePath::default());
                return None;
            }
        };

        let existing = within(TIMEOUTS.read, "Checking for an existing attestation provider", async {
            Ok(found(clients.attestation.get(&id).await)?)
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
                    "Could not check for an existing attestation provider",
                    &err,
                    AttributePath::default(),
                );
                return None;
            }
        }

        info!(id = %id, "creating attestation provider");
        let created = within(TIMEOUTS.create, "Creating the attestation provider", async {
            Ok(clients.attestation.create(&id, &params).await?)
        })
        .await;

        let mut state = planned_state;
        match created {
            Ok(provider) => state.refresh(&clients.recaser, &id, provider),
            Err(err) => {
                report(diags, "Could not create the attestation provider", &err, AttributePath::default());
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
                report(diags, "Invalid attestation provider ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        info!(id = %id, "updating attestation provider tags");
        let patch = AttestationServicePatchParams {
            // an empty map clears the tags
            tags: Some(tags_from(&planned_state.tags).unwrap_or_default()),
        };
        let updated = within(TIMEOUTS.update, "Updating the attestation provider", async {
            Ok(clients.attestation.update(&id, &patch).await?)
        })
        .await;

        let mut state = planned_state;
        match updated {
            Ok(provider) => state.refresh(&clients.recaser, &id, provider),
            Err(err) => {
                report(diags, "Could not update the attestation provider", &err, AttributePath::new("tags"));
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
                report(diags, "Invalid attestation provider ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        info!(id = %id, "deleting attestation provider");
        let deleted = within(TIMEOUTS.delete, "Deleting the attestation provider", async {
            Ok(found(clients.attestation.delete(&id).await)?)
        })
        .await;

        match deleted {
            Ok(_) => Some(()),
            Err(err) => {
                report(diags, "Could not delete the attestation provider", &err, AttributePath::new("id"));
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = match AttestationProviderId::parse(&id) {
            Ok(id) => id,
            Err(err) => {
                diags.root_error(
                    "Invalid import ID",
                    format!("{err} (for example {})", AttestationProviderId::format_example()),
                );
                return None;
            }
        };

        let state = AttestationProviderState {
            id: owned(id.id()),
            name: owned(id.attestation_provider_name.as_str()),
            resource_group_name: owned(id.resource_group_name.as_str()),
            ..Default::default()
        };
        Some((state, Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn import_is_case_sensitive() {
        let resource = AttestationProviderResource::default();
        let mut diags = Diagnostics::default();
        let id = AttestationProviderId::new("sub1", "rg1", "attest1").id();

        let (state, _) = resource.import(&mut diags, id.clone()).await.unwrap();
        assert_eq!(state.name, owned("attest1"));
        assert_eq!(state.resource_group_name, owned("rg1"));

        let upper = id.replace("attestationProviders", "ATTESTATIONPROVIDERS");
        assert!(resource.import(&mut diags, upper).await.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn tag_changes_are_in_place() {
        let resource = AttestationProviderResource::default();
        let mut diags = Diagnostics::default();
        let prior = AttestationProviderState {
            id: owned(AttestationProviderId::new("sub1", "rg1", "attest1").id()),
            name: owned("attest1"),
            resource_group_name: owned("rg1"),
            location: owned("westeurope"),
            attestation_uri: owned("https://attest1.weu.attest.azure.net"),
            ..Default::default()
        };
        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior.clone(),
                AttestationProviderState {
                    location: owned("West Europe"),
                    attestation_uri: Value::Unknown,
                    tags: crate::utils::tags_value(Some(
                        [("env".to_owned(), "prod".to_owned())].into_iter().collect(),
                    )),
                    ..prior.clone()
                },
                Default::default(),
                Default::default(),
                Default::default(),
            )
            .await
            .unwrap();
        assert!(replace.is_empty());
        assert_eq!(planned.attestation_uri, prior.attestation_uri);
        assert_eq!(planned.location, owned("West Europe"));
    }
}
