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
use tracing::{debug, info};

use tf_provider::schema::Schema;
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{AttributePath, Diagnostics, Resource};

use crate::clients::ProviderData;
use crate::sdk::labservices::{ScheduleId, ScheduleUpdate};
use crate::sdk::resourceids::ResourceId;
use crate::services::{found, gone, report, requires_import, within, Timeouts};
use crate::utils::{owned, WithNormalize, WithSchema, WithValidate};

use super::state::ScheduleState;

pub const RESOURCE_TYPE: &str = "azurerm_lab_service_schedule";

const TIMEOUTS: Timeouts = Timeouts::minutes(30, 5, 30, 30);

#[derive(Debug, Default, Clone)]
pub struct LabServiceScheduleResource {
    data: ProviderData,
}

impl LabServiceScheduleResource {
    pub fn new(data: ProviderData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl Resource for LabServiceScheduleResource {
    type State<'a> = ScheduleState<'a>;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(ScheduleState::schema())
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
                report(diags, "Invalid schedule ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        let schedule = within(TIMEOUTS.read, "Reading the schedule", async {
            Ok(found(clients.lab_service_schedules.get(&id).await)?)
        })
        .await;

        let mut state = state;
        match schedule {
            Ok(Some(schedule)) => state.refresh(&id, schedule),
            Ok(None) => {
                gone(diags, RESOURCE_TYPE, &id.id());
                state.id = Value::Null;
            }
            Err(err) => {
                report(diags, "Could not read the schedule", &err, AttributePath::new("id"));
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
        state.normalize(diags);

        let mut trigger_replace = Vec::new();
        if state.name != prior_state.name {
            trigger_replace.push(AttributePath::new("name"));
        }
        if state.lab_id != prior_state.lab_id {
            trigger_replace.push(AttributePath::new("lab_id"));
        }
        if trigger_replace.is_empty() {
            state.id = prior_state.id;
        } else {
            state.id = Value::Unknown;
        }

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
        let (id, schedule) = match planned_state
            .schedule_id()
            .and_then(|id| Ok((id, planned_state.to_schedule()?)))
        {
            Ok(input) => input,
            Err(err) => {
                report(diags, "Invalid schedule", &err, AttributePath::default());
                return None;
            }
        };

        let existing = within(TIMEOUTS.read, "Checking for an existing schedule", async {
            Ok(found(clients.lab_service_schedules.get(&id).await)?)
        })
        .await;
        match existing {
            Ok(None) => (),
            Ok(Some(_)) => {
                requires_import(diags, RESOURCE_TYPE, &id.id());
                return None;
            }
            Err(err) => {
                report(diags, "Could not check for an existing schedule", &err, AttributePath::default());
                return None;
            }
        }

        info!(id = %id, "creating lab schedule");
        let created = within(TIMEOUTS.create, "Creating the schedule", async {
            Ok(clients
                .lab_service_schedules
                .create_or_update(&id, &schedule)
                .await?)
        })
        .await;

        let mut state = planned_state;
        match created {
            Ok(schedule) => state.refresh(&id, schedule),
            Err(err) => {
                report(diags, "Could not create the schedule", &err, AttributePath::default());
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
        let (id, properties) = match prior_state
            .stored_id()
            .and_then(|id| Ok((id, planned_state.to_update(&prior_state)?)))
        {
            Ok(input) => input,
            Err(err) => {
                report(diags, "Invalid schedule", &err, AttributePath::default());
                return None;
            }
        };

        debug!(id = %id, ?properties, "updating lab schedule");
        let updated = within(TIMEOUTS.update, "Updating the schedule", async {
            let input = ScheduleUpdate {
                properties: Some(properties),
            };
            Ok(clients.lab_service_schedules.update(&id, &input).await?)
        })
        .await;

        let mut state = planned_state;
        match updated {
            Ok(schedule) => state.refresh(&id, schedule),
            Err(err) => {
                report(diags, "Could not update the schedule", &err, AttributePath::default());
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
                report(diags, "Invalid schedule ID", &err, AttributePath::new("id"));
                return None;
            }
        };

        info!(id = %id, "deleting lab schedule");
        let cancel = CancellationToken::new();
        let deleted = within(TIMEOUTS.delete, "Deleting the schedule", async {
            Ok(clients
                .lab_service_schedules
                .delete_then_poll(&id, &cancel)
                .await?)
        })
        .await;

        match deleted {
            Ok(()) => Some(()),
            Err(err) => {
                report(diags, "Could not delete the schedule", &err, AttributePath::new("id"));
                None
            }
        }
    }

    async fn import<'a>(
        &self,
        diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let id = match ScheduleId::parse(&id) {
            Ok(id) => id,
            Err(err) => {
                diags.root_error(
                    "Invalid import ID",
                    format!("{err} (for example {})", ScheduleId::format_example()),
                );
                return None;
            }
        };

        let state = ScheduleState {
            id: owned(id.id()),
            name: owned(id.schedule_name.as_str()),
            lab_id: owned(id.lab_id().id()),
            ..Default::default()
        };
        Some((state, Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1/schedules/evenings";

    #[tokio::test]
    async fn import_parses_the_id() {
        let resource = LabServiceScheduleResource::default();
        let mut diags = Diagnostics::default();
        let (state, _) = resource.import(&mut diags, ID.to_owned()).await.unwrap();
        assert_eq!(state.name, owned("evenings"));
        assert_eq!(
            state.lab_id,
            owned("/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1")
        );

        let lowercase = ID.replace("/schedules/", "/SCHEDULES/");
        assert!(resource.import(&mut diags, lowercase).await.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn renaming_forces_replacement() {
        let resource = LabServiceScheduleResource::default();
        let mut diags = Diagnostics::default();
        let prior = ScheduleState {
            id: owned(ID),
            name: owned("evenings"),
            ..Default::default()
        };
        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior.clone(),
                ScheduleState {
                    name: owned("mornings"),
                    ..prior.clone()
                },
                Default::default(),
                Default::default(),
                Default::default(),
            )
            .await
            .unwrap();
        assert_eq!(replace.len(), 1);
        assert!(planned.id.is_unknown());

        let (planned, _, replace) = resource
            .plan_update(
                &mut diags,
                prior.clone(),
                ScheduleState {
                    notes: owned("bring laptops"),
                    ..prior.clone()
                },
                Default::default(),
                Default::default(),
                Default::default(),
            )
            .await
            .unwrap();
        assert!(replace.is_empty());
        assert_eq!(planned.id, owned(ID));
    }

    #[tokio::test]
    async fn unconfigured_provider_is_reported() {
        let resource = LabServiceScheduleResource::default();
        let mut diags = Diagnostics::default();
        let state = ScheduleState {
            id: owned(ID),
            ..Default::default()
        };
        assert!(resource
            .read(&mut diags, state, Default::default(), Default::default())
            .await
            .is_none());
        assert_eq!(diags.errors.len(), 1);
    }
}
