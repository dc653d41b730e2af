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

//! Tests against a live subscription.
//!
//! They only run with `TF_ACC` set, using the `ARM_*` credentials of the
//! provider plus `ARM_TEST_RESOURCE_GROUP` (an existing resource group) and
//! `ARM_TEST_LOCATION`.

use futures::TryStreamExt;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use terraform_provider_azurerm::clients::Clients;
use terraform_provider_azurerm::config::{ProviderConfig, Settings};
use terraform_provider_azurerm::sdk::common::Tags;
use terraform_provider_azurerm::sdk::digitaltwins::{
    DigitalTwinsDescription, DigitalTwinsInstanceId, DigitalTwinsPatchDescription,
};
use terraform_provider_azurerm::sdk::resourceids::{ResourceGroupId, ResourceId, SubscriptionId};

struct Environment {
    clients: Clients,
    resource_group: String,
    location: String,
}

fn environment() -> Option<Environment> {
    if std::env::var_os("TF_ACC").is_none() {
        eprintln!("TF_ACC is not set, skipping");
        return None;
    }
    let settings = Settings::from_env(&ProviderConfig::default()).expect("ARM_* settings");
    Some(Environment {
        clients: Clients::from_settings(&settings).expect("clients"),
        resource_group: std::env::var("ARM_TEST_RESOURCE_GROUP").expect("ARM_TEST_RESOURCE_GROUP"),
        location: std::env::var("ARM_TEST_LOCATION").unwrap_or_else(|_| "westeurope".to_owned()),
    })
}

fn random_name(prefix: &str) -> String {
    format!("{prefix}{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

#[tokio::test]
async fn digital_twins_lifecycle() {
    let Some(env) = environment() else { return };
    let twins = &env.clients.digital_twins;
    let id = DigitalTwinsInstanceId::new(&env.clients.subscription_id, &env.resource_group, random_name("acctest-dt-"));
    let cancel = CancellationToken::new();

    let created = twins
        .create_or_update_then_poll(
            &id,
            &DigitalTwinsDescription {
                location: env.location.clone(),
                ..Default::default()
            },
            &cancel,
        )
        .await
        .expect("create");
    let returned = created.id.expect("returned id");
    assert_eq!(env.clients.recaser.recase(&returned), id.id());

    let tags = Tags::from([("environment".to_owned(), "acceptance".to_owned())]);
    twins
        .update_then_poll(
            &id,
            &DigitalTwinsPatchDescription {
                tags: Some(tags.clone()),
                ..Default::default()
            },
            &cancel,
        )
        .await
        .expect("update");
    assert_eq!(twins.get(&id).await.expect("get").tags, Some(tags));

    let in_group = twins
        .list_by_resource_group_complete(&ResourceGroupId::new(&env.clients.subscription_id, &env.resource_group))
        .await
        .expect("list");
    assert!(in_group.iter().any(|instance| instance.name.as_deref() == Some(id.digital_twins_instance_name.as_str())));

    twins.delete_then_poll(&id, &cancel).await.expect("delete");
    assert!(twins.get(&id).await.expect_err("deleted").was_not_found());
}

#[tokio::test]
async fn load_balancers_stream_across_pages() {
    let Some(env) = environment() else { return };
    let subscription = SubscriptionId::new(&env.clients.subscription_id);
    let streamed: Vec<_> = env
        .clients
        .load_balancers
        .list_all(&subscription)
        .expect("pager")
        .into_stream()
        .try_collect()
        .await
        .expect("stream");
    let collected = env
        .clients
        .load_balancers
        .list_all_complete(&subscription)
        .await
        .expect("list");
    assert_eq!(streamed.len(), collected.len());
}
