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

//! `azurerm_lab_service_schedule` against a mocked resource manager.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tf_provider::value::Value;
use tf_provider::{Diagnostics, Resource};
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terraform_provider_azurerm::clients::{Clients, ProviderData};
use terraform_provider_azurerm::sdk::client::{ArmClient, RetryPolicy, StaticTokenCredential};
use terraform_provider_azurerm::services::labservice::{LabServiceScheduleResource, ScheduleState};

const LAB: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1";

fn schedule_id() -> String {
    format!("{LAB}/schedules/evenings")
}

fn resource(server: &MockServer) -> LabServiceScheduleResource {
    let client = ArmClient::builder(Arc::new(StaticTokenCredential::new("token")))
        .endpoint(Url::parse(&server.uri()).unwrap())
        .retry_policy(RetryPolicy::none())
        .poll_interval(Duration::from_millis(5))
        .build()
        .unwrap();
    LabServiceScheduleResource::new(ProviderData::configured(Clients::new("sub1", client)))
}

fn string(value: &str) -> Value<Cow<'static, str>> {
    Value::Value(Cow::Owned(value.to_owned()))
}

fn planned() -> ScheduleState<'static> {
    ScheduleState {
        id: Value::Unknown,
        name: string("evenings"),
        lab_id: string(LAB),
        notes: Value::Null,
        start_time: Value::Unknown,
        stop_time: string("2024-01-01T19:00:00+01:00"),
        time_zone: string("Europe/Paris"),
        recurrence_frequency: Value::Null,
        recurrence_interval: Value::Null,
        recurrence_week_days: Value::Null,
        recurrence_expiration_date: Value::Null,
    }
}

fn returned() -> serde_json::Value {
    json!({
        "id": schedule_id(),
        "name": "evenings",
        "properties": {
            "startAt": "2024-01-01T08:00:00Z",
            "stopAt": "2024-01-01T18:00:00Z",
            "timeZoneId": "Europe/Paris",
            "provisioningState": "Succeeded",
        }
    })
}

#[tokio::test]
async fn create_puts_the_schedule() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(schedule_id()))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(schedule_id()))
        .and(body_partial_json(json!({
            "properties": {"stopAt": "2024-01-01T19:00:00+01:00", "timeZoneId": "Europe/Paris"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(returned()))
        .expect(1)
        .mount(&server)
        .await;

    let mut diags = Diagnostics::default();
    let (state, _) = resource(&server)
        .create(&mut diags, planned(), planned(), Default::default(), Default::default())
        .await
        .expect("create");
    assert!(diags.errors.is_empty());
    assert_eq!(state.id, string(&schedule_id()));
    // same instant as configured, kept as written
    assert_eq!(state.stop_time, string("2024-01-01T19:00:00+01:00"));
    assert_eq!(state.start_time, string("2024-01-01T08:00:00Z"));
}

#[tokio::test]
async fn create_refuses_existing_schedules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(schedule_id()))
        .respond_with(ResponseTemplate::new(200).set_body_json(returned()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let mut diags = Diagnostics::default();
    let created = resource(&server)
        .create(&mut diags, planned(), planned(), Default::default(), Default::default())
        .await;
    assert!(created.is_none());
    assert_eq!(diags.errors.len(), 1);
}

#[tokio::test]
async fn read_drops_deleted_schedules() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(schedule_id()))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut diags = Diagnostics::default();
    let state = ScheduleState {
        id: string(&schedule_id()),
        ..planned()
    };
    let (state, _) = resource(&server)
        .read(&mut diags, state, Default::default(), Default::default())
        .await
        .expect("read");
    assert!(diags.errors.is_empty());
    assert!(state.id.is_null());
}

#[tokio::test]
async fn update_patches_changed_attributes() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(schedule_id()))
        .and(body_partial_json(json!({"properties": {"notes": "bring laptops"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": schedule_id(),
            "properties": {
                "stopAt": "2024-01-01T18:00:00Z",
                "timeZoneId": "Europe/Paris",
                "notes": "bring laptops",
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = ScheduleState {
        id: string(&schedule_id()),
        start_time: Value::Null,
        ..planned()
    };
    let planned = ScheduleState {
        notes: string("bring laptops"),
        ..prior.clone()
    };
    let mut diags = Diagnostics::default();
    let (state, _) = resource(&server)
        .update(&mut diags, prior, planned.clone(), planned, Default::default(), Default::default())
        .await
        .expect("update");
    assert_eq!(state.notes, string("bring laptops"));
}

fn weekly(state: ScheduleState<'static>) -> ScheduleState<'static> {
    ScheduleState {
        recurrence_frequency: string("Weekly"),
        recurrence_interval: Value::Value(1),
        recurrence_week_days: Value::Value(vec![string("Monday")]),
        recurrence_expiration_date: string("2024-06-01T00:00:00Z"),
        ..state
    }
}

#[tokio::test]
async fn update_clears_a_removed_recurrence() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(schedule_id()))
        .respond_with(ResponseTemplate::new(200).set_body_json(returned()))
        .expect(1)
        .mount(&server)
        .await;

    let prior = weekly(ScheduleState {
        id: string(&schedule_id()),
        start_time: string("2024-01-01T08:00:00Z"),
        stop_time: string("2024-01-01T18:00:00Z"),
        ..planned()
    });
    let planned = ScheduleState {
        recurrence_frequency: Value::Null,
        recurrence_interval: Value::Null,
        recurrence_week_days: Value::Null,
        recurrence_expiration_date: Value::Null,
        ..prior.clone()
    };
    let mut diags = Diagnostics::default();
    let (state, _) = resource(&server)
        .update(&mut diags, prior, planned.clone(), planned.clone(), Default::default(), Default::default())
        .await
        .expect("update");
    assert!(diags.errors.is_empty());

    let requests = server.received_requests().await.expect("recorded requests");
    let patch = requests
        .iter()
        .find(|request| request.method.as_str() == "PATCH")
        .expect("PATCH sent");
    let body: serde_json::Value = serde_json::from_slice(&patch.body).unwrap();
    assert_eq!(body, json!({"properties": {"recurrencePattern": null}}));

    assert_eq!(state.recurrence_frequency, planned.recurrence_frequency);
    assert_eq!(state.recurrence_week_days, planned.recurrence_week_days);
    assert_eq!(state.recurrence_expiration_date, planned.recurrence_expiration_date);
}

#[tokio::test]
async fn destroy_waits_for_the_deletion() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(schedule_id()))
        .respond_with(
            ResponseTemplate::new(202).insert_header("Location", format!("{}/results/del1", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results/del1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut diags = Diagnostics::default();
    let state = ScheduleState {
        id: string(&schedule_id()),
        ..planned()
    };
    resource(&server)
        .destroy(&mut diags, state, Default::default(), Default::default())
        .await
        .expect("destroy");
    assert!(diags.errors.is_empty());
}
