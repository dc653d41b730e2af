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

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use terraform_provider_azurerm::sdk::client::{ArmClient, ClientError, RetryPolicy, StaticTokenCredential};
use terraform_provider_azurerm::sdk::digitaltwins::{
    DigitalTwinsClient, DigitalTwinsDescription, DigitalTwinsInstanceId,
};
use terraform_provider_azurerm::sdk::labservices::{LabId, ScheduleId, SchedulesClient};
use terraform_provider_azurerm::sdk::sql::{FailoverGroup, FailoverGroupId, FailoverGroupsClient};
use terraform_provider_azurerm::sdk::resourceids::ResourceId;

const LAB: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1";
const TWINS: &str =
    "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.DigitalTwins/digitalTwinsInstances/twins1";

fn client(server: &MockServer) -> ArmClient {
    ArmClient::builder(Arc::new(StaticTokenCredential::new("token")))
        .endpoint(Url::parse(&server.uri()).unwrap())
        .retry_policy(RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(10),
        })
        .poll_interval(Duration::from_millis(5))
        .build()
        .unwrap()
}

fn schedule(name: &str) -> serde_json::Value {
    json!({
        "id": format!("{LAB}/schedules/{name}"),
        "name": name,
        "properties": {
            "stopAt": "2024-01-01T18:00:00Z",
            "timeZoneId": "Europe/Paris",
        }
    })
}

#[tokio::test]
async fn pager_follows_next_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{LAB}/schedules")))
        .and(query_param("api-version", "2022-08-01"))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [schedule("first"), schedule("second")],
            "nextLink": format!("{}/page2", server.uri()),
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [schedule("third")],
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let schedules = SchedulesClient::new(client);
    let lab = LabId::new("sub1", "rg1", "lab1");

    let names: Vec<_> = schedules
        .list_by_lab_complete(&lab)
        .await
        .unwrap()
        .into_iter()
        .filter_map(|schedule| schedule.name)
        .collect();
    assert_eq!(names, ["first", "second", "third"]);

    let matching = schedules
        .list_by_lab_complete_matching(&lab, |schedule| schedule.name.as_deref() == Some("second"))
        .await
        .unwrap();
    assert_eq!(matching.len(), 1);
}

#[tokio::test]
async fn transient_status_is_retried() {
    let server = MockServer::start().await;
    let id = ScheduleId::new("sub1", "rg1", "lab1", "evenings");
    Mock::given(method("GET"))
        .and(path(id.id()))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(id.id()))
        .respond_with(ResponseTemplate::new(200).set_body_json(schedule("evenings")))
        .mount(&server)
        .await;

    let schedule = SchedulesClient::new(client(&server)).get(&id).await.unwrap();
    assert_eq!(schedule.properties.time_zone_id, "Europe/Paris");
}

#[tokio::test]
async fn not_found_is_recognisable() {
    let server = MockServer::start().await;
    let id = ScheduleId::new("sub1", "rg1", "lab1", "missing");
    Mock::given(method("GET"))
        .and(path(id.id()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "ResourceNotFound", "message": "The schedule was not found"}
        })))
        .mount(&server)
        .await;

    let err = SchedulesClient::new(client(&server)).get(&id).await.unwrap_err();
    assert!(err.was_not_found());
    assert!(err.to_string().contains("ResourceNotFound"));
}

async fn mount_create(server: &MockServer, statuses: &[&str]) {
    Mock::given(method("PUT"))
        .and(path(TWINS))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Azure-AsyncOperation", format!("{}/operations/op1", server.uri()).as_str())
                .set_body_json(json!({"location": "westeurope", "properties": {"provisioningState": "Provisioning"}})),
        )
        .mount(server)
        .await;
    for status in statuses {
        Mock::given(method("GET"))
            .and(path("/operations/op1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": status,
                "error": {"code": "Conflict", "message": "Quota exceeded"},
            })))
            .up_to_n_times(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn poller_completes_on_success() {
    let server = MockServer::start().await;
    mount_create(&server, &["InProgress", "Succeeded"]).await;
    Mock::given(method("GET"))
        .and(path(TWINS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": TWINS,
            "location": "westeurope",
            "properties": {"provisioningState": "Succeeded", "hostName": "twins1.api.weu.digitaltwins.azure.net"},
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let twins = DigitalTwinsClient::new(client);
    let instance = twins
        .create_or_update_then_poll(
            &DigitalTwinsInstanceId::new("sub1", "rg1", "twins1"),
            &DigitalTwinsDescription {
                location: "westeurope".into(),
                ..Default::default()
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(
        instance.properties.and_then(|p| p.host_name).as_deref(),
        Some("twins1.api.weu.digitaltwins.azure.net")
    );
}

#[tokio::test]
async fn poller_fails_on_failed_status() {
    let server = MockServer::start().await;
    mount_create(&server, &["Failed"]).await;

    let twins = DigitalTwinsClient::new(client(&server));
    let err = twins
        .create_or_update_then_poll(
            &DigitalTwinsInstanceId::new("sub1", "rg1", "twins1"),
            &DigitalTwinsDescription {
                location: "westeurope".into(),
                ..Default::default()
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    match err {
        ClientError::LongRunningOperationFailed { status, error } => {
            assert_eq!(status, "Failed");
            assert_eq!(error.map(|e| e.code), Some("Conflict".to_owned()));
        }
        other => panic!("unexpected error {other}"),
    }
}

#[tokio::test]
async fn poller_stops_when_cancelled() {
    let server = MockServer::start().await;
    mount_create(&server, &[]).await;

    let twins = DigitalTwinsClient::new(client(&server));
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = twins
        .create_or_update_then_poll(
            &DigitalTwinsInstanceId::new("sub1", "rg1", "twins1"),
            &DigitalTwinsDescription {
                location: "westeurope".into(),
                ..Default::default()
            },
            &cancel,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn delete_follows_location_until_gone() {
    let server = MockServer::start().await;
    let id = ScheduleId::new("sub1", "rg1", "lab1", "evenings");
    Mock::given(method("DELETE"))
        .and(path(id.id()))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Location", format!("{}/results/del1", server.uri()).as_str())
                .insert_header("Retry-After", "0"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results/del1"))
        .respond_with(ResponseTemplate::new(202))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results/del1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    SchedulesClient::new(client(&server))
        .delete_then_poll(&id, &CancellationToken::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_final_response_reads_the_resource() {
    let server = MockServer::start().await;
    let id = FailoverGroupId::new("sub1", "rg1", "server1", "group1");
    Mock::given(method("PUT"))
        .and(path(id.id()))
        .respond_with(
            ResponseTemplate::new(202).insert_header("Location", format!("{}/results/fg1", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/results/fg1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(id.id()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id.id(),
            "name": "group1",
            "properties": {"readWriteEndpoint": {"failoverPolicy": "Manual"}},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let group = FailoverGroupsClient::new(client(&server))
        .create_or_update_then_poll(
            &id,
            &FailoverGroup {
                id: None,
                name: None,
                kind: None,
                location: None,
                tags: None,
                properties: None,
            },
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(group.name.as_deref(), Some("group1"));
}
