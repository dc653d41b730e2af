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

//! Lab Services schedules, API version 2022-08-01.

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use super::client::{ArmClient, ClientError, Pager, Poller};
use super::resourceids::ResourceId;

mod constants;
mod ids;
mod models;

pub use constants::*;
pub use ids::{LabId, ScheduleId};
pub use models::*;

pub const API_VERSION: &str = "2022-08-01";

#[derive(Debug, Clone)]
pub struct SchedulesClient {
    client: ArmClient,
}

impl SchedulesClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &ScheduleId) -> Result<Schedule, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn create_or_update(
        &self,
        id: &ScheduleId,
        input: &Schedule,
    ) -> Result<Schedule, ClientError> {
        self.client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::CREATED])
            .execute()
            .await?
            .json()
    }

    pub async fn update(
        &self,
        id: &ScheduleId,
        input: &ScheduleUpdate,
    ) -> Result<Schedule, ClientError> {
        self.client
            .new_request(Method::PATCH, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    pub async fn delete(&self, id: &ScheduleId) -> Result<Poller<'_>, ClientError> {
        let response = self
            .client
            .new_request(Method::DELETE, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT])
            .execute()
            .await?;
        Poller::new(&self.client, response)
    }

    pub async fn delete_then_poll(
        &self,
        id: &ScheduleId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        self.delete(id).await?.poll_until_done(cancel).await?;
        Ok(())
    }

    pub fn list_by_lab(&self, id: &LabId) -> Result<Pager<'_, Schedule>, ClientError> {
        Pager::for_path(&self.client, &format!("{}/schedules", id.id()), API_VERSION, &())
    }

    pub async fn list_by_lab_complete(&self, id: &LabId) -> Result<Vec<Schedule>, ClientError> {
        self.list_by_lab(id)?.collect_all().await
    }

    pub async fn list_by_lab_complete_matching(
        &self,
        id: &LabId,
        predicate: impl Fn(&Schedule) -> bool,
    ) -> Result<Vec<Schedule>, ClientError> {
        self.list_by_lab(id)?.collect_matching(predicate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_payload_shape() {
        let schedule: Schedule = serde_json::from_str(
            r#"{
                "id": "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1/schedules/sched1",
                "name": "sched1",
                "properties": {
                    "stopAt": "2024-01-01T18:00:00Z",
                    "timeZoneId": "Europe/Paris",
                    "recurrencePattern": {
                        "frequency": "weekly",
                        "weekDays": ["Monday", "friday"],
                        "expirationDate": "2024-06-01T00:00:00Z"
                    },
                    "provisioningState": "Succeeded"
                }
            }"#,
        )
        .unwrap();
        let pattern = schedule.properties.recurrence_pattern.as_ref().unwrap();
        assert_eq!(pattern.frequency, RecurrenceFrequency::WEEKLY);
        assert_eq!(
            pattern.week_days.as_deref(),
            Some(&[WeekDay::MONDAY, WeekDay::FRIDAY][..])
        );

        let encoded = serde_json::to_value(&ScheduleUpdate {
            properties: Some(ScheduleUpdateProperties {
                notes: Some("n".into()),
                ..Default::default()
            }),
        })
        .unwrap();
        assert_eq!(encoded, serde_json::json!({"properties": {"notes": "n"}}));
    }
}
