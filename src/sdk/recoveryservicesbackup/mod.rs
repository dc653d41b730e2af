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

//! Recovery Services backup policies, API version 2023-02-01.

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use super::client::{ArmClient, ClientError, Poller};
use super::resourceids::ResourceId;

mod constants;
mod ids;
mod models;

pub use constants::*;
pub use ids::BackupPolicyId;
pub use models::*;

pub const API_VERSION: &str = "2023-02-01";

#[derive(Debug, Clone)]
pub struct ProtectionPoliciesClient {
    client: ArmClient,
}

impl ProtectionPoliciesClient {
    pub fn new(client: ArmClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &BackupPolicyId) -> Result<ProtectionPolicyResource, ClientError> {
        self.client
            .new_request(Method::GET, &id.id(), API_VERSION)
            .expect(&[StatusCode::OK])
            .execute()
            .await?
            .json()
    }

    /// `None` when the service accepted the policy without echoing it back.
    pub async fn create_or_update(
        &self,
        id: &BackupPolicyId,
        input: &ProtectionPolicyResource,
    ) -> Result<Option<ProtectionPolicyResource>, ClientError> {
        self.client
            .new_request(Method::PUT, &id.id(), API_VERSION)
            .json(input)?
            .expect(&[StatusCode::OK, StatusCode::ACCEPTED])
            .execute()
            .await?
            .json_opt()
    }

    pub async fn delete(&self, id: &BackupPolicyId) -> Result<Poller<'_>, ClientError> {
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
        id: &BackupPolicyId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        self.delete(id).await?.poll_until_done(cancel).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn iaas_vm_policy_decodes_nested_unions() {
        let resource: ProtectionPolicyResource = serde_json::from_value(json!({
            "name": "daily",
            "properties": {
                "backupManagementType": "AzureIaasVM",
                "instantRpRetentionRangeInDays": 2,
                "policyType": "V2",
                "schedulePolicy": {
                    "schedulePolicyType": "SimpleSchedulePolicyV2",
                    "scheduleRunFrequency": "Daily",
                    "dailySchedule": {"scheduleRunTimes": ["2024-01-01T23:00:00Z"]}
                },
                "retentionPolicy": {
                    "retentionPolicyType": "LongTermRetentionPolicy",
                    "dailySchedule": {
                        "retentionTimes": ["2024-01-01T23:00:00Z"],
                        "retentionDuration": {"count": 7, "durationType": "Days"}
                    }
                }
            }
        }))
        .unwrap();

        let Some(ProtectionPolicy::AzureIaasVm(policy)) = &resource.properties else {
            panic!("expected an IaaS VM policy, got {:?}", resource.properties);
        };
        assert_eq!(policy.policy_type, Some(IaasVmPolicyType::V2));
        let Some(SchedulePolicy::SimpleV2(schedule)) = &policy.schedule_policy else {
            panic!("expected a v2 schedule");
        };
        assert_eq!(schedule.schedule_run_frequency, Some(ScheduleRunType::DAILY));
        let Some(RetentionPolicy::LongTerm(retention)) = &policy.retention_policy else {
            panic!("expected a long term retention");
        };
        let duration = retention
            .daily_schedule
            .as_ref()
            .and_then(|daily| daily.retention_duration.as_ref())
            .unwrap();
        assert_eq!(duration.count, Some(7));
        assert_eq!(duration.duration_type, Some(RetentionDurationType::DAYS));
    }

    #[test]
    fn workload_policy_keeps_unknown_sub_schedule() {
        let input = json!({
            "backupManagementType": "AzureWorkload",
            "workLoadType": "SQLDataBase",
            "subProtectionPolicy": [{
                "policyType": "Full",
                "schedulePolicy": {"schedulePolicyType": "CronSchedulePolicy", "cron": "0 3 * * *"}
            }]
        });
        let policy: ProtectionPolicy = serde_json::from_value(input.clone()).unwrap();
        let ProtectionPolicy::AzureWorkload(workload) = &policy else {
            panic!("expected a workload policy");
        };
        assert_eq!(workload.work_load_type, Some(WorkloadType::SQL_DATA_BASE));
        let sub = &workload.sub_protection_policy.as_ref().unwrap()[0];
        let Some(SchedulePolicy::Raw(raw)) = &sub.schedule_policy else {
            panic!("expected an unmodelled schedule");
        };
        assert_eq!(raw.base.schedule_policy_type, "CronSchedulePolicy");
        assert_eq!(serde_json::to_value(&policy).unwrap(), input);
    }

    #[test]
    fn mab_policy_serializes_discriminator() {
        let policy = ProtectionPolicy::from(MabProtectionPolicy {
            retention_policy: Some(
                SimpleRetentionPolicy {
                    retention_duration: Some(RetentionDuration {
                        count: Some(30),
                        duration_type: Some(RetentionDurationType::DAYS),
                    }),
                }
                .into(),
            ),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&policy).unwrap(),
            json!({
                "backupManagementType": "MAB",
                "retentionPolicy": {
                    "retentionPolicyType": "SimpleRetentionPolicy",
                    "retentionDuration": {"count": 30, "durationType": "Days"}
                }
            })
        );
    }
}
