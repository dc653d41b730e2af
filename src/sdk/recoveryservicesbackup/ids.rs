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

use std::fmt;

use crate::sdk::resourceids::{describe, ParseError, ParseResult, ResourceId, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackupPolicyId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub vault_name: String,
    pub backup_policy_name: String,
}

impl BackupPolicyId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        vault_name: impl Into<String>,
        backup_policy_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            vault_name: vault_name.into(),
            backup_policy_name: backup_policy_name.into(),
        }
    }
}

impl ResourceId for BackupPolicyId {
    const NAME: &'static str = "Backup Policy";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftRecoveryServices", "Microsoft.RecoveryServices"),
            Segment::static_segment("staticVaults", "vaults"),
            Segment::user_specified("vaultName", "vaultValue"),
            Segment::static_segment("staticBackupPolicies", "backupPolicies"),
            Segment::user_specified("backupPolicyName", "backupPolicyValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            vault_name: result.get("vaultName")?,
            backup_policy_name: result.get("backupPolicyName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.RecoveryServices/vaults/{}/backupPolicies/{}",
            self.subscription_id, self.resource_group_name, self.vault_name, self.backup_policy_name
        )
    }
}

impl fmt::Display for BackupPolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Vault Name", &self.vault_name),
                ("Backup Policy Name", &self.backup_policy_name),
            ],
        )
    }
}
