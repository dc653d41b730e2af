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

use serde::{Deserialize, Serialize};

use crate::sdk::common::Tags;
use crate::sdk::enums::string_enum;

string_enum! {
    pub struct FailoverGroupReplicationRole {
        PRIMARY = "Primary",
        SECONDARY = "Secondary",
    }
}

string_enum! {
    pub struct ReadOnlyEndpointFailoverPolicy {
        DISABLED = "Disabled",
        ENABLED = "Enabled",
    }
}

string_enum! {
    pub struct ReadWriteEndpointFailoverPolicy {
        AUTOMATIC = "Automatic",
        MANUAL = "Manual",
    }
}

string_enum! {
    pub struct SecondaryType {
        GEO = "Geo",
        STANDBY = "Standby",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverGroupReadWriteEndpoint {
    pub failover_policy: ReadWriteEndpointFailoverPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover_with_data_loss_grace_period_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverGroupReadOnlyEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failover_policy: Option<ReadOnlyEndpointFailoverPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_server: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInfo {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_role: Option<FailoverGroupReplicationRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverGroupProperties {
    pub read_write_endpoint: FailoverGroupReadWriteEndpoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_endpoint: Option<FailoverGroupReadOnlyEndpoint>,
    #[serde(default)]
    pub partner_servers: Vec<PartnerInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub databases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_type: Option<SecondaryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_role: Option<FailoverGroupReplicationRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FailoverGroupProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailoverGroupUpdateProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_write_endpoint: Option<FailoverGroupReadWriteEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_endpoint: Option<FailoverGroupReadOnlyEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub databases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_servers: Option<Vec<PartnerInfo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_type: Option<SecondaryType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FailoverGroupUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<FailoverGroupUpdateProperties>,
}
