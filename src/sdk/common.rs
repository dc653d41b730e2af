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

//! Models shared by every resource manager API.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use super::enums::string_enum;

pub type Tags = HashMap<String, String>;

string_enum! {
    pub struct CreatedByType {
        APPLICATION = "Application",
        KEY = "Key",
        MANAGED_IDENTITY = "ManagedIdentity",
        USER = "User",
    }
}

/// Metadata about the creation and last modification of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub last_modified_at: Option<OffsetDateTime>,
}

string_enum! {
    pub struct IdentityType {
        NONE = "None",
        SYSTEM_ASSIGNED = "SystemAssigned",
        USER_ASSIGNED = "UserAssigned",
        SYSTEM_ASSIGNED_USER_ASSIGNED = "SystemAssigned, UserAssigned",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentityDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
}

/// Managed identity block used by most resource types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<IdentityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_assigned_identities: Option<HashMap<String, UserAssignedIdentityDetails>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagsObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

/// Location names are compared without case nor spaces.
pub fn normalize_location(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Deserialize a patch field where `null` and absence differ.
///
/// Pair with `skip_serializing_if = "Option::is_none"`: `None` leaves the
/// field out, `Some(None)` sends an explicit `null` that clears it.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_data_timestamps() {
        let data: SystemData = serde_json::from_str(
            r#"{"createdBy": "me", "createdByType": "user", "createdAt": "2023-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(data.created_by_type, Some(CreatedByType::USER));
        assert_eq!(data.created_at.unwrap().year(), 2023);
    }

    #[test]
    fn identity_type_has_a_space() {
        let identity: Identity =
            serde_json::from_str(r#"{"type": "systemassigned, userassigned"}"#).unwrap();
        assert_eq!(identity.kind, Some(IdentityType::SYSTEM_ASSIGNED_USER_ASSIGNED));
    }

    #[test]
    fn location_normalisation() {
        assert_eq!(normalize_location("West Europe"), "westeurope");
        assert_eq!(normalize_location("westeurope"), "westeurope");
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Patch {
        #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
        notes: Option<Option<String>>,
    }

    #[test]
    fn nullable_fields_tell_null_from_absent() {
        assert_eq!(serde_json::to_string(&Patch::default()).unwrap(), "{}");
        assert_eq!(
            serde_json::to_string(&Patch { notes: Some(None) }).unwrap(),
            r#"{"notes":null}"#
        );
        let cleared: Patch = serde_json::from_str(r#"{"notes":null}"#).unwrap();
        assert_eq!(cleared.notes, Some(None));
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);
    }
}
