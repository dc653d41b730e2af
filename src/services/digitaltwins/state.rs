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

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::schema::{AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueMap, ValueString};
use tf_provider::{map, AttributePath, Diagnostics};

use crate::sdk::common::{normalize_location, Identity, IdentityType};
use crate::sdk::digitaltwins::{
    DigitalTwinsDescription, DigitalTwinsInstanceId, DigitalTwinsPatchDescription,
    DigitalTwinsPatchProperties, DigitalTwinsProperties, PublicNetworkAccess,
};
use crate::sdk::recaser::Registry;
use crate::sdk::resourceids::ResourceId;
use crate::services::validate_name;
use crate::utils::{
    attribute, known_str, owned, owned_opt, tags_attribute, tags_from, tags_value, WithNormalize,
    WithSchema, WithValidate,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalTwinsState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub resource_group_name: ValueString<'a>,
    pub location: ValueString<'a>,
    pub tags: ValueMap<'a, ValueString<'a>>,
    pub public_network_access_enabled: Value<bool>,
    pub identity_type: ValueString<'a>,
    pub identity_principal_id: ValueString<'a>,
    pub identity_tenant_id: ValueString<'a>,
    pub host_name: ValueString<'a>,
}

/// Block of an instance, as a resource or as a data source.
fn block(as_data_source: bool, description: &str) -> Block {
    use AttributeConstraint::*;
    use AttributeType::*;
    let force_new = if as_data_source {
        ""
    } else {
        ". Changing this forces a new resource"
    };
    let input = || if as_data_source { Computed } else { Required };
    let optional = || if as_data_source { Computed } else { Optional };
    let optional_computed = || if as_data_source { Computed } else { OptionalComputed };
    let mut tags = tags_attribute();
    tags.constraint = optional();

    Block {
        attributes: map! {
            "id"                  => attribute(String, Computed, "Resource ID of the Digital Twins instance"),
            "name"                => attribute(String, Required, &format!("Name of the Digital Twins instance{force_new}")),
            "resource_group_name" => attribute(String, Required, &format!("Resource group of the instance{force_new}")),
            "location"            => attribute(String, input(), &format!("Azure region{force_new}")),
            "tags"                => tags,
            "public_network_access_enabled" => attribute(Bool, optional_computed(), "Whether the instance is reachable from public networks"),
            "identity_type"         => attribute(String, optional(), "Managed identity: `SystemAssigned`"),
            "identity_principal_id" => attribute(String, Computed, "Principal ID of the system assigned identity"),
            "identity_tenant_id"    => attribute(String, Computed, "Tenant ID of the system assigned identity"),
            "host_name"           => attribute(String, Computed, "API endpoint of the instance"),
        },
        description: Description::plain(description),
        ..Default::default()
    }
}

impl<'a> WithSchema for DigitalTwinsState<'a> {
    fn schema() -> Schema {
        Schema {
            version: 1,
            block: block(false, "Azure Digital Twins instance"),
        }
    }
}

/// Schema of the `azurerm_digital_twins_instance` data source.
pub(crate) fn data_source_schema() -> Schema {
    Schema {
        version: 1,
        block: block(true, "Existing Azure Digital Twins instance"),
    }
}

#[async_trait]
impl<'a> WithValidate for DigitalTwinsState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Some(name) = known_str(&self.name) {
            let valid = (3..=63).contains(&name.len())
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && name.starts_with(|c: char| c.is_ascii_alphanumeric())
                && name.ends_with(|c: char| c.is_ascii_alphanumeric());
            if !valid {
                diags.error(
                    "Invalid name",
                    format!("`{name}` must be 3 to 63 letters, digits and `-`, starting and ending with a letter or a digit"),
                    attr_path.clone().attribute("name"),
                );
            }
        }
        if let Some(resource_group) = known_str(&self.resource_group_name) {
            validate_name(diags, resource_group, 90, attr_path.clone().attribute("resource_group_name"));
        }
        if let Some(identity) = known_str(&self.identity_type) {
            if IdentityType::parse(identity) != IdentityType::SYSTEM_ASSIGNED {
                diags.error(
                    "Unsupported identity",
                    format!("`{identity}` is not supported, only `SystemAssigned` is"),
                    attr_path.clone().attribute("identity_type"),
                );
            }
        }
    }
}

impl<'a> WithNormalize for DigitalTwinsState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        if self.host_name.is_null() {
            self.host_name = Value::Unknown;
        }
        if self.public_network_access_enabled.is_null() {
            self.public_network_access_enabled = Value::Unknown;
        }
        if self.identity_type.is_null() {
            self.identity_principal_id = Value::Null;
            self.identity_tenant_id = Value::Null;
        } else if self.identity_principal_id.is_null() {
            self.identity_principal_id = Value::Unknown;
            self.identity_tenant_id = Value::Unknown;
        }
    }
}

impl<'a> DigitalTwinsState<'a> {
    pub fn instance_id(&self, subscription_id: &str) -> Result<DigitalTwinsInstanceId> {
        let resource_group = known_str(&self.resource_group_name)
            .ok_or_else(|| anyhow!("`resource_group_name` is not known"))?;
        let name = known_str(&self.name).ok_or_else(|| anyhow!("`name` is not known"))?;
        Ok(DigitalTwinsInstanceId::new(subscription_id, resource_group, name))
    }

    pub fn stored_id(&self) -> Result<DigitalTwinsInstanceId> {
        let id = known_str(&self.id).ok_or_else(|| anyhow!("`id` is not known"))?;
        Ok(DigitalTwinsInstanceId::parse(id)?)
    }

    fn identity(&self) -> Identity {
        Identity {
            kind: Some(if known_str(&self.identity_type).is_some() {
                IdentityType::SYSTEM_ASSIGNED
            } else {
                IdentityType::NONE
            }),
            ..Default::default()
        }
    }

    fn public_network_access(&self) -> Option<PublicNetworkAccess> {
        match self.public_network_access_enabled {
            Value::Value(true) => Some(PublicNetworkAccess::ENABLED),
            Value::Value(false) => Some(PublicNetworkAccess::DISABLED),
            _ => None,
        }
    }

    pub fn to_description(&self) -> Result<DigitalTwinsDescription> {
        let location = known_str(&self.location).ok_or_else(|| anyhow!("`location` is not known"))?;
        Ok(DigitalTwinsDescription {
            location: normalize_location(location),
            tags: tags_from(&self.tags),
            identity: Some(self.identity()),
            properties: Some(DigitalTwinsProperties {
                public_network_access: self.public_network_access(),
                ..Default::default()
            }),
            ..Default::default()
        })
    }

    pub fn to_patch(&self) -> DigitalTwinsPatchDescription {
        DigitalTwinsPatchDescription {
            tags: Some(tags_from(&self.tags).unwrap_or_default()),
            identity: Some(self.identity()),
            properties: Some(DigitalTwinsPatchProperties {
                public_network_access: self.public_network_access(),
            }),
        }
    }

    pub fn replaced_by(&self, prior: &Self) -> Vec<AttributePath> {
        let mut paths = Vec::new();
        if self.name != prior.name {
            paths.push(AttributePath::new("name"));
        }
        if self.resource_group_name != prior.resource_group_name {
            paths.push(AttributePath::new("resource_group_name"));
        }
        let same_location = match (known_str(&self.location), known_str(&prior.location)) {
            (Some(planned), Some(prior)) => normalize_location(planned) == normalize_location(prior),
            _ => self.location == prior.location,
        };
        if !same_location {
            paths.push(AttributePath::new("location"));
        }
        paths
    }

    /// Copy the service view of the instance into the state.
    pub fn refresh(&mut self, recaser: &Registry, id: &DigitalTwinsInstanceId, instance: DigitalTwinsDescription) {
        self.id = owned(
            instance
                .id
                .map_or_else(|| id.id(), |returned| recaser.recase(&returned)),
        );
        self.name = owned(id.digital_twins_instance_name.as_str());
        self.resource_group_name = owned(id.resource_group_name.as_str());
        let same_location = known_str(&self.location)
            .map_or(false, |prior| normalize_location(prior) == normalize_location(&instance.location));
        if !same_location {
            self.location = owned(normalize_location(&instance.location));
        }
        self.tags = tags_value(instance.tags);

        let properties = instance.properties.unwrap_or_default();
        self.host_name = owned_opt(properties.host_name);
        self.public_network_access_enabled = Value::Value(
            properties
                .public_network_access
                .map_or(true, |access| access != PublicNetworkAccess::DISABLED),
        );

        match instance.identity {
            Some(identity) if identity.kind.as_ref().map_or(false, |kind| *kind != IdentityType::NONE) => {
                self.identity_type = owned_opt(identity.kind.map(|kind| kind.as_str().to_owned()));
                self.identity_principal_id = owned_opt(identity.principal_id);
                self.identity_tenant_id = owned_opt(identity.tenant_id);
            }
            _ => {
                self.identity_type = Value::Null;
                self.identity_principal_id = Value::Null;
                self.identity_tenant_id = Value::Null;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sdk::resource_id_registry;

    fn state() -> DigitalTwinsState<'static> {
        DigitalTwinsState {
            name: owned("twins-1"),
            resource_group_name: owned("rg1"),
            location: owned("West Europe"),
            public_network_access_enabled: Value::Value(false),
            identity_type: owned("SystemAssigned"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn validation() {
        let mut diags = Diagnostics::default();
        state().validate(&mut diags, AttributePath::default()).await;
        assert!(diags.errors.is_empty());

        DigitalTwinsState {
            name: owned("-twins"),
            identity_type: owned("UserAssigned"),
            ..state()
        }
        .validate(&mut diags, AttributePath::default())
        .await;
        assert_eq!(diags.errors.len(), 2);
    }

    #[test]
    fn description_body() {
        let body = serde_json::to_value(state().to_description().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "location": "westeurope",
                "identity": {"type": "SystemAssigned"},
                "properties": {"publicNetworkAccess": "Disabled"},
            })
        );
    }

    #[test]
    fn refresh_reads_identity_and_access() {
        let id = DigitalTwinsInstanceId::new("sub1", "rg1", "twins-1");
        let mut state = state();
        state.refresh(
            &resource_id_registry(),
            &id,
            serde_json::from_value(serde_json::json!({
                "id": "/subscriptions/sub1/resourcegroups/rg1/providers/Microsoft.DigitalTwins/digitalTwinsInstances/twins-1",
                "location": "westeurope",
                "identity": {"type": "SystemAssigned", "principalId": "p1", "tenantId": "t1"},
                "properties": {"hostName": "twins-1.api.weu.digitaltwins.azure.net"},
            }))
            .unwrap(),
        );
        assert_eq!(state.id, owned(id.id()));
        assert_eq!(state.location, owned("West Europe"));
        assert_eq!(state.identity_principal_id, owned("p1"));
        assert_eq!(state.public_network_access_enabled, Value::Value(true));
        assert_eq!(state.host_name, owned("twins-1.api.weu.digitaltwins.azure.net"));
    }

    #[test]
    fn data_source_inputs() {
        let schema = data_source_schema();
        assert!(matches!(
            schema.block.attributes["name"].constraint,
            AttributeConstraint::Required
        ));
        assert!(matches!(
            schema.block.attributes["location"].constraint,
            AttributeConstraint::Computed
        ));
    }
}
