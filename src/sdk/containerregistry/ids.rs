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
pub struct RegistryId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub registry_name: String,
}

impl RegistryId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        registry_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            registry_name: registry_name.into(),
        }
    }
}

impl ResourceId for RegistryId {
    const NAME: &'static str = "Registry";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftContainerRegistry", "Microsoft.ContainerRegistry"),
            Segment::static_segment("staticRegistries", "registries"),
            Segment::user_specified("registryName", "registryValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            registry_name: result.get("registryName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ContainerRegistry/registries/{}",
            self.subscription_id, self.resource_group_name, self.registry_name
        )
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Registry Name", &self.registry_name),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub registry_name: String,
    pub run_id: String,
}

impl RunId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        registry_name: impl Into<String>,
        run_id: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            registry_name: registry_name.into(),
            run_id: run_id.into(),
        }
    }

    pub fn registry_id(&self) -> RegistryId {
        RegistryId::new(&self.subscription_id, &self.resource_group_name, &self.registry_name)
    }
}

impl ResourceId for RunId {
    const NAME: &'static str = "Run";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftContainerRegistry", "Microsoft.ContainerRegistry"),
            Segment::static_segment("staticRegistries", "registries"),
            Segment::user_specified("registryName", "registryValue"),
            Segment::static_segment("staticRuns", "runs"),
            Segment::user_specified("runId", "runIdValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            registry_name: result.get("registryName")?,
            run_id: result.get("runId")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.ContainerRegistry/registries/{}/runs/{}",
            self.subscription_id, self.resource_group_name, self.registry_name, self.run_id
        )
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Registry Name", &self.registry_name),
                ("Run", &self.run_id),
            ],
        )
    }
}
