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
pub struct FactoryId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub factory_name: String,
}

impl FactoryId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        factory_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            factory_name: factory_name.into(),
        }
    }
}

impl ResourceId for FactoryId {
    const NAME: &'static str = "Factory";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftDataFactory", "Microsoft.DataFactory"),
            Segment::static_segment("staticFactories", "factories"),
            Segment::user_specified("factoryName", "factoryValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            factory_name: result.get("factoryName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DataFactory/factories/{}",
            self.subscription_id, self.resource_group_name, self.factory_name
        )
    }
}

impl fmt::Display for FactoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Factory Name", &self.factory_name),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataFlowId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub factory_name: String,
    pub data_flow_name: String,
}

impl DataFlowId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        factory_name: impl Into<String>,
        data_flow_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            factory_name: factory_name.into(),
            data_flow_name: data_flow_name.into(),
        }
    }
}

impl ResourceId for DataFlowId {
    const NAME: &'static str = "Data Flow";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftDataFactory", "Microsoft.DataFactory"),
            Segment::static_segment("staticFactories", "factories"),
            Segment::user_specified("factoryName", "factoryValue"),
            Segment::static_segment("staticDataflows", "dataflows"),
            Segment::user_specified("dataFlowName", "dataFlowValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            factory_name: result.get("factoryName")?,
            data_flow_name: result.get("dataFlowName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DataFactory/factories/{}/dataflows/{}",
            self.subscription_id, self.resource_group_name, self.factory_name, self.data_flow_name
        )
    }
}

impl fmt::Display for DataFlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Factory Name", &self.factory_name),
                ("Data Flow Name", &self.data_flow_name),
            ],
        )
    }
}
