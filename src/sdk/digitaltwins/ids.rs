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

use crate::sdk::resourceids::{describe, ParseError, ParseResult, ResourceGroupId, ResourceId, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DigitalTwinsInstanceId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub digital_twins_instance_name: String,
}

impl DigitalTwinsInstanceId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        digital_twins_instance_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            digital_twins_instance_name: digital_twins_instance_name.into(),
        }
    }

    pub fn resource_group_id(&self) -> ResourceGroupId {
        ResourceGroupId::new(&self.subscription_id, &self.resource_group_name)
    }
}

impl ResourceId for DigitalTwinsInstanceId {
    const NAME: &'static str = "Digital Twins Instance";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftDigitalTwins", "Microsoft.DigitalTwins"),
            Segment::static_segment("staticDigitalTwinsInstances", "digitalTwinsInstances"),
            Segment::user_specified("digitalTwinsInstanceName", "digitalTwinsInstanceValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            digital_twins_instance_name: result.get("digitalTwinsInstanceName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DigitalTwins/digitalTwinsInstances/{}",
            self.subscription_id, self.resource_group_name, self.digital_twins_instance_name
        )
    }
}

impl fmt::Display for DigitalTwinsInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Digital Twins Instance Name", &self.digital_twins_instance_name),
            ],
        )
    }
}
