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
pub struct LabId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub lab_name: String,
}

impl LabId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        lab_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            lab_name: lab_name.into(),
        }
    }
}

impl ResourceId for LabId {
    const NAME: &'static str = "Lab";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftLabServices", "Microsoft.LabServices"),
            Segment::static_segment("staticLabs", "labs"),
            Segment::user_specified("labName", "labValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            lab_name: result.get("labName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.LabServices/labs/{}",
            self.subscription_id, self.resource_group_name, self.lab_name
        )
    }
}

impl fmt::Display for LabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Lab Name", &self.lab_name),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub lab_name: String,
    pub schedule_name: String,
}

impl ScheduleId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        lab_name: impl Into<String>,
        schedule_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            lab_name: lab_name.into(),
            schedule_name: schedule_name.into(),
        }
    }

    pub fn lab_id(&self) -> LabId {
        LabId::new(&self.subscription_id, &self.resource_group_name, &self.lab_name)
    }
}

impl ResourceId for ScheduleId {
    const NAME: &'static str = "Schedule";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftLabServices", "Microsoft.LabServices"),
            Segment::static_segment("staticLabs", "labs"),
            Segment::user_specified("labName", "labValue"),
            Segment::static_segment("staticSchedules", "schedules"),
            Segment::user_specified("scheduleName", "scheduleValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            lab_name: result.get("labName")?,
            schedule_name: result.get("scheduleName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.LabServices/labs/{}/schedules/{}",
            self.subscription_id, self.resource_group_name, self.lab_name, self.schedule_name
        )
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Lab Name", &self.lab_name),
                ("Schedule Name", &self.schedule_name),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_id_format() {
        let id = ScheduleId::new("sub1", "rg1", "lab1", "sched1");
        assert_eq!(
            id.id(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1/schedules/sched1"
        );
        assert_eq!(ScheduleId::parse(&id.id()).unwrap(), id);
        assert_eq!(id.lab_id(), LabId::new("sub1", "rg1", "lab1"));
    }

    #[test]
    fn schedule_id_missing_segments() {
        for input in [
            "/subscriptions/sub1",
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1",
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1/schedules/",
        ] {
            assert!(ScheduleId::parse(input).is_err(), "{input}");
        }
    }

    #[test]
    fn schedule_id_insensitive() {
        let id = ScheduleId::parse_insensitively(
            "/SUBSCRIPTIONS/sub1/RESOURCEGROUPS/rg1/PROVIDERS/microsoft.labservices/LABS/Lab1/SCHEDULES/Sched1",
        )
        .unwrap();
        assert_eq!(id, ScheduleId::new("sub1", "rg1", "Lab1", "Sched1"));
    }
}
