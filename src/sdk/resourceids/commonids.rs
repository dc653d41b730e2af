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

use super::{describe, ParseError, ParseResult, ResourceId, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    pub subscription_id: String,
}

impl SubscriptionId {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
        }
    }
}

impl ResourceId for SubscriptionId {
    const NAME: &'static str = "Subscription";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
        })
    }

    fn id(&self) -> String {
        format!("/subscriptions/{}", self.subscription_id)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, Self::NAME, &[("Subscription", &self.subscription_id)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceGroupId {
    pub subscription_id: String,
    pub resource_group_name: String,
}

impl ResourceGroupId {
    pub fn new(subscription_id: impl Into<String>, resource_group_name: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
        }
    }
}

impl ResourceId for ResourceGroupId {
    const NAME: &'static str = "Resource Group";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}",
            self.subscription_id, self.resource_group_name
        )
    }
}

impl fmt::Display for ResourceGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
            ],
        )
    }
}

/// Any ARM path used as the parent of an extension resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId {
    pub scope: String,
}

impl ScopeId {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }
}

impl ResourceId for ScopeId {
    const NAME: &'static str = "Scope";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[Segment::scope("scope")];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            scope: result.get("scope")?,
        })
    }

    fn id(&self) -> String {
        format!("/{}", self.scope.trim_start_matches('/'))
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(f, Self::NAME, &[("Scope", &self.scope)])
    }
}
