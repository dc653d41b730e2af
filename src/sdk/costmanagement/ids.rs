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

/// Export living under an arbitrary scope (subscription, resource group,
/// billing account, management group...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopedExportId {
    pub scope: String,
    pub export_name: String,
}

impl ScopedExportId {
    pub fn new(scope: impl Into<String>, export_name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            export_name: export_name.into(),
        }
    }
}

impl ResourceId for ScopedExportId {
    const NAME: &'static str = "Scoped Export";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::scope("scope"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftCostManagement", "Microsoft.CostManagement"),
            Segment::static_segment("staticExports", "exports"),
            Segment::user_specified("exportName", "exportName"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            scope: result.get("scope")?,
            export_name: result.get("exportName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/{}/providers/Microsoft.CostManagement/exports/{}",
            self.scope.trim_start_matches('/'),
            self.export_name
        )
    }
}

impl fmt::Display for ScopedExportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[("Scope", &self.scope), ("Export Name", &self.export_name)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_keeps_nested_paths() {
        let input = "/providers/Microsoft.Billing/billingAccounts/1234/providers/Microsoft.CostManagement/exports/monthly";
        let id = ScopedExportId::parse(input).unwrap();
        assert_eq!(id.scope, "/providers/Microsoft.Billing/billingAccounts/1234");
        assert_eq!(id.export_name, "monthly");
        assert_eq!(id.id(), input);
    }

    #[test]
    fn scope_is_required() {
        assert!(ScopedExportId::parse("/providers/Microsoft.CostManagement/exports/monthly").is_err());
    }

    #[test]
    fn round_trip() {
        let id = ScopedExportId::new("/subscriptions/sub1", "daily");
        assert_eq!(
            id.id(),
            "/subscriptions/sub1/providers/Microsoft.CostManagement/exports/daily"
        );
        assert_eq!(ScopedExportId::parse(&id.id()).unwrap(), id);
    }
}
