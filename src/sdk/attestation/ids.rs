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
pub struct AttestationProviderId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub attestation_provider_name: String,
}

impl AttestationProviderId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        attestation_provider_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            attestation_provider_name: attestation_provider_name.into(),
        }
    }

    pub fn resource_group_id(&self) -> ResourceGroupId {
        ResourceGroupId::new(&self.subscription_id, &self.resource_group_name)
    }
}

impl ResourceId for AttestationProviderId {
    const NAME: &'static str = "Attestation Provider";

    fn segments() -> &'static [Segment] {
        const SEGMENTS: &[Segment] = &[
            Segment::static_segment("staticSubscriptions", "subscriptions"),
            Segment::subscription_id("subscriptionId"),
            Segment::static_segment("staticResourceGroups", "resourceGroups"),
            Segment::resource_group("resourceGroupName"),
            Segment::static_segment("staticProviders", "providers"),
            Segment::resource_provider("staticMicrosoftAttestation", "Microsoft.Attestation"),
            Segment::static_segment("staticAttestationProviders", "attestationProviders"),
            Segment::user_specified("attestationProviderName", "attestationProviderValue"),
        ];
        SEGMENTS
    }

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: result.get("subscriptionId")?,
            resource_group_name: result.get("resourceGroupName")?,
            attestation_provider_name: result.get("attestationProviderName")?,
        })
    }

    fn id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Attestation/attestationProviders/{}",
            self.subscription_id, self.resource_group_name, self.attestation_provider_name
        )
    }
}

impl fmt::Display for AttestationProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        describe(
            f,
            Self::NAME,
            &[
                ("Subscription", &self.subscription_id),
                ("Resource Group Name", &self.resource_group_name),
                ("Attestation Provider Name", &self.attestation_provider_name),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insensitive_parse_preserves_user_values() {
        let id = AttestationProviderId::parse_insensitively(
            "/subscriptions/sub1/resourceGroups/rg1/providers/MICROSOFT.ATTESTATION/ATTESTATIONPROVIDERS/MyProvider",
        )
        .unwrap();
        assert_eq!(id.attestation_provider_name, "MyProvider");
        assert_eq!(
            id.id(),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Attestation/attestationProviders/MyProvider"
        );
    }

    #[test]
    fn sensitive_parse_rejects_other_casing() {
        assert!(AttestationProviderId::parse(
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Attestation/ATTESTATIONPROVIDERS/p"
        )
        .is_err());
    }
}
