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

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::schema::{AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueMap, ValueString};
use tf_provider::{map, AttributePath, Diagnostics};

use crate::sdk::attestation::{
    AttestationProvider, AttestationProviderId, AttestationServiceCreationParams,
    AttestationServiceCreationSpecificParams, JsonWebKey, JsonWebKeySet,
};
use crate::sdk::common::normalize_location;
use crate::sdk::recaser::Registry;
use crate::sdk::resourceids::ResourceId;
use crate::utils::{
    attribute, known_str, owned, owned_opt, tags_attribute, tags_from, tags_value, WithNormalize,
    WithSchema, WithValidate,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationProviderState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub resource_group_name: ValueString<'a>,
    pub location: ValueString<'a>,
    pub tags: ValueMap<'a, ValueString<'a>>,
    pub policy_signing_certificate_data: ValueString<'a>,
    pub attestation_uri: ValueString<'a>,
    pub trust_model: ValueString<'a>,
}

impl<'a> WithSchema for AttestationProviderState<'a> {
    fn schema() -> Schema {
        use AttributeConstraint::*;
        use AttributeType::*;
        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "id"                  => attribute(String, Computed, "Resource ID of the attestation provider"),
                    "name"                => attribute(String, Required, "Name of the attestation provider. Changing this forces a new resource"),
                    "resource_group_name" => attribute(String, Required, "Resource group of the attestation provider. Changing this forces a new resource"),
                    "location"            => attribute(String, Required, "Azure region. Changing this forces a new resource"),
                    "tags"                => tags_attribute(),
                    "policy_signing_certificate_data" => attribute(String, Optional, "PEM certificate used to sign policies. Changing this forces a new resource"),
                    "attestation_uri"     => attribute(String, Computed, "URI of the attestation service"),
                    "trust_model"         => attribute(String, Computed, "Trust model of the attestation service"),
                },
                description: Description::plain("Azure Attestation provider"),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl<'a> WithValidate for AttestationProviderState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Some(name) = known_str(&self.name) {
            let valid = (3..=24).contains(&name.len())
                && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
            if !valid {
                diags.error(
                    "Invalid name",
                    format!("`{name}` must be 3 to 24 lowercase letters and digits"),
                    attr_path.clone().attribute("name"),
                );
            }
        }
        if let Value::Value(location) = &self.location {
            if location.trim().is_empty() {
                diags.error_short("`location` must not be empty", attr_path.clone().attribute("location"));
            }
        }
        if let Some(pem) = known_str(&self.policy_signing_certificate_data) {
            if let Err(err) = certificate_key(pem) {
                diags.error(
                    "Invalid certificate",
                    format!("{err:#}"),
                    attr_path.clone().attribute("policy_signing_certificate_data"),
                );
            }
        }
    }
}

impl<'a> WithNormalize for AttestationProviderState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        if self.attestation_uri.is_null() {
            self.attestation_uri = Value::Unknown;
        }
        if self.trust_model.is_null() {
            self.trust_model = Value::Unknown;
        }
    }
}

/// Key of a PEM certificate, the body being the base64 DER `x5c` expects.
pub(crate) fn certificate_key(pem: &str) -> Result<JsonWebKey> {
    let mut lines = pem.lines().map(str::trim).filter(|line| !line.is_empty());
    if lines.next() != Some("-----BEGIN CERTIFICATE-----") {
        bail!("expected a PEM certificate starting with `-----BEGIN CERTIFICATE-----`");
    }
    let mut body = String::new();
    for line in lines.by_ref() {
        if line == "-----END CERTIFICATE-----" {
            if body.is_empty() {
                bail!("the certificate is empty");
            }
            return Ok(JsonWebKey {
                kty: "RSA".to_owned(),
                x5c: Some(vec![body]),
                ..Default::default()
            });
        }
        if !line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        {
            bail!("the certificate body is not base64");
        }
        body.push_str(line);
    }
    bail!("missing `-----END CERTIFICATE-----`")
}

impl<'a> AttestationProviderState<'a> {
    pub fn provider_id(&self, subscription_id: &str) -> Result<AttestationProviderId> {
        let resource_group = known_str(&self.resource_group_name)
            .ok_or_else(|| anyhow!("`resource_group_name` is not known"))?;
        let name = known_str(&self.name).ok_or_else(|| anyhow!("`name` is not known"))?;
        Ok(AttestationProviderId::new(subscription_id, resource_group, name))
    }

    pub fn stored_id(&self) -> Result<AttestationProviderId> {
        let id = known_str(&self.id).ok_or_else(|| anyhow!("`id` is not known"))?;
        Ok(AttestationProviderId::parse(id)?)
    }

    pub fn to_params(&self) -> Result<AttestationServiceCreationParams> {
        let location = known_str(&self.location).ok_or_else(|| anyhow!("`location` is not known"))?;
        let policy_signing_certificates = known_str(&self.policy_signing_certificate_data)
            .map(|pem| {
                Ok::<_, anyhow::Error>(JsonWebKeySet {
                    keys: Some(vec![certificate_key(pem)?]),
                })
            })
            .transpose()?;
        Ok(AttestationServiceCreationParams {
            location: normalize_location(location),
            tags: tags_from(&self.tags),
            properties: AttestationServiceCreationSpecificParams {
                policy_signing_certificates,
            },
        })
    }

    /// Attributes whose change cannot be applied in place.
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
        if self.policy_signing_certificate_data != prior.policy_signing_certificate_data {
            paths.push(AttributePath::new("policy_signing_certificate_data"));
        }
        paths
    }

    /// Copy the service view of the provider into the state.
    pub fn refresh(&mut self, recaser: &Registry, id: &AttestationProviderId, provider: AttestationProvider) {
        self.id = owned(
            provider
                .id
                .map_or_else(|| id.id(), |returned| recaser.recase(&returned)),
        );
        self.name = owned(id.attestation_provider_name.as_str());
        self.resource_group_name = owned(id.resource_group_name.as_str());
        // keep the user spelling of the region
        let same_location = known_str(&self.location)
            .map_or(false, |prior| normalize_location(prior) == normalize_location(&provider.location));
        if !same_location {
            self.location = owned(normalize_location(&provider.location));
        }
        self.tags = tags_value(provider.tags);
        let status = provider.properties.unwrap_or_default();
        self.attestation_uri = owned_opt(status.attest_uri);
        self.trust_model = owned_opt(status.trust_model);
    }
}
