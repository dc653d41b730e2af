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

//! Provider block and its `ARM_*` environment fallbacks.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tf_provider::schema::{AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::ValueString;
use tf_provider::{map, AttributePath, Diagnostics};

use crate::utils::{attribute, known_str, WithSchema};

/// Sovereign cloud endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudEnvironment {
    pub name: &'static str,
    pub login_endpoint: &'static str,
    pub resource_manager_endpoint: &'static str,
    pub token_scope: &'static str,
}

pub const DEFAULT_ENVIRONMENT: &str = "public";

lazy_static! {
    static ref ENVIRONMENTS: HashMap<&'static str, CloudEnvironment> = [
        CloudEnvironment {
            name: "public",
            login_endpoint: "https://login.microsoftonline.com/",
            resource_manager_endpoint: "https://management.azure.com/",
            token_scope: "https://management.azure.com/.default",
        },
        CloudEnvironment {
            name: "usgovernment",
            login_endpoint: "https://login.microsoftonline.us/",
            resource_manager_endpoint: "https://management.usgovcloudapi.net/",
            token_scope: "https://management.usgovcloudapi.net/.default",
        },
        CloudEnvironment {
            name: "china",
            login_endpoint: "https://login.chinacloudapi.cn/",
            resource_manager_endpoint: "https://management.chinacloudapi.cn/",
            token_scope: "https://management.chinacloudapi.cn/.default",
        },
    ]
    .into_iter()
    .map(|env| (env.name, env))
    .collect();
}

impl CloudEnvironment {
    pub fn lookup(name: &str) -> Option<&'static CloudEnvironment> {
        ENVIRONMENTS.get(name.trim().to_ascii_lowercase().as_str())
    }

    pub fn names() -> Vec<&'static str> {
        let mut names: Vec<_> = ENVIRONMENTS.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig<'a> {
    pub subscription_id: ValueString<'a>,
    pub tenant_id: ValueString<'a>,
    pub client_id: ValueString<'a>,
    pub client_secret: ValueString<'a>,
    pub environment: ValueString<'a>,
}

impl<'a> WithSchema for ProviderConfig<'a> {
    fn schema() -> Schema {
        let optional = |description: &str| {
            attribute(AttributeType::String, AttributeConstraint::Optional, description)
        };
        let mut client_secret =
            optional("Client secret of the service principal. Falls back to `ARM_CLIENT_SECRET`");
        client_secret.sensitive = true;

        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "subscription_id" => optional("Subscription to manage. Falls back to `ARM_SUBSCRIPTION_ID`"),
                    "tenant_id"       => optional("Azure AD tenant. Falls back to `ARM_TENANT_ID`"),
                    "client_id"       => optional("Client ID of the service principal. Falls back to `ARM_CLIENT_ID`"),
                    "client_secret"   => client_secret,
                    "environment"     => optional("Cloud environment: `public`, `usgovernment` or `china`. Falls back to `ARM_ENVIRONMENT`"),
                },
                description: Description::plain("Azure Resource Manager"),
                ..Default::default()
            },
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("`{attribute}` must be set in the provider block or through `{variable}`")]
    Missing {
        attribute: &'static str,
        variable: &'static str,
    },
    #[error("unknown environment `{0}`")]
    UnknownEnvironment(String),
}

impl ConfigError {
    pub fn attribute(&self) -> &'static str {
        match self {
            Self::Missing { attribute, .. } => attribute,
            Self::UnknownEnvironment(_) => "environment",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ClientSecret {
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClientSecret {
                tenant_id,
                client_id,
                ..
            } => f
                .debug_struct("ClientSecret")
                .field("tenant_id", tenant_id)
                .field("client_id", client_id)
                .finish_non_exhaustive(),
            Self::AccessToken(_) => f.write_str("AccessToken(..)"),
        }
    }
}

/// Provider settings once the environment fallbacks are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub subscription_id: String,
    pub environment: &'static CloudEnvironment,
    pub credentials: Credentials,
}

impl Settings {
    pub fn from_env(config: &ProviderConfig<'_>) -> Result<Self, ConfigError> {
        Self::resolve(config, |var| std::env::var(var).ok())
    }

    pub fn resolve(
        config: &ProviderConfig<'_>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let setting = |value: &ValueString<'_>, variable: &str| {
            known_str(value)
                .map(str::to_owned)
                .or_else(|| lookup(variable).filter(|value| !value.is_empty()))
        };
        let required = |value: &ValueString<'_>, attribute: &'static str, variable: &'static str| {
            setting(value, variable).ok_or(ConfigError::Missing {
                attribute,
                variable,
            })
        };

        let subscription_id =
            required(&config.subscription_id, "subscription_id", "ARM_SUBSCRIPTION_ID")?;

        let environment = setting(&config.environment, "ARM_ENVIRONMENT")
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned());
        let environment = CloudEnvironment::lookup(&environment)
            .ok_or(ConfigError::UnknownEnvironment(environment))?;

        let client_secret = setting(&config.client_secret, "ARM_CLIENT_SECRET");
        let access_token = lookup("ARM_ACCESS_TOKEN").filter(|token| !token.is_empty());
        let credentials = match (client_secret, access_token) {
            (None, Some(token)) => Credentials::AccessToken(token),
            (client_secret, _) => Credentials::ClientSecret {
                tenant_id: required(&config.tenant_id, "tenant_id", "ARM_TENANT_ID")?,
                client_id: required(&config.client_id, "client_id", "ARM_CLIENT_ID")?,
                client_secret: client_secret.ok_or(ConfigError::Missing {
                    attribute: "client_secret",
                    variable: "ARM_CLIENT_SECRET",
                })?,
            },
        };

        Ok(Self {
            subscription_id,
            environment,
            credentials,
        })
    }
}

impl<'a> ProviderConfig<'a> {
    pub(crate) fn validate(&self, diags: &mut Diagnostics) {
        if let Some(environment) = known_str(&self.environment) {
            if CloudEnvironment::lookup(environment).is_none() {
                diags.error(
                    "Unknown environment",
                    format!(
                        "`{environment}` is not one of: {}",
                        CloudEnvironment::names().join(", ")
                    ),
                    AttributePath::new("environment"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tf_provider::value::Value;

    use super::*;
    use crate::utils::owned;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn environment_variables_fill_missing_attributes() {
        let settings = Settings::resolve(
            &ProviderConfig {
                subscription_id: owned("sub-from-config"),
                ..Default::default()
            },
            env(&[
                ("ARM_SUBSCRIPTION_ID", "sub-from-env"),
                ("ARM_TENANT_ID", "tenant"),
                ("ARM_CLIENT_ID", "client"),
                ("ARM_CLIENT_SECRET", "secret"),
                ("ARM_ENVIRONMENT", "China"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.subscription_id, "sub-from-config");
        assert_eq!(settings.environment.name, "china");
        assert_eq!(
            settings.credentials,
            Credentials::ClientSecret {
                tenant_id: "tenant".into(),
                client_id: "client".into(),
                client_secret: "secret".into(),
            }
        );
        assert!(!format!("{:?}", settings.credentials).contains("secret\""));
    }

    #[test]
    fn access_token_without_secret() {
        let settings = Settings::resolve(
            &ProviderConfig::default(),
            env(&[("ARM_SUBSCRIPTION_ID", "sub"), ("ARM_ACCESS_TOKEN", "tok")]),
        )
        .unwrap();
        assert_eq!(settings.credentials, Credentials::AccessToken("tok".into()));
        assert_eq!(settings.environment.name, DEFAULT_ENVIRONMENT);
    }

    #[test]
    fn missing_values_name_the_attribute() {
        let err = Settings::resolve(&ProviderConfig::default(), env(&[])).unwrap_err();
        assert_eq!(err.attribute(), "subscription_id");

        let err = Settings::resolve(
            &ProviderConfig {
                subscription_id: owned("sub"),
                tenant_id: owned("tenant"),
                client_id: owned("client"),
                ..Default::default()
            },
            env(&[]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing {
                attribute: "client_secret",
                variable: "ARM_CLIENT_SECRET"
            }
        );
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let config = ProviderConfig {
            subscription_id: owned("sub"),
            environment: owned("mars"),
            ..Default::default()
        };
        assert_eq!(
            Settings::resolve(&config, env(&[("ARM_ACCESS_TOKEN", "t")])).unwrap_err(),
            ConfigError::UnknownEnvironment("mars".into())
        );

        let mut diags = Diagnostics::default();
        config.validate(&mut diags);
        assert_eq!(diags.errors.len(), 1);

        let mut diags = Diagnostics::default();
        ProviderConfig {
            environment: Value::Unknown,
            ..Default::default()
        }
        .validate(&mut diags);
        assert!(diags.errors.is_empty());
    }
}
