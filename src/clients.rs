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

//! Service clients shared by every resource once the provider is configured.

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use tf_provider::Diagnostics;
use url::Url;

use crate::config::{Credentials, Settings};
use crate::sdk::attestation::AttestationProvidersClient;
use crate::sdk::client::{ArmClient, ClientSecretCredential, StaticTokenCredential, TokenCredential};
use crate::sdk::containerregistry::RunsClient;
use crate::sdk::costmanagement::ExportsClient;
use crate::sdk::datafactory::DataFlowsClient;
use crate::sdk::devcenter::ImagesClient;
use crate::sdk::digitaltwins::DigitalTwinsClient;
use crate::sdk::labservices::SchedulesClient;
use crate::sdk::network::LoadBalancersClient;
use crate::sdk::recaser::Registry;
use crate::sdk::recoveryservicesbackup::ProtectionPoliciesClient;
use crate::sdk::resource_id_registry;
use crate::sdk::sql::FailoverGroupsClient;

#[derive(Debug)]
pub struct Clients {
    pub subscription_id: String,
    pub recaser: Registry,

    pub attestation: AttestationProvidersClient,
    pub container_registry_runs: RunsClient,
    pub cost_management_exports: ExportsClient,
    pub data_factory_data_flows: DataFlowsClient,
    pub dev_center_images: ImagesClient,
    pub digital_twins: DigitalTwinsClient,
    pub lab_service_schedules: SchedulesClient,
    pub load_balancers: LoadBalancersClient,
    pub protection_policies: ProtectionPoliciesClient,
    pub sql_failover_groups: FailoverGroupsClient,
}

impl Clients {
    pub fn new(subscription_id: impl Into<String>, client: ArmClient) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            recaser: resource_id_registry(),
            attestation: AttestationProvidersClient::new(client.clone()),
            container_registry_runs: RunsClient::new(client.clone()),
            cost_management_exports: ExportsClient::new(client.clone()),
            data_factory_data_flows: DataFlowsClient::new(client.clone()),
            dev_center_images: ImagesClient::new(client.clone()),
            digital_twins: DigitalTwinsClient::new(client.clone()),
            lab_service_schedules: SchedulesClient::new(client.clone()),
            load_balancers: LoadBalancersClient::new(client.clone()),
            protection_policies: ProtectionPoliciesClient::new(client.clone()),
            sql_failover_groups: FailoverGroupsClient::new(client),
        }
    }

    /// Build the credential and the resource manager client from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Could not build the HTTP client")?;
        let environment = settings.environment;

        let credential: Arc<dyn TokenCredential> = match &settings.credentials {
            Credentials::AccessToken(token) => Arc::new(StaticTokenCredential::new(token.as_str())),
            Credentials::ClientSecret {
                tenant_id,
                client_id,
                client_secret,
            } => {
                let authority = Url::parse(environment.login_endpoint)
                    .with_context(|| format!("Invalid login endpoint of {}", environment.name))?;
                Arc::new(
                    ClientSecretCredential::new(
                        http.clone(),
                        authority,
                        tenant_id.as_str(),
                        client_id.as_str(),
                        client_secret.as_str(),
                    )
                    .context("Invalid service principal")?,
                )
            }
        };

        let endpoint = Url::parse(environment.resource_manager_endpoint)
            .with_context(|| format!("Invalid resource manager endpoint of {}", environment.name))?;
        let client = ArmClient::builder(credential)
            .http_client(http)
            .endpoint(endpoint)
            .scope(environment.token_scope)
            .build()
            .context("Could not build the resource manager client")?;

        Ok(Self::new(&settings.subscription_id, client))
    }
}

/// Handle to the clients, published once by `configure`.
///
/// Resources are instantiated before the provider is configured, so they
/// keep this handle and look the clients up on every call.
#[derive(Debug, Default, Clone)]
pub struct ProviderData(Arc<OnceLock<Arc<Clients>>>);

impl ProviderData {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn configured(clients: Clients) -> Self {
        let data = Self::new();
        // freshly created, cannot be set yet
        let _ = data.0.set(Arc::new(clients));
        data
    }

    /// Publish the clients; `false` when already configured.
    pub fn set(&self, clients: Clients) -> bool {
        self.0.set(Arc::new(clients)).is_ok()
    }

    pub fn get(&self) -> Option<Arc<Clients>> {
        self.0.get().cloned()
    }

    /// The clients, or an error diagnostic when the provider is not configured.
    pub fn clients(&self, diags: &mut Diagnostics) -> Option<Arc<Clients>> {
        let clients = self.get();
        if clients.is_none() {
            diags.root_error(
                "Provider not configured",
                "The azurerm provider must be configured before resources can be managed.",
            );
        }
        clients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CloudEnvironment;

    fn settings(credentials: Credentials) -> Settings {
        Settings {
            subscription_id: "sub1".into(),
            environment: CloudEnvironment::lookup("public").unwrap(),
            credentials,
        }
    }

    #[test]
    fn clients_share_the_registry() {
        let clients = Clients::from_settings(&settings(Credentials::AccessToken("t".into()))).unwrap();
        assert_eq!(clients.subscription_id, "sub1");
        assert!(!clients.recaser.is_empty());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = Clients::from_settings(&settings(Credentials::ClientSecret {
            tenant_id: "tenant".into(),
            client_id: "client".into(),
            client_secret: String::new(),
        }))
        .unwrap_err();
        assert!(format!("{err:#}").contains("client_secret"));
    }

    #[test]
    fn provider_data_is_set_once() {
        let data = ProviderData::new();
        let mut diags = Diagnostics::default();
        assert!(data.clients(&mut diags).is_none());
        assert_eq!(diags.errors.len(), 1);

        let clients = Clients::from_settings(&settings(Credentials::AccessToken("t".into()))).unwrap();
        let shared = data.clone();
        assert!(data.set(clients));
        assert!(shared.get().is_some());

        let again = Clients::from_settings(&settings(Credentials::AccessToken("t".into()))).unwrap();
        assert!(!data.set(again));
    }
}
