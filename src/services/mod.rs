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

//! Terraform resources and data sources, one module per Azure service.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tf_provider::{AttributePath, Diagnostics};
use tracing::warn;

use crate::sdk::client::ClientError;

pub mod attestation;
pub mod devcenter;
pub mod digitaltwins;
pub mod labservice;

/// Time allowed for each operation of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Timeouts {
    pub create: Duration,
    pub read: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl Timeouts {
    pub const fn minutes(create: u64, read: u64, update: u64, delete: u64) -> Self {
        Self {
            create: Duration::from_secs(create * 60),
            read: Duration::from_secs(read * 60),
            update: Duration::from_secs(update * 60),
            delete: Duration::from_secs(delete * 60),
        }
    }
}

/// Run `future`, failing once `timeout` elapses. Dropping the future stops
/// any polling in flight.
pub(crate) async fn within<T>(
    timeout: Duration,
    operation: &str,
    future: impl Future<Output = Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(timeout, future).await {
        Ok(result) => result,
        Err(_) => Err(anyhow!(
            "{operation} did not complete within {} seconds",
            timeout.as_secs()
        )),
    }
}

/// `None` when the service answered 404.
pub(crate) fn found<T>(result: Result<T, ClientError>) -> Result<Option<T>, ClientError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.was_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

pub(crate) fn report(diags: &mut Diagnostics, summary: &str, err: &anyhow::Error, attr_path: AttributePath) {
    diags.error(summary.to_owned(), format!("{err:#}"), attr_path);
}

pub(crate) fn requires_import(diags: &mut Diagnostics, resource_type: &str, id: &str) {
    diags.root_error(
        "Resource already exists",
        format!(
            "A resource with the ID \"{id}\" already exists - to be managed via Terraform this resource needs to be imported into the State. Please see the resource documentation for \"{resource_type}\" for more information."
        ),
    );
}

pub(crate) fn gone(diags: &mut Diagnostics, resource_type: &str, id: &str) {
    warn!(resource_type, id, "resource no longer exists, removing from state");
    diags.root_warning(
        "Resource not found",
        format!("{resource_type} \"{id}\" was not found and has been removed from the state."),
    );
}

/// Name of a resource: letters, digits, `-`, `_`, `.`, `(` and `)`.
pub(crate) fn validate_name(diags: &mut Diagnostics, name: &str, max_len: usize, attr_path: AttributePath) {
    let valid = !name.is_empty()
        && name.len() <= max_len
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')'))
        && !name.ends_with('.');
    if !valid {
        diags.error(
            "Invalid name",
            format!(
                "`{name}` must be 1 to {max_len} characters of letters, digits, `-`, `_`, `.`, `(` and `)`, not ending with `.`"
            ),
            attr_path,
        );
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[tokio::test]
    async fn within_fails_after_timeout() {
        let err = within(Duration::from_millis(10), "Creating", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("Creating did not complete"));

        assert_eq!(within(Duration::from_secs(5), "Reading", async { Ok(3) }).await.unwrap(), 3);
    }

    #[test]
    fn not_found_is_none() {
        let not_found = ClientError::UnexpectedStatus {
            method: reqwest::Method::GET,
            url: "https://management.azure.com/x".into(),
            status: StatusCode::NOT_FOUND,
            error: None,
            body: Default::default(),
        };
        assert_eq!(found(Err::<(), _>(not_found)).unwrap(), None);
        assert_eq!(found(Ok::<_, ClientError>(1)).unwrap(), Some(1));
    }

    #[test]
    fn names_are_checked() {
        let mut diags = Diagnostics::default();
        validate_name(&mut diags, "sched-1_(a)", 100, AttributePath::new("name"));
        assert!(diags.errors.is_empty());
        validate_name(&mut diags, "bad name", 100, AttributePath::new("name"));
        validate_name(&mut diags, "trailing.", 100, AttributePath::new("name"));
        validate_name(&mut diags, "", 100, AttributePath::new("name"));
        assert_eq!(diags.errors.len(), 3);
    }
}
