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

//! Diagnostic logging to stderr.
//!
//! Stdout carries the plugin handshake, so every event goes to stderr where
//! Terraform collects it. The level follows `TF_LOG_PROVIDER_AZURERM`, then
//! `TF_LOG`; `RUST_LOG` style directives are accepted as well.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LEVEL_VARS: &[&str] = &["TF_LOG_PROVIDER_AZURERM", "TF_LOG"];
const DEFAULT_LEVEL: &str = "warn";

/// Map a Terraform log level to a filter directive.
fn directive(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "trace" | "json" => Some("trace"),
        "debug" => Some("debug"),
        "info" => Some("info"),
        "warn" => Some("warn"),
        "error" => Some("error"),
        "off" => Some("off"),
        _ => None,
    }
}

fn build_filter(lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    for var in LEVEL_VARS {
        if let Some(level) = lookup(var).as_deref().and_then(directive) {
            return EnvFilter::new(format!("{level},hyper=warn,reqwest=warn,h2=warn"));
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global subscriber; later calls are no-ops.
pub fn init() {
    let filter = build_filter(|var| std::env::var(var).ok());
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    // already installed when the host runs several providers in one process
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terraform_levels_are_mapped() {
        assert_eq!(directive("DEBUG"), Some("debug"));
        assert_eq!(directive("JSON"), Some("trace"));
        assert_eq!(directive(" off "), Some("off"));
        assert_eq!(directive("verbose"), None);
        assert_eq!(directive(""), None);
    }

    #[test]
    fn provider_variable_wins() {
        let filter = build_filter(|var| match var {
            "TF_LOG_PROVIDER_AZURERM" => Some("ERROR".into()),
            "TF_LOG" => Some("TRACE".into()),
            _ => None,
        });
        let rendered = filter.to_string();
        assert!(rendered.contains("error"));
        assert!(!rendered.contains("trace"));

        let filter = build_filter(|var| (var == "TF_LOG").then(|| "info".into()));
        assert!(filter.to_string().contains("info"));
    }
}
