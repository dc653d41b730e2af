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

//! Canonical casing of resource IDs returned by the API.
//!
//! ARM does not preserve the casing of the literal parts of an ID
//! (`resourcegroups`, `Microsoft.labservices`, ...). The [`Registry`] knows
//! every ID type of the provider and rewrites such IDs to their canonical
//! form while keeping user-specified values untouched.

use tracing::trace;

use super::resourceids::{Parser, ResourceId};

const KNOWN_KEYWORDS: &[&str] = &["subscriptions", "resourceGroups", "providers"];

#[derive(Debug, Default, Clone)]
pub struct Registry {
    parsers: Vec<Parser>,
}

impl Registry {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn register<T: ResourceId>(&mut self) -> &mut Self {
        self.parsers.push(Parser::from_resource_id::<T>());
        self
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Recase `input` using the first registered ID type matching it.
    ///
    /// Unknown IDs only get the well-known keywords recased.
    pub fn recase(&self, input: &str) -> String {
        for parser in &self.parsers {
            if let Ok(result) = parser.parse(input, true) {
                trace!(id_type = result.id_type, "recased resource ID");
                return result.rebuild();
            }
        }
        recase_keywords(input)
    }

    /// Recase `input` as a `T`, falling back to keyword recasing.
    pub fn recase_as<T: ResourceId>(&self, input: &str) -> String {
        match Parser::from_resource_id::<T>().parse(input, true) {
            Ok(result) => result.rebuild(),
            Err(_) => recase_keywords(input),
        }
    }
}

fn recase_keywords(input: &str) -> String {
    input
        .split('/')
        .enumerate()
        .map(|(i, part)| {
            // keys sit at odd positions because of the leading slash
            if i % 2 == 1 {
                if let Some(keyword) = KNOWN_KEYWORDS
                    .iter()
                    .find(|keyword| keyword.eq_ignore_ascii_case(part))
                {
                    return *keyword;
                }
            }
            part
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::resourceids::ResourceGroupId;

    #[test]
    fn recases_registered_types() {
        let mut registry = Registry::new();
        registry.register::<ResourceGroupId>();
        assert_eq!(
            registry.recase("/SUBSCRIPTIONS/Sub1/RESOURCEGROUPS/My-Rg"),
            "/subscriptions/Sub1/resourceGroups/My-Rg"
        );
    }

    #[test]
    fn unknown_types_get_keywords_recased() {
        let registry = Registry::new();
        assert_eq!(
            registry.recase("/SUBSCRIPTIONS/sub1/resourcegroups/rg1/PROVIDERS/Microsoft.Foo/bars/Baz"),
            "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Foo/bars/Baz"
        );
    }

    #[test]
    fn values_equal_to_keywords_are_untouched() {
        let registry = Registry::new();
        assert_eq!(
            registry.recase("/subscriptions/sub1/resourceGroups/PROVIDERS"),
            "/subscriptions/sub1/resourceGroups/PROVIDERS"
        );
    }
}
