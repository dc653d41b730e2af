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

//! Terraform provider for Azure Resource Manager.
//!
//! [`sdk`] holds the typed resource manager clients, [`services`] the
//! Terraform resources and data sources built on top of them.

pub mod clients;
pub mod config;
pub mod logging;
pub mod provider;
pub mod sdk;
pub mod services;
mod utils;

pub use provider::{AzureRmProvider, PROVIDER_NAME};
