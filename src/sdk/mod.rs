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

//! Typed Azure Resource Manager SDK used by the provider.

pub mod client;
pub mod common;
pub mod enums;
pub mod polymorphic;
pub mod recaser;
pub mod resourceids;

pub mod attestation;
pub mod containerregistry;
pub mod costmanagement;
pub mod datafactory;
pub mod devcenter;
pub mod digitaltwins;
pub mod labservices;
pub mod network;
pub mod recoveryservicesbackup;
pub mod sql;

use recaser::Registry;

/// Register every resource ID type known to the SDK.
///
/// Deeper IDs come first so that the most specific type wins.
pub fn register_resource_ids(registry: &mut Registry) {
    registry
        .register::<devcenter::ImageId>()
        .register::<devcenter::GalleryId>()
        .register::<devcenter::DevCenterId>()
        .register::<labservices::ScheduleId>()
        .register::<labservices::LabId>()
        .register::<sql::FailoverGroupId>()
        .register::<sql::ServerId>()
        .register::<containerregistry::RunId>()
        .register::<containerregistry::RegistryId>()
        .register::<datafactory::DataFlowId>()
        .register::<datafactory::FactoryId>()
        .register::<recoveryservicesbackup::BackupPolicyId>()
        .register::<attestation::AttestationProviderId>()
        .register::<digitaltwins::DigitalTwinsInstanceId>()
        .register::<network::LoadBalancerId>()
        .register::<costmanagement::ScopedExportId>()
        .register::<resourceids::ResourceGroupId>()
        .register::<resourceids::SubscriptionId>();
}

/// Registry holding every resource ID type of the SDK.
pub fn resource_id_registry() -> Registry {
    let mut registry = Registry::new();
    register_resource_ids(&mut registry);
    registry
}
