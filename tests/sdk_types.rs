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

use pretty_assertions::assert_eq;
use serde_json::json;

use terraform_provider_azurerm::sdk::attestation::AttestationProviderId;
use terraform_provider_azurerm::sdk::containerregistry::RunId;
use terraform_provider_azurerm::sdk::costmanagement::{ExportType, ScopedExportId};
use terraform_provider_azurerm::sdk::datafactory::DataFlowId;
use terraform_provider_azurerm::sdk::devcenter::ImageId;
use terraform_provider_azurerm::sdk::digitaltwins::DigitalTwinsInstanceId;
use terraform_provider_azurerm::sdk::labservices::{LabId, ScheduleId};
use terraform_provider_azurerm::sdk::network::LoadBalancerId;
use terraform_provider_azurerm::sdk::recoveryservicesbackup::{BackupPolicyId, ProtectionPolicy, SchedulePolicy};
use terraform_provider_azurerm::sdk::resource_id_registry;
use terraform_provider_azurerm::sdk::resourceids::ResourceId;
use terraform_provider_azurerm::sdk::sql::FailoverGroupId;

fn assert_round_trip<T: ResourceId + PartialEq + std::fmt::Debug>(id: T) {
    let formatted = id.id();
    assert_eq!(T::parse(&formatted).unwrap(), id);
    assert_eq!(T::parse_insensitively(&formatted.to_uppercase()).unwrap().id().len(), formatted.len());
    assert_eq!(resource_id_registry().recase(&formatted), formatted);
}

#[test]
fn ids_survive_formatting() {
    assert_round_trip(LabId::new("sub1", "rg1", "lab1"));
    assert_round_trip(ScheduleId::new("sub1", "rg1", "lab1", "evenings"));
    assert_round_trip(FailoverGroupId::new("sub1", "rg1", "server1", "group1"));
    assert_round_trip(LoadBalancerId::new("sub1", "rg1", "lb1"));
    assert_round_trip(RunId::new("sub1", "rg1", "registry1", "run1"));
    assert_round_trip(DataFlowId::new("sub1", "rg1", "factory1", "flow1"));
    assert_round_trip(BackupPolicyId::new("sub1", "rg1", "vault1", "daily"));
    assert_round_trip(AttestationProviderId::new("sub1", "rg1", "provider1"));
    assert_round_trip(DigitalTwinsInstanceId::new("sub1", "rg1", "twins1"));
    assert_round_trip(ImageId::new("sub1", "rg1", "center1", "gallery1", "image1"));
    assert_round_trip(ScopedExportId::new("/subscriptions/sub1/resourceGroups/rg1", "monthly"));
}

#[test]
fn missing_segments_are_rejected() {
    let lab = LabId::new("sub1", "rg1", "lab1").id();
    let err = ScheduleId::parse(&format!("{lab}/schedules")).unwrap_err();
    assert!(err.to_string().contains("scheduleName"), "{err}");
    assert!(ScheduleId::parse(&lab).is_err());
    assert!(LabId::parse("").is_err());
}

#[test]
fn insensitive_parsing_keeps_user_values() {
    let input = "/subscriptions/Sub1/resourcegroups/My-RG/providers/microsoft.attestation/ATTESTATIONPROVIDERS/MyProvider";
    assert!(AttestationProviderId::parse(input).is_err());

    let id = AttestationProviderId::parse_insensitively(input).unwrap();
    assert_eq!(id.subscription_id, "Sub1");
    assert_eq!(id.resource_group_name, "My-RG");
    assert_eq!(
        id.id(),
        "/subscriptions/Sub1/resourceGroups/My-RG/providers/Microsoft.Attestation/attestationProviders/MyProvider"
    );
    assert_eq!(resource_id_registry().recase(input), id.id());
}

#[test]
fn registry_falls_back_to_keywords() {
    let registry = resource_id_registry();
    assert!(!registry.is_empty());
    assert_eq!(
        registry.recase("/SUBSCRIPTIONS/sub1/RESOURCEGROUPS/rg1/PROVIDERS/Microsoft.Unknown/things/Thing1"),
        "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.Unknown/things/Thing1"
    );
    assert_eq!(
        registry.recase_as::<LabId>("/subscriptions/sub1/resourcegroups/rg1/providers/microsoft.labservices/LABS/Lab1"),
        "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/Lab1"
    );
}

#[test]
fn enums_accept_any_casing_and_unknown_values() {
    assert_eq!(ExportType::parse("ACTUALCOST"), ExportType::ACTUAL_COST);
    assert_eq!(ExportType::parse("actualcost").as_str(), "ActualCost");
    let unknown = ExportType::parse("SomethingNew");
    assert!(!unknown.is_known());
    assert_eq!(unknown.as_str(), "SomethingNew");
    assert!(ExportType::possible_values().contains(&"ActualCost"));
}

#[test]
fn protection_policies_dispatch_on_management_type() {
    let body = json!({
        "backupManagementType": "MAB",
        "protectedItemsCount": 3,
        "schedulePolicy": {
            "schedulePolicyType": "SimpleSchedulePolicy",
            "scheduleRunFrequency": "Daily",
            "scheduleRunTimes": ["2024-01-01T22:00:00Z"],
        },
    });
    let policy = ProtectionPolicy::from_json_value(body.clone()).unwrap();
    assert_eq!(policy.discriminator(), "MAB");
    let ProtectionPolicy::Mab(mab) = &policy else {
        panic!("expected a MAB policy, got {policy:?}");
    };
    assert_eq!(mab.protected_items_count, Some(3));
    assert!(matches!(mab.schedule_policy, Some(SchedulePolicy::Simple(_))));

    let encoded = serde_json::to_value(&policy).unwrap();
    assert_eq!(encoded["backupManagementType"], "MAB");
    assert_eq!(encoded["schedulePolicy"]["schedulePolicyType"], "SimpleSchedulePolicy");
}

#[test]
fn unknown_policies_are_kept_verbatim() {
    let body = json!({
        "backupManagementType": "AzureFutureWorkload",
        "protectedItemsCount": 1,
        "somethingNew": {"enabled": true},
    });
    let policy = ProtectionPolicy::from_slice(body.to_string().as_bytes()).unwrap();
    assert!(matches!(policy, ProtectionPolicy::Raw(_)));
    assert_eq!(policy.discriminator(), "AzureFutureWorkload");
    assert_eq!(serde_json::to_value(&policy).unwrap(), body);

    let numbered = json!({"backupManagementType": 7, "protectedItemsCount": 2});
    let policy = ProtectionPolicy::from_slice(numbered.to_string().as_bytes()).unwrap();
    let ProtectionPolicy::Raw(raw) = &policy else {
        panic!("expected a raw policy, got {policy:?}");
    };
    assert_eq!(raw.base.protected_items_count, Some(2));
    assert_eq!(serde_json::to_value(&policy).unwrap(), numbered);

    let err = ProtectionPolicy::from_slice(b"[1, 2]").unwrap_err();
    assert!(err.to_string().contains("ProtectionPolicy"), "{err}");
}
