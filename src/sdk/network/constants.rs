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

use crate::sdk::enums::string_enum;

string_enum! {
    pub struct IpAllocationMethod {
        DYNAMIC = "Dynamic",
        STATIC = "Static",
    }
}

string_enum! {
    pub struct IpVersion {
        IPV4 = "IPv4",
        IPV6 = "IPv6",
    }
}

string_enum! {
    pub struct LoadBalancerOutboundRuleProtocol {
        ALL = "All",
        TCP = "Tcp",
        UDP = "Udp",
    }
}

string_enum! {
    pub struct LoadBalancerSkuName {
        BASIC = "Basic",
        GATEWAY = "Gateway",
        STANDARD = "Standard",
    }
}

string_enum! {
    pub struct LoadBalancerSkuTier {
        GLOBAL = "Global",
        REGIONAL = "Regional",
    }
}

string_enum! {
    pub struct LoadDistribution {
        DEFAULT = "Default",
        SOURCE_IP = "SourceIP",
        SOURCE_IP_PROTOCOL = "SourceIPProtocol",
    }
}

string_enum! {
    pub struct ProbeProtocol {
        HTTP = "Http",
        HTTPS = "Https",
        TCP = "Tcp",
    }
}

string_enum! {
    pub struct ProvisioningState {
        DELETING = "Deleting",
        FAILED = "Failed",
        SUCCEEDED = "Succeeded",
        UPDATING = "Updating",
    }
}

string_enum! {
    pub struct TransportProtocol {
        ALL = "All",
        TCP = "Tcp",
        UDP = "Udp",
    }
}
