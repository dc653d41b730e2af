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
    pub struct Architecture {
        THREE_EIGHT_SIX = "386",
        AMD64 = "amd64",
        ARM = "arm",
        ARM64 = "arm64",
        X86 = "x86",
    }
}

string_enum! {
    pub struct Os {
        LINUX = "Linux",
        WINDOWS = "Windows",
    }
}

string_enum! {
    pub struct ProvisioningState {
        CANCELED = "Canceled",
        CREATING = "Creating",
        DELETING = "Deleting",
        FAILED = "Failed",
        SUCCEEDED = "Succeeded",
        UPDATING = "Updating",
    }
}

string_enum! {
    pub struct RunStatus {
        CANCELED = "Canceled",
        ERROR = "Error",
        FAILED = "Failed",
        QUEUED = "Queued",
        RUNNING = "Running",
        STARTED = "Started",
        SUCCEEDED = "Succeeded",
        TIMEOUT = "Timeout",
    }
}

string_enum! {
    pub struct RunType {
        AUTO_BUILD = "AutoBuild",
        AUTO_RUN = "AutoRun",
        QUICK_BUILD = "QuickBuild",
        QUICK_RUN = "QuickRun",
    }
}

string_enum! {
    pub struct Variant {
        V6 = "v6",
        V7 = "v7",
        V8 = "v8",
    }
}
