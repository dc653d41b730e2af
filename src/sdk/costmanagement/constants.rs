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
    pub struct ExecutionStatus {
        COMPLETED = "Completed",
        DATA_NOT_AVAILABLE = "DataNotAvailable",
        FAILED = "Failed",
        IN_PROGRESS = "InProgress",
        NEW_DATA_NOT_AVAILABLE = "NewDataNotAvailable",
        QUEUED = "Queued",
        TIMEOUT = "Timeout",
    }
}

string_enum! {
    pub struct ExecutionType {
        ON_DEMAND = "OnDemand",
        SCHEDULED = "Scheduled",
    }
}

string_enum! {
    pub struct ExportType {
        ACTUAL_COST = "ActualCost",
        AMORTIZED_COST = "AmortizedCost",
        USAGE = "Usage",
    }
}

string_enum! {
    pub struct FormatType {
        CSV = "Csv",
    }
}

string_enum! {
    pub struct GranularityType {
        DAILY = "Daily",
    }
}

string_enum! {
    pub struct RecurrenceType {
        ANNUALLY = "Annually",
        DAILY = "Daily",
        MONTHLY = "Monthly",
        WEEKLY = "Weekly",
    }
}

string_enum! {
    pub struct StatusType {
        ACTIVE = "Active",
        INACTIVE = "Inactive",
    }
}

string_enum! {
    pub struct TimeframeType {
        BILLING_MONTH_TO_DATE = "BillingMonthToDate",
        CUSTOM = "Custom",
        MONTH_TO_DATE = "MonthToDate",
        THE_LAST_BILLING_MONTH = "TheLastBillingMonth",
        THE_LAST_MONTH = "TheLastMonth",
        WEEK_TO_DATE = "WeekToDate",
    }
}
