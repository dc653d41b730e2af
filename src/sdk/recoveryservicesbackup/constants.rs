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
    pub struct DayOfWeek {
        FRIDAY = "Friday",
        MONDAY = "Monday",
        SATURDAY = "Saturday",
        SUNDAY = "Sunday",
        THURSDAY = "Thursday",
        TUESDAY = "Tuesday",
        WEDNESDAY = "Wednesday",
    }
}

string_enum! {
    pub struct IaasVmPolicyType {
        INVALID = "Invalid",
        V1 = "V1",
        V2 = "V2",
    }
}

string_enum! {
    pub struct MonthOfYear {
        APRIL = "April",
        AUGUST = "August",
        DECEMBER = "December",
        FEBRUARY = "February",
        INVALID = "Invalid",
        JANUARY = "January",
        JULY = "July",
        JUNE = "June",
        MARCH = "March",
        MAY = "May",
        NOVEMBER = "November",
        OCTOBER = "October",
        SEPTEMBER = "September",
    }
}

string_enum! {
    pub struct PolicyType {
        COPY_ONLY_FULL = "CopyOnlyFull",
        DIFFERENTIAL = "Differential",
        FULL = "Full",
        INCREMENTAL = "Incremental",
        INVALID = "Invalid",
        LOG = "Log",
        SNAPSHOT_COPY_ONLY_FULL = "SnapshotCopyOnlyFull",
        SNAPSHOT_FULL = "SnapshotFull",
    }
}

string_enum! {
    pub struct RetentionDurationType {
        DAYS = "Days",
        INVALID = "Invalid",
        MONTHS = "Months",
        WEEKS = "Weeks",
        YEARS = "Years",
    }
}

string_enum! {
    pub struct RetentionScheduleFormat {
        DAILY = "Daily",
        INVALID = "Invalid",
        WEEKLY = "Weekly",
    }
}

string_enum! {
    pub struct ScheduleRunType {
        DAILY = "Daily",
        HOURLY = "Hourly",
        INVALID = "Invalid",
        WEEKLY = "Weekly",
    }
}

string_enum! {
    pub struct WeekOfMonth {
        FIRST = "First",
        FOURTH = "Fourth",
        INVALID = "Invalid",
        LAST = "Last",
        SECOND = "Second",
        THIRD = "Third",
    }
}

string_enum! {
    pub struct WorkloadType {
        AZURE_FILE_SHARE = "AzureFileShare",
        AZURE_SQL_DB = "AzureSqlDb",
        SAP_ASE_DATABASE = "SAPAseDatabase",
        SAP_HANA_DATABASE = "SAPHanaDatabase",
        SAP_HANA_DB_INSTANCE = "SAPHanaDBInstance",
        SQL_DB = "SQLDB",
        SQL_DATA_BASE = "SQLDataBase",
        VM = "VM",
    }
}
