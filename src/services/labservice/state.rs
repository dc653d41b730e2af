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

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tf_provider::schema::{AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueList, ValueNumber, ValueString};
use tf_provider::{map, AttributePath, Diagnostics};

use crate::sdk::labservices::{
    LabId, RecurrenceFrequency, RecurrencePattern, Schedule, ScheduleId, ScheduleProperties,
    ScheduleUpdateProperties, WeekDay,
};
use crate::sdk::resourceids::ResourceId;
use crate::services::validate_name;
use crate::utils::{
    attribute, known_str, owned, owned_opt, parse_timestamp, report_all, strings_from,
    strings_value, timestamp_value, validate_timestamp, WithNormalize, WithSchema, WithValidate,
};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState<'a> {
    pub id: ValueString<'a>,
    pub name: ValueString<'a>,
    pub lab_id: ValueString<'a>,
    pub notes: ValueString<'a>,
    pub start_time: ValueString<'a>,
    pub stop_time: ValueString<'a>,
    pub time_zone: ValueString<'a>,
    pub recurrence_frequency: ValueString<'a>,
    pub recurrence_interval: ValueNumber,
    pub recurrence_week_days: ValueList<ValueString<'a>>,
    pub recurrence_expiration_date: ValueString<'a>,
}

impl<'a> WithSchema for ScheduleState<'a> {
    fn schema() -> Schema {
        use AttributeConstraint::*;
        use AttributeType::*;
        Schema {
            version: 1,
            block: Block {
                attributes: map! {
                    "id"         => attribute(String, Computed, "Resource ID of the schedule"),
                    "name"       => attribute(String, Required, "Name of the schedule. Changing this forces a new resource"),
                    "lab_id"     => attribute(String, Required, "Resource ID of the lab. Changing this forces a new resource"),
                    "notes"      => attribute(String, Optional, "Notes of the schedule"),
                    "start_time" => attribute(String, OptionalComputed, "RFC 3339 time at which the lab virtual machines start"),
                    "stop_time"  => attribute(String, Required, "RFC 3339 time at which the lab virtual machines stop"),
                    "time_zone"  => attribute(String, Required, "IANA time zone of the schedule, e.g. `Europe/Paris`"),
                    "recurrence_frequency" => attribute(String, Optional, "Repeat the schedule `Daily` or `Weekly`"),
                    "recurrence_interval"  => attribute(Number, OptionalComputed, "Number of days or weeks between two occurrences"),
                    "recurrence_week_days" => attribute(List(Box::new(String)), Optional, "Days of a weekly recurrence"),
                    "recurrence_expiration_date" => attribute(String, Optional, "RFC 3339 time after which the schedule stops recurring"),
                },
                description: Description::plain("Schedule of a Lab Services lab"),
                ..Default::default()
            },
        }
    }
}

#[async_trait]
impl<'a> WithValidate for ScheduleState<'a> {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath) {
        if let Some(name) = known_str(&self.name) {
            validate_name(diags, name, 100, attr_path.clone().attribute("name"));
        }
        if let Some(lab_id) = known_str(&self.lab_id) {
            report_all(
                diags,
                "Invalid lab ID",
                LabId::validate(lab_id, "lab_id"),
                attr_path.clone().attribute("lab_id"),
            );
        }
        for (name, value) in [
            ("start_time", &self.start_time),
            ("stop_time", &self.stop_time),
            ("recurrence_expiration_date", &self.recurrence_expiration_date),
        ] {
            validate_timestamp(diags, value, attr_path.clone().attribute(name));
        }
        if let Value::Value(time_zone) = &self.time_zone {
            if time_zone.trim().is_empty() {
                diags.error_short("`time_zone` must not be empty", attr_path.clone().attribute("time_zone"));
            }
        }

        let recurrence_set = !self.recurrence_interval.is_null()
            || !self.recurrence_week_days.is_null()
            || !self.recurrence_expiration_date.is_null();
        if self.recurrence_frequency.is_null() && recurrence_set {
            diags.error_short(
                "`recurrence_frequency` is required when any other `recurrence_*` attribute is set",
                attr_path.clone().attribute("recurrence_frequency"),
            );
        }
        if !self.recurrence_frequency.is_null() && self.recurrence_expiration_date.is_null() {
            diags.error_short(
                "`recurrence_expiration_date` is required with `recurrence_frequency`",
                attr_path.clone().attribute("recurrence_expiration_date"),
            );
        }

        let frequency = known_str(&self.recurrence_frequency).map(RecurrenceFrequency::parse);
        if let Some(frequency) = &frequency {
            if !frequency.is_known() {
                diags.error(
                    "Invalid recurrence frequency",
                    format!(
                        "`{frequency}` is not one of: {}",
                        RecurrenceFrequency::possible_values().join(", ")
                    ),
                    attr_path.clone().attribute("recurrence_frequency"),
                );
            }
        }
        if let Value::Value(interval) = self.recurrence_interval {
            if !(1..=365).contains(&interval) {
                diags.error(
                    "Invalid recurrence interval",
                    format!("{interval} is not between 1 and 365"),
                    attr_path.clone().attribute("recurrence_interval"),
                );
            }
        }
        if let Value::Value(week_days) = &self.recurrence_week_days {
            let path = attr_path.clone().attribute("recurrence_week_days");
            if frequency.as_ref().map_or(false, |f| *f != RecurrenceFrequency::WEEKLY) {
                diags.error_short("`recurrence_week_days` is only valid for a `Weekly` recurrence", path.clone());
            }
            for (i, day) in week_days.iter().enumerate() {
                if let Some(day) = known_str(day) {
                    if !WeekDay::parse(day).is_known() {
                        diags.error(
                            "Invalid week day",
                            format!("`{day}` is not one of: {}", WeekDay::possible_values().join(", ")),
                            path.clone().index(i as i64),
                        );
                    }
                }
            }
        }
    }
}

impl<'a> WithNormalize for ScheduleState<'a> {
    fn normalize(&mut self, _diags: &mut Diagnostics) {
        if self.id.is_null() {
            self.id = Value::Unknown;
        }
        if self.start_time.is_null() {
            self.start_time = Value::Unknown;
        }
        if self.recurrence_interval.is_null() {
            self.recurrence_interval = if self.recurrence_frequency.is_null() {
                Value::Null
            } else {
                Value::Unknown
            };
        }
    }
}

impl<'a> ScheduleState<'a> {
    /// ID of the schedule described by `name` and `lab_id`.
    pub fn schedule_id(&self) -> Result<ScheduleId> {
        let lab_id = known_str(&self.lab_id).ok_or_else(|| anyhow!("`lab_id` is not known"))?;
        let name = known_str(&self.name).ok_or_else(|| anyhow!("`name` is not known"))?;
        let lab_id = LabId::parse(lab_id).context("Parsing `lab_id`")?;
        Ok(ScheduleId::new(
            lab_id.subscription_id,
            lab_id.resource_group_name,
            lab_id.lab_name,
            name,
        ))
    }

    /// ID stored in the state by a previous apply or an import.
    pub fn stored_id(&self) -> Result<ScheduleId> {
        let id = known_str(&self.id).ok_or_else(|| anyhow!("`id` is not known"))?;
        ScheduleId::parse(id).context("Parsing `id`")
    }

    fn recurrence(&self) -> Result<Option<RecurrencePattern>> {
        let Some(frequency) = known_str(&self.recurrence_frequency) else {
            return Ok(None);
        };
        let expiration = known_str(&self.recurrence_expiration_date)
            .ok_or_else(|| anyhow!("`recurrence_expiration_date` is required with a recurrence"))?;
        Ok(Some(RecurrencePattern {
            frequency: RecurrenceFrequency::parse(frequency),
            interval: match self.recurrence_interval {
                Value::Value(interval) => Some(interval),
                _ => None,
            },
            week_days: strings_from(&self.recurrence_week_days)
                .map(|days| days.iter().map(|day| WeekDay::parse(day)).collect()),
            expiration_date: parse_timestamp(expiration)
                .context("Parsing `recurrence_expiration_date`")?,
        }))
    }

    fn start_at(&self) -> Result<Option<time::OffsetDateTime>> {
        known_str(&self.start_time)
            .map(parse_timestamp)
            .transpose()
            .context("Parsing `start_time`")
    }

    pub fn to_schedule(&self) -> Result<Schedule> {
        let stop_time = known_str(&self.stop_time).ok_or_else(|| anyhow!("`stop_time` is not known"))?;
        Ok(Schedule {
            id: None,
            name: None,
            kind: None,
            system_data: None,
            properties: ScheduleProperties {
                start_at: self.start_at()?,
                stop_at: parse_timestamp(stop_time).context("Parsing `stop_time`")?,
                time_zone_id: known_str(&self.time_zone).unwrap_or_default().to_owned(),
                recurrence_pattern: self.recurrence()?,
                notes: known_str(&self.notes).map(str::to_owned),
                provisioning_state: None,
            },
        })
    }

    /// Patch carrying the attributes that differ from `prior`.
    pub fn to_update(&self, prior: &Self) -> Result<ScheduleUpdateProperties> {
        let mut update = ScheduleUpdateProperties::default();
        if self.start_time != prior.start_time {
            update.start_at = self.start_at()?;
        }
        if self.stop_time != prior.stop_time {
            update.stop_at = known_str(&self.stop_time)
                .map(parse_timestamp)
                .transpose()
                .context("Parsing `stop_time`")?;
        }
        if self.time_zone != prior.time_zone {
            update.time_zone_id = known_str(&self.time_zone).map(str::to_owned);
        }
        if self.notes != prior.notes {
            // an empty string clears the notes
            update.notes = Some(known_str(&self.notes).unwrap_or_default().to_owned());
        }
        let recurrence_changed = self.recurrence_frequency != prior.recurrence_frequency
            || (self.recurrence_interval != prior.recurrence_interval
                && !self.recurrence_interval.is_unknown())
            || self.recurrence_week_days != prior.recurrence_week_days
            || self.recurrence_expiration_date != prior.recurrence_expiration_date;
        if recurrence_changed {
            // null clears a recurrence removed from the configuration
            update.recurrence_pattern = Some(self.recurrence()?);
        }
        Ok(update)
    }

    /// Copy the service view of the schedule into the state.
    pub fn refresh(&mut self, id: &ScheduleId, schedule: Schedule) {
        let properties = schedule.properties;
        self.id = owned(id.id());
        self.name = owned(id.schedule_name.as_str());
        self.lab_id = owned(id.lab_id().id());
        self.notes = owned_opt(properties.notes.filter(|notes| !notes.is_empty()));
        self.start_time = timestamp_value(&self.start_time, properties.start_at);
        self.stop_time = timestamp_value(&self.stop_time, Some(properties.stop_at));
        self.time_zone = owned(properties.time_zone_id);
        match properties.recurrence_pattern {
            Some(pattern) => {
                self.recurrence_frequency = owned(pattern.frequency.as_str());
                self.recurrence_interval = pattern.interval.map_or(Value::Null, Value::Value);
                self.recurrence_week_days = strings_value(
                    pattern
                        .week_days
                        .map(|days| days.into_iter().map(|day| day.as_str().to_owned())),
                );
                self.recurrence_expiration_date =
                    timestamp_value(&self.recurrence_expiration_date, Some(pattern.expiration_date));
            }
            None => {
                self.recurrence_frequency = Value::Null;
                self.recurrence_interval = Value::Null;
                self.recurrence_week_days = Value::Null;
                self.recurrence_expiration_date = Value::Null;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;

    const LAB: &str = "/subscriptions/sub1/resourceGroups/rg1/providers/Microsoft.LabServices/labs/lab1";

    fn weekly() -> ScheduleState<'static> {
        ScheduleState {
            name: owned("evenings"),
            lab_id: owned(LAB),
            stop_time: owned("2024-01-01T18:00:00Z"),
            time_zone: owned("Europe/Paris"),
            recurrence_frequency: owned("Weekly"),
            recurrence_week_days: Value::Value(vec![owned("Monday"), owned("Friday")]),
            recurrence_expiration_date: owned("2024-06-01T00:00:00Z"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn valid_configuration_has_no_errors() {
        let mut diags = Diagnostics::default();
        weekly().validate(&mut diags, AttributePath::default()).await;
        assert!(diags.errors.is_empty(), "{:?}", diags.errors);
    }

    #[tokio::test]
    async fn recurrence_rules_are_enforced() {
        let mut diags = Diagnostics::default();
        ScheduleState {
            recurrence_frequency: owned("Daily"),
            recurrence_interval: Value::Value(0),
            recurrence_week_days: Value::Value(vec![owned("Someday")]),
            lab_id: owned("/subscriptions/sub1/resourceGroups/rg1"),
            ..weekly()
        }
        .validate(&mut diags, AttributePath::default())
        .await;
        // interval, weekly-only days, unknown day, lab ID
        assert_eq!(diags.errors.len(), 4);

        let mut diags = Diagnostics::default();
        ScheduleState {
            recurrence_frequency: Value::Null,
            ..weekly()
        }
        .validate(&mut diags, AttributePath::default())
        .await;
        assert_eq!(diags.errors.len(), 1);
    }

    #[test]
    fn schedule_body() {
        let schedule = weekly().to_schedule().unwrap();
        assert_eq!(schedule.properties.stop_at, datetime!(2024-01-01 18:00:00 UTC));
        let pattern = schedule.properties.recurrence_pattern.unwrap();
        assert_eq!(pattern.frequency, RecurrenceFrequency::WEEKLY);
        assert_eq!(pattern.week_days, Some(vec![WeekDay::MONDAY, WeekDay::FRIDAY]));
        assert_eq!(
            weekly().schedule_id().unwrap().id(),
            format!("{LAB}/schedules/evenings")
        );
    }

    #[test]
    fn update_only_carries_changes() {
        let prior = weekly();
        let planned = ScheduleState {
            notes: owned("bring laptops"),
            ..weekly()
        };
        let update = planned.to_update(&prior).unwrap();
        assert_eq!(update.notes.as_deref(), Some("bring laptops"));
        assert_eq!(update.stop_at, None);
        assert_eq!(update.recurrence_pattern, None);
    }

    #[test]
    fn removed_recurrence_is_cleared() {
        let planned = ScheduleState {
            recurrence_frequency: Value::Null,
            recurrence_interval: Value::Null,
            recurrence_week_days: Value::Null,
            recurrence_expiration_date: Value::Null,
            ..weekly()
        };
        let update = planned.to_update(&weekly()).unwrap();
        assert_eq!(update.recurrence_pattern, Some(None));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"recurrencePattern": null})
        );

        let update = weekly().to_update(&planned).unwrap();
        assert!(matches!(update.recurrence_pattern, Some(Some(_))));
    }

    #[test]
    fn refresh_keeps_user_offsets() {
        let mut state = ScheduleState {
            stop_time: owned("2024-01-01T19:00:00+01:00"),
            ..weekly()
        };
        let mut schedule = weekly().to_schedule().unwrap();
        schedule.properties.recurrence_pattern = None;
        let id = weekly().schedule_id().unwrap();
        state.refresh(&id, schedule);
        assert_eq!(state.stop_time, owned("2024-01-01T19:00:00+01:00"));
        assert_eq!(state.id, owned(format!("{LAB}/schedules/evenings")));
        assert!(state.recurrence_frequency.is_null());
        assert!(state.recurrence_week_days.is_null());
    }
}
