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

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::BTreeMap;

use async_trait::async_trait;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Description, Schema};
use tf_provider::value::{Value, ValueList, ValueMap, ValueString};
use tf_provider::{AttributePath, Diagnostics};

use crate::sdk::common::Tags;

pub(crate) trait WithSchema {
    fn schema() -> Schema;
}

#[async_trait]
pub(crate) trait WithValidate {
    async fn validate(&self, diags: &mut Diagnostics, attr_path: AttributePath);
}

pub(crate) trait WithNormalize {
    fn normalize(&mut self, diags: &mut Diagnostics);
}

pub(crate) fn attribute(
    attr_type: AttributeType,
    constraint: AttributeConstraint,
    description: &str,
) -> Attribute {
    Attribute {
        attr_type,
        description: Description::plain(description),
        constraint,
        sensitive: false,
        deprecated: false,
    }
}

pub(crate) fn tags_attribute() -> Attribute {
    attribute(
        AttributeType::Map(Box::new(AttributeType::String)),
        AttributeConstraint::Optional,
        "Tags assigned to the resource",
    )
}

/// Known, non-empty string.
pub(crate) fn known_str<'v>(value: &'v ValueString<'_>) -> Option<&'v str> {
    match value {
        Value::Value(s) if !s.is_empty() => Some(s.as_ref()),
        _ => None,
    }
}

pub(crate) fn owned<'a>(value: impl Into<String>) -> ValueString<'a> {
    Value::Value(Cow::Owned(value.into()))
}

pub(crate) fn owned_opt<'a>(value: Option<impl Into<String>>) -> ValueString<'a> {
    value.map_or(Value::Null, owned)
}

pub(crate) fn tags_from(tags: &ValueMap<'_, ValueString<'_>>) -> Option<Tags> {
    match tags {
        Value::Value(tags) => Some(
            tags.iter()
                .map(|(k, v)| (k.to_string(), known_str(v).unwrap_or_default().to_owned()))
                .collect(),
        ),
        _ => None,
    }
}

/// Empty tag maps are stored as null, as Terraform does for an omitted map.
pub(crate) fn tags_value<'a>(tags: Option<Tags>) -> ValueMap<'a, ValueString<'a>> {
    match tags {
        Some(tags) if !tags.is_empty() => Value::Value(
            tags.into_iter()
                .map(|(k, v)| (Cow::Owned(k), owned(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
        _ => Value::Null,
    }
}

pub(crate) fn strings_from(list: &ValueList<ValueString<'_>>) -> Option<Vec<String>> {
    match list {
        Value::Value(items) => Some(
            items
                .iter()
                .filter_map(known_str)
                .map(str::to_owned)
                .collect(),
        ),
        _ => None,
    }
}

pub(crate) fn strings_value<'a, I, S>(items: Option<I>) -> ValueList<ValueString<'a>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.map_or(Value::Null, |items| {
        Value::Value(items.into_iter().map(owned).collect())
    })
}

pub(crate) fn parse_timestamp(input: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(input, &Rfc3339)
}

/// RFC 3339 timestamp, keeping `prior` when it denotes the same instant so
/// that offsets written by the user do not show up as a diff.
pub(crate) fn timestamp_value<'a>(
    prior: &ValueString<'a>,
    instant: Option<OffsetDateTime>,
) -> ValueString<'a> {
    let Some(instant) = instant else {
        return Value::Null;
    };
    if let Some(previous) = known_str(prior) {
        if parse_timestamp(previous).map_or(false, |previous| previous == instant) {
            return prior.clone();
        }
    }
    match instant.format(&Rfc3339) {
        Ok(formatted) => owned(formatted),
        Err(_) => Value::Null,
    }
}

/// Validate an RFC 3339 attribute.
pub(crate) fn validate_timestamp(diags: &mut Diagnostics, value: &ValueString<'_>, attr_path: AttributePath) {
    if let Some(input) = known_str(value) {
        if let Err(err) = parse_timestamp(input) {
            diags.error(
                "Invalid timestamp",
                format!("`{input}` is not an RFC 3339 timestamp: {err}"),
                attr_path,
            );
        }
    }
}

/// Report every message of a resource ID validation.
pub(crate) fn report_all(diags: &mut Diagnostics, summary: &str, errors: Vec<String>, attr_path: AttributePath) {
    for error in errors {
        diags.error(summary.to_owned(), error, attr_path.clone());
    }
}

pub struct DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    iter: RefCell<T>,
    sep: &'a str,
}

pub trait DisplayJoinable {
    type Joiner<'a>;
    fn join_with(self, sep: &str) -> Self::Joiner<'_>;
}

impl<T, I> DisplayJoinable for T
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    type Joiner<'a> = DisplayJoiner<'a, T, I>;

    fn join_with(self, sep: &str) -> Self::Joiner<'_> {
        DisplayJoiner {
            iter: RefCell::new(self),
            sep,
        }
    }
}

impl<'a, T, I> std::fmt::Display for DisplayJoiner<'a, T, I>
where
    T: Iterator<Item = I>,
    I: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut sep = "";
        let mut iter = self.iter.try_borrow_mut().or(Err(std::fmt::Error))?;
        for elt in iter.by_ref() {
            f.write_str(sep)?;
            f.write_fmt(format_args!("{elt}"))?;
            sep = self.sep;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn join_with_separator() {
        assert_eq!(["a", "b", "c"].iter().join_with(" / ").to_string(), "a / b / c");
        assert_eq!(std::iter::empty::<&str>().join_with(",").to_string(), "");
    }

    #[test]
    fn empty_tags_are_null() {
        assert!(tags_value(Some(Tags::new())).is_null());
        let tags = tags_value(Some(Tags::from([("env".to_owned(), "prod".to_owned())])));
        assert_eq!(
            tags_from(&tags),
            Some(Tags::from([("env".to_owned(), "prod".to_owned())]))
        );
    }

    #[test]
    fn timestamp_keeps_equivalent_prior() {
        let prior = owned("2024-01-01T19:00:00+01:00");
        let instant = datetime!(2024-01-01 18:00:00 UTC);
        assert_eq!(timestamp_value(&prior, Some(instant)), prior);
        assert_eq!(
            timestamp_value(&Value::Null, Some(instant)),
            owned("2024-01-01T18:00:00Z")
        );
        assert!(timestamp_value(&prior, None).is_null());
    }

    #[test]
    fn invalid_timestamp_is_reported() {
        let mut diags = Diagnostics::default();
        validate_timestamp(&mut diags, &owned("tomorrow"), AttributePath::new("stop_time"));
        validate_timestamp(&mut diags, &Value::Unknown, AttributePath::new("stop_time"));
        assert_eq!(diags.errors.len(), 1);
    }
}
