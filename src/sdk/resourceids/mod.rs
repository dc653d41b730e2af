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

//! Parsing and formatting of Azure Resource Manager resource IDs.
//!
//! Every resource ID type describes its path as an ordered list of
//! [`Segment`]s. The [`Parser`] walks that list against an input string, and
//! the type rebuilds itself from the resulting [`ParseResult`].

use std::collections::HashMap;
use std::fmt;

use crate::utils::DisplayJoinable;

mod commonids;
mod error;

pub use commonids::{ResourceGroupId, ScopeId, SubscriptionId};
pub use error::{ParseError, SegmentNotSpecifiedError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    /// Literal path element such as `resourceGroups`
    Static,
    /// Literal provider namespace such as `Microsoft.LabServices`
    ResourceProvider,
    SubscriptionId,
    ResourceGroup,
    UserSpecified,
    /// Arbitrary parent path, possibly spanning several elements
    Scope,
    /// Value out of a closed set
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentType,
    pub name: &'static str,
    pub example_value: &'static str,
    pub fixed_value: Option<&'static str>,
    pub possible_values: &'static [&'static str],
}

impl Segment {
    pub const fn static_segment(name: &'static str, value: &'static str) -> Self {
        Self {
            kind: SegmentType::Static,
            name,
            example_value: value,
            fixed_value: Some(value),
            possible_values: &[],
        }
    }

    pub const fn resource_provider(name: &'static str, value: &'static str) -> Self {
        Self {
            kind: SegmentType::ResourceProvider,
            name,
            example_value: value,
            fixed_value: Some(value),
            possible_values: &[],
        }
    }

    pub const fn subscription_id(name: &'static str) -> Self {
        Self {
            kind: SegmentType::SubscriptionId,
            name,
            example_value: "12345678-1234-9876-4563-123456789012",
            fixed_value: None,
            possible_values: &[],
        }
    }

    pub const fn resource_group(name: &'static str) -> Self {
        Self {
            kind: SegmentType::ResourceGroup,
            name,
            example_value: "example-resource-group",
            fixed_value: None,
            possible_values: &[],
        }
    }

    pub const fn user_specified(name: &'static str, example_value: &'static str) -> Self {
        Self {
            kind: SegmentType::UserSpecified,
            name,
            example_value,
            fixed_value: None,
            possible_values: &[],
        }
    }

    pub const fn scope(name: &'static str) -> Self {
        Self {
            kind: SegmentType::Scope,
            name,
            example_value: "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/some-resource-group",
            fixed_value: None,
            possible_values: &[],
        }
    }

    pub const fn constant(
        name: &'static str,
        possible_values: &'static [&'static str],
        example_value: &'static str,
    ) -> Self {
        Self {
            kind: SegmentType::Constant,
            name,
            example_value,
            fixed_value: None,
            possible_values,
        }
    }

    /// Whether the segment holds a literal rather than a value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            SegmentType::Static | SegmentType::ResourceProvider
        )
    }
}

/// Values extracted from an input by a [`Parser`], keyed by segment name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub id_type: &'static str,
    pub input: String,
    pub segments: &'static [Segment],
    pub parsed: HashMap<&'static str, String>,
}

impl ParseResult {
    /// Value of a non-literal segment, erroring when it was not specified.
    pub fn get(&self, segment_name: &'static str) -> Result<String, SegmentNotSpecifiedError> {
        match self.parsed.get(segment_name) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Err(SegmentNotSpecifiedError {
                id_type: self.id_type,
                segment_name,
                input: self.input.clone(),
                template: format_template(self.segments),
            }),
        }
    }

    /// Rebuild the ID with canonical literals and the parsed values.
    pub fn rebuild(&self) -> String {
        let mut out = String::new();
        for segment in self.segments {
            let value = match segment.fixed_value {
                Some(literal) => literal,
                None => self.parsed.get(segment.name).map_or("", String::as_str),
            };
            out.push('/');
            out.push_str(value.trim_start_matches('/'));
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Parser {
    id_type: &'static str,
    segments: &'static [Segment],
}

impl Parser {
    pub fn new(id_type: &'static str, segments: &'static [Segment]) -> Self {
        Self { id_type, segments }
    }

    pub fn from_resource_id<T: ResourceId>() -> Self {
        Self::new(T::NAME, T::segments())
    }

    /// Match `input` against the segments.
    ///
    /// Literal segments are compared case-sensitively unless `insensitively`
    /// is set; user-specified values are kept exactly as written.
    pub fn parse(&self, input: &str, insensitively: bool) -> Result<ParseResult, ParseError> {
        if input.is_empty() {
            return Err(ParseError::Empty {
                id_type: self.id_type,
            });
        }

        let trimmed = input.strip_prefix('/').unwrap_or(input);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        let parts: Vec<&str> = trimmed.split('/').collect();
        let values = self.align(&parts);

        let mut parsed = HashMap::new();
        for (position, (segment, value)) in self.segments.iter().zip(values).enumerate() {
            let Some(value) = value.filter(|v| !v.is_empty()) else {
                return Err(self.not_specified(segment, input));
            };

            match segment.kind {
                SegmentType::Static | SegmentType::ResourceProvider => {
                    let expected = segment.fixed_value.unwrap_or_default();
                    let matches = if insensitively {
                        value.eq_ignore_ascii_case(expected)
                    } else {
                        value == expected
                    };
                    if !matches {
                        return Err(ParseError::UnexpectedSegment {
                            id_type: self.id_type,
                            input: input.to_owned(),
                            position,
                            expected,
                            actual: value,
                            template: format_template(self.segments),
                        });
                    }
                }
                SegmentType::Constant => {
                    let Some(canonical) = segment
                        .possible_values
                        .iter()
                        .find(|candidate| candidate.eq_ignore_ascii_case(&value))
                    else {
                        return Err(ParseError::InvalidConstant {
                            id_type: self.id_type,
                            input: input.to_owned(),
                            segment_name: segment.name,
                            actual: value,
                            possible_values: segment.possible_values.iter().join_with(", ").to_string(),
                        });
                    };
                    parsed.insert(segment.name, (*canonical).to_owned());
                }
                SegmentType::Scope => {
                    parsed.insert(segment.name, format!("/{value}"));
                }
                SegmentType::SubscriptionId
                | SegmentType::ResourceGroup
                | SegmentType::UserSpecified => {
                    parsed.insert(segment.name, value);
                }
            }
        }

        let consumed = self.consumed(&parts);
        if consumed < parts.len() {
            return Err(ParseError::UnexpectedTrailingSegments {
                id_type: self.id_type,
                input: input.to_owned(),
                count: parts.len() - consumed,
                template: format_template(self.segments),
            });
        }

        Ok(ParseResult {
            id_type: self.id_type,
            input: input.to_owned(),
            segments: self.segments,
            parsed,
        })
    }

    /// Assign path elements to segments. A scope segment takes every element
    /// not claimed by the segments around it.
    fn align(&self, parts: &[&str]) -> Vec<Option<String>> {
        let Some(scope_index) = self.scope_index() else {
            return (0..self.segments.len())
                .map(|i| parts.get(i).map(|p| (*p).to_owned()))
                .collect();
        };

        let after = self.segments.len() - scope_index - 1;
        let scope_len = parts.len().saturating_sub(scope_index + after);
        let mut values = Vec::with_capacity(self.segments.len());
        for i in 0..scope_index {
            values.push(parts.get(i).map(|p| (*p).to_owned()));
        }
        if scope_len == 0 {
            values.push(None);
        } else {
            values.push(Some(parts[scope_index..scope_index + scope_len].join("/")));
        }
        let offset = scope_index + scope_len;
        for i in 0..after {
            values.push(parts.get(offset + i).map(|p| (*p).to_owned()));
        }
        values
    }

    fn consumed(&self, parts: &[&str]) -> usize {
        match self.scope_index() {
            Some(_) => parts.len(),
            None => self.segments.len(),
        }
    }

    fn scope_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .position(|segment| segment.kind == SegmentType::Scope)
    }

    fn not_specified(&self, segment: &Segment, input: &str) -> ParseError {
        ParseError::SegmentNotSpecified(SegmentNotSpecifiedError {
            id_type: self.id_type,
            segment_name: segment.name,
            input: input.to_owned(),
            template: format_template(self.segments),
        })
    }
}

/// A typed ARM resource ID.
pub trait ResourceId: Sized + fmt::Display {
    /// Human readable name of the ID type, e.g. `Schedule`
    const NAME: &'static str;

    fn segments() -> &'static [Segment];

    fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError>;

    /// Canonical ARM path of the resource
    fn id(&self) -> String;

    /// Parse user-supplied input; literal segments must match exactly.
    fn parse(input: &str) -> Result<Self, ParseError> {
        let result = Parser::from_resource_id::<Self>().parse(input, false)?;
        Self::from_parse_result(&result)
    }

    /// Parse server-returned input, ignoring the casing of literal segments.
    ///
    /// Never use this on configuration supplied by the user.
    fn parse_insensitively(input: &str) -> Result<Self, ParseError> {
        let result = Parser::from_resource_id::<Self>().parse(input, true)?;
        Self::from_parse_result(&result)
    }

    /// Validation errors for `input`, prefixed with the attribute `key`.
    fn validate(input: &str, key: &str) -> Vec<String> {
        match Self::parse(input) {
            Ok(_) => Vec::new(),
            Err(err) => vec![format!(
                "{key}: {err} (for example {})",
                Self::format_example()
            )],
        }
    }

    fn format_template() -> String {
        format_template(Self::segments())
    }

    fn format_example() -> String {
        Self::segments()
            .iter()
            .map(|segment| segment.example_value.trim_start_matches('/'))
            .fold(String::new(), |mut acc, value| {
                acc.push('/');
                acc.push_str(value);
                acc
            })
    }
}

pub fn format_template(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment.fixed_value {
            Some(literal) => out.push_str(literal),
            None => {
                out.push('{');
                out.push_str(segment.name);
                out.push('}');
            }
        }
    }
    out
}

/// Write `Name (Label: "value" / Label: "value")`.
pub(crate) fn describe(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    components: &[(&str, &str)],
) -> fmt::Result {
    write!(
        f,
        "{name} ({})",
        components
            .iter()
            .map(|(label, value)| format!("{label}: {value:?}"))
            .join_with(" / ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct SlotId {
        subscription_id: String,
        resource_group_name: String,
        site_name: String,
        kind: String,
    }

    impl fmt::Display for SlotId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            describe(
                f,
                "Slot",
                &[
                    ("Subscription", &self.subscription_id),
                    ("Resource Group Name", &self.resource_group_name),
                    ("Site Name", &self.site_name),
                    ("Kind", &self.kind),
                ],
            )
        }
    }

    impl ResourceId for SlotId {
        const NAME: &'static str = "Slot";

        fn segments() -> &'static [Segment] {
            const SEGMENTS: &[Segment] = &[
                Segment::static_segment("staticSubscriptions", "subscriptions"),
                Segment::subscription_id("subscriptionId"),
                Segment::static_segment("staticResourceGroups", "resourceGroups"),
                Segment::resource_group("resourceGroupName"),
                Segment::static_segment("staticProviders", "providers"),
                Segment::resource_provider("staticMicrosoftWeb", "Microsoft.Web"),
                Segment::static_segment("staticSites", "sites"),
                Segment::user_specified("siteName", "siteValue"),
                Segment::constant("kind", &["Production", "Staging"], "Production"),
            ];
            SEGMENTS
        }

        fn from_parse_result(result: &ParseResult) -> Result<Self, ParseError> {
            Ok(Self {
                subscription_id: result.get("subscriptionId")?,
                resource_group_name: result.get("resourceGroupName")?,
                site_name: result.get("siteName")?,
                kind: result.get("kind")?,
            })
        }

        fn id(&self) -> String {
            format!(
                "/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/sites/{}/{}",
                self.subscription_id, self.resource_group_name, self.site_name, self.kind
            )
        }
    }

    #[test]
    fn constant_segment_is_canonicalised() {
        let id = SlotId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Web/sites/app/staging",
        )
        .unwrap();
        assert_eq!(id.kind, "Staging");
    }

    #[test]
    fn constant_segment_rejects_unknown_values() {
        let err = SlotId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Web/sites/app/canary",
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidConstant { segment_name: "kind", .. }));
        assert!(err.to_string().contains("Production, Staging"));
    }

    #[test]
    fn trailing_segments_are_rejected() {
        let err = SlotId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Web/sites/app/Production/extra",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedTrailingSegments { count: 1, .. }
        ));
    }

    #[test]
    fn literal_mismatch_reports_position() {
        let err = SlotId::parse(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Compute/sites/app/Production",
        )
        .unwrap_err();
        match err {
            ParseError::UnexpectedSegment {
                position, expected, ..
            } => {
                assert_eq!(position, 5);
                assert_eq!(expected, "Microsoft.Web");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            SlotId::parse("").unwrap_err(),
            ParseError::Empty { id_type: "Slot" }
        );
    }

    #[test]
    fn template_and_example() {
        assert_eq!(
            SlotId::format_template(),
            "/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.Web/sites/{siteName}/{kind}"
        );
        let example = SlotId::format_example();
        assert!(SlotId::parse(&example).is_ok(), "{example}");
    }

    #[test]
    fn validate_prefixes_key() {
        let errors = SlotId::validate("/subscriptions/sub", "slot_id");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("slot_id: "));
        assert!(SlotId::validate(&SlotId::format_example(), "slot_id").is_empty());
    }

    #[test]
    fn display_describes_components() {
        let id = SlotId {
            subscription_id: "sub".into(),
            resource_group_name: "rg".into(),
            site_name: "app".into(),
            kind: "Production".into(),
        };
        assert_eq!(
            id.to_string(),
            r#"Slot (Subscription: "sub" / Resource Group Name: "rg" / Site Name: "app" / Kind: "Production")"#
        );
    }
}
