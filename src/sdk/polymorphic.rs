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

//! Discriminated unions for polymorphic ARM payloads.
//!
//! A JSON field (usually `type`) selects the schema of the object. Values
//! whose discriminator is not modelled are kept in a [`RawVariant`] so that
//! they can be written back without losing data.

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Object with a discriminator unknown to this API version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawVariant<B> {
    /// Fields shared by every variant
    pub base: B,
    /// The full object as received
    pub values: Map<String, Value>,
}

impl<B: DeserializeOwned> RawVariant<B> {
    /// Keep `value` as is. A discriminator that is not a string reaches
    /// the base fields as its JSON text.
    pub fn from_value(value: Value, discriminator: &str) -> Result<Self, serde_json::Error> {
        let Value::Object(values) = value else {
            return Err(serde::de::Error::custom("expected a JSON object"));
        };
        let mut fields = values.clone();
        if let Some(tag) = fields.get_mut(discriminator) {
            if !tag.is_string() && !tag.is_null() {
                *tag = Value::String(tag.to_string());
            }
        }
        let base = serde_json::from_value(Value::Object(fields))?;
        Ok(Self { base, values })
    }
}

#[derive(Debug, Error)]
#[error("unmarshaling {type_name}: {source}")]
pub struct UnmarshalError {
    pub type_name: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Serialize `value` and add the discriminator `field: tag` to the object.
pub fn serialize_tagged<T, S>(
    value: &T,
    field: &str,
    tag: &str,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let mut encoded = serde_json::to_value(value).map_err(serde::ser::Error::custom)?;
    let Value::Object(object) = &mut encoded else {
        return Err(serde::ser::Error::custom(format!(
            "variant {tag} did not serialize to a JSON object"
        )));
    };
    object.insert(field.to_owned(), Value::String(tag.to_owned()));
    encoded.serialize(serializer)
}

/// Generate a discriminated union with a raw fallback variant.
///
/// ```ignore
/// discriminated_union! {
///     pub enum RetentionPolicy(BaseRetentionPolicy) tagged "retentionPolicyType" {
///         LongTerm(LongTermRetentionPolicy) = "LongTermRetentionPolicy",
///         Simple(SimpleRetentionPolicy) = "SimpleRetentionPolicy",
///     }
/// }
/// ```
macro_rules! discriminated_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident($base:ty) tagged $field:literal {
            $($(#[$vmeta:meta])* $variant:ident($inner:ty) = $tag:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($(#[$vmeta])* $variant($inner),)+
            Raw($crate::sdk::polymorphic::RawVariant<$base>),
        }

        impl $name {
            /// Name of the JSON field selecting the variant.
            pub const DISCRIMINATOR: &'static str = $field;

            pub fn discriminator(&self) -> &str {
                match self {
                    $(Self::$variant(_) => $tag,)+
                    Self::Raw(raw) => raw
                        .values
                        .get($field)
                        .and_then(::serde_json::Value::as_str)
                        .unwrap_or_default(),
                }
            }

            /// Decode an object, dispatching on the discriminator.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, $crate::sdk::polymorphic::UnmarshalError> {
                ::serde_json::from_slice::<::serde_json::Value>(bytes)
                    .and_then(Self::from_json_value)
                    .map_err(|source| $crate::sdk::polymorphic::UnmarshalError {
                        type_name: stringify!($name),
                        source,
                    })
            }

            pub fn from_json_value(value: ::serde_json::Value) -> Result<Self, ::serde_json::Error> {
                let tag = value
                    .get($field)
                    .and_then(::serde_json::Value::as_str)
                    .map(str::to_owned);
                if let Some(tag) = tag {
                    $(
                        if tag.eq_ignore_ascii_case($tag) {
                            return ::serde_json::from_value::<$inner>(value).map(Self::$variant);
                        }
                    )+
                }
                $crate::sdk::polymorphic::RawVariant::from_value(value, $field).map(Self::Raw)
            }
        }

        $(
            impl From<$inner> for $name {
                fn from(value: $inner) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(
                        Self::$variant(inner) => {
                            $crate::sdk::polymorphic::serialize_tagged(inner, $field, $tag, serializer)
                        }
                    )+
                    Self::Raw(raw) => ::serde::Serialize::serialize(&raw.values, serializer),
                }
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_json_value(value).map_err(|err| {
                    <D::Error as ::serde::de::Error>::custom(format!(
                        "unmarshaling {}: {err}",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

pub(crate) use discriminated_union;
