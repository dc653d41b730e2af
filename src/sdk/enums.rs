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

//! Open string enums.
//!
//! ARM adds enum values without bumping API versions, so these enums accept
//! any string: known values are matched case-insensitively and canonicalised,
//! everything else is kept verbatim.

/// Generate an open string enum.
///
/// ```ignore
/// string_enum! {
///     pub struct ExportType {
///         ACTUAL_COST = "ActualCost",
///         USAGE = "Usage",
///     }
/// }
/// ```
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(::std::borrow::Cow<'static, str>);

        impl $name {
            $(
                $(#[$vmeta])*
                pub const $variant: $name = $name(::std::borrow::Cow::Borrowed($value));
            )+

            /// Every value known to this API version.
            pub fn possible_values() -> &'static [&'static str] {
                &[$($value),+]
            }

            /// Case-insensitive lookup; unknown input is kept as is.
            pub fn parse(input: &str) -> Self {
                $(
                    if input.eq_ignore_ascii_case($value) {
                        return Self::$variant;
                    }
                )+
                Self(::std::borrow::Cow::Owned(input.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_known(&self) -> bool {
                Self::possible_values().contains(&self.as_str())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::parse(s))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::parse(value)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let decoded = <::std::borrow::Cow<'de, str> as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::parse(&decoded))
            }
        }
    };
}

pub(crate) use string_enum;

#[cfg(test)]
mod tests {
    string_enum! {
        pub struct Color {
            DARK_RED = "DarkRed",
            GREEN = "Green",
        }
    }

    #[test]
    fn known_values_are_canonicalised() {
        for value in Color::possible_values() {
            assert_eq!(Color::parse(&value.to_lowercase()).as_str(), *value);
            assert_eq!(Color::parse(&value.to_uppercase()).as_str(), *value);
        }
        assert_eq!(Color::parse("darkred"), Color::DARK_RED);
        assert!(Color::DARK_RED.is_known());
    }

    #[test]
    fn unknown_values_pass_through() {
        let parsed: Color = "Ultraviolet".parse().unwrap();
        assert_eq!(parsed.as_str(), "Ultraviolet");
        assert!(!parsed.is_known());
    }

    #[test]
    fn serde_applies_parser() {
        let parsed: Vec<Color> = serde_json::from_str(r#"["GREEN", "Teal"]"#).unwrap();
        assert_eq!(parsed, vec![Color::GREEN, Color::from("Teal")]);
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"["Green","Teal"]"#
        );
    }

    #[test]
    fn non_string_json_is_an_error() {
        assert!(serde_json::from_str::<Color>("42").is_err());
    }
}
