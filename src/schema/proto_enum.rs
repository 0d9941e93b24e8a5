// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Declarative macro for proto3 enums.
//!
//! Generated enums serialize as their value name and deserialize from
//! either the name or the numeric value. The first declared variant must
//! carry number 0, which is the proto3 default. An unrecognized name
//! decodes to that default; an unrecognized number is an error, since the
//! value could not be re-encoded.

macro_rules! proto_enum {
    (@first $name:ident, $first:ident $(, $rest:ident)*) => {
        $name::$first
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $number:literal => $wire:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $name {
            /// All values in declaration order.
            pub const VALUES: &'static [$name] = &[$($name::$variant),+];

            /// Value name as it appears in JSON.
            pub fn as_str_name(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Look up a value by name.
            pub fn from_str_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Numeric value.
            pub fn number(&self) -> i32 {
                match self {
                    $($name::$variant => $number,)+
                }
            }

            /// Look up a value by number.
            pub fn from_number(number: i64) -> Option<Self> {
                match number {
                    $($number => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Whether this is the proto3 default value.
            pub fn is_default(&self) -> bool {
                *self == Self::default()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                proto_enum!(@first $name, $($variant),+)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str_name())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str_name())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                struct EnumVisitor;

                impl<'de> ::serde::de::Visitor<'de> for EnumVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        write!(f, "a {} name or number", stringify!($name))
                    }

                    // Unknown names read as unset, like an ignored unknown field.
                    fn visit_str<E: ::serde::de::Error>(self, v: &str) -> ::std::result::Result<$name, E> {
                        Ok($name::from_str_name(v).unwrap_or_default())
                    }

                    fn visit_i64<E: ::serde::de::Error>(self, v: i64) -> ::std::result::Result<$name, E> {
                        $name::from_number(v).ok_or_else(|| {
                            E::custom(format!("unknown {} number {v}", stringify!($name)))
                        })
                    }

                    fn visit_u64<E: ::serde::de::Error>(self, v: u64) -> ::std::result::Result<$name, E> {
                        let v = i64::try_from(v).map_err(E::custom)?;
                        self.visit_i64(v)
                    }
                }

                deserializer.deserialize_any(EnumVisitor)
            }
        }
    };
}
