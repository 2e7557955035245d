//! Literal `type` discriminants.
//!
//! Each resolved entity carries a zero-sized tag that always serializes to
//! the same string and refuses to deserialize from anything else. This keeps
//! the three entity types disjoint on the wire.
use crate::types::EntryType;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

macro_rules! declare_tag {
    ($(#[$meta:meta])* $name: ident => $entry_type: ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $name {
            pub const ENTRY_TYPE: EntryType = EntryType::$entry_type;

            pub fn as_str(&self) -> &'static str {
                Self::ENTRY_TYPE.as_str()
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct TagVisitor;

                impl<'de> Visitor<'de> for TagVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                        write!(f, "the literal string `{}`", $name::ENTRY_TYPE.as_str())
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        if value == $name::ENTRY_TYPE.as_str() {
                            Ok($name)
                        } else {
                            Err(E::invalid_value(de::Unexpected::Str(value), &self))
                        }
                    }
                }

                deserializer.deserialize_str(TagVisitor)
            }
        }

        #[cfg(feature = "openapi")]
        impl schemars::JsonSchema for $name {
            fn schema_name() -> String {
                stringify!($name).to_owned()
            }

            fn json_schema(_gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
                schemars::schema::Schema::Object(schemars::schema::SchemaObject {
                    instance_type: Some(schemars::schema::InstanceType::String.into()),
                    enum_values: Some(vec![$name::ENTRY_TYPE.as_str().into()]),
                    ..Default::default()
                })
            }
        }
    };
}

declare_tag!(
    /// `type: platform`
    PlatformTag => Platform
);
declare_tag!(
    /// `type: guide`
    GuideTag => Guide
);
declare_tag!(
    /// `type: integration`
    IntegrationTag => Integration
);
