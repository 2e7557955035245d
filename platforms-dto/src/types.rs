use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The case style of a platform defines the casing used for SDK functions and
/// option names. For example `before-send` becomes `BeforeSend` when the case
/// style is `PascalCase`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PlatformCaseStyle {
    #[default]
    #[serde(rename = "canonical")]
    #[strum(serialize = "canonical")]
    #[cfg_attr(feature = "cli", value(name = "canonical"))]
    Canonical,

    #[serde(rename = "camelCase")]
    #[strum(serialize = "camelCase")]
    #[cfg_attr(feature = "cli", value(name = "camelCase"))]
    CamelCase,

    #[serde(rename = "PascalCase")]
    #[strum(serialize = "PascalCase")]
    #[cfg_attr(feature = "cli", value(name = "PascalCase"))]
    PascalCase,

    #[serde(rename = "snake_case")]
    #[strum(serialize = "snake_case")]
    #[cfg_attr(feature = "cli", value(name = "snake_case"))]
    SnakeCase,
}

impl PlatformCaseStyle {
    /// Converts a canonical (kebab-case) name into this case style.
    ///
    /// Words are separated by `-`, `_` or whitespace. The `canonical` style
    /// returns the input unchanged.
    pub fn apply(self, canonical: &str) -> String {
        let words = canonical
            .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
            .filter(|w| !w.is_empty());

        match self {
            PlatformCaseStyle::Canonical => canonical.to_string(),
            PlatformCaseStyle::SnakeCase => words
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join("_"),
            PlatformCaseStyle::PascalCase => words.map(capitalize).collect(),
            PlatformCaseStyle::CamelCase => words
                .enumerate()
                .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
                .collect(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Is this a first-party or third-party SDK?
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlatformSupportLevel {
    Production,
    Community,
}

/// Possible categories of a platform.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlatformCategory {
    Browser,
    Desktop,
    Mobile,
    Server,
    Serverless,
}

/// The discriminant of a resolved entry. Every platform, guide and
/// integration carries exactly one of these as its `type` field.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    Platform,
    Guide,
    Integration,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
