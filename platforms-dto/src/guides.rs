use crate::config::PlatformConfig;
use crate::error::SchemaError;
use crate::tags::{GuideTag, IntegrationTag};
use crate::types::EntryType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Checks that a name can be used as (part of) a key. Names come from
/// directory names, so they must be non-empty and cannot contain the `.`
/// used to qualify guide keys.
pub fn validate_identifier(name: &str) -> Result<&str, SchemaError> {
    if name.is_empty() || name.contains(['.', '/', '\\']) || name.trim() != name {
        Err(SchemaError::InvalidIdentifier(name.to_string()))
    } else {
        Ok(name)
    }
}

/// Builds the fully qualified key of a guide or integration.
pub fn qualified_key(platform: &str, name: &str) -> String {
    format!("{platform}.{name}")
}

/// A non-empty icon name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Icon(String);

impl Icon {
    pub fn new(icon: impl Into<String>) -> Result<Self, SchemaError> {
        let icon = icon.into();
        if icon.trim().is_empty() {
            Err(SchemaError::EmptyIcon)
        } else {
            Ok(Self(icon))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Icon {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Icon::new(value)
    }
}

impl From<Icon> for String {
    fn from(value: Icon) -> Self {
        value.0
    }
}

impl Deref for Icon {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "openapi")]
impl schemars::JsonSchema for Icon {
    fn schema_name() -> String {
        "Icon".to_owned()
    }

    fn json_schema(_gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        schemars::schema::Schema::Object(schemars::schema_for_value!("python").schema)
    }
}

/// The fields shared by guides and integrations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct GuideFields {
    /// The fully qualified name of the guide: `{platform}.{name}`.
    pub key: String,

    /// The name of the guide directory.
    pub name: String,

    /// Key of the parent platform.
    pub platform: String,

    /// The relative URL to the docs of this guide.
    pub url: String,

    /// The "parent" guide. Unset values are inherited from it. This lets a
    /// guide such as `express` inherit from a `node` guide that lives under
    /// another platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_guide: Option<String>,

    #[serde(flatten)]
    pub config: PlatformConfig,
}

impl GuideFields {
    pub fn new(
        platform: &str,
        name: &str,
        url: impl Into<String>,
        config: PlatformConfig,
    ) -> Result<Self, SchemaError> {
        validate_identifier(platform)?;
        validate_identifier(name)?;

        Ok(Self {
            key: qualified_key(platform, name),
            name: name.to_string(),
            platform: platform.to_string(),
            url: url.into(),
            fallback_guide: None,
            config,
        })
    }

    pub fn with_fallback_guide(mut self, fallback_guide: impl Into<String>) -> Self {
        self.fallback_guide = Some(fallback_guide.into());
        self
    }

    /// The title, or the name when there is none.
    pub fn display_title(&self) -> &str {
        self.config.title.as_deref().unwrap_or(&self.name)
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_identifier(&self.platform)?;
        validate_identifier(&self.name)?;
        if self.key != qualified_key(&self.platform, &self.name) {
            return Err(SchemaError::KeyMismatch {
                key: self.key.clone(),
                platform: self.platform.clone(),
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Each platform may have one or more guides. A guide shares most fields
/// with its platform, but is not a platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[serde(try_from = "GuideShape")]
pub struct PlatformGuide {
    #[serde(flatten)]
    pub guide: GuideFields,

    #[serde(rename = "type")]
    kind: GuideTag,
}

#[derive(Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
struct GuideShape {
    #[serde(flatten)]
    guide: GuideFields,
    #[serde(rename = "type")]
    kind: GuideTag,
}

impl TryFrom<GuideShape> for PlatformGuide {
    type Error = SchemaError;

    fn try_from(GuideShape { guide, kind }: GuideShape) -> Result<Self, Self::Error> {
        guide.validate()?;
        Ok(Self { guide, kind })
    }
}

impl PlatformGuide {
    pub fn new(guide: GuideFields) -> Result<Self, SchemaError> {
        guide.validate()?;
        Ok(Self {
            guide,
            kind: GuideTag,
        })
    }

    pub fn entry_type(&self) -> EntryType {
        GuideTag::ENTRY_TYPE
    }
}

impl Deref for PlatformGuide {
    type Target = GuideFields;

    fn deref(&self) -> &Self::Target {
        &self.guide
    }
}

/// A third-party integration, documented like a guide but always with an
/// icon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[serde(try_from = "IntegrationShape")]
pub struct PlatformIntegration {
    /// `guide.config.icon` is always `None`; the icon lives in `icon`.
    #[serde(flatten)]
    guide: GuideFields,

    pub icon: Icon,

    #[serde(rename = "type")]
    kind: IntegrationTag,
}

#[derive(Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
struct IntegrationShape {
    #[serde(flatten)]
    guide: GuideFields,
    icon: Icon,
    #[serde(rename = "type")]
    kind: IntegrationTag,
}

impl TryFrom<IntegrationShape> for PlatformIntegration {
    type Error = SchemaError;

    fn try_from(
        IntegrationShape { guide, icon, kind }: IntegrationShape,
    ) -> Result<Self, Self::Error> {
        guide.validate()?;
        Ok(Self { guide, icon, kind })
    }
}

impl PlatformIntegration {
    /// Builds an integration, taking the icon out of the guide's config.
    /// Fails if there is no icon.
    pub fn new(mut guide: GuideFields) -> Result<Self, SchemaError> {
        guide.validate()?;
        let icon = match guide.config.icon.take() {
            Some(icon) => Icon::new(icon)?,
            None => return Err(SchemaError::MissingIcon(guide.key)),
        };

        Ok(Self {
            guide,
            icon,
            kind: IntegrationTag,
        })
    }

    pub fn entry_type(&self) -> EntryType {
        IntegrationTag::ENTRY_TYPE
    }

    /// The guide fields, without the icon.
    pub fn guide(&self) -> &GuideFields {
        &self.guide
    }

    /// The config with the icon put back, as it was configured.
    pub fn config(&self) -> PlatformConfig {
        PlatformConfig {
            icon: Some(self.icon.as_str().to_string()),
            ..self.guide.config.clone()
        }
    }
}

impl Deref for PlatformIntegration {
    type Target = GuideFields;

    fn deref(&self) -> &Self::Target {
        &self.guide
    }
}
