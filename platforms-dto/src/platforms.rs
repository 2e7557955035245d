use crate::config::PlatformConfig;
use crate::error::SchemaError;
use crate::guides::{validate_identifier, GuideFields, PlatformGuide, PlatformIntegration};
use crate::tags::PlatformTag;
use crate::types::EntryType;
use serde::{Deserialize, Serialize};

/// The canonical representation of a platform within the docs, resolved from
/// its [`PlatformConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[serde(try_from = "PlatformShape")]
pub struct Platform {
    /// The platform identifier. This is the name of the platform directory.
    pub key: String,

    /// Same as key. Use `title` for a human-readable name.
    pub name: String,

    #[serde(rename = "type")]
    kind: PlatformTag,

    /// The relative URL to the docs for this platform.
    pub url: String,

    guides: Vec<PlatformGuide>,
    integrations: Vec<PlatformIntegration>,

    #[serde(flatten)]
    pub config: PlatformConfig,
}

#[derive(Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
struct PlatformShape {
    key: String,
    name: String,
    #[serde(rename = "type")]
    kind: PlatformTag,
    url: String,
    guides: Vec<PlatformGuide>,
    integrations: Vec<PlatformIntegration>,
    #[serde(flatten)]
    config: PlatformConfig,
}

impl TryFrom<PlatformShape> for Platform {
    type Error = SchemaError;

    fn try_from(shape: PlatformShape) -> Result<Self, Self::Error> {
        let platform = Platform {
            key: shape.key,
            name: shape.name,
            kind: shape.kind,
            url: shape.url,
            guides: shape.guides,
            integrations: shape.integrations,
            config: shape.config,
        };
        platform.validate()?;
        Ok(platform)
    }
}

impl Platform {
    /// Creates a platform without guides or integrations.
    pub fn new(
        key: &str,
        url: impl Into<String>,
        config: PlatformConfig,
    ) -> Result<Self, SchemaError> {
        validate_identifier(key)?;

        Ok(Self {
            key: key.to_string(),
            name: key.to_string(),
            kind: PlatformTag,
            url: url.into(),
            guides: Vec::new(),
            integrations: Vec::new(),
            config,
        })
    }

    pub fn entry_type(&self) -> EntryType {
        PlatformTag::ENTRY_TYPE
    }

    /// The title shown for the platform as a whole: `platformTitle`, then
    /// `title`, then the key.
    pub fn display_title(&self) -> &str {
        self.config
            .platform_title
            .as_deref()
            .or(self.config.title.as_deref())
            .unwrap_or(&self.key)
    }

    pub fn guides(&self) -> &[PlatformGuide] {
        &self.guides
    }

    pub fn integrations(&self) -> &[PlatformIntegration] {
        &self.integrations
    }

    pub fn add_guide(&mut self, guide: PlatformGuide) -> Result<(), SchemaError> {
        self.check_child(&guide.guide)?;
        self.guides.push(guide);
        Ok(())
    }

    pub fn add_integration(&mut self, integration: PlatformIntegration) -> Result<(), SchemaError> {
        self.check_child(integration.guide())?;
        self.integrations.push(integration);
        Ok(())
    }

    /// Whether integrations of this platform appear in search results.
    pub fn show_integrations_in_search(&self) -> bool {
        self.config.show_integrations_in_search.unwrap_or(false)
    }

    /// Checks the invariants of the platform and all of its children.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_identifier(&self.key)?;
        if self.name != self.key {
            return Err(SchemaError::NameMismatch {
                key: self.key.clone(),
                name: self.name.clone(),
            });
        }

        self.guides
            .iter()
            .map(|g| &g.guide)
            .chain(self.integrations.iter().map(PlatformIntegration::guide))
            .try_for_each(|child| self.check_child(child))
    }

    fn check_child(&self, child: &GuideFields) -> Result<(), SchemaError> {
        child.validate()?;
        if child.platform != self.key {
            return Err(SchemaError::ForeignChild {
                child: child.key.clone(),
                expected: self.key.clone(),
                actual: child.platform.clone(),
            });
        }
        Ok(())
    }
}
