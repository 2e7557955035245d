use crate::types::{PlatformCaseStyle, PlatformCategory, PlatformSupportLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A platform config comes from two sources within a platform (or guide)
/// directory, `config.yml` and the `index.mdx` frontmatter. The two are
/// merged and make up a `PlatformConfig`. Any field may come from either
/// source, or from neither.
///
/// There is no key here; the key is inferred from where the files live in
/// the directory tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// Additional identifiers for the platform. For example the `apple`
    /// platform may also be known as `cocoa`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,

    /// Casing used for SDK functions and options in the docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_style: Option<PlatformCaseStyle>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeSet<PlatformCategory>>,

    /// The "parent" platform. Unset values are inherited from it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Keywords used for search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// The programming language used to format the SDK API docs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Title shown for the platform as a whole in the sidebar, when it should
    /// differ from `title` (e.g. "JavaScript" vs. "Browser JavaScript").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_title: Option<String>,

    /// Maps the platform to an entry of the SDK registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_integrations_in_search: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_level: Option<PlatformSupportLevel>,

    /// The human readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

macro_rules! for_each_inherited_field {
    ($m: ident, $self: ident, $other: ident) => {
        $m!($self, $other, aliases);
        $m!($self, $other, case_style);
        $m!($self, $other, categories);
        $m!($self, $other, icon);
        $m!($self, $other, keywords);
        $m!($self, $other, language);
        $m!($self, $other, platform_title);
        $m!($self, $other, sdk);
        $m!($self, $other, show_integrations_in_search);
        $m!($self, $other, support_level);
        $m!($self, $other, title);
    };
}

macro_rules! overlay_field {
    ($self: ident, $other: ident, $field: ident) => {
        if $other.$field.is_some() {
            $self.$field = $other.$field;
        }
    };
}

macro_rules! fill_field {
    ($self: ident, $other: ident, $field: ident) => {
        if $self.$field.is_none() {
            $self.$field = $other.$field.clone();
        }
    };
}

impl PlatformConfig {
    /// Replaces every field with the value from `overlay`, where `overlay`
    /// has one. Used to put frontmatter on top of `config.yml`.
    pub fn merge(mut self, overlay: PlatformConfig) -> PlatformConfig {
        for_each_inherited_field!(overlay_field, self, overlay);
        overlay_field!(self, overlay, fallback_platform);
        self
    }

    /// Fills every unset field with the value from `parent`. Own values
    /// always win. `fallback_platform` is a relation and is not inherited.
    pub fn inherit_from(&mut self, parent: &PlatformConfig) {
        for_each_inherited_field!(fill_field, self, parent);
    }

    /// Whether no field is set at all.
    pub fn is_empty(&self) -> bool {
        self == &PlatformConfig::default()
    }

    pub fn has_category(&self, category: PlatformCategory) -> bool {
        self.categories
            .as_ref()
            .map_or(false, |c| c.contains(&category))
    }

    /// Aliases, or nothing.
    pub fn aliases(&self) -> &[String] {
        self.aliases.as_deref().unwrap_or_default()
    }

    /// Keywords, or nothing.
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }
}
