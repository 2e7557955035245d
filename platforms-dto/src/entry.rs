use crate::config::PlatformConfig;
use crate::guides::{PlatformGuide, PlatformIntegration};
use crate::platforms::Platform;
use crate::types::EntryType;
use serde::Serialize;
use std::borrow::Cow;

/// A reference to any resolved entry. Serializes as the entry itself, whose
/// `type` field tells the variants apart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PlatformEntry<'a> {
    Platform(&'a Platform),
    Guide(&'a PlatformGuide),
    Integration(&'a PlatformIntegration),
}

impl<'a> PlatformEntry<'a> {
    pub fn entry_type(&self) -> EntryType {
        match self {
            PlatformEntry::Platform(p) => p.entry_type(),
            PlatformEntry::Guide(g) => g.entry_type(),
            PlatformEntry::Integration(i) => i.entry_type(),
        }
    }

    pub fn key(&self) -> &'a str {
        match self {
            PlatformEntry::Platform(p) => &p.key,
            PlatformEntry::Guide(g) => &g.guide.key,
            PlatformEntry::Integration(i) => &i.guide().key,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            PlatformEntry::Platform(p) => &p.name,
            PlatformEntry::Guide(g) => &g.guide.name,
            PlatformEntry::Integration(i) => &i.guide().name,
        }
    }

    /// Key of the platform the entry belongs to (its own key for platforms).
    pub fn platform(&self) -> &'a str {
        match self {
            PlatformEntry::Platform(p) => &p.key,
            PlatformEntry::Guide(g) => &g.guide.platform,
            PlatformEntry::Integration(i) => &i.guide().platform,
        }
    }

    pub fn url(&self) -> &'a str {
        match self {
            PlatformEntry::Platform(p) => &p.url,
            PlatformEntry::Guide(g) => &g.guide.url,
            PlatformEntry::Integration(i) => &i.guide().url,
        }
    }

    pub fn title(&self) -> &'a str {
        match self {
            PlatformEntry::Platform(p) => p.display_title(),
            PlatformEntry::Guide(g) => g.guide.display_title(),
            PlatformEntry::Integration(i) => i.guide().display_title(),
        }
    }

    /// The configuration of the entry. Integrations get their icon back.
    pub fn config(&self) -> Cow<'a, PlatformConfig> {
        match self {
            PlatformEntry::Platform(p) => Cow::Borrowed(&p.config),
            PlatformEntry::Guide(g) => Cow::Borrowed(&g.guide.config),
            PlatformEntry::Integration(i) => Cow::Owned(i.config()),
        }
    }
}

impl<'a> From<&'a Platform> for PlatformEntry<'a> {
    fn from(value: &'a Platform) -> Self {
        PlatformEntry::Platform(value)
    }
}

impl<'a> From<&'a PlatformGuide> for PlatformEntry<'a> {
    fn from(value: &'a PlatformGuide) -> Self {
        PlatformEntry::Guide(value)
    }
}

impl<'a> From<&'a PlatformIntegration> for PlatformEntry<'a> {
    fn from(value: &'a PlatformIntegration) -> Self {
        PlatformEntry::Integration(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guides::GuideFields;

    #[test]
    fn entries_are_disjoint_by_type() {
        let platform = Platform::new("python", "/platforms/python/", PlatformConfig::default()).unwrap();
        let django = GuideFields::new(
            "python",
            "django",
            "/platforms/python/guides/django/",
            PlatformConfig::default(),
        )
        .unwrap();
        let guide = PlatformGuide::new(django.clone()).unwrap();
        let mut with_icon = django;
        with_icon.config.icon = Some("django".to_string());
        let integration = PlatformIntegration::new(with_icon).unwrap();

        let entries = [
            PlatformEntry::from(&platform),
            PlatformEntry::from(&guide),
            PlatformEntry::from(&integration),
        ];
        let types: Vec<_> = entries.iter().map(|e| e.entry_type()).collect();
        assert_eq!(
            types,
            [EntryType::Platform, EntryType::Guide, EntryType::Integration]
        );

        for entry in entries {
            let value = serde_json::to_value(entry).unwrap();
            assert_eq!(value["type"], entry.entry_type().as_str());
            assert_eq!(entry.platform(), "python");
        }

        assert_eq!(entries[1].key(), "python.django");
        assert_eq!(entries[1].title(), "django");
        assert_eq!(entries[2].config().icon.as_deref(), Some("django"));
    }
}
