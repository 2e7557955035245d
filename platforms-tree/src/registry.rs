use crate::error::TreeError;
use platforms_dto::{
    Platform, PlatformCategory, PlatformEntry, PlatformGuide, PlatformIntegration,
};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::warn;

#[derive(Copy, Clone, Debug)]
enum Slot {
    Guide(usize, usize),
    Integration(usize, usize),
}

/// The resolved platforms of a docs build, indexed by key.
///
/// Platforms keep their order. Guides and integrations are reachable by
/// their fully qualified key (`javascript.express`).
#[derive(Debug, Default)]
pub struct Registry {
    platforms: Vec<Platform>,
    by_key: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
    children: HashMap<String, Slot>,
}

impl Registry {
    /// Indexes `platforms`, checking that every key is unique and that every
    /// platform is well formed.
    pub fn new(platforms: Vec<Platform>) -> Result<Self, TreeError> {
        let mut by_key = HashMap::new();
        let mut children = HashMap::new();

        for (i, platform) in platforms.iter().enumerate() {
            platform.validate()?;
            if by_key.insert(platform.key.clone(), i).is_some() {
                return Err(TreeError::DuplicateKey(platform.key.clone()));
            }

            let guides = platform
                .guides()
                .iter()
                .enumerate()
                .map(|(j, g)| (g.key.clone(), Slot::Guide(i, j)));
            let integrations = platform
                .integrations()
                .iter()
                .enumerate()
                .map(|(j, g)| (g.key.clone(), Slot::Integration(i, j)));
            for (key, slot) in guides.chain(integrations) {
                if children.contains_key(&key) {
                    return Err(TreeError::DuplicateKey(key));
                }
                children.insert(key, slot);
            }
        }

        let mut by_alias = HashMap::new();
        for (i, platform) in platforms.iter().enumerate() {
            for alias in platform.config.aliases() {
                if let Some(&other) = by_key.get(alias).or(by_alias.get(alias)) {
                    if other != i {
                        warn!(
                            %alias,
                            platform = %platform.key,
                            taken_by = %platforms[other].key,
                            "alias already in use, ignoring"
                        );
                    }
                    continue;
                }
                by_alias.insert(alias.clone(), i);
            }
        }

        Ok(Self {
            platforms,
            by_key,
            by_alias,
            children,
        })
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn into_platforms(self) -> Vec<Platform> {
        self.platforms
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn platform(&self, key: &str) -> Option<&Platform> {
        self.by_key.get(key).map(|&i| &self.platforms[i])
    }

    /// Finds a platform by its key or one of its aliases.
    pub fn find_by_alias(&self, alias: &str) -> Option<&Platform> {
        self.platform(alias)
            .or_else(|| self.by_alias.get(alias).map(|&i| &self.platforms[i]))
    }

    /// A guide or integration by its fully qualified key.
    pub fn guide(&self, key: &str) -> Option<PlatformEntry<'_>> {
        self.children.get(key).map(|&slot| self.child(slot))
    }

    /// Any entry by key. Platform aliases are accepted too.
    pub fn entry(&self, key: &str) -> Option<PlatformEntry<'_>> {
        self.find_by_alias(key)
            .map(PlatformEntry::Platform)
            .or_else(|| self.guide(key))
    }

    fn child(&self, slot: Slot) -> PlatformEntry<'_> {
        match slot {
            Slot::Guide(i, j) => PlatformEntry::Guide(&self.platforms[i].guides()[j]),
            Slot::Integration(i, j) => {
                PlatformEntry::Integration(&self.platforms[i].integrations()[j])
            }
        }
    }

    pub fn guides(&self) -> impl Iterator<Item = &PlatformGuide> {
        self.platforms.iter().flat_map(|p| p.guides())
    }

    pub fn integrations(&self) -> impl Iterator<Item = &PlatformIntegration> {
        self.platforms.iter().flat_map(|p| p.integrations())
    }

    /// Every entry: each platform followed by its guides, then its
    /// integrations.
    pub fn entries(&self) -> impl Iterator<Item = PlatformEntry<'_>> {
        self.platforms.iter().flat_map(|p| {
            std::iter::once(PlatformEntry::Platform(p))
                .chain(p.guides().iter().map(PlatformEntry::Guide))
                .chain(p.integrations().iter().map(PlatformEntry::Integration))
        })
    }

    pub fn by_category(&self, category: PlatformCategory) -> impl Iterator<Item = &Platform> {
        self.platforms
            .iter()
            .filter(move |p| p.config.has_category(category))
    }

    /// Case-insensitive search over keys, names, titles, aliases and
    /// keywords. Integrations are only found when their platform has
    /// `showIntegrationsInSearch` set.
    pub fn search(&self, term: &str) -> Vec<PlatformEntry<'_>> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.entries()
            .filter(|entry| match entry {
                PlatformEntry::Integration(i) => self
                    .platform(&i.platform)
                    .map_or(false, Platform::show_integrations_in_search),
                _ => true,
            })
            .filter(|entry| matches_term(entry, &term))
            .collect()
    }
}

fn matches_term(entry: &PlatformEntry<'_>, term: &str) -> bool {
    let config = entry.config();
    let contains = |s: &str| s.to_lowercase().contains(term);

    contains(entry.key())
        || contains(entry.name())
        || config.title.as_deref().map_or(false, contains)
        || config.platform_title.as_deref().map_or(false, contains)
        || config.aliases().iter().any(|a| contains(a.as_str()))
        || config.keywords().iter().any(|k| contains(k.as_str()))
}

impl Serialize for Registry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.platforms.serialize(serializer)
    }
}
