//! Fallback resolution.
//!
//! A platform inherits every unset field from its `fallbackPlatform`. A guide
//! inherits from its `fallbackGuide` first, then from its own
//! `fallbackPlatform` if it sets one, and from its own platform last.
//! Chains are followed to their end; cycles are always an error.
use crate::error::TreeError;
use crate::scan::{RawGuide, RawPlatform, GUIDES_DIR, INTEGRATIONS_DIR};
use platforms_dto::guides::qualified_key;
use platforms_dto::{
    GuideFields, Platform, PlatformConfig, PlatformGuide, PlatformIntegration,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const DEFAULT_URL_PREFIX: &str = "/platforms";

/// Options for turning raw configuration into resolved platforms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Prefix of every generated URL.
    pub url_prefix: String,

    /// Whether a fallback pointing to an unknown key is an error. When
    /// `false` the fallback is ignored and a warning is logged.
    pub strict: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            strict: true,
        }
    }
}

impl ResolveOptions {
    fn base_url(&self) -> &str {
        self.url_prefix.trim_end_matches('/')
    }

    pub fn platform_url(&self, platform: &str) -> String {
        format!("{}/{platform}/", self.base_url())
    }

    pub fn guide_url(&self, platform: &str, name: &str) -> String {
        format!("{}/{platform}/{GUIDES_DIR}/{name}/", self.base_url())
    }

    pub fn integration_url(&self, platform: &str, name: &str) -> String {
        format!("{}/{platform}/{INTEGRATIONS_DIR}/{name}/", self.base_url())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum GuideKind {
    Guide,
    Integration,
}

struct GuideNode<'a> {
    platform: &'a str,
    kind: GuideKind,
    raw: &'a RawGuide,
}

/// Resolves fallback chains with memoization. `stack` holds the keys being
/// resolved, to detect cycles.
struct Resolver<'a> {
    options: &'a ResolveOptions,
    platforms: HashMap<&'a str, &'a RawPlatform>,
    guides: HashMap<String, GuideNode<'a>>,
    resolved_platforms: HashMap<&'a str, PlatformConfig>,
    resolved_guides: HashMap<String, PlatformConfig>,
    stack: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(raw: &'a [RawPlatform], options: &'a ResolveOptions) -> Result<Self, TreeError> {
        let mut platforms = HashMap::new();
        let mut guides = HashMap::new();

        for platform in raw {
            if platforms.insert(platform.key.as_str(), platform).is_some() {
                return Err(TreeError::DuplicateKey(platform.key.clone()));
            }

            let children = platform
                .guides
                .iter()
                .map(|g| (GuideKind::Guide, g))
                .chain(platform.integrations.iter().map(|i| (GuideKind::Integration, i)));
            for (kind, guide) in children {
                let key = qualified_key(&platform.key, &guide.name);
                let node = GuideNode {
                    platform: &platform.key,
                    kind,
                    raw: guide,
                };
                if guides.insert(key.clone(), node).is_some() {
                    return Err(TreeError::DuplicateKey(key));
                }
            }
        }

        Ok(Self {
            options,
            platforms,
            guides,
            resolved_platforms: HashMap::new(),
            resolved_guides: HashMap::new(),
            stack: Vec::new(),
        })
    }

    fn enter(&mut self, key: &str) -> Result<(), TreeError> {
        if let Some(start) = self.stack.iter().position(|k| k == key) {
            let mut chain = self.stack[start..].to_vec();
            chain.push(key.to_string());
            return Err(TreeError::FallbackCycle { chain });
        }
        self.stack.push(key.to_string());
        Ok(())
    }

    fn leave(&mut self) {
        self.stack.pop();
    }

    fn unknown(&self, from: &str, target: &str) -> Result<(), TreeError> {
        if self.options.strict {
            Err(TreeError::UnknownFallback {
                from: from.to_string(),
                target: target.to_string(),
            })
        } else {
            warn!(%from, %target, "ignoring fallback to an unknown key");
            Ok(())
        }
    }

    fn platform_config(&mut self, key: &str) -> Result<PlatformConfig, TreeError> {
        if let Some(config) = self.resolved_platforms.get(key) {
            return Ok(config.clone());
        }

        let raw = self.platforms[key];
        self.enter(&raw.key)?;

        let mut config = raw.config.clone();
        if let Some(target) = &raw.config.fallback_platform {
            if self.platforms.contains_key(target.as_str()) {
                let parent = self.platform_config(target)?;
                debug!(platform = %raw.key, fallback = %target, "inheriting platform");
                config.inherit_from(&parent);
            } else {
                self.unknown(&raw.key, target)?;
            }
        }

        self.leave();
        self.resolved_platforms.insert(&raw.key, config.clone());
        Ok(config)
    }

    /// A fallback guide is either fully qualified (`javascript.node`) or the
    /// name of a sibling under the same platform (`node`).
    fn fallback_key(platform: &str, target: &str) -> String {
        if target.contains('.') {
            target.to_string()
        } else {
            qualified_key(platform, target)
        }
    }

    fn guide_config(&mut self, key: &str) -> Result<PlatformConfig, TreeError> {
        if let Some(config) = self.resolved_guides.get(key) {
            return Ok(config.clone());
        }

        let (platform, raw) = {
            let node = &self.guides[key];
            (node.platform, node.raw)
        };
        self.enter(key)?;

        let mut config = raw.config.clone();
        if let Some(target) = &raw.fallback_guide {
            let target_key = Self::fallback_key(platform, target);
            if self.guides.contains_key(&target_key) {
                let parent = self.guide_config(&target_key)?;
                debug!(guide = %key, fallback = %target_key, "inheriting guide");
                config.inherit_from(&parent);
            } else {
                self.unknown(key, target)?;
            }
        }
        if let Some(target) = &raw.config.fallback_platform {
            if self.platforms.contains_key(target.as_str()) {
                let parent = self.platform_config(target)?;
                debug!(guide = %key, fallback = %target, "inheriting platform");
                config.inherit_from(&parent);
            } else {
                self.unknown(key, target)?;
            }
        }
        let platform_config = self.platform_config(platform)?;
        config.inherit_from(&platform_config);

        self.leave();
        self.resolved_guides.insert(key.to_string(), config.clone());
        Ok(config)
    }

    fn build_guide(&mut self, platform: &str, raw: &RawGuide) -> Result<GuideFields, TreeError> {
        let key = qualified_key(platform, &raw.name);
        let config = self.guide_config(&key)?;
        let url = match self.guides[&key].kind {
            GuideKind::Guide => self.options.guide_url(platform, &raw.name),
            GuideKind::Integration => self.options.integration_url(platform, &raw.name),
        };

        let mut fields = GuideFields::new(platform, &raw.name, url, config)?;
        fields.fallback_guide = raw.fallback_guide.clone();
        Ok(fields)
    }

    fn build(&mut self, raw: &'a RawPlatform) -> Result<Platform, TreeError> {
        let config = self.platform_config(&raw.key)?;
        let mut platform = Platform::new(&raw.key, self.options.platform_url(&raw.key), config)?;

        for guide in &raw.guides {
            let fields = self.build_guide(&raw.key, guide)?;
            platform.add_guide(PlatformGuide::new(fields)?)?;
        }
        for integration in &raw.integrations {
            let fields = self.build_guide(&raw.key, integration)?;
            platform.add_integration(PlatformIntegration::new(fields)?)?;
        }

        Ok(platform)
    }
}

/// Resolves every platform, guide and integration of `raw`, following their
/// fallbacks. The order of `raw` is kept.
pub fn resolve(raw: &[RawPlatform], options: &ResolveOptions) -> Result<Vec<Platform>, TreeError> {
    let mut resolver = Resolver::new(raw, options)?;
    raw.iter().map(|platform| resolver.build(platform)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use platforms_dto::{PlatformCaseStyle, PlatformCategory, SchemaError};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config(yaml: &str) -> PlatformConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn platform(key: &str, yaml: &str) -> RawPlatform {
        RawPlatform {
            key: key.to_string(),
            config: config(yaml),
            guides: Vec::new(),
            integrations: Vec::new(),
        }
    }

    fn guide(name: &str, fallback_guide: Option<&str>, yaml: &str) -> RawGuide {
        RawGuide {
            name: name.to_string(),
            fallback_guide: fallback_guide.map(str::to_string),
            config: config(yaml),
        }
    }

    #[test]
    fn platform_chain_is_transitive() {
        let raw = vec![
            platform("a", "title: A\nfallbackPlatform: b\n"),
            platform("b", "language: b-lang\nfallbackPlatform: c\n"),
            platform("c", "title: C\nlanguage: c-lang\nsdk: sentry.c\ncaseStyle: snake_case\n"),
        ];
        let platforms = resolve(&raw, &ResolveOptions::default()).unwrap();

        let a = &platforms[0].config;
        assert_eq!(a.title.as_deref(), Some("A"));
        assert_eq!(a.language.as_deref(), Some("b-lang"));
        assert_eq!(a.sdk.as_deref(), Some("sentry.c"));
        assert_eq!(a.case_style, Some(PlatformCaseStyle::SnakeCase));
        assert_eq!(a.fallback_platform.as_deref(), Some("b"));
        assert_eq!(platforms[0].url, "/platforms/a/");
    }

    #[test]
    fn guide_inherits_from_fallback_guide_then_platform() {
        let mut javascript = platform("javascript", "title: JavaScript\ncaseStyle: camelCase\n");
        javascript.guides = vec![
            guide("node", None, "title: Node.js\ncategories: [server]\nsdk: sentry.javascript.node\n"),
            guide("express", Some("node"), "title: Express\n"),
        ];
        let raw = vec![javascript];
        let platforms = resolve(&raw, &ResolveOptions::default()).unwrap();

        let express = &platforms[0].guides()[1];
        assert_eq!(express.key, "javascript.express");
        assert_eq!(express.platform, "javascript");
        assert_eq!(express.fallback_guide.as_deref(), Some("node"));
        assert_eq!(express.url, "/platforms/javascript/guides/express/");
        assert_eq!(
            express.config,
            PlatformConfig {
                title: Some("Express".to_string()),
                categories: Some([PlatformCategory::Server].into()),
                sdk: Some("sentry.javascript.node".to_string()),
                case_style: Some(PlatformCaseStyle::CamelCase),
                ..Default::default()
            }
        );
    }

    #[test]
    fn fallback_guide_across_platforms() {
        let mut javascript = platform("javascript", "language: javascript\n");
        javascript.guides = vec![guide("node", None, "title: Node.js\nkeywords: [node]\n")];
        let mut express = platform("express", "title: Express\n");
        express.guides = vec![guide("express", Some("javascript.node"), "")];

        let platforms = resolve(&[express, javascript], &ResolveOptions::default()).unwrap();
        let guide = &platforms[0].guides()[0];
        assert_eq!(guide.config.title.as_deref(), Some("Node.js"));
        assert_eq!(guide.config.keywords(), ["node".to_string()]);
        assert_eq!(guide.config.language.as_deref(), Some("javascript"));
    }

    #[test]
    fn cycles_are_rejected() {
        let raw = vec![
            platform("a", "fallbackPlatform: b\n"),
            platform("b", "fallbackPlatform: a\n"),
        ];
        match resolve(&raw, &ResolveOptions::default()) {
            Err(TreeError::FallbackCycle { chain }) => assert_eq!(chain, ["a", "b", "a"]),
            other => panic!("expected a cycle, got {other:?}"),
        }

        let mut python = platform("python", "");
        python.guides = vec![guide("loop", Some("loop"), "")];
        match resolve(&[python], &ResolveOptions::default()) {
            Err(TreeError::FallbackCycle { chain }) => {
                assert_eq!(chain, ["python.loop", "python.loop"])
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn unknown_fallbacks() {
        let raw = vec![platform("a", "title: A\nfallbackPlatform: missing\n")];
        assert!(matches!(
            resolve(&raw, &ResolveOptions::default()),
            Err(TreeError::UnknownFallback { from, target }) if from == "a" && target == "missing"
        ));

        let lenient = ResolveOptions {
            strict: false,
            ..Default::default()
        };
        let platforms = resolve(&raw, &lenient).unwrap();
        assert_eq!(platforms[0].config.title.as_deref(), Some("A"));
        assert_eq!(platforms[0].config.fallback_platform.as_deref(), Some("missing"));
    }

    #[rstest]
    #[case("nope", "nope")]
    #[case("javascript.nope", "javascript.nope")]
    #[case("ruby.node", "ruby.node")]
    fn unknown_fallback_guides(#[case] target: &str, #[case] reported: &str) {
        let mut javascript = platform("javascript", "language: javascript\n");
        javascript.guides = vec![
            guide("node", None, "title: Node.js\n"),
            guide("express", Some(target), "title: Express\n"),
        ];
        let raw = vec![javascript];

        match resolve(&raw, &ResolveOptions::default()) {
            Err(TreeError::UnknownFallback { from, target }) => {
                assert_eq!(from, "javascript.express");
                assert_eq!(target, reported);
            }
            other => panic!("expected an unknown fallback, got {other:?}"),
        }

        let lenient = ResolveOptions {
            strict: false,
            ..Default::default()
        };
        let platforms = resolve(&raw, &lenient).unwrap();
        let express = &platforms[0].guides()[1];
        assert_eq!(express.fallback_guide.as_deref(), Some(target));
        assert_eq!(express.config.title.as_deref(), Some("Express"));
        assert_eq!(express.config.language.as_deref(), Some("javascript"));
    }

    #[test]
    fn guide_cycle_across_platforms() {
        let mut a = platform("a", "");
        a.guides = vec![guide("x", Some("b.y"), "")];
        let mut b = platform("b", "");
        b.guides = vec![guide("y", Some("a.x"), "")];

        match resolve(&[a, b], &ResolveOptions::default()) {
            Err(TreeError::FallbackCycle { chain }) => assert_eq!(chain, ["a.x", "b.y", "a.x"]),
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn guide_fallback_platform() {
        let mut python = platform("python", "title: Python\nlanguage: python\n");
        python.guides = vec![guide(
            "django",
            None,
            "title: Django\nfallbackPlatform: does-not-exist\n",
        )];
        let raw = vec![python.clone()];
        assert!(matches!(
            resolve(&raw, &ResolveOptions::default()),
            Err(TreeError::UnknownFallback { from, target })
                if from == "python.django" && target == "does-not-exist"
        ));

        let lenient = ResolveOptions {
            strict: false,
            ..Default::default()
        };
        let platforms = resolve(&raw, &lenient).unwrap();
        let django = &platforms[0].guides()[0];
        assert_eq!(django.config.fallback_platform.as_deref(), Some("does-not-exist"));
        assert_eq!(django.config.language.as_deref(), Some("python"));

        python.guides = vec![guide("django", None, "title: Django\nfallbackPlatform: web\n")];
        let web = platform("web", "sdk: sentry.web\nlanguage: html\n");
        let platforms = resolve(&[python, web], &ResolveOptions::default()).unwrap();
        let django = &platforms[0].guides()[0];
        assert_eq!(django.config.title.as_deref(), Some("Django"));
        assert_eq!(django.config.sdk.as_deref(), Some("sentry.web"));
        assert_eq!(django.config.language.as_deref(), Some("html"));
    }

    #[test]
    fn integrations_need_an_icon() {
        let mut python = platform("python", "title: Python\n");
        python.integrations = vec![guide("celery", None, "title: Celery\n")];
        assert!(matches!(
            resolve(&[python.clone()], &ResolveOptions::default()),
            Err(TreeError::Schema(SchemaError::MissingIcon(key))) if key == "python.celery"
        ));

        python.config.icon = Some("python".to_string());
        let platforms = resolve(&[python], &ResolveOptions::default()).unwrap();
        let celery = &platforms[0].integrations()[0];
        assert_eq!(celery.icon.as_str(), "python");
        assert_eq!(celery.url, "/platforms/python/integrations/celery/");
    }

    #[test]
    fn custom_url_prefix() {
        let options = ResolveOptions {
            url_prefix: "/docs/platforms/".to_string(),
            ..Default::default()
        };
        assert_eq!(options.platform_url("go"), "/docs/platforms/go/");
        assert_eq!(options.guide_url("go", "gin"), "/docs/platforms/go/guides/gin/");

        let empty = ResolveOptions {
            url_prefix: String::new(),
            ..Default::default()
        };
        assert_eq!(empty.platform_url("go"), "/go/");
    }
}
