//! Reading the configuration of a single platform or guide directory.
use crate::error::TreeError;
use crate::frontmatter::{is_blank_yaml, split_frontmatter};
use platforms_dto::PlatformConfig;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

pub const CONFIG_FILE: &str = "config.yml";
pub const INDEX_FILE: &str = "index.mdx";

/// Everything a directory can configure about itself: the platform config,
/// plus `fallbackGuide` for guides and integrations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_guide: Option<String>,

    #[serde(flatten)]
    pub config: PlatformConfig,
}

impl SourceConfig {
    /// Puts `overlay` on top of `self`; values set on `overlay` win.
    pub fn merge(self, overlay: SourceConfig) -> SourceConfig {
        SourceConfig {
            fallback_guide: overlay.fallback_guide.or(self.fallback_guide),
            config: self.config.merge(overlay.config),
        }
    }
}

/// Parses a YAML document as a [`SourceConfig`]. `path` is only used for
/// error reporting.
pub fn parse_config(text: &str, path: &Path) -> Result<SourceConfig, TreeError> {
    if is_blank_yaml(text) {
        return Ok(SourceConfig::default());
    }

    serde_yaml::from_str(text).map_err(|source| TreeError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, TreeError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TreeError::io(path, e)),
    }
}

/// Loads the configuration of `dir` from its `config.yml` and the
/// frontmatter of its `index.mdx`. The frontmatter takes precedence.
///
/// Returns `None` when the directory has neither file.
pub fn load_config(dir: &Path) -> Result<Option<SourceConfig>, TreeError> {
    let config_path = dir.join(CONFIG_FILE);
    let index_path = dir.join(INDEX_FILE);

    let config_yml = read_optional(&config_path)?;
    let index_mdx = read_optional(&index_path)?;
    if config_yml.is_none() && index_mdx.is_none() {
        return Ok(None);
    }

    let base = match config_yml {
        Some(text) => parse_config(&text, &config_path)?,
        None => SourceConfig::default(),
    };
    let overlay = match index_mdx.as_deref().and_then(split_frontmatter) {
        Some(frontmatter) => parse_config(frontmatter, &index_path)?,
        None => SourceConfig::default(),
    };

    debug!(dir = %dir.display(), "loaded configuration");
    Ok(Some(base.merge(overlay)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platforms_dto::{PlatformCaseStyle, PlatformCategory, PlatformSupportLevel};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(text: &str) -> Result<SourceConfig, TreeError> {
        parse_config(text, &PathBuf::from("config.yml"))
    }

    #[test]
    fn parses_yaml() {
        let source = parse(
            r#"
title: Express
caseStyle: camelCase
supportLevel: production
categories:
  - server
  - serverless
aliases: [express-js]
showIntegrationsInSearch: false
fallbackGuide: javascript.node
sidebar_order: 3
"#,
        )
        .unwrap();

        assert_eq!(source.fallback_guide.as_deref(), Some("javascript.node"));
        assert_eq!(
            source.config,
            PlatformConfig {
                title: Some("Express".to_string()),
                case_style: Some(PlatformCaseStyle::CamelCase),
                support_level: Some(PlatformSupportLevel::Production),
                categories: Some([PlatformCategory::Server, PlatformCategory::Serverless].into()),
                aliases: Some(vec!["express-js".to_string()]),
                show_integrations_in_search: Some(false),
                ..Default::default()
            }
        );
    }

    #[test]
    fn blank_documents_are_empty() {
        assert_eq!(parse("").unwrap(), SourceConfig::default());
        assert_eq!(parse("# nothing yet\n").unwrap(), SourceConfig::default());
    }

    #[test]
    fn unknown_enum_values_are_errors() {
        let err = parse("caseStyle: kebab-case\n").unwrap_err();
        assert!(matches!(err, TreeError::Parse { .. }), "{err}");
        assert!(err.to_string().contains("config.yml"));
    }

    #[test]
    fn frontmatter_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "title: From config\nsdk: sentry.go\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join(INDEX_FILE),
            "---\ntitle: From frontmatter\ndescription: not a config key\n---\n# Go\n",
        )
        .unwrap();

        let source = load_config(dir.path()).unwrap().unwrap();
        assert_eq!(source.config.title.as_deref(), Some("From frontmatter"));
        assert_eq!(source.config.sdk.as_deref(), Some("sentry.go"));
        assert_eq!(source.config.language, None);
    }

    #[test]
    fn directory_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(INDEX_FILE), "# No frontmatter\n").unwrap();
        assert_eq!(
            load_config(dir.path()).unwrap(),
            Some(SourceConfig::default())
        );
    }
}
