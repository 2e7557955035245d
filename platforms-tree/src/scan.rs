use crate::error::TreeError;
use crate::source::{load_config, SourceConfig};
use platforms_dto::PlatformConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const GUIDES_DIR: &str = "guides";
pub const INTEGRATIONS_DIR: &str = "integrations";

/// A guide or integration as configured on disk, before any inheritance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawGuide {
    pub name: String,
    pub fallback_guide: Option<String>,
    pub config: PlatformConfig,
}

/// A platform as configured on disk, before any inheritance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPlatform {
    pub key: String,
    pub config: PlatformConfig,
    pub guides: Vec<RawGuide>,
    pub integrations: Vec<RawGuide>,
}

/// Lists the sub-directories of `dir` by name, sorted. Hidden directories
/// and names that are not UTF-8 are skipped.
fn sub_directories(dir: &Path) -> Result<Vec<(String, PathBuf)>, TreeError> {
    let mut result = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| TreeError::io(dir, e))? {
        let entry = entry.map_err(|e| TreeError::io(dir, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) if name.starts_with('.') => {}
            Ok(name) => result.push((name, path)),
            Err(name) => warn!(?name, "skipping directory with a non UTF-8 name"),
        }
    }

    result.sort();
    Ok(result)
}

fn scan_guides(platform_dir: &Path, sub_dir: &str) -> Result<Vec<RawGuide>, TreeError> {
    let dir = platform_dir.join(sub_dir);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut guides = Vec::new();
    for (name, path) in sub_directories(&dir)? {
        match load_config(&path)? {
            Some(SourceConfig {
                fallback_guide,
                config,
            }) => guides.push(RawGuide {
                name,
                fallback_guide,
                config,
            }),
            None => debug!(path = %path.display(), "no configuration, skipping"),
        }
    }
    Ok(guides)
}

/// Scans a `platforms/` directory. Every sub-directory holding a
/// `config.yml` or an `index.mdx` is a platform; its `guides/` and
/// `integrations/` sub-directories are scanned the same way.
pub fn scan(root: &Path) -> Result<Vec<RawPlatform>, TreeError> {
    let mut platforms = Vec::new();

    for (key, path) in sub_directories(root)? {
        let source = match load_config(&path)? {
            Some(source) => source,
            None => {
                debug!(path = %path.display(), "no configuration, skipping");
                continue;
            }
        };
        if let Some(fallback_guide) = &source.fallback_guide {
            warn!(platform = %key, %fallback_guide, "`fallbackGuide` has no effect on a platform");
        }

        let guides = scan_guides(&path, GUIDES_DIR)?;
        let integrations = scan_guides(&path, INTEGRATIONS_DIR)?;
        debug!(
            platform = %key,
            guides = guides.len(),
            integrations = integrations.len(),
            "scanned platform"
        );

        platforms.push(RawPlatform {
            key,
            config: source.config,
            guides,
            integrations,
        });
    }

    Ok(platforms)
}
