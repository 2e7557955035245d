//! Data model of the platforms, guides and integrations shown in the docs.
//!
//! A [`PlatformConfig`] is what a `config.yml` file and an `index.mdx`
//! frontmatter block hold. The resolved entries, [`Platform`],
//! [`PlatformGuide`] and [`PlatformIntegration`], are told apart by their
//! `type` field.
pub mod config;
pub mod entry;
pub mod error;
pub mod guides;
pub mod platforms;
pub mod tags;
pub mod types;

pub use config::PlatformConfig;
pub use entry::PlatformEntry;
pub use error::SchemaError;
pub use guides::{GuideFields, Icon, PlatformGuide, PlatformIntegration};
pub use platforms::Platform;
pub use types::{EntryType, PlatformCaseStyle, PlatformCategory, PlatformSupportLevel};
