//! Builds the platforms of a documentation tree from disk.
//!
//! ```text
//! platforms/
//!   javascript/
//!     config.yml
//!     index.mdx
//!     guides/express/index.mdx
//!     integrations/vue/config.yml
//! ```
//!
//! Each directory is read ([`source`]), the whole tree is scanned
//! ([`scan`]), fallbacks are followed ([`resolve`]) and the result is indexed
//! in a [`Registry`].
use std::path::Path;

pub mod error;
pub mod frontmatter;
pub mod registry;
pub mod resolve;
pub mod scan;
pub mod source;

pub use error::TreeError;
pub use registry::Registry;
pub use resolve::ResolveOptions;

/// Loads, resolves and indexes every platform under `root`.
pub fn load(root: &Path, options: &ResolveOptions) -> Result<Registry, TreeError> {
    let raw = scan::scan(root)?;
    let platforms = resolve::resolve(&raw, options)?;
    tracing::info!(
        root = %root.display(),
        platforms = platforms.len(),
        "loaded platforms"
    );
    Registry::new(platforms)
}
