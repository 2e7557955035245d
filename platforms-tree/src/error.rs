use platforms_dto::SchemaError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("fallback cycle: {}", chain.join(" -> "))]
    FallbackCycle { chain: Vec<String> },

    #[error("`{from}` falls back to `{target}`, which does not exist")]
    UnknownFallback { from: String, target: String },

    #[error("duplicate key `{0}`")]
    DuplicateKey(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl TreeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreeError::Io {
            path: path.into(),
            source,
        }
    }
}
