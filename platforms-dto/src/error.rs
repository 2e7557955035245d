/// A violation of the platform data model invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("integration `{0}` has no icon")]
    MissingIcon(String),

    #[error("icon cannot be empty")]
    EmptyIcon,

    #[error("platform `{key}` must be named after its key, found `{name}`")]
    NameMismatch { key: String, name: String },

    #[error("key `{key}` must be `{platform}.{name}`")]
    KeyMismatch {
        key: String,
        platform: String,
        name: String,
    },

    #[error("`{child}` belongs to platform `{actual}` but is listed under `{expected}`")]
    ForeignChild {
        child: String,
        expected: String,
        actual: String,
    },

    #[error("`{0}` is not a valid identifier")]
    InvalidIdentifier(String),
}
