use thiserror::Error;

/// Errors that prevent a catalog document from being validated at all.
///
/// Malformed catalog *content* never ends up here; it is reported through
/// a `ValidationReport` instead.
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Could not read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("Catalog does not match the block definition model: {0}")]
    Model(String),
}

/// Problems the block editor reports before it agrees to save a draft.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftIssue {
    #[error("Block ID is required")]
    MissingId,

    #[error("Block name is required")]
    MissingName,

    #[error(
        "Block ID must start with lowercase letter and contain only lowercase letters, numbers, and underscores"
    )]
    InvalidId,

    #[error("{port} min cannot be greater than max")]
    InvertedPortBounds { port: &'static str },

    #[error("Property {position}: Key is required")]
    MissingPropertyKey { position: usize },

    #[error("Property {position}: Label is required")]
    MissingPropertyLabel { position: usize },

    #[error("Property {position}: Key must be lowercase with underscores")]
    InvalidPropertyKey { position: usize },

    #[error("Block ID \"{0}\" already exists")]
    IdCollision(String),
}

/// Returned when a string is not one of a canonical enumeration's members.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);
