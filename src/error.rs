use thiserror::Error;

/// Main error type for Ontorule
#[derive(Error, Debug)]
pub enum OntoruleError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A rule's regex failed to compile at load time
    #[error("Invalid regex in rule '{rule}': {source}")]
    RulePattern {
        rule: String,
        source: regex::Error,
    },

    /// Taxonomy table rejected at load time
    #[error("Taxonomy error for '{label}': {message}")]
    Taxonomy { label: String, message: String },

    /// IO errors
    #[error("IO error: {context}: {source}")]
    Io {
        source: std::io::Error,
        context: String,
    },

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error("JSON error: {context}: {source}")]
    Json {
        source: serde_json::Error,
        context: String,
    },

    /// Generic errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type for Ontorule operations
pub type Result<T> = std::result::Result<T, OntoruleError>;
