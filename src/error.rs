//! Error taxonomy for engine construction and classification.

use std::path::PathBuf;

/// Errors raised while loading configuration, dictionaries or building an engine.
///
/// Every variant except [`Error::UnsupportedScript`] is a construction-time failure;
/// a classification call never produces one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },

    #[error("Invalid config value: {0}")]
    InvalidConfig(String),

    #[error("Invalid language code: {0:?}")]
    InvalidLanguageCode(String),

    #[error("No dictionary code configured for language '{0}'")]
    UnmappedLanguage(String),

    #[error(
        "No dictionary '{dictionary}' for language '{language}' in any of {searched:?}. \
         Install the .aff/.dic pair (or a .txt word list) in one of these paths"
    )]
    MissingDictionary {
        language: String,
        dictionary: String,
        searched: Vec<PathBuf>,
    },

    #[error("Failed building dictionary for '{language}': {reason}")]
    DictionaryBuild { language: String, reason: String },

    /// Script detection was requested for a family with no registered script table.
    /// Callers are expected to check registration first, so this is a defect.
    #[error("internal error: no script table registered for family '{0}'")]
    UnsupportedScript(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Per-token lookup failure. Absorbed by the scorer, never surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("token {0:?} contains malformed or control characters")]
    MalformedToken(String),
}
