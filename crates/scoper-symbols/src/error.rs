//! Errors raised while building registries, whitelists and classifiers

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("Invalid prefix {0:?}: expected one or more namespace segments")]
    InvalidPrefix(String),

    #[error("Invalid regex pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Invalid whitelist entry {0:?}")]
    InvalidWhitelistEntry(String),
}
