//! Scoping configuration
//!
//! The engine receives this already deserialized; where it comes from
//! (`scoper.toml`, JSON, code) is the caller's business.

use scoper_core::name;
use serde::Deserialize;

use crate::error::SymbolError;
use crate::whitelist::Whitelist;

/// Configuration of a scoping run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScoperConfig {
    /// Namespace prepended to every application symbol (e.g. `Humbug`)
    pub prefix: String,
    /// Exact names, globs, `/regex/` and `Namespace\*` entries
    #[serde(default)]
    pub whitelist: Vec<String>,
    #[serde(default = "default_true")]
    pub whitelist_global_constants: bool,
    #[serde(default = "default_true")]
    pub whitelist_global_functions: bool,
    #[serde(default)]
    pub registered_classes: Vec<String>,
    #[serde(default)]
    pub registered_functions: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl ScoperConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            whitelist: Vec::new(),
            whitelist_global_constants: true,
            whitelist_global_functions: true,
            registered_classes: Vec::new(),
            registered_functions: Vec::new(),
        }
    }

    pub fn with_whitelist<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist.extend(entries.into_iter().map(Into::into));
        self
    }

    pub fn with_global_exclusions(mut self, constants: bool, functions: bool) -> Self {
        self.whitelist_global_constants = constants;
        self.whitelist_global_functions = functions;
        self
    }

    /// The prefix without surrounding `\`, checked to be a valid namespace.
    pub fn validated_prefix(&self) -> Result<String, SymbolError> {
        normalize_prefix(&self.prefix)
    }

    pub fn build_whitelist(&self) -> Result<Whitelist, SymbolError> {
        Whitelist::new(
            &self.whitelist,
            self.whitelist_global_constants,
            self.whitelist_global_functions,
            &self.registered_classes,
            &self.registered_functions,
        )
    }
}

/// Trim `\` on both ends and validate every segment.
pub fn normalize_prefix(prefix: &str) -> Result<String, SymbolError> {
    let trimmed = prefix.trim().trim_matches(name::SEPARATOR);
    if name::is_valid_symbol_name(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(SymbolError::InvalidPrefix(prefix.to_string()))
    }
}
