//! Errors surfaced by the scoping engine

use scoper_core::EditError;
use scoper_symbols::SymbolError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("Failed to parse {file}")]
    Parse { file: String },

    #[error("Failed to apply edits: {0}")]
    Edit(#[from] EditError),

    #[error("Invalid scoper configuration: {0}")]
    Config(#[from] SymbolError),
}
