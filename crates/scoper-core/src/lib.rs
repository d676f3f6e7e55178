//! scoper-core: Shared primitives for the PHP scoper
//!
//! This crate provides:
//! - `Edit`: A span-based source modification (replacement or insertion)
//! - `apply_edits()`: Applies edits to the original text, keeping its formatting
//! - `name`: Helpers for PHP namespaced names (`Foo\Bar\Baz`)

mod edit;
pub mod name;

pub use edit::{apply_edits, Edit, EditError};
