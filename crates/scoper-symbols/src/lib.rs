//! scoper-symbols: Deciding what happens to a PHP symbol
//!
//! - `SymbolRegistry`: immutable name set with a per-kind case policy
//! - `NativeCatalog` / `Reflector`: the symbols PHP provides natively
//! - `Whitelist`: user exclusions
//! - `Classifier`: combines the above into a `Disposition`
//! - `ScoperConfig`: deserializable scoping configuration

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod reflector;
pub mod registry;
pub mod whitelist;

pub use catalog::NativeCatalog;
pub use classifier::{Classifier, Disposition, Symbol, SymbolKind};
pub use config::ScoperConfig;
pub use error::SymbolError;
pub use reflector::Reflector;
pub use registry::{CasePolicy, SymbolRegistry};
pub use whitelist::Whitelist;
