//! scoper-engine: Rewrites PHP sources so their symbols live under a prefix
//!
//! Parses each file with mago-syntax, walks the AST collecting span edits
//! (namespace declarations, imports, class/function/constant references,
//! symbol-shaped array strings) and applies them to the original text.

mod context;
mod error;
mod rewriter;
mod scoper;
mod strings;

pub use context::{NameContext, NameForm, ResolvedName};
pub use error::ScopeError;
pub use rewriter::rewrite_program;
pub use scoper::Scoper;
