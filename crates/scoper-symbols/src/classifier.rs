//! Decides what happens to each symbol occurrence

use mago_span::Span;
use scoper_core::name;
use tracing::{debug, trace};

use crate::config::{normalize_prefix, ScoperConfig};
use crate::error::SymbolError;
use crate::reflector::Reflector;
use crate::whitelist::Whitelist;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Function,
    Constant,
}

/// A symbol occurrence as seen by the classifier
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Fully qualified name; a leading `\` is ignored
    pub name: String,
    pub kind: SymbolKind,
    /// Where the occurrence was found, if it came from source
    pub span: Option<Span>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            span: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, SymbolKind::Class)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, SymbolKind::Function)
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Self::new(name, SymbolKind::Constant)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// What the rewriter does with a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Native or already prefixed: never touched
    Skip,
    /// Whitelisted by the user: keeps its name
    Exclude,
    /// Application symbol: moved under the prefix
    Prefix,
}

/// Prefix + Reflector + Whitelist
///
/// Read-only after construction; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    prefix: String,
    reflector: Reflector,
    whitelist: Whitelist,
}

impl Classifier {
    pub fn new(prefix: &str, reflector: Reflector, whitelist: Whitelist) -> Result<Self, SymbolError> {
        let prefix = normalize_prefix(prefix)?;
        debug!(prefix = %prefix, "Created symbol classifier");
        Ok(Self {
            prefix,
            reflector,
            whitelist,
        })
    }

    pub fn from_config(config: &ScoperConfig, reflector: Reflector) -> Result<Self, SymbolError> {
        Self::new(&config.prefix, reflector, config.build_whitelist()?)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    pub fn whitelist(&self) -> &Whitelist {
        &self.whitelist
    }

    pub fn classify(&self, symbol: &Symbol) -> Disposition {
        let disposition = self.classify_name(&symbol.name, symbol.kind);
        trace!(symbol = %symbol.name, kind = ?symbol.kind, ?disposition, "Classified symbol");
        disposition
    }

    /// First match wins: already prefixed, native, whitelisted, else prefix.
    pub fn classify_name(&self, symbol: &str, kind: SymbolKind) -> Disposition {
        if self.is_prefixed(symbol) {
            return Disposition::Skip;
        }

        let native = match kind {
            SymbolKind::Class => self.reflector.is_class_internal(symbol),
            SymbolKind::Function => self.reflector.is_function_internal(symbol),
            SymbolKind::Constant => self.reflector.is_constant_internal(symbol),
        };
        if native {
            return Disposition::Skip;
        }

        let excluded = match kind {
            SymbolKind::Class => self.whitelist.excludes_class(symbol),
            SymbolKind::Function => self.whitelist.excludes_function(symbol),
            SymbolKind::Constant => self.whitelist.excludes_constant(symbol),
        };
        if excluded {
            Disposition::Exclude
        } else {
            Disposition::Prefix
        }
    }

    /// Disposition of a namespace declaration.
    pub fn classify_namespace(&self, namespace: &str) -> Disposition {
        if self.is_prefixed(namespace) {
            Disposition::Skip
        } else if self.whitelist.excludes_namespace(namespace) {
            Disposition::Exclude
        } else {
            Disposition::Prefix
        }
    }

    /// Whether the name already lives under the prefix. Namespace names
    /// compare case-insensitively.
    pub fn is_prefixed(&self, symbol: &str) -> bool {
        name::starts_with_namespace_ignore_case(symbol, &self.prefix)
    }

    /// `Prefix\name`, without leading `\`.
    pub fn prefixed(&self, symbol: &str) -> String {
        name::join(&self.prefix, symbol)
    }
}
