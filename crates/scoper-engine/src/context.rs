//! Per-file name resolution state
//!
//! Tracks the current namespace and the `use` imports in effect, and turns a
//! name as written in source into a fully qualified name following PHP's
//! resolution rules.

use std::collections::HashMap;

use scoper_core::name;
use scoper_symbols::SymbolKind;

/// How a name was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameForm {
    /// `Foo`
    Unqualified,
    /// `Foo\Bar`
    Qualified,
    /// `\Foo\Bar`
    FullyQualified,
    /// `namespace\Foo`
    Relative,
}

/// A name resolved against the current namespace and imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Fully qualified name, without leading `\`
    pub fqn: String,
    pub form: NameForm,
    /// The name went through a `use` import
    pub imported: bool,
}

#[derive(Debug, Default)]
pub struct NameContext {
    namespace: String,
    /// Lower-cased alias -> fully qualified class name
    classes: HashMap<String, String>,
    /// Lower-cased alias -> fully qualified function name
    functions: HashMap<String, String>,
    /// Alias (case-sensitive) -> fully qualified constant name
    constants: HashMap<String, String>,
}

impl NameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a namespace block; imports do not carry over.
    pub fn enter_namespace(&mut self, namespace: &str) {
        self.namespace = name::trim_leading_separator(namespace).to_string();
        self.classes.clear();
        self.functions.clear();
        self.constants.clear();
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_global(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Register `use [function|const] fqn [as alias]`.
    pub fn add_import(&mut self, kind: SymbolKind, fqn: &str, alias: Option<&str>) {
        let fqn = name::trim_leading_separator(fqn).to_string();
        let alias = alias.unwrap_or_else(|| name::short_name(&fqn)).to_string();
        match kind {
            SymbolKind::Class => self.classes.insert(alias.to_lowercase(), fqn),
            SymbolKind::Function => self.functions.insert(alias.to_lowercase(), fqn),
            SymbolKind::Constant => self.constants.insert(alias, fqn),
        };
    }

    pub fn resolve(&self, raw: &str, kind: SymbolKind) -> ResolvedName {
        if name::is_fully_qualified(raw) {
            return ResolvedName {
                fqn: name::trim_leading_separator(raw).to_string(),
                form: NameForm::FullyQualified,
                imported: false,
            };
        }

        if let Some(rest) = strip_namespace_keyword(raw) {
            return ResolvedName {
                fqn: name::join(&self.namespace, rest),
                form: NameForm::Relative,
                imported: false,
            };
        }

        if name::is_qualified(raw) {
            // Only class imports apply to the first segment of a qualified name.
            let first = name::first_segment(raw);
            return match self.classes.get(&first.to_lowercase()) {
                Some(import) => ResolvedName {
                    fqn: format!("{}{}", import, &raw[first.len()..]),
                    form: NameForm::Qualified,
                    imported: true,
                },
                None => ResolvedName {
                    fqn: name::join(&self.namespace, raw),
                    form: NameForm::Qualified,
                    imported: false,
                },
            };
        }

        let import = match kind {
            SymbolKind::Class => self.classes.get(&raw.to_lowercase()),
            SymbolKind::Function => self.functions.get(&raw.to_lowercase()),
            SymbolKind::Constant => self.constants.get(raw),
        };
        match import {
            Some(fqn) => ResolvedName {
                fqn: fqn.clone(),
                form: NameForm::Unqualified,
                imported: true,
            },
            // Classes never fall back to the global namespace. Functions and
            // constants do at runtime; the caller decides what that means.
            None => ResolvedName {
                fqn: name::join(&self.namespace, raw),
                form: NameForm::Unqualified,
                imported: false,
            },
        }
    }
}

fn strip_namespace_keyword(raw: &str) -> Option<&str> {
    let keyword = "namespace\\";
    raw.get(..keyword.len())
        .filter(|head| head.eq_ignore_ascii_case(keyword))
        .map(|_| &raw[keyword.len()..])
}
