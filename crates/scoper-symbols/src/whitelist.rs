//! User-declared exclusions
//!
//! Entry syntax:
//! - `Acme\Foo` exact symbol name
//! - `Acme\*` the whole `Acme` namespace, sub-namespaces included
//! - `Acme\*Test` glob (`*`, `?`, `[...]`)
//! - `/^Acme\\.+Test$/i` regex between delimiters, optional flags
//!
//! Matching is case-insensitive for every symbol kind.

use glob::{MatchOptions, Pattern};
use scoper_core::name;

use crate::error::SymbolError;
use crate::registry::{CasePolicy, SymbolRegistry};

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

const REGEX_DELIMITERS: [char; 4] = ['/', '#', '~', '%'];

/// Symbols the user wants left out of the prefixing
#[derive(Debug, Clone)]
pub struct Whitelist {
    symbols: SymbolRegistry,
    globs: Vec<Pattern>,
    namespaces: Vec<String>,
    registered_classes: SymbolRegistry,
    registered_functions: SymbolRegistry,
    exclude_global_constants: bool,
    exclude_global_functions: bool,
}

impl Whitelist {
    pub fn new<W, C, F>(
        entries: W,
        exclude_global_constants: bool,
        exclude_global_functions: bool,
        registered_classes: C,
        registered_functions: F,
    ) -> Result<Self, SymbolError>
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
    {
        let mut names = Vec::new();
        let mut regexes = Vec::new();
        let mut globs = Vec::new();
        let mut namespaces = Vec::new();

        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            match parse_entry(entry)? {
                Entry::Exact(name) => names.push(name),
                Entry::Namespace(namespace) => namespaces.push(namespace.to_lowercase()),
                Entry::Glob(pattern) => globs.push(pattern),
                Entry::Regex(regex) => regexes.push(regex),
            }
        }

        Ok(Self {
            symbols: SymbolRegistry::create(names, regexes)?,
            globs,
            namespaces,
            registered_classes: SymbolRegistry::from_names(
                CasePolicy::Insensitive,
                registered_classes,
            ),
            registered_functions: SymbolRegistry::from_names(
                CasePolicy::Insensitive,
                registered_functions,
            ),
            exclude_global_constants,
            exclude_global_functions,
        })
    }

    /// Whitelist excluding nothing.
    pub fn empty() -> Self {
        Self {
            symbols: SymbolRegistry::empty(CasePolicy::Insensitive),
            globs: Vec::new(),
            namespaces: Vec::new(),
            registered_classes: SymbolRegistry::empty(CasePolicy::Insensitive),
            registered_functions: SymbolRegistry::empty(CasePolicy::Insensitive),
            exclude_global_constants: false,
            exclude_global_functions: false,
        }
    }

    pub fn excludes_class(&self, symbol: &str) -> bool {
        self.registered_classes.matches(symbol) || self.excludes_symbol(symbol)
    }

    pub fn excludes_function(&self, symbol: &str) -> bool {
        self.registered_functions.matches(symbol)
            || self.excludes_symbol(symbol)
            || (self.exclude_global_functions && !name::is_qualified(symbol))
    }

    pub fn excludes_constant(&self, symbol: &str) -> bool {
        self.excludes_symbol(symbol)
            || (self.exclude_global_constants && !name::is_qualified(symbol))
    }

    /// Whether `namespace` (or one of its parents) is whitelisted as a whole.
    pub fn excludes_namespace(&self, namespace: &str) -> bool {
        let namespace = name::trim_leading_separator(namespace);
        !namespace.is_empty()
            && self
                .namespaces
                .iter()
                .any(|excluded| name::starts_with_namespace_ignore_case(namespace, excluded))
    }

    pub fn exclude_global_constants(&self) -> bool {
        self.exclude_global_constants
    }

    pub fn exclude_global_functions(&self) -> bool {
        self.exclude_global_functions
    }

    fn excludes_symbol(&self, symbol: &str) -> bool {
        let symbol = name::trim_leading_separator(symbol);
        self.symbols.matches(symbol)
            || self
                .globs
                .iter()
                .any(|glob| glob.matches_with(symbol, GLOB_OPTIONS))
            || name::namespace_of(symbol).is_some_and(|ns| self.excludes_namespace(ns))
    }
}

impl Default for Whitelist {
    fn default() -> Self {
        Self::empty()
    }
}

enum Entry {
    Exact(String),
    Namespace(String),
    Glob(Pattern),
    Regex(String),
}

fn parse_entry(entry: &str) -> Result<Entry, SymbolError> {
    if let Some(regex) = parse_delimited_regex(entry) {
        return Ok(Entry::Regex(regex));
    }

    let entry = name::trim_leading_separator(entry);

    if let Some(namespace) = entry.strip_suffix("\\*") {
        if !name::is_valid_symbol_name(namespace) {
            return Err(SymbolError::InvalidWhitelistEntry(entry.to_string()));
        }
        return Ok(Entry::Namespace(namespace.to_string()));
    }

    if entry.contains(['*', '?', '[']) {
        let pattern = Pattern::new(entry).map_err(|source| SymbolError::InvalidGlob {
            pattern: entry.to_string(),
            source,
        })?;
        return Ok(Entry::Glob(pattern));
    }

    if !name::is_valid_symbol_name(entry) {
        return Err(SymbolError::InvalidWhitelistEntry(entry.to_string()));
    }
    Ok(Entry::Exact(entry.to_string()))
}

/// Turn `/body/flags` into an inline-flagged regex, or `None` when the entry
/// is not delimited.
fn parse_delimited_regex(entry: &str) -> Option<String> {
    let delimiter = entry.chars().next().filter(|c| REGEX_DELIMITERS.contains(c))?;
    let close = entry.rfind(delimiter).filter(|&idx| idx > 0)?;
    let body = &entry[delimiter.len_utf8()..close];
    let flags = &entry[close + delimiter.len_utf8()..];

    if !flags.chars().all(|c| "imsxuU".contains(c)) {
        return None;
    }

    let inline: String = flags.chars().filter(|c| "msx".contains(*c)).collect();
    if inline.is_empty() {
        Some(body.to_string())
    } else {
        Some(format!("(?{}){}", inline, body))
    }
}
