//! Immutable symbol name sets
//!
//! A registry holds exact names and regex patterns. How names compare is
//! decided once, by the registry's [`CasePolicy`].

use std::collections::HashSet;
use std::fmt;

use regex::{Regex, RegexBuilder};
use scoper_core::name;

use crate::error::SymbolError;

/// Literals PHP resolves case-insensitively even though they are constants.
const RESERVED_CONSTANTS: [&str; 3] = ["true", "false", "null"];

/// How names are compared inside a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasePolicy {
    /// The whole name is case-insensitive (classes, functions).
    Insensitive,
    /// Namespace segments are case-insensitive, the short name is not.
    /// Global `true`, `false` and `null` are case-insensitive.
    Constant,
}

impl CasePolicy {
    /// Canonical form of `name` under this policy. Two names match iff
    /// their normalized forms are equal.
    pub fn normalize(self, symbol: &str) -> String {
        let symbol = name::trim_leading_separator(symbol);
        match self {
            CasePolicy::Insensitive => symbol.to_lowercase(),
            CasePolicy::Constant => match name::split_namespace(symbol) {
                (Some(namespace), short) => {
                    format!("{}{}{}", namespace.to_lowercase(), name::SEPARATOR, short)
                }
                (None, short) if is_reserved_constant(short) => short.to_ascii_lowercase(),
                (None, short) => short.to_string(),
            },
        }
    }
}

/// Whether `name` is one of `true`, `false`, `null` in any case.
pub fn is_reserved_constant(symbol: &str) -> bool {
    let symbol = name::trim_leading_separator(symbol);
    RESERVED_CONSTANTS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(symbol))
}

/// A set of symbol names and patterns
///
/// Registries are values: adding names produces a new registry.
#[derive(Clone)]
pub struct SymbolRegistry {
    policy: CasePolicy,
    names: HashSet<String>,
    patterns: Vec<Regex>,
}

impl SymbolRegistry {
    /// Case-insensitive registry (classes, functions).
    ///
    /// Patterns use `regex` syntax and are matched against the name without
    /// its leading `\`. They are case-insensitive.
    pub fn create<N, P>(names: N, patterns: P) -> Result<Self, SymbolError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self::build(CasePolicy::Insensitive, names, patterns)
    }

    /// Registry following the constant case rules.
    ///
    /// Patterns are matched as written, case-sensitively.
    pub fn create_for_constants<N, P>(names: N, patterns: P) -> Result<Self, SymbolError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self::build(CasePolicy::Constant, names, patterns)
    }

    /// Registry of exact names only. Cannot fail.
    pub fn from_names<N>(policy: CasePolicy, names: N) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        Self {
            policy,
            names: names
                .into_iter()
                .map(|n| policy.normalize(n.as_ref()))
                .collect(),
            patterns: Vec::new(),
        }
    }

    pub fn empty(policy: CasePolicy) -> Self {
        Self::from_names(policy, std::iter::empty::<&str>())
    }

    fn build<N, P>(policy: CasePolicy, names: N, patterns: P) -> Result<Self, SymbolError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let mut registry = Self::from_names(policy, names);
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(policy == CasePolicy::Insensitive)
                .build()
                .map_err(|source| SymbolError::InvalidRegex {
                    pattern: pattern.to_string(),
                    source,
                })?;
            registry.patterns.push(regex);
        }
        Ok(registry)
    }

    /// Whether the name is in the registry (exactly or through a pattern).
    pub fn matches(&self, symbol: &str) -> bool {
        if self.names.contains(&self.policy.normalize(symbol)) {
            return true;
        }
        let raw = name::trim_leading_separator(symbol);
        self.patterns.iter().any(|pattern| pattern.is_match(raw))
    }

    /// A new registry with the extra names, same policy and patterns.
    pub fn with_additional_symbols<N>(&self, names: N) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        let mut registry = self.clone();
        registry
            .names
            .extend(names.into_iter().map(|n| self.policy.normalize(n.as_ref())));
        registry
    }

    pub fn case_policy(&self) -> CasePolicy {
        self.policy
    }

    /// Number of exact names plus patterns
    pub fn len(&self) -> usize {
        self.names.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolRegistry")
            .field("policy", &self.policy)
            .field("names", &self.names.len())
            .field(
                "patterns",
                &self.patterns.iter().map(Regex::as_str).collect::<Vec<_>>(),
            )
            .finish()
    }
}
