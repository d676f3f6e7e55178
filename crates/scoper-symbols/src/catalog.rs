//! Native symbol catalogs
//!
//! The catalogs are plain text data shipped with the crate under `data/`:
//! one symbol per line, `#` starts a comment line. `data/stubs` is the
//! catalog of symbols declared by PHP and its bundled extensions.
//! `data/missing` lists symbols known to be native but absent from the
//! stub catalog; each group there is annotated with its upstream issue.

use once_cell::sync::Lazy;

static STUBS: Lazy<NativeCatalog> = Lazy::new(|| {
    NativeCatalog::parse(
        include_str!("../data/stubs/classes.txt"),
        include_str!("../data/stubs/functions.txt"),
        include_str!("../data/stubs/constants.txt"),
    )
});

static MISSING: Lazy<NativeCatalog> = Lazy::new(|| {
    NativeCatalog::parse(
        include_str!("../data/missing/classes.txt"),
        include_str!("../data/missing/functions.txt"),
        include_str!("../data/missing/constants.txt"),
    )
});

/// Lists of native class, function and constant names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeCatalog {
    pub classes: Vec<String>,
    pub functions: Vec<String>,
    pub constants: Vec<String>,
}

impl NativeCatalog {
    /// Parse three catalog texts (classes, functions, constants).
    pub fn parse(classes: &str, functions: &str, constants: &str) -> Self {
        Self {
            classes: parse_list(classes),
            functions: parse_list(functions),
            constants: parse_list(constants),
        }
    }

    /// The embedded stub catalog.
    pub fn stubs() -> &'static NativeCatalog {
        &STUBS
    }

    /// The embedded list of native symbols missing from the stubs.
    pub fn missing() -> &'static NativeCatalog {
        &MISSING
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.functions.len() + self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_start_matches('\\').to_string())
        .collect()
}
