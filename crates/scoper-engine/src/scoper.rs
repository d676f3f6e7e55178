//! Scoping entry points: one source, or many in parallel

use bumpalo::Bump;
use mago_database::file::FileId;
use mago_syntax::ast::Program;
use rayon::prelude::*;
use scoper_core::{apply_edits, Edit};
use scoper_symbols::{Classifier, Reflector, ScoperConfig};
use tracing::{debug, warn};

use crate::error::ScopeError;
use crate::rewriter::rewrite_program;

/// Moves PHP sources under a prefix namespace
///
/// Holds only read-only data, so a single instance can serve every thread.
#[derive(Debug, Clone)]
pub struct Scoper {
    classifier: Classifier,
}

impl Scoper {
    /// Validate the configuration and build the classifier.
    pub fn new(config: &ScoperConfig, reflector: Reflector) -> Result<Self, ScopeError> {
        Ok(Self::with_classifier(Classifier::from_config(config, reflector)?))
    }

    pub fn with_classifier(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Edits for an already parsed program.
    pub fn collect_edits(&self, program: &Program<'_>, source: &str) -> Vec<Edit> {
        rewrite_program(program, source, &self.classifier)
    }

    /// Rewrite one file. Nothing is rewritten when the file does not parse.
    pub fn scope_source(&self, file_name: &str, source: &str) -> Result<String, ScopeError> {
        let arena = Bump::new();
        let file_id = FileId::new(file_name);

        let (program, parse_error) =
            mago_syntax::parser::parse_file_content(&arena, file_id, source);

        if parse_error.is_some() {
            warn!(file = file_name, "Parse error, file left unscoped");
            return Err(ScopeError::Parse {
                file: file_name.to_string(),
            });
        }

        let edits = self.collect_edits(program, source);
        debug!(file = file_name, edits = edits.len(), "Scoped file");

        if edits.is_empty() {
            return Ok(source.to_string());
        }
        Ok(apply_edits(source, &edits)?)
    }

    /// Rewrite `(file name, source)` pairs in parallel, results in input order.
    pub fn scope_sources(&self, sources: &[(String, String)]) -> Vec<Result<String, ScopeError>> {
        sources
            .par_iter()
            .map(|(file_name, source)| self.scope_source(file_name, source))
            .collect()
    }
}
