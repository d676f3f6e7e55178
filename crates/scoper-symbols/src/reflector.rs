//! Answers "is this symbol provided by PHP itself?"

use once_cell::sync::Lazy;
use tracing::debug;

use crate::catalog::NativeCatalog;
use crate::registry::{CasePolicy, SymbolRegistry};

static PHPSTORM_STUBS: Lazy<Reflector> =
    Lazy::new(|| Reflector::from_catalogs(&[NativeCatalog::stubs(), NativeCatalog::missing()]));

/// Native symbol oracle: one registry per symbol kind
#[derive(Debug, Clone)]
pub struct Reflector {
    classes: SymbolRegistry,
    functions: SymbolRegistry,
    constants: SymbolRegistry,
}

impl Reflector {
    /// Reflector backed by the embedded stub catalog plus the known
    /// missing symbols.
    pub fn create_with_phpstorm_stubs() -> Self {
        PHPSTORM_STUBS.clone()
    }

    /// Reflector that knows no native symbol.
    pub fn create_empty() -> Self {
        Self {
            classes: SymbolRegistry::empty(CasePolicy::Insensitive),
            functions: SymbolRegistry::empty(CasePolicy::Insensitive),
            constants: SymbolRegistry::empty(CasePolicy::Constant),
        }
    }

    /// Union of the given catalogs.
    pub fn from_catalogs(catalogs: &[&NativeCatalog]) -> Self {
        let reflector = Self::create_empty().with_symbols(
            catalogs.iter().flat_map(|c| c.classes.iter()),
            catalogs.iter().flat_map(|c| c.functions.iter()),
            catalogs.iter().flat_map(|c| c.constants.iter()),
        );
        debug!(
            classes = reflector.classes.len(),
            functions = reflector.functions.len(),
            constants = reflector.constants.len(),
            "Built native symbol reflector"
        );
        reflector
    }

    /// A new reflector that also treats the given names as native.
    pub fn with_symbols<C, F, K>(&self, classes: C, functions: F, constants: K) -> Self
    where
        C: IntoIterator,
        C::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            classes: self.classes.with_additional_symbols(classes),
            functions: self.functions.with_additional_symbols(functions),
            constants: self.constants.with_additional_symbols(constants),
        }
    }

    pub fn is_class_internal(&self, name: &str) -> bool {
        self.classes.matches(name)
    }

    pub fn is_function_internal(&self, name: &str) -> bool {
        self.functions.matches(name)
    }

    pub fn is_constant_internal(&self, name: &str) -> bool {
        self.constants.matches(name)
    }
}

impl Default for Reflector {
    fn default() -> Self {
        Self::create_with_phpstorm_stubs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NONE: [&str; 0] = [];

    #[rstest]
    #[case("Closure")]
    #[case("closure")]
    #[case("CLOSURE")]
    #[case("\\Closure")]
    #[case("ArrayIterator")]
    #[case("Swoole\\Coroutine")]
    #[case("swoole\\coroutine")]
    #[case("MongoInsertBatch")]
    fn test_native_classes(#[case] name: &str) {
        assert!(Reflector::create_with_phpstorm_stubs().is_class_internal(name));
    }

    #[rstest]
    #[case("strlen")]
    #[case("STRLEN")]
    #[case("\\array_map")]
    #[case("class_alias")]
    #[case("\\Class_Alias")]
    #[case("get_resource_id")]
    #[case("tideways_xhprof_enable")]
    #[case("swoole_version")]
    #[case("bson_encode")]
    fn test_native_functions(#[case] name: &str) {
        assert!(Reflector::create_with_phpstorm_stubs().is_function_internal(name));
    }

    #[rstest]
    #[case("PHP_EOL", true)]
    #[case("php_eol", false)]
    #[case("STDIN", true)]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case("Null", true)]
    #[case("T_NAME_QUALIFIED", true)]
    #[case("T_READONLY", true)]
    #[case("SWOOLE_VERSION", true)]
    #[case("FOO", false)]
    fn test_native_constants(#[case] name: &str, #[case] expected: bool) {
        let reflector = Reflector::create_with_phpstorm_stubs();
        assert_eq!(reflector.is_constant_internal(name), expected);
    }

    #[test]
    fn test_application_symbols_are_not_native() {
        let reflector = Reflector::create_with_phpstorm_stubs();
        assert!(!reflector.is_class_internal("Symfony\\Component\\Yaml\\Yaml"));
        assert!(!reflector.is_class_internal("X"));
        assert!(!reflector.is_function_internal("my_helper"));
    }

    #[test]
    fn test_empty_reflector() {
        let reflector = Reflector::create_empty();
        assert!(!reflector.is_class_internal("Closure"));
        assert!(!reflector.is_function_internal("strlen"));
        assert!(!reflector.is_constant_internal("PHP_EOL"));
    }

    #[test]
    fn test_with_symbols_keeps_original_untouched() {
        let reflector = Reflector::create_empty();
        let extended = reflector.with_symbols(["Acme\\Native"], ["acme_fn"], ["ACME_CONST"]);

        assert!(extended.is_class_internal("acme\\native"));
        assert!(extended.is_function_internal("ACME_FN"));
        assert!(extended.is_constant_internal("ACME_CONST"));
        assert!(!extended.is_constant_internal("acme_const"));
        assert!(!reflector.is_class_internal("Acme\\Native"));

        let only_classes = reflector.with_symbols(["Foo"], NONE, NONE);
        assert!(only_classes.is_class_internal("Foo"));
        assert!(!only_classes.is_function_internal("Foo"));
    }

    #[test]
    fn test_from_custom_catalog() {
        let catalog = NativeCatalog::parse("Regenerated\\Klass", "regenerated_fn", "REGEN");
        let reflector = Reflector::from_catalogs(&[&catalog]);

        assert!(reflector.is_class_internal("Regenerated\\Klass"));
        assert!(reflector.is_function_internal("regenerated_fn"));
        assert!(reflector.is_constant_internal("REGEN"));
        assert!(!reflector.is_class_internal("Closure"));
    }
}
