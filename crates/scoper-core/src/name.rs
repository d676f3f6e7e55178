//! PHP namespaced name helpers
//!
//! Names are handled as plain strings of `\`-separated segments. A leading
//! `\` marks a fully qualified name and is never part of the stored form.

/// Namespace separator
pub const SEPARATOR: char = '\\';

/// Strip a single leading `\`.
pub fn trim_leading_separator(name: &str) -> &str {
    name.strip_prefix(SEPARATOR).unwrap_or(name)
}

/// Whether the name is written fully qualified (`\Foo\Bar`).
pub fn is_fully_qualified(name: &str) -> bool {
    name.starts_with(SEPARATOR)
}

/// Whether the (un-anchored) name contains a namespace part.
pub fn is_qualified(name: &str) -> bool {
    trim_leading_separator(name).contains(SEPARATOR)
}

/// Split `Foo\Bar\Baz` into (`Some("Foo\Bar")`, `"Baz"`).
pub fn split_namespace(name: &str) -> (Option<&str>, &str) {
    let name = trim_leading_separator(name);
    match name.rfind(SEPARATOR) {
        Some(idx) => (Some(&name[..idx]), &name[idx + 1..]),
        None => (None, name),
    }
}

/// Namespace part of a name, if any.
pub fn namespace_of(name: &str) -> Option<&str> {
    split_namespace(name).0
}

/// Short (last segment) name.
pub fn short_name(name: &str) -> &str {
    split_namespace(name).1
}

/// First segment of a name, used for import lookups.
pub fn first_segment(name: &str) -> &str {
    let name = trim_leading_separator(name);
    name.split(SEPARATOR).next().unwrap_or(name)
}

/// Join a namespace and a name. An empty namespace yields the name.
pub fn join(namespace: &str, name: &str) -> String {
    let namespace = trim_leading_separator(namespace).trim_end_matches(SEPARATOR);
    let name = trim_leading_separator(name);
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", namespace, SEPARATOR, name)
    }
}

/// Whether the name starts with the given namespace (or equals it).
///
/// Segment boundaries are respected: `Humbugger\X` is not inside `Humbug`.
pub fn starts_with_namespace(name: &str, namespace: &str) -> bool {
    let name = trim_leading_separator(name);
    let namespace = trim_leading_separator(namespace);
    if namespace.is_empty() {
        return true;
    }
    match name.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Case-insensitive variant of [`starts_with_namespace`].
pub fn starts_with_namespace_ignore_case(name: &str, namespace: &str) -> bool {
    starts_with_namespace(&name.to_ascii_lowercase(), &namespace.to_ascii_lowercase())
}

fn is_label_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_label_char(c: char) -> bool {
    is_label_start(c) || c.is_ascii_digit()
}

/// Whether `segment` is a PHP label (`[A-Za-z_\x80-\xff][A-Za-z0-9_\x80-\xff]*`).
pub fn is_valid_label(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if is_label_start(c) => chars.all(is_label_char),
        _ => false,
    }
}

/// Whether the text is shaped like a symbol name: an optional leading `\`
/// followed by one or more labels separated by single `\`.
pub fn is_valid_symbol_name(name: &str) -> bool {
    let name = trim_leading_separator(name);
    !name.is_empty() && name.split(SEPARATOR).all(is_valid_label)
}

/// Whether `name` is an upper-case constant-style label (`PHP_EOL`, `FOO`).
pub fn is_constant_like(name: &str) -> bool {
    is_valid_label(name)
        && name.chars().any(|c| c.is_ascii_uppercase())
        && !name.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_namespace() {
        assert_eq!(split_namespace("\\Foo\\Bar\\Baz"), (Some("Foo\\Bar"), "Baz"));
        assert_eq!(split_namespace("Baz"), (None, "Baz"));
        assert_eq!(short_name("Foo\\Bar"), "Bar");
        assert_eq!(namespace_of("Foo"), None);
        assert_eq!(first_segment("\\Foo\\Bar"), "Foo");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", "Foo"), "Foo");
        assert_eq!(join("App", "\\Foo"), "App\\Foo");
        assert_eq!(join("\\App\\", "Foo\\Bar"), "App\\Foo\\Bar");
    }

    #[test]
    fn test_starts_with_namespace() {
        assert!(starts_with_namespace("Humbug\\Foo", "Humbug"));
        assert!(starts_with_namespace("\\Humbug", "Humbug"));
        assert!(!starts_with_namespace("Humbugger\\Foo", "Humbug"));
        assert!(!starts_with_namespace("humbug\\Foo", "Humbug"));
        assert!(starts_with_namespace_ignore_case("humbug\\Foo", "Humbug"));
    }

    #[test]
    fn test_valid_symbol_names() {
        assert!(is_valid_symbol_name("Foo"));
        assert!(is_valid_symbol_name("\\Symfony\\Component\\Yaml\\Yaml"));
        assert!(is_valid_symbol_name("_private"));
        assert!(is_valid_symbol_name("Café"));
        assert!(!is_valid_symbol_name(""));
        assert!(!is_valid_symbol_name("\\"));
        assert!(!is_valid_symbol_name("Foo\\\\Bar"));
        assert!(!is_valid_symbol_name("Foo\\"));
        assert!(!is_valid_symbol_name("1Foo"));
        assert!(!is_valid_symbol_name("hello world"));
        assert!(!is_valid_symbol_name("foo-bar"));
    }

    #[test]
    fn test_constant_like() {
        assert!(is_constant_like("PHP_EOL"));
        assert!(is_constant_like("FOO"));
        assert!(is_constant_like("E_ALL2"));
        assert!(!is_constant_like("Closure"));
        assert!(!is_constant_like("usedAttributes"));
        assert!(!is_constant_like("__"));
    }
}
