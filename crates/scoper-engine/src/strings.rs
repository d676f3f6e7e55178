//! Quoted PHP string literals holding symbol names
//!
//! Only plain single- and double-quoted literals are handled. A double-quoted
//! literal containing a real escape sequence (`\n`, `\x41`, `\u{..}`, octal)
//! is not treated as a name.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

/// Decode a literal as written in source (quotes included).
pub fn decode(raw: &str) -> Option<(Quote, String)> {
    let quote = match raw.chars().next()? {
        '\'' => Quote::Single,
        '"' => Quote::Double,
        _ => return None,
    };
    if raw.len() < 2 || !raw.ends_with(&raw[..1]) {
        return None;
    }
    let body = &raw[1..raw.len() - 1];

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(&next) = chars.peek() else {
            out.push(c);
            break;
        };
        match (quote, next) {
            (_, '\\') | (Quote::Single, '\'') | (Quote::Double, '"' | '$') => {
                out.push(next);
                chars.next();
            }
            (Quote::Double, 'n' | 't' | 'r' | 'v' | 'e' | 'f' | '0'..='7') => return None,
            (Quote::Double, 'x') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek().is_some_and(char::is_ascii_hexdigit) {
                    return None;
                }
                out.push(c);
            }
            (Quote::Double, 'u') => {
                let mut lookahead = chars.clone();
                lookahead.next();
                if lookahead.peek() == Some(&'{') {
                    return None;
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Some((quote, out))
}

/// Encode `value` as a literal in the given quote style.
pub fn encode(value: &str, quote: Quote) -> String {
    let (delimiter, specials): (char, &[char]) = match quote {
        Quote::Single => ('\'', &['\\', '\'']),
        Quote::Double => ('"', &['\\', '"', '$']),
    };

    let mut out = String::with_capacity(value.len() + 2);
    out.push(delimiter);
    for c in value.chars() {
        if specials.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out.push(delimiter);
    out
}
