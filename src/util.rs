//! Shared utility functions
//!
//! Case conversion and string escaping used by every renderer and by the
//! output sink. Conversions only keep ASCII alphanumerics; everything else
//! is a word separator.

use std::collections::HashSet;

/// Split an identifier-ish string into words
///
/// Breaks on non-alphanumerics, lower→upper transitions and the end of an
/// acronym run (`HTTPClient` → `HTTP`, `Client`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => {
            let mut out = String::with_capacity(word.len());
            out.push(c.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
            out
        }
        None => String::new(),
    }
}

/// Convert to PascalCase
///
/// # Examples
/// ```
/// use suitegen::util::to_pascal_case;
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("Auth Service"), "AuthService");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert to camelCase
///
/// # Examples
/// ```
/// use suitegen::util::to_camel_case;
/// assert_eq!(to_camel_case("hello_world"), "helloWorld");
/// assert_eq!(to_camel_case("foo"), "foo");
/// ```
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if i == 0 {
                w.to_ascii_lowercase()
            } else {
                capitalize(w)
            }
        })
        .collect()
}

/// Convert to snake_case
///
/// # Examples
/// ```
/// use suitegen::util::to_snake_case;
/// assert_eq!(to_snake_case("HelloWorld"), "hello_world");
/// assert_eq!(to_snake_case("fooBar"), "foo_bar");
/// ```
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Lowercase alphanumerics only, no separators (`Auth Service` → `authservice`)
pub fn to_compact_lower(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Make a bare identifier safe to start a declaration (no leading digit)
pub fn to_identifier(s: &str) -> String {
    match s.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", s),
        _ => s.to_string(),
    }
}

/// Disambiguate identifiers that collide after case conversion
///
/// The first occurrence keeps its name; later ones get `_2`, `_3`, ...
pub fn dedupe_identifiers<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut n = 2;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", name, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Escape text for a single-quoted JavaScript/Python string
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted string (Python, Java)
pub fn escape_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Flatten text so it fits on one line of a `"""` Python docstring
///
/// Every `"` is escaped, so a trailing quote cannot merge with the closing
/// delimiter.
pub fn docstring_line(s: &str) -> String {
    one_line(s).replace('\\', "\\\\").replace('"', "\\\"")
}

/// Flatten text so it fits on one line of a `/* */` or `//` comment
pub fn comment_line(s: &str) -> String {
    one_line(s).replace("*/", "*\\/")
}

fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
