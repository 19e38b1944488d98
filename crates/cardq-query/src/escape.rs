//! Escaping of query syntax characters inside values.

/// Characters with meaning in the query syntax.
const RESERVED: &[char] = &[
    '\\', '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/', '&', '|',
];

/// Returns true when `ch` must be escaped inside a value.
pub fn is_reserved(ch: char) -> bool {
    RESERVED.contains(&ch)
}

/// Backslash-escapes every reserved character in `value`.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if is_reserved(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Removes backslash escapes. A trailing lone backslash is kept.
pub fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => unescaped.push(next),
                None => unescaped.push('\\'),
            }
        } else {
            unescaped.push(ch);
        }
    }
    unescaped
}
