//! Filename and text sanitization
//!
//! None of these run implicitly; callers invoke them before a name or a piece of
//! text reaches a sensitive context. The injection filter is cosmetic and is not a
//! security boundary: untrusted text must be inserted as text, never as markup.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

/// Default cap applied by [`sanitize_input`]
pub const DEFAULT_INPUT_MAX_LENGTH: usize = 1000;

/// Substrings removed from live input values, matched case-insensitively
pub const INJECTION_PATTERNS: &[&str] = &[
    "<script",
    "javascript:",
    "onerror=",
    "onclick=",
    "onload=",
];

const REDIRECT_DANGEROUS_CHARS: &[char] = &['<', '>', '"', '\'', '\\'];

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref STRICT_FILENAME: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Whole name made only of `[A-Za-z0-9._-]`
pub fn is_valid_filename(name: &str) -> bool {
    STRICT_FILENAME.is_match(name)
}

/// Lowercased extension including the dot, taken from the last `.`
///
/// Names without a dot come back whole (lowercased), so they never match an
/// allowed extension.
pub fn get_file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx..].to_lowercase(),
        None => name.to_lowercase(),
    }
}

/// Escape text for insertion into markup
pub fn sanitize_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Truncate, drop control characters, then escape
pub fn sanitize_input(text: &str, max_length: usize) -> String {
    let truncated: String = text
        .chars()
        .take(max_length)
        .filter(|c| !matches!(*c, '\u{00}'..='\u{1F}' | '\u{7F}'))
        .collect();
    sanitize_text(&truncated)
}

/// Shallow `local@domain.tld` check, not an RFC 5322 validator
pub fn validate_email(text: &str) -> Result<(), ValidationError> {
    if EMAIL_PATTERN.is_match(text.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("Correo electrónico inválido"))
    }
}

/// Remove the first case-insensitive match of each denylisted substring
pub fn strip_injection_patterns(value: &str) -> String {
    let mut cleaned = value.to_string();
    for pattern in INJECTION_PATTERNS {
        // ASCII lowercasing keeps byte offsets aligned with the original
        if let Some(idx) = cleaned.to_ascii_lowercase().find(pattern) {
            cleaned.replace_range(idx..idx + pattern.len(), "");
        }
    }
    cleaned
}

/// Relative same-origin paths only
pub fn is_safe_redirect_url(target: &str) -> bool {
    if target.is_empty() {
        return false;
    }

    let lower = target.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || target.starts_with("//") {
        return false;
    }

    // Any scheme before the first path separator ("javascript:", "data:")
    let head = target.split('/').next().unwrap_or_default();
    if head.contains(':') {
        return false;
    }

    !target.contains(REDIRECT_DANGEROUS_CHARS)
}

/// Checkout redirects leave the site, but only over https
pub fn is_checkout_url(url: &str) -> bool {
    url.len() > "https://".len()
        && url.to_ascii_lowercase().starts_with("https://")
        && !url.contains(REDIRECT_DANGEROUS_CHARS)
        && !url.contains(char::is_whitespace)
}
