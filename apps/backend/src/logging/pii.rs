use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// Mask a free-form player name for logs.
///
/// Names keep their first character and length class; email-shaped names
/// keep their domain. Empty names stay empty.
pub fn redact(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if EMAIL.is_match(trimmed) {
        return EMAIL
            .replace_all(trimmed, |caps: &regex::Captures| {
                let full = &caps[0];
                match full.find('@') {
                    Some(at) if at > 0 => {
                        let first = full[..at].chars().next().unwrap_or('*');
                        format!("{first}***{}", &full[at..])
                    }
                    _ => full.to_string(),
                }
            })
            .into_owned();
    }

    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) if chars.next().is_some() => format!("{first}***"),
        _ => "*".to_string(),
    }
}

/// Display wrapper that redacts on format, for use in `tracing` fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", redact(self.0))
    }
}
