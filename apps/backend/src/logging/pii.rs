//! PII redaction helpers for log output.
//!
//! Emails keep the first character of the local part and the full domain;
//! long opaque token runs are masked entirely. Log sites wrap values in
//! [`Redacted`] so the raw value never reaches the subscriber.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
    });
    &EMAIL_REGEX
}

fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9+/_.-]{24,}={0,2}\b").unwrap()
    });
    &TOKEN_REGEX
}

/// Redact sensitive information from a string: emails first, then opaque
/// token runs, to avoid double-processing.
pub fn redact(input: &str) -> String {
    let emails_masked = email_regex().replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.find('@') {
            Some(at) if at > 0 => format!("{}***{}", &full[..1], &full[at..]),
            _ => full.to_string(),
        }
    });

    token_regex()
        .replace_all(&emails_masked, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts its contents when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn email_keeps_first_char_and_domain() {
        assert_eq!(redact("alice@example.com"), "a***@example.com");
    }

    #[test]
    fn long_token_runs_are_masked() {
        let input = "token=eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        assert_eq!(redact(input), "token=[REDACTED_TOKEN]");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(redact("post 42 deleted"), "post 42 deleted");
    }
}
