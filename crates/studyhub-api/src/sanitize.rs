//! Input sanitization.
//!
//! Strips characters usable for smuggling query operators through JSON
//! string fields. Parameterized SQL leaves no such channel, but the API
//! contract guarantees the characters never persist either.

/// Characters that could be used for query-operator injection.
const FORBIDDEN: [char; 3] = ['$', '{', '}'];

/// Strip `$`, `{`, and `}` from an inbound string field.
pub fn sanitize_string(value: &str) -> String {
    value.chars().filter(|c| !FORBIDDEN.contains(c)).collect()
}

/// Sanitize an optional field, defaulting to an empty string.
pub fn sanitize_opt(value: Option<&str>) -> String {
    value.map(sanitize_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_operator_characters() {
        assert_eq!(sanitize_string("{$ne: null}"), "ne: null");
        assert_eq!(sanitize_string("${}"), "");
        assert_eq!(sanitize_string("$where"), "where");
    }

    #[test]
    fn leaves_ordinary_text_untouched() {
        assert_eq!(sanitize_string("Math 101"), "Math 101");
        assert_eq!(sanitize_string("reading: ch. 4-6"), "reading: ch. 4-6");
    }

    #[test]
    fn optional_defaults_to_empty() {
        assert_eq!(sanitize_opt(None), "");
        assert_eq!(sanitize_opt(Some("a{b}c")), "abc");
    }
}
