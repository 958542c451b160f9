//! Shared-secret check for write requests.

/// Compares the secret a client presented with the expected one.
///
/// A missing secret never matches.  The comparison of equal-length secrets
/// takes the same time wherever the first differing byte is, so response
/// timing does not reveal how much of a guess was right.  The length itself
/// is not hidden.
pub fn secret_matches(expected: &str, provided: Option<&str>) -> bool {
    match provided {
        Some(provided) => constant_time_eq(expected.as_bytes(), provided.as_bytes()),
        None => false,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_secret_matches() {
        assert!(secret_matches("s3cret", Some("s3cret")));
    }

    #[test]
    fn test_missing_secret_never_matches() {
        assert!(!secret_matches("s3cret", None));
    }

    #[test]
    fn test_wrong_secret_does_not_match() {
        assert!(!secret_matches("s3cret", Some("s3creT")));
        assert!(!secret_matches("s3cret", Some("wrong!")));
    }

    #[test]
    fn test_prefix_and_extension_do_not_match() {
        assert!(!secret_matches("s3cret", Some("s3c")));
        assert!(!secret_matches("s3cret", Some("s3cret ")));
        assert!(!secret_matches("s3cret", Some("")));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        assert!(!secret_matches("Secret", Some("secret")));
    }
}
