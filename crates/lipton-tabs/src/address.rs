//! Address bar input normalization

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Prefix `https://` unless the input already carries an http(s) scheme.
///
/// This is a heuristic, not a validator: anything else is handed to the
/// engine as typed and a bad address shows up as a failed load.
pub fn normalize_address(input: &str) -> String {
    let input = input.trim();

    let has_scheme = SCHEMES.iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_scheme {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_https() {
        assert_eq!(normalize_address("example.com"), "https://example.com");
        assert_eq!(
            normalize_address("  example.com/path?q=1 "),
            "https://example.com/path?q=1"
        );
    }

    #[test]
    fn test_http_schemes_pass_through() {
        assert_eq!(normalize_address("http://x"), "http://x");
        assert_eq!(normalize_address("https://x"), "https://x");
        assert_eq!(normalize_address("HTTPS://X"), "HTTPS://X");
    }

    #[test]
    fn test_malformed_input_is_not_rejected() {
        // Other schemes and junk are the engine's problem
        assert_eq!(normalize_address("ftp://host"), "https://ftp://host");
        assert_eq!(normalize_address("not a url"), "https://not a url");
    }
}
