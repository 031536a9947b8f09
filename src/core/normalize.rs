//! Purpose: Canonicalize a resolved endpoint URL before handing it to callers.
//! Exports: `normalize_url`.
//! Role: Pure string transform applied by the resolver on every returned URL.
//! Invariants: Total over any input; empty stays empty so "unconfigured" remains visible.
//! Invariants: Non-empty output always ends with `/`; one is appended only when missing.

pub fn normalize_url(url: &str) -> String {
    if url.is_empty() || url.ends_with('/') {
        return url.to_string();
    }
    format!("{url}/")
}

#[cfg(test)]
mod tests {
    use super::normalize_url;

    #[test]
    fn appends_trailing_separator() {
        assert_eq!(normalize_url("http://x/v1"), "http://x/v1/");
        assert_eq!(
            normalize_url("https://dfw.servers.api.example.com/v2/123"),
            "https://dfw.servers.api.example.com/v2/123/"
        );
    }

    #[test]
    fn keeps_terminated_and_empty_urls() {
        assert_eq!(normalize_url("http://x/v1/"), "http://x/v1/");
        assert_eq!(normalize_url(""), "");
    }

    #[test]
    fn is_idempotent() {
        for input in ["a", "http://x", "http://x/", "/", "not a url"] {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once);
        }
    }
}
