//! Host redirect normalizer
//!
//! Builds the `Location` value for a matched redirect. The request URL is
//! handled as separate components (scheme, host, port, path + query); only
//! the host component is rewritten and the URL is reserialized from parts.
//! A naive textual replacement on the full URL could rewrite a matching
//! substring in the path or query, or only part of a host carrying extra
//! subdomain labels.

use crate::redirect::rules::RuleSet;

/// Split an authority into host and optional port.
///
/// "example.com:8080" -> ("example.com", Some("8080"))
/// "example.com"      -> ("example.com", None)
fn split_host_port(authority: &str) -> (&str, Option<&str>) {
    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, Some(port))
        }
        _ => (authority, None),
    }
}

/// Compute the redirect `Location` for a request, if any rule matches.
///
/// * `authority` - the Host header value, possibly carrying a port
/// * `scheme` - the effective request scheme ("http" or "https")
/// * `path_and_query` - the request path with query string, starting with "/"
///
/// The port, path and query are preserved unchanged; only the host is
/// rewritten. Returns None for unmatched hosts (pass-through).
pub fn redirect_location(
    rules: &RuleSet,
    authority: &str,
    scheme: &str,
    path_and_query: &str,
) -> Option<String> {
    let (host, port) = split_host_port(authority);
    let new_host = rules.rewrite_host(host)?;

    Some(match port {
        Some(port) => format!("{scheme}://{new_host}:{port}{path_and_query}"),
        None => format!("{scheme}://{new_host}{path_and_query}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedirectConfig;

    fn test_rules() -> RuleSet {
        RuleSet::from_config(&RedirectConfig {
            canonical_host: "business.ficoreafrica.com".to_string(),
            legacy_suffixes: vec!["onrender.com".to_string()],
            alias_hosts: vec!["ficoreafrica.com".to_string()],
            default_scheme: "https".to_string(),
        })
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("example.com"), ("example.com", None));
        assert_eq!(
            split_host_port("example.com:8080"),
            ("example.com", Some("8080"))
        );
        // Trailing colon without digits is not a port
        assert_eq!(split_host_port("example.com:"), ("example.com:", None));
        assert_eq!(split_host_port("example.com:8a"), ("example.com:8a", None));
    }

    #[test]
    fn test_legacy_host_full_url() {
        let rules = test_rules();
        assert_eq!(
            redirect_location(
                &rules,
                "ficore-labs-records.onrender.com",
                "https",
                "/path?x=1"
            ),
            Some("https://ficore-labs-records.business.ficoreafrica.com/path?x=1".to_string())
        );
    }

    #[test]
    fn test_query_text_is_never_rewritten() {
        let rules = test_rules();
        // The rule token also appears in the query string; only the host
        // component may change
        assert_eq!(
            redirect_location(
                &rules,
                "app.onrender.com",
                "https",
                "/cb?next=app.onrender.com"
            ),
            Some("https://app.business.ficoreafrica.com/cb?next=app.onrender.com".to_string())
        );
        assert_eq!(
            redirect_location(&rules, "www.example.com", "https", "/?u=www.example.com"),
            Some("https://example.com/?u=www.example.com".to_string())
        );
    }

    #[test]
    fn test_path_text_is_never_rewritten() {
        let rules = test_rules();
        assert_eq!(
            redirect_location(&rules, "www.example.com", "http", "/www.example.com/x"),
            Some("http://example.com/www.example.com/x".to_string())
        );
    }

    #[test]
    fn test_port_is_preserved() {
        let rules = test_rules();
        assert_eq!(
            redirect_location(&rules, "www.example.com:8080", "http", "/"),
            Some("http://example.com:8080/".to_string())
        );
        assert_eq!(
            redirect_location(&rules, "app.onrender.com:443", "https", "/a"),
            Some("https://app.business.ficoreafrica.com:443/a".to_string())
        );
    }

    #[test]
    fn test_scheme_is_preserved() {
        let rules = test_rules();
        assert_eq!(
            redirect_location(&rules, "ficoreafrica.com", "http", "/"),
            Some("http://business.ficoreafrica.com/".to_string())
        );
    }

    #[test]
    fn test_pass_through() {
        let rules = test_rules();
        assert_eq!(redirect_location(&rules, "other.org", "https", "/"), None);
        assert_eq!(
            redirect_location(&rules, "business.ficoreafrica.com", "https", "/x?y=1"),
            None
        );
        assert_eq!(
            redirect_location(&rules, "business.ficoreafrica.com:8080", "https", "/"),
            None
        );
    }
}
