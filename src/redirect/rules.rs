//! Redirect rule table
//!
//! Rules are evaluated in fixed priority order:
//! 1. Legacy platform suffix ("app.onrender.com" -> "app.<canonical>")
//! 2. Leading "www." label strip
//! 3. Alias domain (exact match, e.g. the bare apex domain)
//!
//! The first matching rule wins; no rule is applied after another has
//! matched. Hosts that match nothing fall through without a redirect.

use crate::config::RedirectConfig;

/// A single host rewrite rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectRule {
    /// Host ends with a hosting-platform suffix: replace the suffix labels
    /// with the target host, keeping any subdomain prefix intact.
    LegacySuffix { suffix: String, target: String },
    /// Host starts with "www.": strip exactly the leading label.
    StripWww,
    /// Host equals an alternate domain: replace the whole host.
    Alias { host: String, target: String },
}

impl RedirectRule {
    /// Apply this rule to a lowercase host (no port), returning the
    /// rewritten host if the rule matches.
    pub fn apply(&self, host: &str) -> Option<String> {
        match self {
            Self::LegacySuffix { suffix, target } => {
                if host == suffix {
                    return Some(target.clone());
                }
                // Match on a label boundary only: "notonrender.com" must not
                // match the suffix "onrender.com".
                host.strip_suffix(suffix)
                    .filter(|prefix| prefix.ends_with('.'))
                    .map(|prefix| format!("{prefix}{target}"))
            }
            Self::StripWww => host
                .strip_prefix("www.")
                .filter(|rest| !rest.is_empty())
                .map(ToString::to_string),
            Self::Alias { host: alias, target } => (host == alias).then(|| target.clone()),
        }
    }
}

/// Ordered, immutable redirect rule table
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<RedirectRule>,
    canonical_host: String,
}

impl RuleSet {
    /// Build the rule table from configuration. Called once at startup.
    pub fn from_config(config: &RedirectConfig) -> Self {
        let canonical = config.canonical_host.to_ascii_lowercase();
        let mut rules = Vec::new();

        for suffix in &config.legacy_suffixes {
            rules.push(RedirectRule::LegacySuffix {
                suffix: suffix.to_ascii_lowercase(),
                target: canonical.clone(),
            });
        }

        rules.push(RedirectRule::StripWww);

        for alias in &config.alias_hosts {
            let alias = alias.to_ascii_lowercase();
            // An alias equal to the canonical host would redirect to itself
            if alias != canonical {
                rules.push(RedirectRule::Alias {
                    host: alias,
                    target: canonical.clone(),
                });
            }
        }

        Self {
            rules,
            canonical_host: canonical,
        }
    }

    /// Rewrite a host (without port) per the first matching rule.
    ///
    /// Comparison is case-insensitive; the rewritten host is lowercase.
    /// Returns None when no rule matches, including for hosts already on
    /// the canonical domain.
    pub fn rewrite_host(&self, host: &str) -> Option<String> {
        let host = host.to_ascii_lowercase();
        if host == self.canonical_host {
            return None;
        }
        self.rules.iter().find_map(|rule| rule.apply(&host))
    }

    /// Number of configured rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rules() -> RuleSet {
        RuleSet::from_config(&RedirectConfig {
            canonical_host: "business.ficoreafrica.com".to_string(),
            legacy_suffixes: vec!["onrender.com".to_string()],
            alias_hosts: vec!["ficoreafrica.com".to_string()],
            default_scheme: "https".to_string(),
        })
    }

    #[test]
    fn test_legacy_suffix_keeps_subdomain_prefix() {
        let rules = test_rules();
        assert_eq!(
            rules.rewrite_host("ficore-labs-records.onrender.com"),
            Some("ficore-labs-records.business.ficoreafrica.com".to_string())
        );
        assert_eq!(
            rules.rewrite_host("app.onrender.com"),
            Some("app.business.ficoreafrica.com".to_string())
        );
    }

    #[test]
    fn test_legacy_suffix_bare() {
        let rules = test_rules();
        assert_eq!(
            rules.rewrite_host("onrender.com"),
            Some("business.ficoreafrica.com".to_string())
        );
    }

    #[test]
    fn test_legacy_suffix_label_boundary() {
        let rules = test_rules();
        // Suffix must match whole labels, not a textual substring
        assert_eq!(rules.rewrite_host("notonrender.com"), None);
    }

    #[test]
    fn test_strip_www_once() {
        let rules = test_rules();
        assert_eq!(
            rules.rewrite_host("www.example.com"),
            Some("example.com".to_string())
        );
        // Only the leading label is stripped; the inner one stays
        assert_eq!(
            rules.rewrite_host("www.www.example.com"),
            Some("www.example.com".to_string())
        );
        // A bare "www." would leave an empty host
        assert_eq!(rules.rewrite_host("www."), None);
    }

    #[test]
    fn test_alias_exact_match() {
        let rules = test_rules();
        assert_eq!(
            rules.rewrite_host("ficoreafrica.com"),
            Some("business.ficoreafrica.com".to_string())
        );
        // Aliases are exact, not suffix matches
        assert_eq!(rules.rewrite_host("api.ficoreafrica.com"), None);
    }

    #[test]
    fn test_priority_legacy_before_www() {
        let rules = test_rules();
        // A host matching both rule 1 and rule 2 takes rule 1 only
        assert_eq!(
            rules.rewrite_host("www.onrender.com"),
            Some("www.business.ficoreafrica.com".to_string())
        );
    }

    #[test]
    fn test_case_insensitive() {
        let rules = test_rules();
        assert_eq!(
            rules.rewrite_host("WWW.Example.COM"),
            Some("example.com".to_string())
        );
        assert_eq!(
            rules.rewrite_host("App.OnRender.Com"),
            Some("app.business.ficoreafrica.com".to_string())
        );
    }

    #[test]
    fn test_canonical_host_is_idempotent() {
        let rules = test_rules();
        assert_eq!(rules.rewrite_host("business.ficoreafrica.com"), None);
        assert_eq!(rules.rewrite_host("Business.Ficoreafrica.Com"), None);
        // A rewritten legacy host must not match again
        assert_eq!(
            rules.rewrite_host("ficore-labs-records.business.ficoreafrica.com"),
            None
        );
    }

    #[test]
    fn test_unmatched_host_falls_through() {
        let rules = test_rules();
        assert_eq!(rules.rewrite_host("other.example.org"), None);
        assert_eq!(rules.rewrite_host("localhost"), None);
    }

    #[test]
    fn test_alias_equal_to_canonical_is_dropped() {
        let rules = RuleSet::from_config(&RedirectConfig {
            canonical_host: "example.com".to_string(),
            legacy_suffixes: vec![],
            alias_hosts: vec!["example.com".to_string()],
            default_scheme: "https".to_string(),
        });
        assert_eq!(rules.rewrite_host("example.com"), None);
        // Only the implicit www rule remains
        assert_eq!(rules.rule_count(), 1);
    }
}
