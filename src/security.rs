//! URL and response-body policies applied before and during a site fetch.

use crate::error::PipelineError;
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use url::Url;

/// Configuration for URL validation
#[derive(Debug, Clone)]
pub struct UrlValidationConfig {
    /// Allowed URL schemes (default: ["http", "https"])
    pub allowed_schemes: HashSet<String>,
    /// Block private/local IP addresses (default: true)
    pub block_private_ips: bool,
    /// Block localhost addresses (default: true)
    pub block_localhost: bool,
    /// Domain blacklist
    pub blocked_domains: HashSet<String>,
    /// Domain whitelist (if not empty, only these domains are allowed)
    pub allowed_domains: HashSet<String>,
    /// Maximum number of redirects the fetcher will follow
    pub max_redirects: usize,
}

impl Default for UrlValidationConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: ["http", "https"].into_iter().map(String::from).collect(),
            block_private_ips: true,
            block_localhost: true,
            blocked_domains: HashSet::new(),
            allowed_domains: HashSet::new(),
            max_redirects: 5,
        }
    }
}

impl UrlValidationConfig {
    /// Allow loopback and private addresses, e.g. for a locally hosted site
    pub fn allow_local_network(mut self) -> Self {
        self.block_localhost = false;
        self.block_private_ips = false;
        self
    }

    pub fn block_domain(mut self, domain: impl Into<String>) -> Self {
        self.blocked_domains.insert(domain.into().to_lowercase());
        self
    }

    pub fn allow_domain(mut self, domain: impl Into<String>) -> Self {
        self.allowed_domains.insert(domain.into().to_lowercase());
        self
    }
}

/// Validates a URL according to security policies
#[derive(Debug, Clone)]
pub struct UrlValidator {
    config: UrlValidationConfig,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new(UrlValidationConfig::default())
    }
}

impl UrlValidator {
    pub fn new(config: UrlValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &UrlValidationConfig {
        &self.config
    }

    /// Parse `url_str` and check it against the policy.
    ///
    /// Business owners often type bare domains, so a missing scheme is
    /// treated as `https://`.
    pub fn validate(&self, url_str: &str) -> Result<Url, PipelineError> {
        let trimmed = url_str.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::InvalidUrl("URL is empty".to_string()));
        }
        // "javascript:..." has a scheme; "example.com:8080" does not.
        let has_scheme = trimmed.contains("://")
            || trimmed.split_once(':').is_some_and(|(scheme, _)| {
                !scheme.is_empty()
                    && !scheme.contains('.')
                    && scheme
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-'))
            });
        let candidate = if has_scheme {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        let url = Url::parse(&candidate)?;

        if !self.config.allowed_schemes.contains(url.scheme()) {
            return Err(PipelineError::InvalidUrlScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .ok_or_else(|| PipelineError::InvalidUrl("No host in URL".to_string()))?
            .to_lowercase();

        if !self.config.allowed_domains.is_empty() {
            if !matches_domain(&self.config.allowed_domains, &host) {
                return Err(PipelineError::DomainNotAllowed(host));
            }
        } else if matches_domain(&self.config.blocked_domains, &host) {
            return Err(PipelineError::DomainBlocked(host));
        }

        if self.config.block_localhost && is_localhost(&host) {
            return Err(PipelineError::LocalhostBlocked);
        }

        if self.config.block_private_ips {
            let ip_str = host.trim_start_matches('[').trim_end_matches(']');
            if let Ok(ip) = ip_str.parse::<IpAddr>() {
                if is_private_ip(&ip) {
                    return Err(PipelineError::PrivateIpBlocked(ip.to_string()));
                }
            }
        }

        Ok(url)
    }
}

fn matches_domain(domains: &HashSet<String>, host: &str) -> bool {
    domains
        .iter()
        .any(|d| host == d || host.ends_with(&format!(".{d}")))
}

fn is_localhost(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]") || host.ends_with(".localhost")
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_unspecified()
                || is_ipv4_reserved(ipv4)
        }
        IpAddr::V6(ipv6) => {
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // fe80::/10
                || (ipv6.segments()[0] & 0xffc0) == 0xfe80
                // fc00::/7
                || (ipv6.segments()[0] & 0xfe00) == 0xfc00
        }
    }
}

fn is_ipv4_reserved(ip: &Ipv4Addr) -> bool {
    let octets = ip.octets();

    // 0.0.0.0/8
    octets[0] == 0
        // 100.64.0.0/10 (Carrier-grade NAT)
        || (octets[0] == 100 && (octets[1] & 0b1100_0000) == 0b0100_0000)
        // 224.0.0.0/4 (Multicast) and 240.0.0.0/4 (Reserved)
        || octets[0] >= 224
}

/// Limits on what a fetched page may look like
#[derive(Debug, Clone)]
pub struct ContentLimits {
    /// Maximum body size in bytes (default: 5MB)
    pub max_content_size: usize,
    /// Accepted MIME types; empty accepts everything
    pub allowed_content_types: HashSet<String>,
}

impl Default for ContentLimits {
    fn default() -> Self {
        Self {
            max_content_size: 5 * 1024 * 1024,
            allowed_content_types: ["text/html", "application/xhtml+xml"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ContentLimits {
    /// Check a `Content-Type` header value, ignoring parameters like charset
    pub fn accepts_content_type(&self, header: &str) -> bool {
        if self.allowed_content_types.is_empty() {
            return true;
        }
        let mime = header
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        self.allowed_content_types.contains(&mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validator_schemes() {
        let validator = UrlValidator::default();

        assert!(validator.validate("https://example.com").is_ok());
        assert!(validator.validate("http://example.com").is_ok());
        assert!(validator.validate("ftp://example.com").is_err());
        assert!(validator.validate("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_bare_domain_gets_https() {
        let url = UrlValidator::default()
            .validate("example-bakery.com")
            .unwrap();
        assert_eq!(url.as_str(), "https://example-bakery.com/");
    }

    #[test]
    fn test_url_validator_localhost() {
        let validator = UrlValidator::default();

        assert!(matches!(
            validator.validate("http://localhost"),
            Err(PipelineError::LocalhostBlocked)
        ));
        assert!(validator.validate("http://127.0.0.1").is_err());
        assert!(validator.validate("http://[::1]").is_err());
    }

    #[test]
    fn test_url_validator_private_ips() {
        let validator = UrlValidator::default();

        assert!(validator.validate("http://10.0.0.1").is_err());
        assert!(validator.validate("http://192.168.1.1").is_err());
        assert!(validator.validate("http://172.16.0.1").is_err());
        assert!(validator.validate("http://169.254.1.1").is_err());
        assert!(validator.validate("http://100.64.0.1").is_err());
    }

    #[test]
    fn test_local_network_can_be_allowed() {
        let validator = UrlValidator::new(UrlValidationConfig::default().allow_local_network());
        assert!(validator.validate("http://127.0.0.1:8080/site").is_ok());
    }

    #[test]
    fn test_url_validator_domain_lists() {
        let validator = UrlValidator::new(UrlValidationConfig::default().block_domain("evil.com"));

        assert!(validator.validate("http://evil.com").is_err());
        assert!(validator.validate("http://sub.EVIL.com").is_err());
        assert!(validator.validate("http://good.com").is_ok());

        let validator =
            UrlValidator::new(UrlValidationConfig::default().allow_domain("trusted.com"));
        assert!(validator.validate("http://sub.trusted.com").is_ok());
        assert!(matches!(
            validator.validate("http://untrusted.com"),
            Err(PipelineError::DomainNotAllowed(_))
        ));
    }

    #[test]
    fn test_content_type_check() {
        let limits = ContentLimits::default();
        assert!(limits.accepts_content_type("text/html; charset=utf-8"));
        assert!(limits.accepts_content_type("TEXT/HTML"));
        assert!(!limits.accepts_content_type("application/pdf"));
    }
}
