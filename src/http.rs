//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with a timeout and system proxy
//! support (HTTP_PROXY / HTTPS_PROXY / ALL_PROXY / NO_PROXY)

use reqwest::{Client, Proxy};
use std::time::Duration;
use url::Url;

/// Build a reqwest Client with the given timeout, honoring proxy env vars
pub fn client_with_timeout(timeout: Duration) -> Client {
    let mut builder = Client::builder().timeout(timeout);

    let https_proxy = getenv_first(&["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"]);
    let http_proxy = getenv_first(&["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]);
    let no_proxy = parse_no_proxy(&getenv_first(&["NO_PROXY", "no_proxy"]).unwrap_or_default());

    if https_proxy.is_some() || http_proxy.is_some() {
        let proxy = Proxy::custom(move |url: &Url| {
            let host = url.host_str().unwrap_or("");
            if bypass_proxy(host, &no_proxy) {
                return None;
            }
            match url.scheme() {
                "https" => https_proxy.clone().or_else(|| http_proxy.clone()),
                "http" => http_proxy.clone().or_else(|| https_proxy.clone()),
                _ => None,
            }
        });
        builder = builder.proxy(proxy);
    }

    builder
        .user_agent(concat!("reddit-relay/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
}

fn getenv_first(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

fn parse_no_proxy(val: &str) -> Vec<String> {
    val.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn bypass_proxy(host: &str, rules: &[String]) -> bool {
    if host.is_empty() {
        return false;
    }
    let host = host.to_ascii_lowercase();
    rules.iter().any(|rule| {
        rule == "*" || host == *rule || host.ends_with(&format!(".{}", rule))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_proxy_parsing() {
        let rules = parse_no_proxy("localhost, .example.com,, 10.0.0.1");
        assert_eq!(rules, vec!["localhost", "example.com", "10.0.0.1"]);
    }

    #[test]
    fn test_proxy_bypass_rules() {
        let rules = parse_no_proxy("localhost,.internal.corp");
        assert!(bypass_proxy("localhost", &rules));
        assert!(bypass_proxy("api.internal.corp", &rules));
        assert!(!bypass_proxy("example.com", &rules));
        assert!(bypass_proxy("anything", &parse_no_proxy("*")));
    }
}
