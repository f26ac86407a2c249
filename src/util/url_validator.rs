use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors that can occur while validating the GraphQL endpoint.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// Plain HTTP to a remote host.
    #[error("Insecure endpoint {0}: HTTPS required (except localhost for testing)")]
    Insecure(String),
}

/// Validates a GraphQL endpoint URL.
///
/// HTTPS is required. Plain HTTP is only accepted for loopback hosts so the
/// bridge can be pointed at a local mock server.
///
/// # Examples
///
/// ```
/// use apbridge::util::validate_endpoint;
///
/// assert!(validate_endpoint("https://apnews.com/graphql").is_ok());
/// assert!(validate_endpoint("http://127.0.0.1:8080/graphql").is_ok());
/// assert!(validate_endpoint("http://apnews.com/graphql").is_err());
/// assert!(validate_endpoint("file:///etc/passwd").is_err());
/// ```
pub fn validate_endpoint(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback_host(&url) => {
            tracing::warn!(endpoint = %url, "Using non-HTTPS endpoint (localhost only)");
            Ok(url)
        }
        "http" => Err(UrlValidationError::Insecure(url_str.to_owned())),
        scheme => Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }
}

fn is_loopback_host(url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if host == "localhost" {
        return true;
    }

    // Strip brackets from IPv6 addresses for parsing
    let host_for_parse = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    host_for_parse
        .parse::<IpAddr>()
        .is_ok_and(|ip| ip.is_loopback())
}
