//! Request representation handed to match predicates.
//!
//! An interception layer captures whatever it hooked into as a
//! [`RequestProfile`]; the dispatcher parses the url once into
//! [`UrlComponents`] and hands both to every predicate.

use std::collections::HashMap;

/// A captured request, reduced to the fields predicates care about.
#[derive(Debug, Clone)]
pub struct RequestProfile {
    /// HTTP method, e.g. "GET"
    pub method: String,
    /// Full request url as issued by the client
    pub url: String,
    /// Request headers, single-valued
    pub headers: HashMap<String, String>,
    /// Request body, if any
    pub body: Option<Vec<u8>>,
}

impl RequestProfile {
    /// Create a request profile with the given method and url.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Convenience constructor for a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    /// Convenience constructor for a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new("POST", url)
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Parsed url components.
///
/// Parsing is permissive: a bare path like `/login?next=/home` is as valid an
/// input as a full `https://host:443/login` url, since interception layers
/// see both shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlComponents {
    /// Scheme without the trailing `://`, if present
    pub scheme: Option<String>,
    /// Host name, if present
    pub host: Option<String>,
    /// Port, if explicitly given
    pub port: Option<u16>,
    /// Path, always present (empty path normalizes to "/")
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    /// Fragment without the leading `#`
    pub fragment: Option<String>,
    /// Decoded query parameters
    pub query_params: HashMap<String, String>,
}

impl UrlComponents {
    /// Split a url into its components.
    pub fn parse(url: &str) -> Self {
        let mut components = Self::default();
        let mut rest = url;

        if let Some((before, fragment)) = rest.split_once('#') {
            components.fragment = Some(fragment.to_string());
            rest = before;
        }

        if let Some((before, query)) = rest.split_once('?') {
            components.query_params = parse_query_string(query);
            components.query = Some(query.to_string());
            rest = before;
        }

        if let Some((scheme, after)) = rest.split_once("://") {
            components.scheme = Some(scheme.to_string());
            let (authority, path) = match after.find('/') {
                Some(idx) => (&after[..idx], &after[idx..]),
                None => (after, ""),
            };
            let (host, port) = match authority.rsplit_once(':') {
                Some((h, p)) => match p.parse::<u16>() {
                    Ok(port) => (h, Some(port)),
                    Err(_) => (authority, None),
                },
                None => (authority, None),
            };
            if !host.is_empty() {
                components.host = Some(host.to_string());
            }
            components.port = port;
            rest = path;
        }

        components.path = if rest.is_empty() {
            "/".to_string()
        } else {
            rest.to_string()
        };

        components
    }
}

/// Parse a query string into key-value pairs.
fn parse_query_string(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();

    for part in query.split('&') {
        if part.is_empty() {
            continue;
        }
        if let Some((key, value)) = part.split_once('=') {
            params.insert(urlencoding_decode(key), urlencoding_decode(value));
        } else {
            params.insert(urlencoding_decode(part), String::new());
        }
    }

    params
}

/// Simple URL decoding.
fn urlencoding_decode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte as char);
                    continue;
                }
            }
            result.push('%');
            result.push_str(&hex);
        } else if ch == '+' {
            result.push(' ');
        } else {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let components = UrlComponents::parse("https://api.example.com:8443/login?next=%2Fhome#top");
        assert_eq!(components.scheme.as_deref(), Some("https"));
        assert_eq!(components.host.as_deref(), Some("api.example.com"));
        assert_eq!(components.port, Some(8443));
        assert_eq!(components.path, "/login");
        assert_eq!(components.query.as_deref(), Some("next=%2Fhome"));
        assert_eq!(components.fragment.as_deref(), Some("top"));
        assert_eq!(components.query_params.get("next"), Some(&"/home".to_string()));
    }

    #[test]
    fn test_parse_bare_path() {
        let components = UrlComponents::parse("/users/42?verbose");
        assert_eq!(components.scheme, None);
        assert_eq!(components.host, None);
        assert_eq!(components.path, "/users/42");
        assert_eq!(components.query_params.get("verbose"), Some(&String::new()));
    }

    #[test]
    fn test_parse_host_without_path() {
        let components = UrlComponents::parse("http://localhost:3000");
        assert_eq!(components.host.as_deref(), Some("localhost"));
        assert_eq!(components.port, Some(3000));
        assert_eq!(components.path, "/");
    }

    #[test]
    fn test_parse_query_string() {
        let params = parse_query_string("foo=bar&baz=qux");
        assert_eq!(params.get("foo"), Some(&"bar".to_string()));
        assert_eq!(params.get("baz"), Some(&"qux".to_string()));

        let params = parse_query_string("name=John%20Doe");
        assert_eq!(params.get("name"), Some(&"John Doe".to_string()));

        let params = parse_query_string("greeting=hello+world");
        assert_eq!(params.get("greeting"), Some(&"hello world".to_string()));
    }

    #[test]
    fn test_bad_escape_passes_through() {
        let params = parse_query_string("key=%zz");
        assert_eq!(params.get("key"), Some(&"%zz".to_string()));
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let request =
            RequestProfile::get("/hello").with_header("Authorization", "Bearer token");
        assert_eq!(request.header("authorization"), Some("Bearer token"));
        assert_eq!(request.header("x-missing"), None);
    }
}
