use std::collections::BTreeMap;
use std::fmt;

use crate::path::{normalize_path, split_href};

/// The current location: normalized pathname plus search data and fragment
///
/// Two hrefs that normalize to the same pathname, search map and fragment are
/// the same location.
///
/// ```
/// use waymark_router::Location;
///
/// let location = Location::parse("/users/?sort=name&q=sato%20hanako#list");
/// assert_eq!(location.pathname, "/users");
/// assert_eq!(location.search_param("q"), Some("sato hanako"));
/// assert_eq!(location.hash.as_deref(), Some("list"));
/// assert_eq!(location.href(), "/users?q=sato%20hanako&sort=name#list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Location {
    pub pathname: String,
    pub search: BTreeMap<String, String>,
    pub hash: Option<String>,
}

impl Location {
    pub fn parse(href: &str) -> Self {
        let (path, query, fragment) = split_href(href);
        Self {
            pathname: normalize_path(path).into_owned(),
            search: query.map(parse_search).unwrap_or_default(),
            hash: fragment.filter(|f| !f.is_empty()).map(str::to_string),
        }
    }

    pub fn search_param(&self, key: &str) -> Option<&str> {
        self.search.get(key).map(String::as_str)
    }

    /// Serializes back to an href with a percent-encoded query string
    pub fn href(&self) -> String {
        let mut href = self.pathname.clone();
        if !self.search.is_empty() {
            href.push('?');
            href.push_str(&encode_search(&self.search));
        }
        if let Some(hash) = &self.hash {
            href.push('#');
            href.push_str(hash);
        }
        href
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

/// Parses `a=1&b=two%20words` into a map; later keys overwrite earlier ones
pub fn parse_search(query: &str) -> BTreeMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Encodes a search map as `key=value` pairs joined by `&`
pub fn encode_search(search: &BTreeMap<String, String>) -> String {
    search
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}
