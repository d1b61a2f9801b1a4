//! Path utilities for validation and normalization
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use waymark_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/about"));
/// assert!(is_valid_path("/users/123"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about")); // Missing leading /
/// assert!(!is_valid_path("/about/")); // Trailing /
/// assert!(!is_valid_path("/about//page")); // Double //
/// assert!(!is_valid_path("/about\\page")); // Backslash
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    if path == "/" {
        return true;
    }

    !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already valid (zero allocations).
/// Returns `Cow::Owned` when normalization needed (single allocation).
///
/// Handles:
/// - Trailing slashes: `/path/` → `/path`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Missing leading slash: `path/to` → `/path/to`
/// - Empty input: `` → `/`
///
/// # Examples
///
/// ```
/// use waymark_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// let path = normalize_path("/about");
/// assert!(matches!(path, Cow::Borrowed("/about")));
///
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("\\users\\123"), "/users/123");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Splits a normalized path into its non-empty segments
///
/// ```
/// use waymark_router::path::segments;
///
/// assert_eq!(segments("/users/2").collect::<Vec<_>>(), vec!["users", "2"]);
/// assert_eq!(segments("/").count(), 0);
/// ```
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Splits an href into `(path, query, fragment)`
///
/// The query and fragment are returned without their `?` / `#` markers.
///
/// ```
/// use waymark_router::path::split_href;
///
/// assert_eq!(split_href("/users?page=2#top"), ("/users", Some("page=2"), Some("top")));
/// assert_eq!(split_href("/about"), ("/about", None, None));
/// ```
pub fn split_href(href: &str) -> (&str, Option<&str>, Option<&str>) {
    let (rest, fragment) = match href.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (href, None),
    };

    match rest.split_once('?') {
        Some((path, query)) => (path, Some(query), fragment),
        None => (rest, None, fragment),
    }
}

/// Strips a base path prefix from a normalized path
///
/// Returns `None` when the path lies outside the base. A base of `/` strips nothing.
///
/// ```
/// use waymark_router::path::strip_base;
///
/// assert_eq!(strip_base("/app/users", "/app"), Some("/users"));
/// assert_eq!(strip_base("/app", "/app"), Some("/"));
/// assert_eq!(strip_base("/application", "/app"), None);
/// assert_eq!(strip_base("/users", "/"), Some("/users"));
/// ```
pub fn strip_base<'p>(path: &'p str, base: &str) -> Option<&'p str> {
    if base == "/" {
        return Some(path);
    }

    match path.strip_prefix(base) {
        Some("") => Some("/"),
        Some(rest) if rest.starts_with('/') => Some(rest),
        _ => None,
    }
}
