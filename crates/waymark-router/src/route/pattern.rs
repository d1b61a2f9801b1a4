//! Pattern parsing for route segments
//!
//! Route patterns are written as literal segments plus `$name` parameter
//! placeholders, e.g. `/users/$userId`. Parsing is pure: same input, same output.
use std::cmp::Ordering;
use std::fmt;

use crate::error::RouteConfigError;
use crate::path::{normalize_path, segments};

/// A single segment of a route pattern
///
/// # Examples
///
/// ```
/// use waymark_router::route::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("about"), Ok(Segment::Static("about".to_string())));
/// assert_eq!(classify_segment("$userId"), Ok(Segment::Param("userId".to_string())));
/// assert!(classify_segment("$").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Literal text that must equal the path segment
    Static(String),
    /// Named placeholder binding any single path segment
    Param(String),
}

/// Kind of a matched segment, ordered so that literals sort before parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SegmentKind {
    Static,
    Param,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Static(_) => SegmentKind::Static,
            Segment::Param(_) => SegmentKind::Param,
        }
    }

    /// Returns the parameter name for placeholder segments
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) => Some(name),
            Segment::Static(_) => None,
        }
    }

    /// Tests a single path segment against this pattern segment
    fn accepts(&self, input: &str, case_insensitive: bool) -> bool {
        match self {
            Segment::Param(_) => true,
            Segment::Static(text) if case_insensitive => text.eq_ignore_ascii_case(input),
            Segment::Static(text) => text == input,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "${}", name),
        }
    }
}

/// Classifies a raw segment (pure function)
///
/// # Parsing Rules
///
/// 1. `$name` → parameter; `name` must be `[A-Za-z_][A-Za-z0-9_]*`
/// 2. Anything else without a `$` → static
/// 3. A `$` anywhere but the first character is rejected
pub fn classify_segment(segment: &str) -> Result<Segment, &'static str> {
    match segment.strip_prefix('$') {
        Some("") => Err("parameter name is empty"),
        Some(name) if !is_param_name(name) => Err("parameter names must be alphanumeric identifiers"),
        Some(name) => Ok(Segment::Param(name.to_string())),
        None if segment.contains('$') => Err("`$` may only start a segment"),
        None => Ok(Segment::Static(segment.to_string())),
    }
}

fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A parsed route pattern
///
/// The empty pattern (written `/`) is the *index* pattern: it consumes no
/// segments and matches when its parent's path was consumed exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RoutePattern {
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parses a pattern such as `/users/$userId`
    ///
    /// Slashes are normalized the same way as request paths, so `users/$userId/`
    /// and `/users/$userId` are the same pattern.
    ///
    /// ```
    /// use waymark_router::route::pattern::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse("users/$userId/").unwrap();
    /// assert_eq!(pattern.to_string(), "/users/$userId");
    /// assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["userId"]);
    ///
    /// assert!(RoutePattern::parse("/").unwrap().is_index());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, RouteConfigError> {
        let normalized = normalize_path(pattern);
        let segments = segments(&normalized)
            .map(|segment| {
                classify_segment(segment).map_err(|reason| RouteConfigError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: reason.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// The index pattern `/`
    pub fn index() -> Self {
        Self::default()
    }

    pub fn is_index(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Appends a child pattern, producing the full root-to-child pattern
    pub fn join(&self, child: &RoutePattern) -> RoutePattern {
        RoutePattern {
            segments: self
                .segments
                .iter()
                .chain(child.segments.iter())
                .cloned()
                .collect(),
        }
    }

    /// Two patterns have the same shape when they differ only in parameter names
    ///
    /// Such patterns match exactly the same paths, so registering both under one
    /// parent is ambiguous. With `case_insensitive`, literals differing only in
    /// ASCII case are the same shape too.
    pub fn same_shape(&self, other: &RoutePattern, case_insensitive: bool) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Param(_), Segment::Param(_)) => true,
                    (Segment::Static(a), Segment::Static(b)) if case_insensitive => {
                        a.eq_ignore_ascii_case(b)
                    }
                    (Segment::Static(a), Segment::Static(b)) => a == b,
                    _ => false,
                })
    }

    /// Orders sibling patterns for matching: position by position, literal before parameter
    ///
    /// Patterns that agree on every shared position compare equal, leaving the
    /// registration order in place.
    pub fn rank_cmp(&self, other: &RoutePattern) -> Ordering {
        self.segments
            .iter()
            .zip(&other.segments)
            .map(|(a, b)| a.kind().cmp(&b.kind()))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Matches this pattern against a prefix of `input`
    ///
    /// Returns the parameter bindings for the consumed prefix, or `None` when the
    /// input is too short or a literal differs.
    pub fn match_prefix<S: AsRef<str>>(
        &self,
        input: &[S],
        case_insensitive: bool,
    ) -> Option<Vec<(String, String)>> {
        if input.len() < self.segments.len() {
            return None;
        }

        let mut bindings = Vec::new();
        for (segment, value) in self.segments.iter().zip(input) {
            let value = value.as_ref();
            if !segment.accepts(value, case_insensitive) {
                return None;
            }
            if let Segment::Param(name) = segment {
                bindings.push((name.clone(), value.to_string()));
            }
        }
        Some(bindings)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}
