use std::collections::BTreeMap;

use crate::error::LinkError;
use crate::location::encode_search;
use crate::route::{RoutePattern, Segment};
use crate::tree::RouteTree;

/// A navigation target: a registered route pattern plus its parameter bindings
///
/// Links are checked against the tree when resolved, so a typo in the pattern
/// or a forgotten parameter is an error instead of a broken href.
///
/// # Examples
///
/// ```
/// use waymark_router::{Link, LinkError, RouteTree};
///
/// let mut builder = RouteTree::<()>::builder(|_| ());
/// let root = builder.root();
/// builder.create_route(root, "/users/$userId", |_| ());
/// let tree = builder.build().unwrap();
///
/// let href = Link::to("/users/$userId")
///     .param("userId", "2")
///     .search("tab", "profile")
///     .href(&tree)
///     .unwrap();
/// assert_eq!(href, "/users/2?tab=profile");
///
/// let missing = Link::to("/users/$userId").href(&tree);
/// assert!(matches!(missing, Err(LinkError::MissingParam { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Link {
    to: String,
    params: BTreeMap<String, String>,
    search: BTreeMap<String, String>,
    hash: Option<String>,
}

impl Link {
    pub fn to(pattern: impl Into<String>) -> Self {
        Self {
            to: pattern.into(),
            ..Self::default()
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    pub fn params<I, K, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: ToString,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    pub fn search(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.search.insert(key.into(), value.to_string());
        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// The target pattern as written
    pub fn target(&self) -> &str {
        &self.to
    }

    /// Resolves this link into an href for `tree`, including the base path
    pub fn href<V>(&self, tree: &RouteTree<V>) -> Result<String, LinkError> {
        let route = tree
            .find_by_pattern(&self.to)
            .ok_or_else(|| LinkError::UnknownRoute {
                pattern: self.to.clone(),
            })?;

        let pattern = route.full_pattern();
        if let Some(name) = self
            .params
            .keys()
            .find(|name| !pattern.param_names().any(|declared| declared == name.as_str()))
        {
            return Err(LinkError::UnexpectedParam {
                pattern: pattern.to_string(),
                name: name.clone(),
            });
        }

        let mut href = tree.options().external(&interpolate(pattern, &self.params)?);
        if !self.search.is_empty() {
            href.push('?');
            href.push_str(&encode_search(&self.search));
        }
        if let Some(hash) = &self.hash {
            href.push('#');
            href.push_str(hash);
        }
        Ok(href)
    }
}

/// Substitutes percent-encoded parameter values into a pattern
///
/// ```
/// use std::collections::BTreeMap;
/// use waymark_router::link::interpolate;
/// use waymark_router::route::RoutePattern;
///
/// let pattern = RoutePattern::parse("/files/$name").unwrap();
/// let params = BTreeMap::from([("name".to_string(), "a b/c".to_string())]);
/// assert_eq!(interpolate(&pattern, &params).unwrap(), "/files/a%20b%2Fc");
/// ```
pub fn interpolate(
    pattern: &RoutePattern,
    params: &BTreeMap<String, String>,
) -> Result<String, LinkError> {
    if pattern.is_index() {
        return Ok("/".to_string());
    }

    pattern
        .segments()
        .iter()
        .try_fold(String::new(), |mut path, segment| {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| LinkError::MissingParam {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    })?;
                    // An empty segment would collapse into the parent path
                    if value.is_empty() {
                        return Err(LinkError::EmptyParam {
                            pattern: pattern.to_string(),
                            name: name.clone(),
                        });
                    }
                    path.push_str(&urlencoding::encode(value));
                }
            }
            Ok(path)
        })
}
