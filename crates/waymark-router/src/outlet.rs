//! Nested layout composition
//!
//! A matched chain renders as a right fold: the leaf renders first with an
//! empty outlet, then each ancestor renders with its child's output in the
//! outlet slot, ending at the root.

use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::ParamError;
use crate::location::Location;
use crate::matcher::{MatchResult, Params};
use crate::tree::{RouteDefinition, RouteId, RouteTree};

/// What a render function sees
pub struct RenderContext<'a, V> {
    route: &'a RouteDefinition<V>,
    tree: &'a RouteTree<V>,
    params: &'a Params,
    location: &'a Location,
    outlet: Option<V>,
}

impl<'a, V> RenderContext<'a, V> {
    /// Output of the next route in the chain, `None` at the leaf
    pub fn outlet(&self) -> Option<&V> {
        self.outlet.as_ref()
    }

    /// Takes ownership of the child output
    pub fn into_outlet(self) -> Option<V> {
        self.outlet
    }

    pub fn params(&self) -> &'a Params {
        self.params
    }

    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parses a parameter into `T`
    ///
    /// ```
    /// use waymark_router::{Location, OutletRenderer, RouteTree};
    ///
    /// let mut builder = RouteTree::<String>::builder(|ctx| ctx.into_outlet().unwrap_or_default());
    /// let root = builder.root();
    /// builder.create_route(root, "/users/$userId", |ctx| match ctx.param_as::<u32>("userId") {
    ///     Ok(id) => format!("user #{}", id),
    ///     Err(err) => err.to_string(),
    /// });
    /// let tree = builder.build().unwrap();
    /// let renderer = OutletRenderer::new(|_| "not found".to_string());
    ///
    /// let location = Location::parse("/users/7");
    /// let html = renderer.render(&tree, &tree.match_path(&location.pathname), &location);
    /// assert_eq!(html, "user #7");
    ///
    /// let location = Location::parse("/users/abc");
    /// let html = renderer.render(&tree, &tree.match_path(&location.pathname), &location);
    /// assert!(html.starts_with("parameter `$userId` has invalid value `abc`"));
    /// ```
    pub fn param_as<T>(&self, name: &str) -> Result<T, ParamError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.param(name).ok_or_else(|| ParamError::Missing {
            name: name.to_string(),
        })?;
        value.parse().map_err(|err: T::Err| ParamError::Invalid {
            name: name.to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        })
    }

    pub fn location(&self) -> &'a Location {
        self.location
    }

    /// The route being rendered
    pub fn route(&self) -> &'a RouteDefinition<V> {
        self.route
    }

    /// The whole tree, for building links
    pub fn tree(&self) -> &'a RouteTree<V> {
        self.tree
    }
}

/// What the not-found fallback sees
pub struct NotFoundContext<'a, V> {
    pub path: &'a str,
    pub location: &'a Location,
    pub tree: &'a RouteTree<V>,
}

pub type FallbackFn<V> = Arc<dyn Fn(NotFoundContext<'_, V>) -> V + Send + Sync>;

/// Composes matched chains into a single output
pub struct OutletRenderer<V> {
    fallback: FallbackFn<V>,
    fallback_in_root: bool,
}

impl<V> Clone for OutletRenderer<V> {
    fn clone(&self) -> Self {
        Self {
            fallback: Arc::clone(&self.fallback),
            fallback_in_root: self.fallback_in_root,
        }
    }
}

impl<V> OutletRenderer<V> {
    pub fn new<F>(fallback: F) -> Self
    where
        F: Fn(NotFoundContext<'_, V>) -> V + Send + Sync + 'static,
    {
        Self {
            fallback: Arc::new(fallback),
            fallback_in_root: false,
        }
    }

    /// Renders the fallback inside the root shell instead of on its own
    pub fn with_fallback_in_root(mut self, fallback_in_root: bool) -> Self {
        self.fallback_in_root = fallback_in_root;
        self
    }

    pub fn render(&self, tree: &RouteTree<V>, matched: &MatchResult, location: &Location) -> V {
        match matched {
            MatchResult::Matched(route_match) => {
                compose(tree, route_match.chain(), route_match.params(), location)
                    .unwrap_or_else(|| self.render_fallback(tree, route_match.path(), location))
            }
            MatchResult::NotFound { path } => self.render_fallback(tree, path, location),
        }
    }

    fn render_fallback(&self, tree: &RouteTree<V>, path: &str, location: &Location) -> V {
        debug!("Rendering not-found fallback for {}", path);
        let fallback = (self.fallback)(NotFoundContext {
            path,
            location,
            tree,
        });

        if !self.fallback_in_root {
            return fallback;
        }

        let params = Params::new();
        let root = tree.root();
        root.render(RenderContext {
            route: root,
            tree,
            params: &params,
            location,
            outlet: Some(fallback),
        })
    }
}

/// Right fold over the chain; `None` only for an empty chain
fn compose<V>(
    tree: &RouteTree<V>,
    chain: &[RouteId],
    params: &Params,
    location: &Location,
) -> Option<V> {
    let render = |id: &RouteId, outlet: Option<V>| {
        let route = tree.get(*id)?;
        Some(route.render(RenderContext {
            route,
            tree,
            params,
            location,
            outlet,
        }))
    };

    let (leaf, ancestors) = chain.split_last()?;
    let inner = render(leaf, None)?;
    ancestors
        .iter()
        .rev()
        .try_fold(inner, |child, id| render(id, Some(child)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(tag: &'static str) -> impl Fn(RenderContext<'_, String>) -> String + Send + Sync {
        move |ctx: RenderContext<'_, String>| format!("<{tag}>{}</{tag}>", ctx.into_outlet().unwrap_or_default())
    }

    fn tree() -> RouteTree<String> {
        let mut builder = RouteTree::builder(shell("root"));
        let root = builder.root();
        builder.create_route(root, "/", |_| "home".to_string());
        let users = builder.create_route(root, "/users", shell("users"));
        builder.create_route(users, "/$userId", |ctx| {
            format!("user {}", ctx.param("userId").unwrap_or_default())
        });
        builder.build().unwrap()
    }

    fn render(renderer: &OutletRenderer<String>, tree: &RouteTree<String>, href: &str) -> String {
        let location = Location::parse(href);
        renderer.render(tree, &tree.match_path(&location.pathname), &location)
    }

    #[test]
    fn test_nested_composition_order() {
        let tree = tree();
        let renderer = OutletRenderer::new(|ctx| format!("missing {}", ctx.path));
        assert_eq!(
            render(&renderer, &tree, "/users/2"),
            "<root><users>user 2</users></root>"
        );
        assert_eq!(render(&renderer, &tree, "/"), "<root>home</root>");
        assert_eq!(render(&renderer, &tree, "/users"), "<root><users></users></root>");
    }

    #[test]
    fn test_fallback_standalone() {
        let tree = tree();
        let renderer = OutletRenderer::new(|ctx| format!("missing {}", ctx.path));
        assert_eq!(render(&renderer, &tree, "/nope"), "missing /nope");
    }

    #[test]
    fn test_fallback_in_root() {
        let tree = tree();
        let renderer =
            OutletRenderer::new(|ctx| format!("missing {}", ctx.path)).with_fallback_in_root(true);
        assert_eq!(render(&renderer, &tree, "/nope"), "<root>missing /nope</root>");
    }
}
