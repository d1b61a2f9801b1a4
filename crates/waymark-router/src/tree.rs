//! Route registry
//!
//! Routes live in an arena owned by [`RouteTree`]. Parent links are
//! [`RouteId`] indices that always point at an earlier entry, so every chain
//! ends at the root and the tree cannot contain cycles.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::RouteConfigError;
use crate::matcher::{self, MatchResult};
use crate::options::RouterOptions;
use crate::outlet::RenderContext;
use crate::path::normalize_path;
use crate::route::RoutePattern;

static NEXT_TREE_TAG: AtomicU32 = AtomicU32::new(0);

/// Stable identifier of a route inside one tree
///
/// Ids carry the tag of the builder that issued them, so an id from one tree
/// is never silently accepted by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId {
    tree: u32,
    index: u32,
}

impl RouteId {
    /// Position of the route in its tree's arena (the root is `0`)
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Function producing the UI for one route
pub type RenderFn<V> = Arc<dyn Fn(RenderContext<'_, V>) -> V + Send + Sync>;

/// A registered route
pub struct RouteDefinition<V> {
    id: RouteId,
    parent: Option<RouteId>,
    pattern: RoutePattern,
    full_pattern: RoutePattern,
    children: Vec<RouteId>,
    render: RenderFn<V>,
}

impl<V> RouteDefinition<V> {
    pub fn id(&self) -> RouteId {
        self.id
    }

    pub fn parent(&self) -> Option<RouteId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this is an index route (pattern `/` below a parent)
    pub fn is_index(&self) -> bool {
        self.parent.is_some() && self.pattern.is_index()
    }

    /// Pattern relative to the parent, e.g. `/$userId`
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Pattern from the root, e.g. `/users/$userId`
    pub fn full_pattern(&self) -> &RoutePattern {
        &self.full_pattern
    }

    /// Children in matching order
    pub fn children(&self) -> &[RouteId] {
        &self.children
    }

    /// Invokes the render function
    pub fn render(&self, ctx: RenderContext<'_, V>) -> V {
        (self.render)(ctx)
    }
}

impl<V> fmt::Debug for RouteDefinition<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("pattern", &self.pattern.to_string())
            .field("full_pattern", &self.full_pattern.to_string())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Immutable tree of route definitions
///
/// # Examples
///
/// ```
/// use waymark_router::RouteTree;
///
/// let mut builder = RouteTree::<String>::builder(|ctx| {
///     format!("<main>{}</main>", ctx.outlet().cloned().unwrap_or_default())
/// });
/// let root = builder.root();
/// builder.create_route(root, "/", |_| "home".to_string());
/// builder.create_route(root, "/users/$userId", |ctx| format!("user {}", ctx.param("userId").unwrap_or("?")));
/// let tree = builder.build().unwrap();
///
/// let matched = tree.match_path("/users/2");
/// assert_eq!(matched.params().and_then(|p| p.get("userId")).map(String::as_str), Some("2"));
/// ```
pub struct RouteTree<V> {
    tag: u32,
    routes: Vec<RouteDefinition<V>>,
    options: RouterOptions,
}

impl<V> RouteTree<V> {
    /// Starts a tree whose root renders with `render`
    pub fn builder<F>(render: F) -> RouteTreeBuilder<V>
    where
        F: Fn(RenderContext<'_, V>) -> V + Send + Sync + 'static,
    {
        RouteTreeBuilder::new(Arc::new(render))
    }

    pub fn root(&self) -> &RouteDefinition<V> {
        &self.routes[0]
    }

    /// Looks up a route; `None` for ids issued by another tree
    pub fn get(&self, id: RouteId) -> Option<&RouteDefinition<V>> {
        if id.tree != self.tag {
            return None;
        }
        self.routes.get(id.index())
    }

    pub fn parent(&self, id: RouteId) -> Option<&RouteDefinition<V>> {
        self.get(id)?.parent.and_then(|parent| self.get(parent))
    }

    pub fn children(&self, id: RouteId) -> impl Iterator<Item = &RouteDefinition<V>> {
        self.get(id)
            .map(|route| route.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |child| self.get(*child))
    }

    /// Root-to-route chain, root first
    pub fn ancestors(&self, id: RouteId) -> Vec<&RouteDefinition<V>> {
        let mut chain: Vec<&RouteDefinition<V>> =
            std::iter::successors(self.get(id), |route| route.parent.and_then(|p| self.get(p)))
                .collect();
        chain.reverse();
        chain
    }

    /// Finds the route registered under a full pattern such as `/users/$userId`
    ///
    /// Parameter names must match. When an index route shares its parent's full
    /// pattern, the index route is returned.
    pub fn find_by_pattern(&self, pattern: &str) -> Option<&RouteDefinition<V>> {
        let wanted = RoutePattern::parse(pattern).ok()?;
        self.routes
            .iter()
            .rev()
            .find(|route| route.full_pattern == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDefinition<V>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// A tree always holds its root, so it is never empty
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Resolves a concrete path against this tree
    pub fn match_path(&self, path: &str) -> MatchResult {
        matcher::match_path(self, path)
    }

    pub(crate) fn route_at(&self, index: usize) -> &RouteDefinition<V> {
        &self.routes[index]
    }
}

impl<V> fmt::Debug for RouteTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTree")
            .field("routes", &self.routes)
            .field("options", &self.options)
            .finish()
    }
}

struct PendingRoute<V> {
    parent: RouteId,
    pattern: String,
    render: RenderFn<V>,
}

/// Collects route registrations and validates them in [`build`](Self::build)
pub struct RouteTreeBuilder<V> {
    tag: u32,
    root: RenderFn<V>,
    pending: Vec<PendingRoute<V>>,
    options: RouterOptions,
}

impl<V> RouteTreeBuilder<V> {
    fn new(root: RenderFn<V>) -> Self {
        Self {
            tag: NEXT_TREE_TAG.fetch_add(1, Ordering::Relaxed),
            root,
            pending: Vec::new(),
            options: RouterOptions::default(),
        }
    }

    pub fn root(&self) -> RouteId {
        RouteId {
            tree: self.tag,
            index: 0,
        }
    }

    pub fn with_options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    /// Registers a route under `parent`
    ///
    /// `pattern` is relative to the parent: `/` declares the parent's index
    /// route, `/$userId` a parameter segment. Validation is deferred to
    /// [`build`](Self::build).
    pub fn create_route<F>(&mut self, parent: RouteId, pattern: &str, render: F) -> RouteId
    where
        F: Fn(RenderContext<'_, V>) -> V + Send + Sync + 'static,
    {
        self.pending.push(PendingRoute {
            parent,
            pattern: pattern.to_string(),
            render: Arc::new(render),
        });
        RouteId {
            tree: self.tag,
            index: self.pending.len() as u32,
        }
    }

    /// Validates every registration and freezes the tree
    ///
    /// Fails on malformed patterns, duplicate sibling patterns, parameter names
    /// repeated along one chain, foreign or forward parent ids, and index
    /// routes with children.
    pub fn build(self) -> Result<RouteTree<V>, RouteConfigError> {
        let mut routes = Vec::with_capacity(self.pending.len() + 1);
        routes.push(RouteDefinition {
            id: self.root(),
            parent: None,
            pattern: RoutePattern::index(),
            full_pattern: RoutePattern::index(),
            children: Vec::new(),
            render: self.root,
        });

        for (offset, pending) in self.pending.into_iter().enumerate() {
            let index = offset + 1;
            let parent_index = pending.parent.index();
            if pending.parent.tree != self.tag || parent_index >= index {
                return Err(RouteConfigError::UnknownParent {
                    pattern: normalize_path(&pending.pattern).into_owned(),
                });
            }

            let pattern = RoutePattern::parse(&pending.pattern)?;
            let parent: &RouteDefinition<V> = &routes[parent_index];
            let full_pattern = parent.full_pattern.join(&pattern);

            if parent.is_index() {
                return Err(RouteConfigError::IndexWithChildren {
                    pattern: parent.full_pattern.to_string(),
                });
            }

            let duplicate = parent.children.iter().any(|sibling| {
                routes[sibling.index()]
                    .pattern
                    .same_shape(&pattern, self.options.case_insensitive)
            });
            if duplicate {
                return Err(RouteConfigError::DuplicateSibling {
                    parent: parent.full_pattern.to_string(),
                    pattern: pattern.to_string(),
                });
            }

            let mut seen = HashSet::new();
            if let Some(name) = full_pattern.param_names().find(|name| !seen.insert(*name)) {
                return Err(RouteConfigError::DuplicateParam {
                    name: name.to_string(),
                    pattern: full_pattern.to_string(),
                });
            }

            let id = RouteId {
                tree: self.tag,
                index: index as u32,
            };
            routes[parent_index].children.push(id);
            routes.push(RouteDefinition {
                id,
                parent: Some(pending.parent),
                pattern,
                full_pattern,
                children: Vec::new(),
                render: pending.render,
            });
        }

        // Stable sort: siblings that rank equal keep registration order
        for position in 0..routes.len() {
            let mut children = std::mem::take(&mut routes[position].children);
            children.sort_by(|a, b| routes[a.index()].pattern.rank_cmp(&routes[b.index()].pattern));
            routes[position].children = children;
        }

        debug!("Built route tree with {} routes", routes.len());

        Ok(RouteTree {
            tag: self.tag,
            routes,
            options: self.options,
        })
    }
}
