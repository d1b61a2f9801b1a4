//! Path matching
//!
//! Resolves a concrete path against a [`RouteTree`], producing the chain of
//! routes from root to leaf plus the parameter bindings.
//!
//! ## Precedence
//!
//! Every complete match is scored by the kind of segment that consumed each
//! input position. Scores compare position by position with literal before
//! parameter, so `/about` always beats `/$id`, and `/users/new` beats
//! `/users/$userId`, even when the competing patterns sit at different depths
//! of the tree. Equal scores go to the route registered first.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::path::{normalize_path, segments, split_href};
use crate::route::SegmentKind;
use crate::tree::{RouteDefinition, RouteId, RouteTree};

/// Parameter bindings: name → percent-decoded value
pub type Params = HashMap<String, String>;

/// A successful match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    chain: Vec<RouteId>,
    params: Params,
    path: String,
}

impl RouteMatch {
    /// Matched routes, root first
    pub fn chain(&self) -> &[RouteId] {
        &self.chain
    }

    /// The deepest matched route
    pub fn leaf(&self) -> RouteId {
        // The chain always holds at least the root
        self.chain[self.chain.len() - 1]
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// The normalized path that was matched
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Outcome of matching a path
///
/// `NotFound` is a normal result, not an error: callers decide how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(RouteMatch),
    NotFound { path: String },
}

impl MatchResult {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchResult::NotFound { .. })
    }

    pub fn as_matched(&self) -> Option<&RouteMatch> {
        match self {
            MatchResult::Matched(route_match) => Some(route_match),
            MatchResult::NotFound { .. } => None,
        }
    }

    pub fn leaf(&self) -> Option<RouteId> {
        self.as_matched().map(RouteMatch::leaf)
    }

    pub fn params(&self) -> Option<&Params> {
        self.as_matched().map(RouteMatch::params)
    }

    /// The normalized path, present for both outcomes
    pub fn path(&self) -> &str {
        match self {
            MatchResult::Matched(route_match) => route_match.path(),
            MatchResult::NotFound { path } => path,
        }
    }
}

/// A complete match found during the walk
struct Candidate {
    chain: Vec<RouteId>,
    params: Vec<(String, String)>,
    score: Vec<SegmentKind>,
}

/// Mutable state threaded through the depth-first walk
struct Walk<'t, V> {
    tree: &'t RouteTree<V>,
    case_insensitive: bool,
    chain: Vec<RouteId>,
    params: Vec<(String, String)>,
    score: Vec<SegmentKind>,
    best: Option<Candidate>,
}

impl<'t, V> Walk<'t, V> {
    fn visit(&mut self, route: &'t RouteDefinition<V>, remaining: &[Cow<'_, str>]) {
        let tree = self.tree;
        self.chain.push(route.id());

        if remaining.is_empty() {
            let index = route
                .children()
                .iter()
                .map(|id| tree.route_at(id.index()))
                .find(|child| child.is_index());
            if let Some(index) = index {
                self.chain.push(index.id());
                self.offer();
                self.chain.pop();
            } else {
                self.offer();
            }
        } else {
            for child_id in route.children() {
                let child = tree.route_at(child_id.index());
                if child.is_index() {
                    continue;
                }
                let Some(bindings) = child.pattern().match_prefix(remaining, self.case_insensitive)
                else {
                    continue;
                };

                let consumed = child.pattern().len();
                let (params_mark, score_mark) = (self.params.len(), self.score.len());
                self.params.extend(bindings);
                self.score
                    .extend(child.pattern().segments().iter().map(|segment| segment.kind()));

                self.visit(child, &remaining[consumed..]);

                self.params.truncate(params_mark);
                self.score.truncate(score_mark);
            }
        }

        self.chain.pop();
    }

    /// Records the current chain if it beats the best match so far
    fn offer(&mut self) {
        let better = match &self.best {
            Some(best) => self.score < best.score,
            None => true,
        };
        if better {
            self.best = Some(Candidate {
                chain: self.chain.clone(),
                params: self.params.clone(),
                score: self.score.clone(),
            });
        }
    }
}

/// Resolves `path` against `tree`
///
/// The path is normalized first: query and fragment are dropped, trailing and
/// doubled slashes removed, and the configured base path stripped. Parameter
/// values are percent-decoded.
///
/// # Examples
///
/// ```
/// use waymark_router::{match_path, RouteTree};
///
/// let mut builder = RouteTree::<()>::builder(|_| ());
/// let root = builder.root();
/// builder.create_route(root, "/about", |_| ());
/// builder.create_route(root, "/$slug", |_| ());
/// let tree = builder.build().unwrap();
///
/// let about = match_path(&tree, "/about/");
/// assert_eq!(about.params().map(|p| p.len()), Some(0));
///
/// let slug = match_path(&tree, "/hello%20world");
/// assert_eq!(slug.params().unwrap()["slug"], "hello world");
///
/// assert!(match_path(&tree, "/a/b/c").is_not_found());
/// ```
pub fn match_path<V>(tree: &RouteTree<V>, path: &str) -> MatchResult {
    let (raw_path, _, _) = split_href(path);
    let normalized = normalize_path(raw_path).into_owned();

    let Some(routable) = tree.options().routable(&normalized) else {
        debug!("Path {} is outside base path {}", normalized, tree.options().base());
        return MatchResult::NotFound { path: normalized };
    };

    let best = {
        let input: Vec<Cow<'_, str>> = segments(routable).map(decode_segment).collect();
        let mut walk = Walk {
            tree,
            case_insensitive: tree.options().case_insensitive,
            chain: Vec::new(),
            params: Vec::new(),
            score: Vec::new(),
            best: None,
        };
        walk.visit(tree.root(), &input);
        walk.best
    };

    match best {
        Some(candidate) => {
            if let Some(leaf) = candidate.chain.last().and_then(|id| tree.get(*id)) {
                debug!("Matched {} to {}", normalized, leaf.full_pattern());
            }
            MatchResult::Matched(RouteMatch {
                chain: candidate.chain,
                params: candidate.params.into_iter().collect(),
                path: normalized,
            })
        }
        None => {
            debug!("No route matches {}", normalized);
            MatchResult::NotFound { path: normalized }
        }
    }
}

/// Percent-decodes a path segment, keeping the raw text when it is not valid UTF-8
fn decode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}
