//! # Waymark Router
//!
//! A generic client-side router core:
//! - Route tree registry with parent-linked definitions (`/users/$userId`)
//! - Path matching with parameter extraction and deterministic precedence
//! - Navigation controller owning the current location and session history
//! - Nested layout composition through outlets
//!
//! The router is generic over the render output `V`, so the same tree can
//! produce HTML markup, strings, or any other view type.
//!
//! ## Precedence
//!
//! Literal segments always beat parameters, position by position, regardless
//! of how the tree is nested. Equal candidates resolve to the route registered
//! first, so matching is deterministic even for ambiguous trees.
//!
//! ## Path Normalization
//!
//! Handles common input mistakes gracefully:
//! - Trailing slashes: `/path/` → `/path`
//! - Double slashes: `/path//to` → `/path/to`
//! - Query strings and fragments are ignored when matching
//! - Percent-encoded segments are decoded before they are bound
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use waymark_router::{NavigationController, OutletRenderer, RouteTree};
//!
//! let mut builder = RouteTree::<String>::builder(|ctx| {
//!     format!("<main>{}</main>", ctx.into_outlet().unwrap_or_default())
//! });
//! let root = builder.root();
//! builder.create_route(root, "/", |_| "home".to_string());
//! let users = builder.create_route(root, "/users", |ctx| {
//!     format!("<ul>{}</ul>", ctx.into_outlet().unwrap_or_default())
//! });
//! builder.create_route(users, "/$userId", |ctx| {
//!     format!("<li>{}</li>", ctx.param("userId").unwrap_or_default())
//! });
//! let tree = Arc::new(builder.build().unwrap());
//!
//! let renderer = OutletRenderer::new(|ctx| format!("no page at {}", ctx.path));
//! let mut nav = NavigationController::new(Arc::clone(&tree), "/");
//! nav.navigate("/users/2");
//!
//! let html = renderer.render(&tree, nav.current_match(), nav.location());
//! assert_eq!(html, "<main><ul><li>2</li></ul></main>");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
mod history;
pub mod link;
mod location;
pub mod matcher;
mod navigation;
mod options;
mod outlet;
pub mod path;
pub mod route;
mod tree;

// ============================================================================
// Public API
// ============================================================================

pub use error::{LinkError, ParamError, RouteConfigError};
pub use history::History;
pub use link::Link;
pub use location::Location;
pub use matcher::{match_path, MatchResult, Params, RouteMatch};
pub use navigation::{NavigationController, NavigationEvent, NavigationKind, SubscriptionId};
pub use options::RouterOptions;
pub use outlet::{FallbackFn, NotFoundContext, OutletRenderer, RenderContext};
pub use path::{is_valid_path, normalize_path};
pub use route::{RoutePattern, Segment, SegmentKind};
pub use tree::{RenderFn, RouteDefinition, RouteId, RouteTree, RouteTreeBuilder};
