//! Route table of the demo shell

use maud::Markup;
use waymark_router::{OutletRenderer, RouteConfigError, RouteTree};

use crate::config::Config;
use crate::layouts;
use crate::pages;

/// Builds the route tree
///
/// ```text
/// root (layout)
/// ├── /                home
/// ├── /about           about
/// ├── /users           users list
/// └── /users/$userId   user detail
/// ```
pub fn build(config: &Config) -> Result<RouteTree<Markup>, RouteConfigError> {
    let title = config.app.title.clone();
    let mut builder = RouteTree::builder(move |ctx| layouts::root::layout(&title, ctx))
        .with_options(config.router.clone());

    let root = builder.root();
    builder.create_route(root, "/", pages::home::page);
    builder.create_route(root, "/about", pages::about::page);
    builder.create_route(root, "/users", pages::users::page);
    builder.create_route(root, "/users/$userId", pages::user_detail::page);

    builder.build()
}

pub fn renderer(config: &Config) -> OutletRenderer<Markup> {
    OutletRenderer::new(pages::not_found::page).with_fallback_in_root(config.render.fallback_in_root)
}
