pub mod root;

use tracing::warn;
use waymark_router::{Link, RouteTree};

/// Resolves a link for an `href` attribute
///
/// A link that does not resolve is logged and rendered as `#`, so one bad
/// link degrades a single anchor instead of the whole page.
pub fn href<V>(tree: &RouteTree<V>, link: &Link) -> String {
    link.href(tree).unwrap_or_else(|err| {
        warn!("Broken link to {}: {}", link.target(), err);
        "#".to_string()
    })
}
