use maud::{html, Markup};
use tracing::debug;
use waymark_router::{Link, RenderContext};

use crate::data::find_user;
use crate::layouts::href;

/// Detail page for `/users/$userId`
///
/// An id without a record renders an inline message; the route itself still
/// matched, so this is not a not-found page.
pub fn page(ctx: RenderContext<'_, Markup>) -> Markup {
    let user_id = ctx.param("userId").unwrap_or_default();

    let Some(user) = find_user(user_id) else {
        debug!("No user record for id {}", user_id);
        return html! {
            div.error { "User not found" }
        };
    };

    html! {
        div.card {
            div.back {
                a href=(href(ctx.tree(), &Link::to("/users"))) { "← Back to users" }
            }
            h1 { (user.name) }
            dl {
                dt { "Email" }
                dd { (user.email) }
                dt { "Role" }
                dd { (user.role) }
                dt { "User ID" }
                dd { (user_id) }
            }
        }
    }
}
