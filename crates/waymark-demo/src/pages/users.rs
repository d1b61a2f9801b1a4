use maud::{html, Markup};
use waymark_router::{Link, RenderContext};

use crate::data::all_users;
use crate::layouts::href;

pub fn page(ctx: RenderContext<'_, Markup>) -> Markup {
    let tree = ctx.tree();

    html! {
        div.card {
            h1 { "Users" }
            div.user-list {
                @for user in all_users() {
                    div.user {
                        h3 { (user.name) }
                        p { (user.email) }
                        a href=(href(tree, &Link::to("/users/$userId").param("userId", user.id))) {
                            "View details"
                        }
                    }
                }
            }
        }
    }
}
