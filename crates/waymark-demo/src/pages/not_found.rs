use maud::{html, Markup};
use waymark_router::{Link, NotFoundContext};

use crate::layouts::href;

pub fn page(ctx: NotFoundContext<'_, Markup>) -> Markup {
    html! {
        div.card.not-found {
            h1 { "Page not found" }
            p { "Nothing is registered at " code { (ctx.path) } "." }
            a href=(href(ctx.tree, &Link::to("/"))) { "Go home" }
        }
    }
}
