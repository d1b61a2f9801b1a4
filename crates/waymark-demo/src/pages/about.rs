use maud::{html, Markup};
use waymark_router::RenderContext;

pub fn page(_ctx: RenderContext<'_, Markup>) -> Markup {
    html! {
        div.card {
            h1 { "About" }
            p {
                "Waymark is a type-safe routing library for client-side applications. "
                "Routes form a tree, pages nest inside their layouts, and every "
                "navigation is checked against the routes you registered."
            }
        }
    }
}
