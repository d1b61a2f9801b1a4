use maud::{html, Markup};
use waymark_router::RenderContext;

const FEATURES: [&str; 4] = [
    "Type-safe routing",
    "Nested layouts",
    "Path parameters",
    "Back and forward history",
];

pub fn page(_ctx: RenderContext<'_, Markup>) -> Markup {
    html! {
        div.card {
            h1 { "Waymark Router Demo" }
            p { "A small tour of the router: pick a page from the navigation bar." }
            ul.features {
                @for feature in FEATURES {
                    li { (feature) }
                }
            }
        }
    }
}
