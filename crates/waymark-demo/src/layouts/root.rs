// Root Layout
// The shell around every page: document head, navigation bar and the outlet

use maud::{html, Markup, DOCTYPE};
use waymark_router::{Link, RenderContext};

use super::href;

/// Navigation entries: route pattern and label
const NAV: [(&str, &str); 3] = [("/", "Home"), ("/about", "About"), ("/users", "Users")];

/// Root layout function
///
/// Wraps the outlet in a full HTML document with the navigation bar. The
/// entry whose href equals the current pathname is marked `aria-current`.
pub fn layout(title: &str, ctx: RenderContext<'_, Markup>) -> Markup {
    let tree = ctx.tree();
    let pathname = ctx.location().pathname.as_str();
    let content = ctx.into_outlet().unwrap_or_else(|| html! {});

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body.min-h-screen {
                nav.navbar {
                    @for (target, label) in NAV {
                        @let link = href(tree, &Link::to(target));
                        a.nav-link href=(link) aria-current=[(link == pathname).then_some("page")] {
                            (label)
                        }
                    }
                }
                main.container {
                    (content)
                }
            }
        }
    }
}
