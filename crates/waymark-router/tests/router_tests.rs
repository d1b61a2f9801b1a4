use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use waymark_router::*;

// ============================================================================
// Fixtures
// ============================================================================

struct App {
    tree: Arc<RouteTree<String>>,
    ids: HashMap<&'static str, RouteId>,
}

fn wrap(tag: &'static str) -> impl Fn(RenderContext<'_, String>) -> String + Send + Sync {
    move |ctx: RenderContext<'_, String>| {
        format!("<{tag}>{}</{tag}>", ctx.into_outlet().unwrap_or_default())
    }
}

fn build_app(options: RouterOptions) -> App {
    let mut builder = RouteTree::builder(wrap("shell")).with_options(options);
    let root = builder.root();
    let mut ids = HashMap::new();
    ids.insert("root", root);
    ids.insert("home", builder.create_route(root, "/", |_| "home".to_string()));
    ids.insert("about", builder.create_route(root, "/about", |_| "about".to_string()));
    let users = builder.create_route(root, "/users", wrap("users"));
    ids.insert("users", users);
    ids.insert(
        "users_index",
        builder.create_route(users, "/", |_| "all users".to_string()),
    );
    ids.insert(
        "user",
        builder.create_route(users, "/$userId", |ctx| {
            format!("user {}", ctx.param("userId").unwrap_or_default())
        }),
    );
    App {
        tree: Arc::new(builder.build().expect("demo tree builds")),
        ids,
    }
}

#[fixture]
fn app() -> App {
    build_app(RouterOptions::default())
}

// ============================================================================
// Registry
// ============================================================================

#[rstest]
fn test_build_without_duplicates_succeeds(app: App) {
    assert_eq!(app.tree.len(), 6);
    assert!(app.tree.root().is_root());
}

#[rstest]
#[case("/about", "/about")]
#[case("/$id", "/$slug")]
#[case("/users/$id", "users/$userId/")]
fn test_duplicate_sibling_fails(#[case] first: &str, #[case] second: &str) {
    let mut builder = RouteTree::<()>::builder(|_| ());
    let root = builder.root();
    builder.create_route(root, first, |_| ());
    builder.create_route(root, second, |_| ());

    assert!(matches!(
        builder.build(),
        Err(RouteConfigError::DuplicateSibling { .. })
    ));
}

#[rstest]
fn test_same_pattern_under_different_parents_is_fine() {
    let mut builder = RouteTree::<()>::builder(|_| ());
    let root = builder.root();
    let a = builder.create_route(root, "/a", |_| ());
    let b = builder.create_route(root, "/b", |_| ());
    builder.create_route(a, "/$id", |_| ());
    builder.create_route(b, "/$id", |_| ());
    assert!(builder.build().is_ok());
}

#[rstest]
fn test_duplicate_param_in_chain_fails() {
    let mut builder = RouteTree::<()>::builder(|_| ());
    let root = builder.root();
    let org = builder.create_route(root, "/orgs/$id", |_| ());
    builder.create_route(org, "/members/$id", |_| ());

    assert_eq!(
        builder.build().unwrap_err(),
        RouteConfigError::DuplicateParam {
            name: "id".to_string(),
            pattern: "/orgs/$id/members/$id".to_string(),
        }
    );
}

#[rstest]
#[case("/users/$")]
#[case("/users/$user-id")]
#[case("/us$ers")]
fn test_malformed_pattern_fails(#[case] pattern: &str) {
    let mut builder = RouteTree::<()>::builder(|_| ());
    let root = builder.root();
    builder.create_route(root, pattern, |_| ());
    assert!(matches!(
        builder.build(),
        Err(RouteConfigError::InvalidPattern { .. })
    ));
}

#[rstest]
fn test_index_route_cannot_have_children() {
    let mut builder = RouteTree::<()>::builder(|_| ());
    let root = builder.root();
    let index = builder.create_route(root, "/", |_| ());
    builder.create_route(index, "/oops", |_| ());
    assert!(matches!(
        builder.build(),
        Err(RouteConfigError::IndexWithChildren { .. })
    ));
}

// ============================================================================
// Matching
// ============================================================================

#[rstest]
#[case("/", "home")]
#[case("", "home")]
#[case("/about", "about")]
#[case("/about/", "about")]
#[case("//about", "about")]
#[case("/users", "users_index")]
#[case("/users/2", "user")]
#[case("/users/2?tab=posts#bio", "user")]
fn test_literal_walk_reaches_leaf(app: App, #[case] path: &str, #[case] leaf: &str) {
    assert_eq!(app.tree.match_path(path).leaf(), Some(app.ids[leaf]));
}

#[rstest]
fn test_chain_runs_root_to_leaf(app: App) {
    let result = app.tree.match_path("/users/2");
    let chain = result.as_matched().unwrap().chain().to_vec();
    assert_eq!(chain, vec![app.ids["root"], app.ids["users"], app.ids["user"]]);
}

#[rstest]
fn test_literal_beats_param_regardless_of_order() {
    let mut builder = RouteTree::<()>::builder(|_| ());
    let root = builder.root();
    let param = builder.create_route(root, "/$id", |_| ());
    let about = builder.create_route(root, "/about", |_| ());
    let tree = builder.build().unwrap();

    assert_eq!(tree.match_path("/about").leaf(), Some(about));
    assert_eq!(tree.match_path("/contact").leaf(), Some(param));
    assert_eq!(tree.match_path("/contact").params().unwrap()["id"], "contact");
}

#[rstest]
fn test_param_round_trip(app: App) {
    let result = app.tree.match_path("/users/2");
    let expected: Params = [("userId".to_string(), "2".to_string())].into_iter().collect();
    assert_eq!(result.params(), Some(&expected));
}

#[rstest]
fn test_params_are_percent_decoded(app: App) {
    let result = app.tree.match_path("/users/sato%20hanako");
    assert_eq!(result.params().unwrap()["userId"], "sato hanako");
}

#[rstest]
#[case("/nonexistent")]
#[case("/users/2/posts")]
#[case("/About")]
fn test_unmatched_is_not_found(app: App, #[case] path: &str) {
    let result = app.tree.match_path(path);
    assert!(result.is_not_found());
    assert_eq!(result.path(), normalize_path(path));
}

#[rstest]
fn test_case_insensitive_option() {
    let app = build_app(RouterOptions::default().with_case_insensitive(true));
    assert_eq!(app.tree.match_path("/ABOUT").leaf(), Some(app.ids["about"]));
    assert_eq!(
        app.tree.match_path("/Users/Ab").params().unwrap()["userId"],
        "Ab"
    );
}

#[rstest]
fn test_base_path_is_stripped() {
    let app = build_app(RouterOptions::default().with_base_path("/app"));
    assert_eq!(app.tree.match_path("/app").leaf(), Some(app.ids["home"]));
    assert_eq!(app.tree.match_path("/app/users/1").leaf(), Some(app.ids["user"]));
    assert!(app.tree.match_path("/users/1").is_not_found());
}

// ============================================================================
// Rendering
// ============================================================================

fn render(app: &App, renderer: &OutletRenderer<String>, href: &str) -> String {
    let location = Location::parse(href);
    renderer.render(&app.tree, &app.tree.match_path(href), &location)
}

#[rstest]
#[case("/", "<shell>home</shell>")]
#[case("/users", "<shell><users>all users</users></shell>")]
#[case("/users/3", "<shell><users>user 3</users></shell>")]
fn test_outlets_nest(app: App, #[case] href: &str, #[case] html: &str) {
    let renderer = OutletRenderer::new(|ctx| format!("404 {}", ctx.path));
    assert_eq!(render(&app, &renderer, href), html);
}

#[rstest]
fn test_fallback_placement(app: App) {
    let standalone = OutletRenderer::new(|ctx| format!("404 {}", ctx.path));
    assert_eq!(render(&app, &standalone, "/missing"), "404 /missing");

    let in_root = standalone.clone().with_fallback_in_root(true);
    assert_eq!(render(&app, &in_root, "/missing"), "<shell>404 /missing</shell>");
}

// ============================================================================
// Navigation
// ============================================================================

fn listen(nav: &mut NavigationController<String>) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    nav.subscribe(move |event| sink.borrow_mut().push(event.location.href()));
    seen
}

#[rstest]
fn test_repeat_navigation_is_idempotent(app: App) {
    let mut nav = NavigationController::new(Arc::clone(&app.tree), "/");
    let seen = listen(&mut nav);

    assert!(nav.navigate("/users/2"));
    let first = nav.current_match().clone();
    assert!(!nav.navigate("/users/2"));

    assert_eq!(nav.current_match(), &first);
    assert_eq!(*seen.borrow(), vec!["/users/2".to_string()]);
    assert_eq!(nav.history().len(), 2);
}

#[rstest]
fn test_back_and_forward_signals(app: App) {
    let mut nav = NavigationController::new(Arc::clone(&app.tree), "/");
    let seen = listen(&mut nav);

    nav.navigate("/users");
    nav.navigate("/users/1");
    assert!(nav.back());
    assert_eq!(nav.current_match().leaf(), Some(app.ids["users_index"]));
    assert!(nav.forward());
    assert!(!nav.forward());

    assert_eq!(
        *seen.borrow(),
        vec!["/users", "/users/1", "/users", "/users/1"]
    );
}

#[rstest]
fn test_push_after_back_drops_forward_entries(app: App) {
    let mut nav = NavigationController::new(Arc::clone(&app.tree), "/");
    nav.navigate("/about");
    nav.navigate("/users");
    nav.back();
    nav.navigate("/users/3");

    assert!(!nav.history().can_go_forward());
    let paths: Vec<&str> = nav.history().entries().iter().map(|l| l.pathname.as_str()).collect();
    assert_eq!(paths, vec!["/", "/about", "/users/3"]);
}

#[rstest]
fn test_unsubscribe_stops_notifications(app: App) {
    let mut nav = NavigationController::new(Arc::clone(&app.tree), "/");
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let id = nav.subscribe(move |_| *sink.borrow_mut() += 1);

    nav.navigate("/about");
    assert!(nav.unsubscribe(id));
    assert!(!nav.unsubscribe(id));
    nav.navigate("/users");

    assert_eq!(*seen.borrow(), 1);
}

#[rstest]
fn test_rerender_on_notification(app: App) {
    let mut nav = NavigationController::new(Arc::clone(&app.tree), "/");
    let renderer = OutletRenderer::new(|ctx| format!("404 {}", ctx.path));
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    nav.subscribe(move |event| {
        sink.borrow_mut()
            .push(renderer.render(event.tree, event.matched, event.location));
    });

    nav.navigate("/users/1");
    nav.navigate("/nowhere");

    assert_eq!(
        *frames.borrow(),
        vec!["<shell><users>user 1</users></shell>", "404 /nowhere"]
    );
}

// ============================================================================
// Links
// ============================================================================

#[rstest]
#[case(Link::to("/"), "/")]
#[case(Link::to("/users"), "/users")]
#[case(Link::to("/users/$userId").param("userId", 2), "/users/2")]
#[case(Link::to("/users/$userId").param("userId", "a/b"), "/users/a%2Fb")]
#[case(Link::to("/users").search("page", 2).hash("top"), "/users?page=2#top")]
fn test_link_href(app: App, #[case] link: Link, #[case] href: &str) {
    assert_eq!(link.href(&app.tree).unwrap(), href);
}

#[rstest]
fn test_link_errors(app: App) {
    assert_eq!(
        Link::to("/users/$userId").href(&app.tree),
        Err(LinkError::MissingParam {
            pattern: "/users/$userId".to_string(),
            name: "userId".to_string(),
        })
    );
    assert_eq!(
        Link::to("/posts").href(&app.tree),
        Err(LinkError::UnknownRoute {
            pattern: "/posts".to_string()
        })
    );
}

#[rstest]
fn test_empty_param_link_never_reaches_parent(app: App) {
    let link = Link::to("/users/$userId").param("userId", "");
    assert!(matches!(
        link.href(&app.tree),
        Err(LinkError::EmptyParam { ref name, .. }) if name == "userId"
    ));

    let mut nav = NavigationController::new(Arc::clone(&app.tree), "/");
    assert!(nav.navigate_to(&link).is_err());
    assert_eq!(nav.location().pathname, "/");
}

#[rstest]
fn test_case_variant_siblings_collide_when_case_insensitive() {
    let mut builder =
        RouteTree::<()>::builder(|_| ()).with_options(RouterOptions::default().with_case_insensitive(true));
    let root = builder.root();
    builder.create_route(root, "/about", |_| ());
    builder.create_route(root, "/About", |_| ());
    assert!(matches!(
        builder.build(),
        Err(RouteConfigError::DuplicateSibling { .. })
    ));
}

#[rstest]
fn test_link_resolves_back_to_same_params(app: App) {
    let href = Link::to("/users/$userId")
        .param("userId", "sato hanako")
        .href(&app.tree)
        .unwrap();
    assert_eq!(href, "/users/sato%20hanako");
    assert_eq!(app.tree.match_path(&href).params().unwrap()["userId"], "sato hanako");
}
