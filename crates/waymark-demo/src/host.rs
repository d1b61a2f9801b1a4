//! Terminal host: feeds navigation steps to the controller and collects frames

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use maud::Markup;
use waymark_router::{NavigationController, NavigationKind, OutletRenderer, RouteTree};

/// One navigation trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Follow a link href, e.g. `/users/2`
    Visit(String),
    /// `:back`
    Back,
    /// `:forward`
    Forward,
    /// `:go <delta>`
    Go(isize),
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        match input {
            ":back" => Ok(Step::Back),
            ":forward" => Ok(Step::Forward),
            _ if input.starts_with('/') => Ok(Step::Visit(input.to_string())),
            _ => {
                let Some(delta) = input.strip_prefix(":go") else {
                    bail!("unknown step {:?}: expected a path, :back, :forward or :go <n>", input);
                };
                delta
                    .trim()
                    .parse()
                    .map(Step::Go)
                    .with_context(|| format!("invalid history delta in {:?}", input))
            }
        }
    }
}

/// A rendered page, captured after the initial load or a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// `None` for the initial render
    pub kind: Option<NavigationKind>,
    pub href: String,
    pub html: String,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(kind) => writeln!(f, "<!-- waymark: {} {} -->", kind, self.href)?,
            None => writeln!(f, "<!-- waymark: initial {} -->", self.href)?,
        }
        f.write_str(&self.html)
    }
}

/// A navigation session rendering one frame per notification
pub struct Session {
    nav: NavigationController<Markup>,
    frames: Rc<RefCell<Vec<Frame>>>,
}

impl Session {
    pub fn new(tree: Arc<RouteTree<Markup>>, renderer: OutletRenderer<Markup>, start: &str) -> Self {
        let mut nav = NavigationController::new(tree, start);

        let initial = Frame {
            kind: None,
            href: nav.location().href(),
            html: renderer
                .render(nav.tree(), nav.current_match(), nav.location())
                .into_string(),
        };
        let frames = Rc::new(RefCell::new(vec![initial]));

        let sink = Rc::clone(&frames);
        nav.subscribe(move |event| {
            sink.borrow_mut().push(Frame {
                kind: Some(event.kind),
                href: event.location.href(),
                html: renderer
                    .render(event.tree, event.matched, event.location)
                    .into_string(),
            });
        });

        Self { nav, frames }
    }

    /// Applies a step; `false` when it changed nothing
    pub fn apply(&mut self, step: &Step) -> bool {
        match step {
            Step::Visit(href) => self.nav.navigate(href),
            Step::Back => self.nav.back(),
            Step::Forward => self.nav.forward(),
            Step::Go(delta) => self.nav.go(*delta),
        }
    }

    /// Takes the frames rendered since the last call
    pub fn drain(&mut self) -> Vec<Frame> {
        self.frames.borrow_mut().drain(..).collect()
    }

    pub fn controller(&self) -> &NavigationController<Markup> {
        &self.nav
    }
}

/// Parses every CLI step up front so a typo fails before anything renders
pub fn parse_steps(raw: &[String]) -> Result<Vec<Step>> {
    raw.iter().map(|step| step.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn session(start: &str) -> Session {
        let config = Config::default();
        let tree = Arc::new(routes::build(&config).unwrap());
        Session::new(tree, routes::renderer(&config), start)
    }

    fn hrefs(frames: &[Frame]) -> Vec<(Option<NavigationKind>, &str)> {
        frames.iter().map(|f| (f.kind, f.href.as_str())).collect()
    }

    #[rstest]
    #[case("/users/2", Step::Visit("/users/2".to_string()))]
    #[case("  :back ", Step::Back)]
    #[case(":forward", Step::Forward)]
    #[case(":go -2", Step::Go(-2))]
    fn test_parse_step(#[case] input: &str, #[case] expected: Step) {
        assert_eq!(input.parse::<Step>().unwrap(), expected);
    }

    #[rstest]
    #[case("users")]
    #[case(":jump")]
    #[case(":go far")]
    fn test_parse_step_rejects(#[case] input: &str) {
        assert!(input.parse::<Step>().is_err());
    }

    #[test]
    fn test_initial_frame() {
        let mut session = session("/about");
        let frames = session.drain();
        assert_eq!(hrefs(&frames), vec![(None, "/about")]);
        assert!(frames[0].html.contains("<h1>About</h1>"));
        assert!(session.drain().is_empty());
    }

    #[test]
    fn test_one_frame_per_navigation() {
        let mut session = session("/");
        session.drain();

        assert!(session.apply(&Step::Visit("/users".to_string())));
        assert!(session.apply(&Step::Visit("/users/1".to_string())));
        assert!(!session.apply(&Step::Visit("/users/1".to_string())));
        assert!(session.apply(&Step::Back));
        assert!(!session.apply(&Step::Go(5)));

        let frames = session.drain();
        assert_eq!(
            hrefs(&frames),
            vec![
                (Some(NavigationKind::Push), "/users"),
                (Some(NavigationKind::Push), "/users/1"),
                (Some(NavigationKind::Pop), "/users"),
            ]
        );
        assert!(frames[1].html.contains("Taro Tanaka"));
        assert_eq!(session.controller().location().pathname, "/users");
    }

    #[test]
    fn test_known_then_unknown_user() {
        let mut session = session("/users");
        session.drain();

        session.apply(&Step::Visit("/users/1".to_string()));
        session.apply(&Step::Visit("/users/99".to_string()));

        let frames = session.drain();
        assert!(frames[0].html.contains("<h1>Taro Tanaka</h1>"));
        assert!(frames[1].html.contains("User not found"));
        assert!(!session.controller().current_match().is_not_found());
    }

    #[test]
    fn test_frame_display_has_marker() {
        let mut session = session("/");
        session.apply(&Step::Visit("/about".to_string()));
        let frames = session.drain();
        let text = frames[1].to_string();
        assert!(text.starts_with("<!-- waymark: push /about -->\n<!DOCTYPE html>"));
    }

    #[test]
    fn test_parse_steps_fails_fast() {
        let raw = vec!["/about".to_string(), "oops".to_string()];
        assert!(parse_steps(&raw).is_err());
        assert_eq!(parse_steps(&raw[..1]).unwrap(), vec![Step::Visit("/about".to_string())]);
    }
}
