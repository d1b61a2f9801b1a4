//! Navigation controller
//!
//! Owns the current [`Location`], its [`MatchResult`] and the session
//! [`History`]. Every change funnels through one commit step,
//! which updates state first and only then notifies listeners, so a listener
//! always observes a consistent location and match.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::LinkError;
use crate::history::History;
use crate::link::Link;
use crate::location::Location;
use crate::matcher::MatchResult;
use crate::tree::RouteTree;

/// How the location changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKind {
    /// A new history entry was pushed
    Push,
    /// The current history entry was overwritten
    Replace,
    /// The history cursor moved (back / forward / go)
    Pop,
}

impl fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationKind::Push => f.write_str("push"),
            NavigationKind::Replace => f.write_str("replace"),
            NavigationKind::Pop => f.write_str("pop"),
        }
    }
}

/// What listeners receive after a location change
pub struct NavigationEvent<'a, V> {
    pub kind: NavigationKind,
    pub location: &'a Location,
    pub matched: &'a MatchResult,
    pub tree: &'a RouteTree<V>,
}

/// Handle returned by [`NavigationController::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener<V> = Box<dyn FnMut(&NavigationEvent<'_, V>)>;

/// Holds the single piece of mutable routing state
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::sync::Arc;
/// use waymark_router::{NavigationController, RouteTree};
///
/// let mut builder = RouteTree::<()>::builder(|_| ());
/// let root = builder.root();
/// builder.create_route(root, "/", |_| ());
/// builder.create_route(root, "/about", |_| ());
/// let tree = Arc::new(builder.build().unwrap());
///
/// let mut nav = NavigationController::new(tree, "/");
/// let seen = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&seen);
/// nav.subscribe(move |_| counter.set(counter.get() + 1));
///
/// assert!(nav.navigate("/about"));
/// assert!(!nav.navigate("/about/"));
/// assert_eq!(seen.get(), 1);
///
/// assert!(nav.back());
/// assert_eq!(nav.location().pathname, "/");
/// ```
pub struct NavigationController<V> {
    tree: Arc<RouteTree<V>>,
    history: History,
    current: MatchResult,
    listeners: Vec<(SubscriptionId, Listener<V>)>,
    next_id: u64,
}

impl<V> NavigationController<V> {
    pub fn new(tree: Arc<RouteTree<V>>, initial_href: &str) -> Self {
        let location = Location::parse(initial_href);
        let current = tree.match_path(&location.pathname);
        debug!("Initial location {}", location);

        Self {
            tree,
            history: History::new(location),
            current,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Navigates to `href`, pushing a history entry
    ///
    /// Returns `false` without notifying anyone when `href` is the current
    /// location.
    pub fn navigate(&mut self, href: &str) -> bool {
        let location = Location::parse(href);
        if location == *self.history.current() {
            debug!("Already at {}, skipping navigation", location);
            return false;
        }
        self.history.push(location);
        self.commit(NavigationKind::Push);
        true
    }

    /// Resolves `link` against the tree and navigates to it
    pub fn navigate_to(&mut self, link: &Link) -> Result<bool, LinkError> {
        let href = link.href(&*self.tree)?;
        Ok(self.navigate(&href))
    }

    /// Like [`navigate`](Self::navigate) but overwrites the current entry
    pub fn replace(&mut self, href: &str) -> bool {
        let location = Location::parse(href);
        if location == *self.history.current() {
            return false;
        }
        self.history.replace(location);
        self.commit(NavigationKind::Replace);
        true
    }

    pub fn back(&mut self) -> bool {
        self.go(-1)
    }

    pub fn forward(&mut self) -> bool {
        self.go(1)
    }

    /// Moves through history; `false` when `delta` leaves the recorded range
    pub fn go(&mut self, delta: isize) -> bool {
        if self.history.go(delta).is_none() {
            debug!("History move by {} is out of range", delta);
            return false;
        }
        self.commit(NavigationKind::Pop);
        true
    }

    pub fn current_match(&self) -> &MatchResult {
        &self.current
    }

    pub fn location(&self) -> &Location {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tree(&self) -> &Arc<RouteTree<V>> {
        &self.tree
    }

    /// Registers a listener called after every location change
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&NavigationEvent<'_, V>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener; `false` if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Re-matches the current history entry and notifies listeners
    fn commit(&mut self, kind: NavigationKind) {
        let location = self.history.current();
        self.current = self.tree.match_path(&location.pathname);

        match &self.current {
            MatchResult::Matched(_) => info!("Navigated ({}) to {}", kind, location),
            MatchResult::NotFound { .. } => info!("Navigated ({}) to {} (not found)", kind, location),
        }

        let event = NavigationEvent {
            kind,
            location,
            matched: &self.current,
            tree: &*self.tree,
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl<V> fmt::Debug for NavigationController<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("history", &self.history)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
