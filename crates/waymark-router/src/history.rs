use crate::location::Location;

/// Session history: an ordered stack of locations with a cursor
///
/// Pushing truncates any forward entries, like a browser does after going back.
///
/// ```
/// use waymark_router::{History, Location};
///
/// let mut history = History::new(Location::parse("/"));
/// history.push(Location::parse("/users"));
/// history.push(Location::parse("/users/1"));
///
/// assert_eq!(history.back().map(|l| l.pathname.as_str()), Some("/users"));
/// history.push(Location::parse("/about"));
/// assert!(!history.can_go_forward());
/// assert_eq!(history.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// History always holds the initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    /// Moves the cursor by `delta`; `None` (and no move) when out of range
    pub fn go(&mut self, delta: isize) -> Option<&Location> {
        let target = self.index.checked_add_signed(delta)?;
        if target >= self.entries.len() || delta == 0 {
            return None;
        }
        self.index = target;
        Some(self.current())
    }

    pub fn back(&mut self) -> Option<&Location> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<&Location> {
        self.go(1)
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(paths: &[&str]) -> History {
        let mut history = History::new(Location::parse(paths[0]));
        for path in &paths[1..] {
            history.push(Location::parse(path));
        }
        history
    }

    #[test]
    fn test_back_and_forward() {
        let mut h = history(&["/", "/a", "/b"]);
        assert_eq!(h.back().unwrap().pathname, "/a");
        assert_eq!(h.back().unwrap().pathname, "/");
        assert!(h.back().is_none());
        assert_eq!(h.index(), 0);
        assert_eq!(h.forward().unwrap().pathname, "/a");
    }

    #[test]
    fn test_go_out_of_range_does_not_move() {
        let mut h = history(&["/", "/a"]);
        assert!(h.go(5).is_none());
        assert!(h.go(-5).is_none());
        assert!(h.go(0).is_none());
        assert_eq!(h.current().pathname, "/a");
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut h = history(&["/", "/a"]);
        h.replace(Location::parse("/b"));
        assert_eq!(h.len(), 2);
        assert_eq!(h.current().pathname, "/b");
    }
}
