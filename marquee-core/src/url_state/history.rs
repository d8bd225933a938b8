use std::fmt;

use marquee_model::Locale;
use parking_lot::Mutex;

/// Address-bar location: a path plus a raw query string (no leading `?`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub query: String,
}

impl Location {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            path: path.into(),
            query: query.strip_prefix('?').unwrap_or(&query).to_string(),
        }
    }

    /// Split `/en/media?page=2#grid` into path and query; fragments are
    /// dropped.
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        match href.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(href, ""),
        }
    }

    pub fn locale(&self) -> Option<Locale> {
        Locale::from_path(&self.path)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Session history the URL state reads from and writes to.
pub trait HistoryBackend: Send + Sync + fmt::Debug {
    fn current(&self) -> Location;

    /// Rewrite the current entry without reloading.
    fn replace(&self, location: Location);

    /// Append a new entry and make it current.
    fn push(&self, location: Location);
}

#[derive(Debug)]
struct Entries {
    stack: Vec<Location>,
    cursor: usize,
    replace_count: usize,
}

/// In-process history stack with back/forward support.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: Mutex<Entries>,
}

impl MemoryHistory {
    pub fn new(initial: Location) -> Self {
        Self {
            entries: Mutex::new(Entries {
                stack: vec![initial],
                cursor: 0,
                replace_count: 0,
            }),
        }
    }

    pub fn from_href(href: &str) -> Self {
        Self::new(Location::parse(href))
    }

    /// Move one entry back; returns false at the start of the stack.
    pub fn back(&self) -> bool {
        let mut entries = self.entries.lock();
        if entries.cursor == 0 {
            return false;
        }
        entries.cursor -= 1;
        true
    }

    pub fn forward(&self) -> bool {
        let mut entries = self.entries.lock();
        if entries.cursor + 1 >= entries.stack.len() {
            return false;
        }
        entries.cursor += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.lock().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().stack.is_empty()
    }

    /// Number of in-place rewrites performed so far.
    pub fn replace_count(&self) -> usize {
        self.entries.lock().replace_count
    }
}

impl HistoryBackend for MemoryHistory {
    fn current(&self) -> Location {
        let entries = self.entries.lock();
        entries.stack[entries.cursor].clone()
    }

    fn replace(&self, location: Location) {
        let mut entries = self.entries.lock();
        let cursor = entries.cursor;
        entries.stack[cursor] = location;
        entries.replace_count += 1;
    }

    fn push(&self, location: Location) {
        let mut entries = self.entries.lock();
        let next = entries.cursor + 1;
        entries.stack.truncate(next);
        entries.stack.push(location);
        entries.cursor = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parse_splits_query_and_drops_fragment() {
        let location = Location::parse("/zh/media?page=2#grid");
        assert_eq!(location.path, "/zh/media");
        assert_eq!(location.query, "page=2");
        assert_eq!(location.locale(), Some(Locale::Zh));
        assert_eq!(location.to_string(), "/zh/media?page=2");
        assert_eq!(Location::parse("/en/media").to_string(), "/en/media");
    }

    #[test]
    fn push_truncates_forward_entries() {
        let history = MemoryHistory::from_href("/en/media");
        history.push(Location::parse("/en/media?page=2"));
        history.push(Location::parse("/en/media?page=3"));
        assert!(history.back());
        history.push(Location::parse("/en/media?page=9"));

        assert_eq!(history.len(), 3);
        assert!(!history.forward());
        assert_eq!(history.current().query, "page=9");
    }

    #[test]
    fn replace_rewrites_current_entry() {
        let history = MemoryHistory::from_href("/en/media");
        history.replace(Location::parse("/en/media?q=dune"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.replace_count(), 1);
        assert_eq!(history.current().query, "q=dune");
    }
}
