//! Fragment-based navigation.
//!
//! Locations look like `#/` (landing) and `#/section/<id>`. The navigator
//! keeps a browser-style history so back/forward and bookmarks work.

use std::fmt;

/// Path used when the fragment is empty or unrecognised.
pub const DEFAULT_PATH: &str = "/";

const SECTION_PREFIX: &str = "/section/";

/// A recognised location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The grid of sections.
    Landing,
    /// One open section.
    Section(String),
}

impl Route {
    /// Match a normalized path against the known routes.
    pub fn parse(path: &str) -> Option<Route> {
        let path = normalize_path(path);
        if path == DEFAULT_PATH {
            return Some(Route::Landing);
        }
        let id = path.strip_prefix(SECTION_PREFIX)?;
        if id.is_empty() || id.contains('/') {
            return None;
        }
        Some(Route::Section(id.to_string()))
    }

    /// Parse a fragment such as `#/section/x`.
    pub fn from_hash(hash: &str) -> Option<Route> {
        Route::parse(&path_from_hash(hash))
    }

    pub fn path(&self) -> String {
        match self {
            Route::Landing => DEFAULT_PATH.to_string(),
            Route::Section(id) => format!("{SECTION_PREFIX}{id}"),
        }
    }

    pub fn to_hash(&self) -> String {
        format!("#{}", self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hash())
    }
}

/// Trim, default, ensure a leading slash, and drop trailing slashes.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return DEFAULT_PATH.to_string();
    }
    let mut p = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    if p.len() > 1 {
        let kept = p.trim_end_matches('/').len();
        p.truncate(kept);
        if p.is_empty() {
            p.push('/');
        }
    }
    p
}

/// Extract the path part of a fragment.
pub fn path_from_hash(hash: &str) -> String {
    let h = hash.trim();
    if h.is_empty() || h == "#" {
        return DEFAULT_PATH.to_string();
    }
    h.strip_prefix('#').unwrap_or(h).to_string()
}

/// Browser-style history over normalized paths.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<String>,
    cursor: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::start("")
    }
}

impl Navigator {
    /// Start at `hash`. An unrecognised location is replaced by the default
    /// path without adding a history entry.
    pub fn start(hash: &str) -> Self {
        let mut nav = Self {
            entries: vec![normalize_path(&path_from_hash(hash))],
            cursor: 0,
        };
        nav.settle();
        nav
    }

    /// The route for the current entry.
    pub fn current(&self) -> Route {
        Route::parse(&self.entries[self.cursor]).unwrap_or(Route::Landing)
    }

    pub fn current_path(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Push a new entry, discarding forward history. Navigating to the
    /// current path is a no-op.
    pub fn navigate(&mut self, path: &str) -> Route {
        let normalized = normalize_path(path);
        if normalized != self.entries[self.cursor] {
            self.entries.truncate(self.cursor + 1);
            self.entries.push(normalized);
            self.cursor += 1;
        }
        self.settle();
        self.current()
    }

    /// Overwrite the current entry.
    pub fn replace(&mut self, path: &str) -> Route {
        self.entries[self.cursor] = normalize_path(path);
        self.settle();
        self.current()
    }

    /// Step back, if possible.
    pub fn back(&mut self) -> Option<Route> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Step forward, if possible.
    pub fn forward(&mut self) -> Option<Route> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Replace an unmatched current entry with the default path.
    fn settle(&mut self) {
        if Route::parse(&self.entries[self.cursor]).is_none() {
            tracing::debug!(
                path = %self.entries[self.cursor],
                "no route matched, replacing with default"
            );
            self.entries[self.cursor] = DEFAULT_PATH.to_string();
        }
    }
}
