//! History modes and the navigation entry stack.
//!
//! # Responsibilities
//! - Normalize the base URL every route is served under
//! - Translate between browser URLs and router locations
//! - Keep a back/forward stack of visited locations
//!
//! # Design Decisions
//! - Base is normalized once: leading slash, no trailing slash, root is empty
//! - Pushing a new entry drops everything ahead of the cursor

use serde::{Deserialize, Serialize};

/// How router locations map onto browser URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// HTML5 history, locations live in the URL path.
    #[default]
    Web,
    /// Locations live in the URL fragment after `#`.
    Hash,
    /// No browser URL at all (server side, tests).
    Memory,
}

/// A history kind together with its normalized base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryMode {
    kind: HistoryKind,
    base: String,
}

impl HistoryMode {
    pub fn new(kind: HistoryKind, base: &str) -> Self {
        Self {
            kind,
            base: normalize_base(base),
        }
    }

    pub fn web(base: &str) -> Self {
        Self::new(HistoryKind::Web, base)
    }

    pub fn hash(base: &str) -> Self {
        Self::new(HistoryKind::Hash, base)
    }

    pub fn memory() -> Self {
        Self::new(HistoryKind::Memory, "")
    }

    pub fn kind(&self) -> HistoryKind {
        self.kind
    }

    /// Normalized base; empty when the app is served from the root.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Turn a browser URL (path, query, fragment) into a router location.
    ///
    /// Returns `None` when the URL lies outside the base.
    pub fn strip_base(&self, url: &str) -> Option<String> {
        let (path_part, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (url, None),
        };

        let rest = strip_prefix_segment(path_part, &self.base)?;

        match self.kind {
            HistoryKind::Hash => {
                // the document lives at the base itself, locations only in the fragment
                let document = rest.split('?').next().unwrap_or("");
                if !(document.is_empty() || document == "/") {
                    return None;
                }
                Some(ensure_leading_slash(fragment.unwrap_or("")))
            }
            HistoryKind::Web | HistoryKind::Memory => {
                let mut location = ensure_leading_slash(rest);
                if let Some(fragment) = fragment {
                    location.push('#');
                    location.push_str(fragment);
                }
                Some(location)
            }
        }
    }

    /// Format a router location as a browser URL.
    pub fn href(&self, location: &str) -> String {
        let location = ensure_leading_slash(location);
        match self.kind {
            HistoryKind::Hash => format!("{}/#{}", self.base, location),
            HistoryKind::Web | HistoryKind::Memory => format!("{}{}", self.base, location),
        }
    }
}

impl Default for HistoryMode {
    fn default() -> Self {
        Self::web("/")
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn ensure_leading_slash(location: &str) -> String {
    if location.starts_with('/') {
        location.to_string()
    } else {
        format!("/{location}")
    }
}

/// Strip `prefix` when it is followed by a segment boundary.
fn strip_prefix_segment<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;
    match rest.chars().next() {
        None | Some('/') | Some('?') => Some(rest),
        Some(_) => None,
    }
}

/// Stack of visited locations with a cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    position: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location at the cursor, if anything was visited.
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn push(&mut self, location: impl Into<String>) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.position + 1);
        }
        self.entries.push(location.into());
        self.position = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: impl Into<String>) {
        match self.entries.get_mut(self.position) {
            Some(entry) => *entry = location.into(),
            None => self.push(location),
        }
    }

    /// Location `delta` entries away from the cursor, without moving.
    pub fn peek(&self, delta: isize) -> Option<&str> {
        let target = self.position.checked_add_signed(delta)?;
        self.entries.get(target).map(String::as_str)
    }

    /// Move the cursor by `delta`. Out-of-range moves are ignored.
    pub fn go(&mut self, delta: isize) -> Option<&str> {
        let target = self.position.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }
        self.position = target;
        self.current()
    }

    pub fn back(&mut self) -> Option<&str> {
        self.go(-1)
    }

    pub fn forward(&mut self) -> Option<&str> {
        self.go(1)
    }
}
