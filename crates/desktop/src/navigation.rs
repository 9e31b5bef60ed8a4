//! In-app navigation history.

use stockdesk_auth::{NavigationMode, Redirect};

/// Drop query string, fragment and trailing slashes (keeping the root).
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Linear history of visited paths with a cursor, like a browser tab.
///
/// Pushing after going back discards the forward entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries[..=self.cursor]
    }

    pub fn len(&self) -> usize {
        self.cursor + 1
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.into());
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry in place.
    pub fn replace(&mut self, path: impl Into<String>) {
        self.entries[self.cursor] = path.into();
    }

    /// Step back one entry. Returns `false` when already at the first entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn apply(&mut self, redirect: &Redirect) {
        match redirect.mode {
            NavigationMode::Push => self.push(redirect.target.to_string()),
            NavigationMode::Replace => self.replace(redirect.target.to_string()),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries().iter().any(|entry| entry == path)
    }
}
