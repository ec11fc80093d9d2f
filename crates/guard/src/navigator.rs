//! Router contract consumed by the guard, plus an in-memory history.

/// Router contract.
///
/// `replace` must swap the current history entry rather than push a new one,
/// so a denied path never stays reachable through back-navigation.
pub trait Navigator {
    fn current_path(&self) -> String;

    fn replace(&mut self, path: &str);
}

/// In-memory browser-style history (push / replace / back).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRouter {
    entries: Vec<String>,
    index: usize,
}

impl MemoryRouter {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
        }
    }

    /// Client-side navigation: drops any forward entries.
    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(path.into());
        self.index = self.entries.len() - 1;
    }

    /// Returns `false` when already at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn history(&self) -> &[String] {
        &self.entries
    }
}

impl Navigator for MemoryRouter {
    fn current_path(&self) -> String {
        self.entries[self.index].clone()
    }

    fn replace(&mut self, path: &str) {
        self.entries[self.index] = path.to_string();
    }
}
