//! In-memory navigation history
//!
//! Stack of visited paths with a cursor, mirroring what a browser keeps per
//! tab:
//! - pushing truncates forward entries
//! - back/forward move the cursor without changing entries
//! - an optional size limit drops the oldest entries

/// Navigation direction indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// A new entry was pushed, or the cursor moved forward
    Forward,
    /// The cursor moved back
    Back,
}

/// Cursor movement produced by a history operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    /// Path before the operation
    pub from: String,
    /// Path after the operation
    pub to: String,
    /// Which way the cursor moved
    pub direction: NavigationDirection,
}

/// Navigation history stack
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    current: usize,
    /// Maximum number of entries (0 = unlimited)
    max_size: usize,
}

impl History {
    /// Default entry limit
    pub const DEFAULT_MAX_SIZE: usize = 1000;

    /// Create a new history with initial path
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self::with_max_size(initial_path, Self::DEFAULT_MAX_SIZE)
    }

    /// Create with custom max size
    pub fn with_max_size(initial_path: impl Into<String>, max_size: usize) -> Self {
        Self {
            entries: vec![initial_path.into()],
            current: 0,
            max_size,
        }
    }

    /// Get current path
    pub fn current_path(&self) -> &str {
        &self.entries[self.current]
    }

    /// Push a new path onto history
    ///
    /// This truncates any forward history and adds the new entry
    pub fn push(&mut self, path: impl Into<String>) -> HistoryEvent {
        let from = self.current_path().to_string();
        let to = path.into();

        self.entries.truncate(self.current + 1);
        self.entries.push(to.clone());
        self.current += 1;

        self.enforce_size_limit();

        HistoryEvent {
            from,
            to,
            direction: NavigationDirection::Forward,
        }
    }

    /// Go back in history
    pub fn back(&mut self) -> Option<HistoryEvent> {
        if !self.can_go_back() {
            return None;
        }
        let from = self.current_path().to_string();
        self.current -= 1;
        Some(HistoryEvent {
            from,
            to: self.current_path().to_string(),
            direction: NavigationDirection::Back,
        })
    }

    /// Go forward in history
    pub fn forward(&mut self) -> Option<HistoryEvent> {
        if !self.can_go_forward() {
            return None;
        }
        let from = self.current_path().to_string();
        self.current += 1;
        Some(HistoryEvent {
            from,
            to: self.current_path().to_string(),
            direction: NavigationDirection::Forward,
        })
    }

    /// Check if can go back
    pub fn can_go_back(&self) -> bool {
        self.current > 0
    }

    /// Check if can go forward
    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    /// Get history length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its initial entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Get current index
    pub fn current_index(&self) -> usize {
        self.current
    }

    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_creation() {
        let history = History::new("/");
        assert_eq!(history.current_path(), "/");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_back_forward() {
        let mut history = History::new("/");
        history.push("/page1");
        history.push("/page2");

        assert_eq!(history.current_path(), "/page2");

        history.back();
        assert_eq!(history.current_path(), "/page1");
        assert!(history.can_go_back());
        assert!(history.can_go_forward());

        history.forward();
        assert_eq!(history.current_path(), "/page2");
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_truncation_on_push() {
        let mut history = History::new("/");
        history.push("/page1");
        history.push("/page2");
        history.back();

        history.push("/page3");
        assert_eq!(history.entries(), ["/", "/page1", "/page3"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_max_size() {
        let mut history = History::with_max_size("/", 3);

        history.push("/page1");
        history.push("/page2");
        history.push("/page3");
        history.push("/page4");

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_path(), "/page4");
        assert_eq!(history.current_index(), 2);

        history.back();
        history.back();
        assert_eq!(history.current_path(), "/page2");
        assert!(history.back().is_none());
    }

    #[test]
    fn test_history_events() {
        let mut history = History::new("/");

        let event = history.push("/users");
        assert_eq!(event.from, "/");
        assert_eq!(event.to, "/users");
        assert_eq!(event.direction, NavigationDirection::Forward);

        let event = history.back().unwrap();
        assert_eq!(event.from, "/users");
        assert_eq!(event.to, "/");
        assert_eq!(event.direction, NavigationDirection::Back);

        assert!(history.back().is_none());
        assert!(history.forward().is_some());
        assert!(history.forward().is_none());
    }
}
