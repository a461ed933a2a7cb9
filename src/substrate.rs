//! Navigation substrate
//!
//! The router never touches browser APIs directly. Everything it needs from
//! its environment goes through [`NavigationSubstrate`]:
//!
//! - read the current path
//! - push a path onto history without reloading
//! - hear about back/forward navigation
//! - hear about link clicks and say whether to cancel them
//!
//! [`MemorySubstrate`] implements it over an in-memory [`History`] so routers
//! can be driven without a browser.

use crate::history::{History, HistoryEvent};
use crate::trace_log;
use std::cell::RefCell;
use std::rc::Rc;

/// Called after a back/forward navigation changed the current path
pub type BackForwardListener = Box<dyn Fn()>;

/// Called with the `href` of a clicked link (or `None` if the click hit no
/// anchor with an `href`); returns `true` to cancel the browser's default
/// navigation
pub type LinkClickListener = Box<dyn Fn(Option<&str>) -> bool>;

/// Capabilities the router needs from its environment
pub trait NavigationSubstrate {
    /// Path of the current location
    fn current_path(&self) -> String;

    /// Add a history entry for `path` without reloading
    fn push_path(&self, path: &str);

    /// Register a listener for back/forward navigation
    ///
    /// Listeners are never removed.
    fn subscribe_back_forward(&self, listener: BackForwardListener);

    /// Register a listener for link activation
    ///
    /// Listeners are never removed.
    fn intercept_link_clicks(&self, listener: LinkClickListener);
}

// ============================================================================
// MemorySubstrate
// ============================================================================

/// In-memory substrate for tests, demos and non-browser hosts
///
/// # Example
///
/// ```
/// use spa_navigator::{MemorySubstrate, NavigationSubstrate};
///
/// let substrate = MemorySubstrate::new("/");
/// substrate.push_path("/about");
/// assert_eq!(substrate.current_path(), "/about");
///
/// assert!(substrate.back());
/// assert_eq!(substrate.current_path(), "/");
/// ```
pub struct MemorySubstrate {
    history: RefCell<History>,
    back_forward: RefCell<Vec<Rc<dyn Fn()>>>,
    link_clicks: RefCell<Vec<Rc<dyn Fn(Option<&str>) -> bool>>>,
}

impl MemorySubstrate {
    /// Create a substrate whose location starts at `initial_path`
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self::from_history(History::new(initial_path))
    }

    /// Create with a cap on retained history entries (0 = unlimited)
    pub fn with_history_limit(initial_path: impl Into<String>, max_entries: usize) -> Self {
        Self::from_history(History::with_max_size(initial_path, max_entries))
    }

    fn from_history(history: History) -> Self {
        Self {
            history: RefCell::new(history),
            back_forward: RefCell::new(Vec::new()),
            link_clicks: RefCell::new(Vec::new()),
        }
    }

    /// Simulate the browser's back button
    ///
    /// Returns `false` (and notifies nobody) when there is nothing to go back to.
    pub fn back(&self) -> bool {
        let event = self.history.borrow_mut().back();
        self.notify_back_forward(event)
    }

    /// Simulate the browser's forward button
    pub fn forward(&self) -> bool {
        let event = self.history.borrow_mut().forward();
        self.notify_back_forward(event)
    }

    /// Simulate a click on a link with the given `href`
    ///
    /// Returns `true` if a listener cancelled the default navigation.
    pub fn click(&self, href: Option<&str>) -> bool {
        let listeners = self.link_clicks.borrow().clone();
        let mut prevented = false;
        for listener in listeners {
            prevented |= listener(href);
        }
        trace_log!("Link click {:?} (default prevented: {})", href, prevented);
        prevented
    }

    /// Visited paths, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.history.borrow().entries().to_vec()
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.history.borrow().len()
    }

    /// Number of back/forward subscriptions
    pub fn back_forward_listeners(&self) -> usize {
        self.back_forward.borrow().len()
    }

    /// Number of link click subscriptions
    pub fn link_click_listeners(&self) -> usize {
        self.link_clicks.borrow().len()
    }

    fn notify_back_forward(&self, event: Option<HistoryEvent>) -> bool {
        let Some(event) = event else {
            return false;
        };
        trace_log!(
            "History {:?}: '{}' -> '{}'",
            event.direction,
            event.from,
            event.to
        );
        // Listeners read the location back, so no borrow may be held here.
        let listeners = self.back_forward.borrow().clone();
        for listener in listeners {
            listener();
        }
        true
    }
}

impl NavigationSubstrate for MemorySubstrate {
    fn current_path(&self) -> String {
        self.history.borrow().current_path().to_string()
    }

    fn push_path(&self, path: &str) {
        self.history.borrow_mut().push(path);
    }

    fn subscribe_back_forward(&self, listener: BackForwardListener) {
        self.back_forward.borrow_mut().push(Rc::from(listener));
    }

    fn intercept_link_clicks(&self, listener: LinkClickListener) {
        self.link_clicks.borrow_mut().push(Rc::from(listener));
    }
}

impl Default for MemorySubstrate {
    fn default() -> Self {
        Self::new("/")
    }
}

impl std::fmt::Debug for MemorySubstrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySubstrate")
            .field("history", &self.history.borrow())
            .field("back_forward", &self.back_forward_listeners())
            .field("link_clicks", &self.link_click_listeners())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_push_and_read() {
        let substrate = MemorySubstrate::new("/start");
        assert_eq!(substrate.current_path(), "/start");

        substrate.push_path("/next");
        assert_eq!(substrate.current_path(), "/next");
        assert_eq!(substrate.entries(), vec!["/start", "/next"]);
    }

    #[test]
    fn test_back_forward_notifies_listeners() {
        let substrate = Rc::new(MemorySubstrate::new("/"));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let reader = substrate.clone();
        let log = seen.clone();
        substrate.subscribe_back_forward(Box::new(move || {
            log.borrow_mut().push(reader.current_path());
        }));

        substrate.push_path("/a");
        assert!(substrate.back());
        assert!(substrate.forward());
        assert!(!substrate.forward());

        assert_eq!(*seen.borrow(), vec!["/", "/a"]);
    }

    #[test]
    fn test_back_at_start_is_noop() {
        let substrate = MemorySubstrate::new("/");
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        substrate.subscribe_back_forward(Box::new(move || counter.set(counter.get() + 1)));

        assert!(!substrate.back());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_click_without_listeners_is_not_prevented() {
        let substrate = MemorySubstrate::default();
        assert!(!substrate.click(Some("/about")));
    }

    #[test]
    fn test_click_listener_decides() {
        let substrate = MemorySubstrate::default();
        substrate.intercept_link_clicks(Box::new(|href: Option<&str>| href == Some("/in-app")));

        assert!(substrate.click(Some("/in-app")));
        assert!(!substrate.click(Some("/elsewhere")));
        assert!(!substrate.click(None));
        assert_eq!(substrate.link_click_listeners(), 1);
    }

    #[test]
    fn test_history_limit() {
        let substrate = MemorySubstrate::with_history_limit("/", 2);
        substrate.push_path("/a");
        substrate.push_path("/b");

        assert_eq!(substrate.history_len(), 2);
        assert_eq!(substrate.entries(), vec!["/a", "/b"]);
    }
}
