//! Router: route registration and dispatch
//!
//! A [`Router`] is a cheap, clonable handle to one routing instance. Clones
//! share the same table and state.
//!
//! Every path change goes through [`Router::resolve`]:
//!
//! 1. loading starts (`is_loading = true`, loading handler gets `true`)
//! 2. the table is scanned in registration order, first match wins
//! 3. the matched callback, or the not-found handler, is deferred to the
//!    scheduler; nothing user-supplied runs inside `resolve`
//! 4. loading ends once the deferred task is done
//!
//! Loading end is tied to a drop guard owned by the deferred task, so it
//! fires when the callback returns, when it panics, and when the scheduler
//! discards the task unrun.
//!
//! Dispatches are never cancelled. Navigating again before an earlier
//! callback ran still runs both callbacks, in order, and the first loading
//! end clears `is_loading` while the later dispatch is still pending.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, RouteCache};
use crate::config::RouterConfig;
use crate::error::{DispatchOutcome, RouteError};
use crate::link::{classify_link, LinkAction};
use crate::nested::build_child_path;
use crate::params::RouteParams;
use crate::scheduler::Scheduler;
use crate::substrate::NavigationSubstrate;
use crate::table::{RouteCallback, RouteId, RouteInfo, RouteMatch, RouteOptions, RouteTable};
use crate::{debug_log, trace_log, warn_log};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handler for paths no route matches
pub type NotFoundHandler = Rc<dyn Fn()>;

/// Handler told when a dispatch starts (`true`) and ends (`false`)
pub type LoadingHandler = Rc<dyn Fn(bool)>;

// ============================================================================
// RouterState
// ============================================================================

/// Mutable per-router state
#[derive(Default)]
struct RouterState {
    current_path: String,
    not_found_handler: Option<NotFoundHandler>,
    loading_handler: Option<LoadingHandler>,
    is_loading: bool,
}

struct RouterInner {
    table: RefCell<RouteTable>,
    state: RefCell<RouterState>,
    #[cfg(feature = "cache")]
    cache: RefCell<RouteCache>,
    substrate: Rc<dyn NavigationSubstrate>,
    scheduler: Rc<dyn Scheduler>,
    config: RouterConfig,
}

// ============================================================================
// Router
// ============================================================================

/// Client-side router
///
/// # Example
///
/// ```
/// use spa_navigator::{MemorySubstrate, Router, TaskQueue};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let substrate = Rc::new(MemorySubstrate::new("/"));
/// let queue = Rc::new(TaskQueue::new());
/// let router = Router::new(substrate, queue.clone());
///
/// let seen = Rc::new(RefCell::new(None));
/// let sink = seen.clone();
/// router
///     .register("/profile/{id}", move |params| {
///         *sink.borrow_mut() = params.get("id").map(str::to_string);
///     })
///     .unwrap();
///
/// router.navigate("/profile/42");
/// assert_eq!(router.current_path(), "/profile/42");
/// assert_eq!(*seen.borrow(), None); // not run yet
///
/// queue.run_until_idle();
/// assert_eq!(seen.borrow().as_deref(), Some("42"));
/// ```
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    /// Create a router with the default configuration
    pub fn new(substrate: Rc<dyn NavigationSubstrate>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_config(substrate, scheduler, RouterConfig::default())
    }

    /// Create a router
    ///
    /// Reads the initial path from `substrate` and subscribes to its
    /// back/forward and link click notifications. Those subscriptions live as
    /// long as the substrate; they only hold a weak reference to the router.
    pub fn with_config(
        substrate: Rc<dyn NavigationSubstrate>,
        scheduler: Rc<dyn Scheduler>,
        config: RouterConfig,
    ) -> Self {
        let state = RouterState {
            current_path: substrate.current_path(),
            ..RouterState::default()
        };
        debug_log!("Router created at '{}'", state.current_path);

        let inner = Rc::new(RouterInner {
            table: RefCell::new(RouteTable::new()),
            state: RefCell::new(state),
            #[cfg(feature = "cache")]
            cache: RefCell::new(RouteCache::with_capacity(config.cache_size())),
            substrate,
            scheduler,
            config,
        });

        let weak = Rc::downgrade(&inner);
        inner.substrate.subscribe_back_forward(Box::new(move || {
            if let Some(router) = Router::upgrade(&weak) {
                router.handle_back_forward();
            }
        }));

        let weak = Rc::downgrade(&inner);
        inner
            .substrate
            .intercept_link_clicks(Box::new(move |href: Option<&str>| {
                Router::upgrade(&weak).is_some_and(|router| router.handle_link_click(href))
            }));

        Self { inner }
    }

    fn upgrade(weak: &Weak<RouterInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register a route
    ///
    /// `{name}` segments in `path` capture one path segment each and are
    /// passed to `callback` by name. Routes are tried in registration order.
    ///
    /// Registering re-dispatches the current path (see
    /// [`RouterConfig::dispatch_on_register`]).
    pub fn register<F>(&self, path: &str, callback: F) -> Result<RouteHandle, RouteError>
    where
        F: Fn(&RouteParams) + 'static,
    {
        self.register_with_options(path, callback, RouteOptions::default())
    }

    /// Register a route with options
    pub fn register_with_options<F>(
        &self,
        path: &str,
        callback: F,
        options: RouteOptions,
    ) -> Result<RouteHandle, RouteError>
    where
        F: Fn(&RouteParams) + 'static,
    {
        let id = self.register_entry(path, Rc::new(callback), options, None)?;
        Ok(RouteHandle {
            router: self.clone(),
            id,
        })
    }

    fn register_entry(
        &self,
        path: &str,
        callback: RouteCallback,
        options: RouteOptions,
        parent: Option<RouteId>,
    ) -> Result<RouteId, RouteError> {
        let id = {
            let mut table = self.inner.table.borrow_mut();
            let id = table.register(path, callback, options)?;
            if let Some(parent) = parent {
                table.link_child(parent, id);
            }
            id
        };

        #[cfg(feature = "cache")]
        self.inner.cache.borrow_mut().clear();

        if self.inner.config.dispatches_on_register() {
            let current = self.current_path();
            self.resolve(&current);
        }
        Ok(id)
    }

    /// Set the handler for paths no route matches
    pub fn on_not_found<F>(&self, handler: F) -> &Self
    where
        F: Fn() + 'static,
    {
        self.inner.state.borrow_mut().not_found_handler = Some(Rc::new(handler));
        self
    }

    /// Set the handler told about loading transitions
    pub fn on_loading<F>(&self, handler: F) -> &Self
    where
        F: Fn(bool) + 'static,
    {
        self.inner.state.borrow_mut().loading_handler = Some(Rc::new(handler));
        self
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Navigate to `path`
    ///
    /// Pushes a history entry (no reload), makes `path` current and
    /// dispatches it. The current path is updated before this returns; the
    /// route callback runs later.
    pub fn navigate(&self, path: impl Into<String>) -> &Self {
        let path = path.into();
        debug_log!("Navigating to '{}'", path);
        self.inner.substrate.push_path(&path);
        self.set_current_path(path.clone());
        self.resolve(&path);
        self
    }

    /// Dispatch the current path
    ///
    /// Call once after registering routes.
    pub fn start(&self) -> &Self {
        let current = self.current_path();
        debug_log!("Router started at '{}'", current);
        self.resolve(&current);
        self
    }

    /// Dispatch `path` against the route table
    ///
    /// Does not touch history or the current path. Returns what was
    /// scheduled.
    pub fn resolve(&self, path: &str) -> DispatchOutcome {
        trace_log!("Resolving '{}'", path);
        self.begin_loading();
        let guard = LoadingGuard {
            router: Rc::downgrade(&self.inner),
        };

        let matched = self.match_path(path).and_then(|route_match| {
            let callback = self
                .inner
                .table
                .borrow()
                .get(route_match.route)?
                .callback()
                .clone();
            Some((route_match, callback))
        });

        if let Some((RouteMatch { route, params }, callback)) = matched {
            debug_log!("'{}' -> route #{} {:?}", path, route.index(), params);
            let task_params = params.clone();
            self.inner.scheduler.defer(Box::new(move || {
                let _guard = guard;
                callback(&task_params);
            }));
            return DispatchOutcome::Matched { route, params };
        }

        let not_found = self.inner.state.borrow().not_found_handler.clone();
        match not_found {
            Some(handler) => {
                debug_log!("'{}' -> not found handler", path);
                self.inner.scheduler.defer(Box::new(move || {
                    let _guard = guard;
                    handler();
                }));
                DispatchOutcome::NotFound {
                    path: path.to_string(),
                }
            }
            None => {
                warn_log!("No route matches '{}' and no not-found handler is set", path);
                drop(guard);
                DispatchOutcome::Unhandled {
                    path: path.to_string(),
                }
            }
        }
    }

    fn handle_back_forward(&self) {
        let path = self.inner.substrate.current_path();
        debug_log!("Back/forward to '{}'", path);
        self.set_current_path(path.clone());
        self.resolve(&path);
    }

    /// Returns `true` if the click was taken over and the default should be
    /// cancelled
    fn handle_link_click(&self, href: Option<&str>) -> bool {
        match classify_link(href) {
            LinkAction::Navigate(path) => {
                self.navigate(path);
                true
            }
            LinkAction::Ignore => {
                trace_log!("Leaving link {:?} to the browser", href);
                false
            }
        }
    }

    fn set_current_path(&self, path: String) {
        self.inner.state.borrow_mut().current_path = path;
    }

    fn begin_loading(&self) {
        let handler = {
            let mut state = self.inner.state.borrow_mut();
            state.is_loading = true;
            state.loading_handler.clone()
        };
        if let Some(handler) = handler {
            handler(true);
        }
    }

    fn end_loading(&self) {
        let handler = {
            let mut state = self.inner.state.borrow_mut();
            state.is_loading = false;
            state.loading_handler.clone()
        };
        if let Some(handler) = handler {
            handler(false);
        }
    }

    // ------------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------------

    /// Current path
    pub fn current_path(&self) -> String {
        self.inner.state.borrow().current_path.clone()
    }

    /// Whether a dispatch is in flight
    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    /// Look up which route `path` would dispatch to, without dispatching
    #[cfg(feature = "cache")]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        if let Some(cached) = self.inner.cache.borrow_mut().get(path) {
            return cached;
        }
        let found = self.inner.table.borrow().find(path);
        self.inner
            .cache
            .borrow_mut()
            .insert(path.to_string(), found.clone());
        found
    }

    /// Look up which route `path` would dispatch to, without dispatching
    #[cfg(not(feature = "cache"))]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.inner.table.borrow().find(path)
    }

    /// Snapshot of a registered route
    pub fn route(&self, id: RouteId) -> Option<RouteInfo> {
        self.inner.table.borrow().get(id).map(|entry| entry.info())
    }

    /// Snapshot of all routes in registration order
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.inner
            .table
            .borrow()
            .entries()
            .iter()
            .map(|entry| entry.info())
            .collect()
    }

    /// Number of registered routes
    pub fn route_count(&self) -> usize {
        self.inner.table.borrow().len()
    }

    /// Route resolution cache statistics
    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.borrow().stats().clone()
    }

    /// Configuration the router was built with
    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Router")
            .field("current_path", &state.current_path)
            .field("is_loading", &state.is_loading)
            .field("routes", &self.route_count())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Signals loading end when dropped
struct LoadingGuard {
    router: Weak<RouterInner>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        if let Some(router) = Router::upgrade(&self.router) {
            router.end_loading();
        }
    }
}

// ============================================================================
// RouteHandle
// ============================================================================

/// Handle to a just-registered route, used to declare children
///
/// # Example
///
/// ```
/// use spa_navigator::{MemorySubstrate, Router, TaskQueue};
/// use std::rc::Rc;
///
/// let router = Router::new(
///     Rc::new(MemorySubstrate::new("/")),
///     Rc::new(TaskQueue::new()),
/// );
///
/// router
///     .register("/admin", |_| {})
///     .unwrap()
///     .child("/users", |_| {})
///     .unwrap()
///     .child("settings", |_| {})
///     .unwrap();
///
/// let paths: Vec<String> = router.routes().into_iter().map(|r| r.path).collect();
/// assert_eq!(paths, ["/admin", "/admin/users", "/admin/settings"]);
/// ```
#[derive(Clone)]
pub struct RouteHandle {
    router: Router,
    id: RouteId,
}

impl RouteHandle {
    /// Id of the route this handle refers to
    pub fn id(&self) -> RouteId {
        self.id
    }

    /// Full path template of the route
    pub fn path(&self) -> String {
        self.router
            .inner
            .table
            .borrow()
            .get(self.id)
            .map(|entry| entry.path().to_string())
            .unwrap_or_default()
    }

    /// Router the route belongs to
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Register a child route and return this (parent) handle
    ///
    /// The child is an ordinary route whose path is prefixed with this
    /// route's path (see [`build_child_path`]).
    pub fn child<F>(self, path: &str, callback: F) -> Result<Self, RouteError>
    where
        F: Fn(&RouteParams) + 'static,
    {
        self.child_with_options(path, callback, RouteOptions::default())
    }

    /// Register a child route with options and return this (parent) handle
    pub fn child_with_options<F>(
        self,
        path: &str,
        callback: F,
        options: RouteOptions,
    ) -> Result<Self, RouteError>
    where
        F: Fn(&RouteParams) + 'static,
    {
        self.nest_with_options(path, callback, options)?;
        Ok(self)
    }

    /// Register a child route and return the child's handle
    pub fn nest<F>(&self, path: &str, callback: F) -> Result<RouteHandle, RouteError>
    where
        F: Fn(&RouteParams) + 'static,
    {
        self.nest_with_options(path, callback, RouteOptions::default())
    }

    /// Register a child route with options and return the child's handle
    pub fn nest_with_options<F>(
        &self,
        path: &str,
        callback: F,
        options: RouteOptions,
    ) -> Result<RouteHandle, RouteError>
    where
        F: Fn(&RouteParams) + 'static,
    {
        let parent_path = self.path();
        let full_path = build_child_path(&parent_path, path);
        let id = self.router.register_entry(
            &full_path,
            Rc::new(callback),
            options,
            Some(self.id),
        )?;
        Ok(RouteHandle {
            router: self.router.clone(),
            id,
        })
    }
}

impl fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandle")
            .field("id", &self.id)
            .field("path", &self.path())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TaskQueue;
    use crate::substrate::MemorySubstrate;
    use std::cell::Cell;

    fn setup(initial: &str) -> (Router, Rc<MemorySubstrate>, Rc<TaskQueue>) {
        let substrate = Rc::new(MemorySubstrate::new(initial));
        let queue = Rc::new(TaskQueue::new());
        let router = Router::new(substrate.clone(), queue.clone());
        (router, substrate, queue)
    }

    #[test]
    fn test_initial_path_from_substrate() {
        let (router, substrate, _) = setup("/start");
        assert_eq!(router.current_path(), "/start");
        assert!(!router.is_loading());
        assert_eq!(substrate.back_forward_listeners(), 1);
        assert_eq!(substrate.link_click_listeners(), 1);
    }

    #[test]
    fn test_clones_share_state_and_subscriptions() {
        let (router, substrate, _) = setup("/");
        let other = router.clone();
        other.register("/a", |_| {}).unwrap();

        assert_eq!(router.route_count(), 1);
        assert_eq!(substrate.back_forward_listeners(), 1);
    }

    #[test]
    fn test_resolve_defers_callback() {
        let (router, _, queue) = setup("/elsewhere");
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        router.register("/", move |_| counter.set(counter.get() + 1)).unwrap();

        let outcome = router.resolve("/");
        assert!(outcome.is_matched());
        assert_eq!(calls.get(), 0);
        assert!(router.is_loading());

        queue.run_until_idle();
        assert_eq!(calls.get(), 1);
        assert!(!router.is_loading());
    }

    #[test]
    fn test_unhandled_ends_loading_immediately() {
        let (router, _, queue) = setup("/");
        let outcome = router.resolve("/nowhere");

        assert_eq!(
            outcome,
            DispatchOutcome::Unhandled {
                path: "/nowhere".to_string()
            }
        );
        assert!(!router.is_loading());
        assert!(queue.is_idle());
    }

    #[test]
    fn test_dropped_task_still_ends_loading() {
        let (router, _, queue) = setup("/");
        router.on_not_found(|| {});

        assert!(router.resolve("/missing").is_not_found());
        assert!(router.is_loading());

        queue.clear();
        assert!(!router.is_loading());
    }

    #[test]
    fn test_register_dispatches_current_path() {
        let (router, _, queue) = setup("/late");
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        router
            .register("/late", move |_| counter.set(counter.get() + 1))
            .unwrap();
        queue.run_until_idle();

        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_dispatch_on_register_disabled() {
        let substrate = Rc::new(MemorySubstrate::new("/"));
        let queue = Rc::new(TaskQueue::new());
        let router = Router::with_config(
            substrate,
            queue.clone(),
            RouterConfig::new().dispatch_on_register(false),
        );
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        router.register("/", move |_| counter.set(counter.get() + 1)).unwrap();
        assert!(queue.is_idle());

        router.start();
        queue.run_until_idle();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_invalid_pattern_does_not_dispatch() {
        let (router, _, queue) = setup("/");
        let loading = Rc::new(Cell::new(0));

        let counter = loading.clone();
        router.on_loading(move |_| counter.set(counter.get() + 1));

        assert!(router.register("/broken/{id", |_| {}).is_err());
        assert_eq!(router.route_count(), 0);
        assert_eq!(loading.get(), 0);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_handle_path_and_children() {
        let (router, _, _) = setup("/");
        let admin = router.register("/admin", |_| {}).unwrap();
        let users = admin.nest("users", |_| {}).unwrap();
        let detail = users.nest("{id}", |_| {}).unwrap();

        assert_eq!(users.path(), "/admin/users");
        assert_eq!(detail.path(), "/admin/users/{id}");

        let admin_info = router.route(admin.id()).unwrap();
        assert_eq!(admin_info.children, [users.id()]);
        let detail_info = router.route(detail.id()).unwrap();
        assert_eq!(detail_info.parent, Some(users.id()));
        assert_eq!(detail_info.param_names, ["id"]);
    }

    #[test]
    fn test_router_dropped_subscriptions_go_inert() {
        let substrate = Rc::new(MemorySubstrate::new("/"));
        let queue = Rc::new(TaskQueue::new());
        let router = Router::new(substrate.clone(), queue.clone());
        router.register("/about", |_| {}).unwrap();
        drop(router);

        assert!(!substrate.click(Some("/about")));
        assert_eq!(substrate.history_len(), 1);
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_match_cache_invalidated_on_register() {
        let (router, _, _) = setup("/");
        router.register("/a", |_| {}).unwrap();

        assert!(router.match_path("/b").is_none());
        assert!(router.match_path("/b").is_none());
        assert!(router.cache_stats().hits >= 1);

        let b = router.register("/b", |_| {}).unwrap();
        assert_eq!(router.match_path("/b").map(|m| m.route), Some(b.id()));
    }
}
