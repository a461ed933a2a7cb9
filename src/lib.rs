//! # SPA Navigator
//!
//! A client-side router for single-page applications:
//!
//! - **Path templates** - `/users/{id}/posts/{post}` with named parameters
//! - **Registration order** - the first registered route that matches wins
//! - **Nested routes** - children registered under a parent's path prefix
//! - **Deferred dispatch** - callbacks run on a later turn, never inline
//! - **Loading and not-found hooks** - around and instead of route callbacks
//! - **Link interception** - relative links navigate in-app without reloading
//!
//! The router does not talk to the browser itself. It is given a
//! [`NavigationSubstrate`] (location, history, back/forward and click
//! notifications) and a [`Scheduler`] (deferred tasks). [`MemorySubstrate`]
//! and [`TaskQueue`] implement both in memory; the `web` feature adds
//! browser-backed versions.
//!
//! # Quick Start
//!
//! ```
//! use spa_navigator::{MemorySubstrate, Router, TaskQueue};
//! use std::rc::Rc;
//!
//! let substrate = Rc::new(MemorySubstrate::new("/"));
//! let queue = Rc::new(TaskQueue::new());
//! let router = Router::new(substrate.clone(), queue.clone());
//!
//! router.register("/", |_| println!("home")).unwrap();
//! router
//!     .register("/profile/{id}", |params| {
//!         println!("profile {}", params.get("id").unwrap_or_default());
//!     })
//!     .unwrap();
//! router.on_not_found(|| println!("404"));
//! router.on_loading(|loading| println!("loading: {}", loading));
//!
//! router.start();
//! router.navigate("/profile/42");
//!
//! // Relative links are taken over, absolute ones are left alone
//! assert!(substrate.click(Some("/about")));
//! assert!(!substrate.click(Some("https://example.com")));
//!
//! queue.run_until_idle();
//! ```
//!
//! # Nested Routes
//!
//! ```
//! # use spa_navigator::{MemorySubstrate, Router, TaskQueue};
//! # use std::rc::Rc;
//! # let router = Router::new(Rc::new(MemorySubstrate::new("/")), Rc::new(TaskQueue::new()));
//! router
//!     .register("/admin", |_| {})
//!     .unwrap()
//!     .child("/users", |_| {})
//!     .unwrap();
//!
//! assert!(router.match_path("/admin/users").is_some());
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache of path resolutions
//! - `web` - Browser substrate and `setTimeout` scheduler over `web-sys`

#![doc(html_root_url = "https://docs.rs/spa_navigator/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Route table
pub mod nested;
pub mod params;
pub mod pattern;
pub mod table;

// Dispatch
pub mod config;
pub mod router;
pub mod scheduler;

// Environment
pub mod history;
pub mod link;
pub mod substrate;

// Error handling
pub mod error;

// Browser bindings (optional)
#[cfg(feature = "web")]
pub mod web;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, RouteCache};
pub use config::RouterConfig;
pub use error::{DispatchOutcome, PatternError, RouteError};
pub use history::{History, HistoryEvent, NavigationDirection};
pub use link::{classify_link, LinkAction};
pub use nested::build_child_path;
pub use params::RouteParams;
pub use pattern::RoutePattern;
pub use router::{LoadingHandler, NotFoundHandler, RouteHandle, Router};
pub use scheduler::{Scheduler, Task, TaskQueue};
pub use substrate::{
    BackForwardListener, LinkClickListener, MemorySubstrate, NavigationSubstrate,
};
pub use table::{
    RouteCallback, RouteEntry, RouteId, RouteInfo, RouteMatch, RouteOptions, RouteTable,
};
#[cfg(feature = "web")]
pub use web::{BrowserSubstrate, TimeoutScheduler};
