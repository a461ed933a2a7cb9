//! Route table
//!
//! Registered routes in registration order. Matching is a linear scan and the
//! first entry whose matcher accepts the path wins, so a specific route has to
//! be registered before a general one that would also match.

use crate::error::RouteError;
use crate::params::RouteParams;
use crate::pattern::RoutePattern;
use crate::{debug_log, trace_log};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Callback invoked when its route matches
pub type RouteCallback = Rc<dyn Fn(&RouteParams)>;

// ============================================================================
// RouteId
// ============================================================================

/// Position of a route in its table
///
/// Ids are handed out in registration order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registration index of the route
    pub fn index(self) -> usize {
        self.0
    }
}

// ============================================================================
// RouteOptions
// ============================================================================

/// Per-route configuration carried alongside the callback
///
/// The router stores these and hands them back through [`RouteInfo`]; it never
/// reads them itself.
///
/// # Example
///
/// ```
/// use spa_navigator::RouteOptions;
///
/// let options = RouteOptions::new()
///     .meta("title", "Admin Panel")
///     .meta("layout", "wide");
///
/// assert_eq!(options.get("title"), Some("Admin Panel"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteOptions {
    meta: HashMap<String, String>,
}

impl RouteOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metadata entry
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Look up a metadata entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// All metadata entries
    pub fn all(&self) -> &HashMap<String, String> {
        &self.meta
    }

    /// Check if no metadata was set
    pub fn is_empty(&self) -> bool {
        self.meta.is_empty()
    }
}

// ============================================================================
// RouteEntry
// ============================================================================

/// A registered route
pub struct RouteEntry {
    id: RouteId,
    pattern: RoutePattern,
    callback: RouteCallback,
    options: RouteOptions,
    parent: Option<RouteId>,
    /// Child back-references, kept for introspection only
    children: Vec<RouteId>,
}

impl RouteEntry {
    /// Id of this route
    pub fn id(&self) -> RouteId {
        self.id
    }

    /// Compiled path template
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Full path template
    pub fn path(&self) -> &str {
        self.pattern.raw_path()
    }

    /// Callback for this route
    pub fn callback(&self) -> &RouteCallback {
        &self.callback
    }

    /// Options given at registration
    pub fn options(&self) -> &RouteOptions {
        &self.options
    }

    /// Parent route, for routes registered through a child handle
    pub fn parent(&self) -> Option<RouteId> {
        self.parent
    }

    /// Child routes in registration order
    pub fn children(&self) -> &[RouteId] {
        &self.children
    }

    /// Snapshot without the callback
    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            id: self.id,
            path: self.path().to_string(),
            param_names: self.pattern.param_names().to_vec(),
            options: self.options.clone(),
            parent: self.parent,
            children: self.children.clone(),
        }
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("id", &self.id)
            .field("path", &self.path())
            .field("param_names", &self.pattern.param_names())
            .field("options", &self.options)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Introspection view of a registered route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteInfo {
    pub id: RouteId,
    pub path: String,
    pub param_names: Vec<String>,
    pub options: RouteOptions,
    pub parent: Option<RouteId>,
    pub children: Vec<RouteId>,
}

// ============================================================================
// RouteMatch
// ============================================================================

/// Result of looking a path up in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The route that matched
    pub route: RouteId,
    /// Parameters captured from the path
    pub params: RouteParams,
}

// ============================================================================
// RouteTable
// ============================================================================

/// Ordered collection of registered routes
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `path` and append it
    ///
    /// Nothing is stored if the template is malformed.
    pub fn register(
        &mut self,
        path: &str,
        callback: RouteCallback,
        options: RouteOptions,
    ) -> Result<RouteId, RouteError> {
        let pattern = RoutePattern::compile(path).map_err(|reason| RouteError::InvalidPattern {
            path: path.to_string(),
            reason,
        })?;

        let id = RouteId::new(self.entries.len());
        debug_log!(
            "Registered route #{} '{}' (params: {:?})",
            id.index(),
            path,
            pattern.param_names()
        );
        self.entries.push(RouteEntry {
            id,
            pattern,
            callback,
            options,
            parent: None,
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Record `child` under `parent`
    ///
    /// Only the back-references change; matching is unaffected.
    pub fn link_child(&mut self, parent: RouteId, child: RouteId) {
        if let Some(entry) = self.entries.get_mut(child.index()) {
            entry.parent = Some(parent);
        }
        if let Some(entry) = self.entries.get_mut(parent.index()) {
            entry.children.push(child);
        }
    }

    /// Find the first route matching `path`
    pub fn find(&self, path: &str) -> Option<RouteMatch> {
        self.entries.iter().find_map(|entry| {
            let params = entry.pattern.captures(path)?;
            trace_log!("'{}' matched route '{}'", path, entry.path());
            Some(RouteMatch {
                route: entry.id,
                params,
            })
        })
    }

    /// Get a route by id
    pub fn get(&self, id: RouteId) -> Option<&RouteEntry> {
        self.entries.get(id.index())
    }

    /// All routes in registration order
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Number of registered routes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no routes are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
