//! Runtime router configuration

/// Knobs fixed at router construction
///
/// # Example
///
/// ```
/// use spa_navigator::RouterConfig;
///
/// let config = RouterConfig::new()
///     .dispatch_on_register(false)
///     .cache_capacity(64);
///
/// assert!(!config.dispatches_on_register());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    dispatch_on_register: bool,
    cache_capacity: usize,
}

impl RouterConfig {
    /// Default resolution cache size
    pub const DEFAULT_CACHE_CAPACITY: usize = 256;

    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            dispatch_on_register: true,
            cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Whether every registration re-dispatches the current path
    ///
    /// On by default, so a route registered after start-up activates if it
    /// matches where the user already is. With it off, nothing dispatches
    /// until `start` or a navigation.
    pub fn dispatch_on_register(mut self, enabled: bool) -> Self {
        self.dispatch_on_register = enabled;
        self
    }

    /// Number of path resolutions to memoize (only with the `cache` feature)
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn dispatches_on_register(&self) -> bool {
        self.dispatch_on_register
    }

    pub fn cache_size(&self) -> usize {
        self.cache_capacity
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(config.dispatches_on_register());
        assert_eq!(config.cache_size(), RouterConfig::DEFAULT_CACHE_CAPACITY);
    }

    #[test]
    fn test_builder() {
        let config = RouterConfig::new()
            .dispatch_on_register(false)
            .cache_capacity(16);

        assert!(!config.dispatches_on_register());
        assert_eq!(config.cache_size(), 16);
    }
}
