//! Child route paths
//!
//! Child routes are registered as ordinary top-level entries; the only thing
//! nesting does is derive the child's full path from its parent's.

use std::borrow::Cow;

/// Build the full path for a child route
///
/// A child path that already lives under the parent (the parent path followed
/// by a segment boundary) is used as is. Anything else is appended to the
/// parent with exactly one `/` between them.
///
/// Returns `Cow<str>` so the already-qualified case does not allocate.
///
/// # Example
///
/// ```
/// use spa_navigator::build_child_path;
///
/// assert_eq!(build_child_path("/admin", "/users"), "/admin/users");
/// assert_eq!(build_child_path("/admin", "/admin/users"), "/admin/users");
/// assert_eq!(build_child_path("/", "/about"), "/about");
/// ```
pub fn build_child_path<'a>(parent_path: &str, child_path: &'a str) -> Cow<'a, str> {
    if is_under(parent_path, child_path) {
        return Cow::Borrowed(child_path);
    }

    let parent = parent_path.trim_end_matches('/');
    let child = child_path.trim_start_matches('/');
    Cow::Owned(format!("{}/{}", parent, child))
}

/// Check whether `child` starts with `parent` at a segment boundary
fn is_under(parent: &str, child: &str) -> bool {
    let Some(rest) = child.strip_prefix(parent) else {
        return false;
    };
    rest.is_empty() || parent.ends_with('/') || rest.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_child() {
        assert_eq!(build_child_path("/dashboard", "settings"), "/dashboard/settings");
        assert_eq!(build_child_path("/dashboard", "/settings"), "/dashboard/settings");
    }

    #[test]
    fn test_parent_trailing_slash() {
        assert_eq!(build_child_path("/dashboard/", "/settings"), "/dashboard/settings");
        assert_eq!(build_child_path("/dashboard/", "settings"), "/dashboard/settings");
    }

    #[test]
    fn test_already_qualified_child_is_borrowed() {
        let path = build_child_path("/admin", "/admin/users");
        assert!(matches!(path, Cow::Borrowed("/admin/users")));
    }

    #[test]
    fn test_prefix_must_end_on_segment() {
        // "/administrators" is not under "/admin"
        assert_eq!(
            build_child_path("/admin", "/administrators"),
            "/admin/administrators"
        );
    }

    #[test]
    fn test_root_parent() {
        assert_eq!(build_child_path("/", "/about"), "/about");
        assert_eq!(build_child_path("/", "about"), "/about");
    }

    #[test]
    fn test_parameterized_parent() {
        assert_eq!(
            build_child_path("/users/{id}", "/posts/{post}"),
            "/users/{id}/posts/{post}"
        );
    }
}
