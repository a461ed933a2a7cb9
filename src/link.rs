//! Link interception rules
//!
//! Deciding whether a clicked link stays inside the app. The DOM side (finding
//! the nearest anchor, cancelling the event) belongs to the substrate; this
//! module only looks at the `href`.

/// What to do with a clicked link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction<'a> {
    /// Leave the click to the browser
    Ignore,
    /// Suppress the default and navigate in-app to this path
    Navigate(&'a str),
}

/// Classify the `href` of the nearest anchor around a click
///
/// `None` means the click had no anchor, or the anchor had no `href`.
///
/// # Example
///
/// ```
/// use spa_navigator::{classify_link, LinkAction};
///
/// assert_eq!(classify_link(Some("/about")), LinkAction::Navigate("/about"));
/// assert_eq!(classify_link(Some("https://example.com")), LinkAction::Ignore);
/// assert_eq!(classify_link(Some("#top")), LinkAction::Ignore);
/// assert_eq!(classify_link(None), LinkAction::Ignore);
/// ```
pub fn classify_link(href: Option<&str>) -> LinkAction<'_> {
    match href {
        Some(href) if is_in_app(href) => LinkAction::Navigate(href),
        _ => LinkAction::Ignore,
    }
}

fn is_in_app(href: &str) -> bool {
    !(href.is_empty() || href.starts_with('#') || href.starts_with("//") || has_scheme(href))
}

/// `scheme:` prefix as in RFC 3986: a letter, then letters, digits, `+ - .`
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
