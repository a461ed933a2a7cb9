//! Error handling for the router
//!
//! Registration is the only fallible operation: a malformed path template is
//! rejected up front instead of compiling into a matcher that can never fire.
//! Dispatch itself never fails; what it did is reported as a
//! [`DispatchOutcome`].

use crate::params::RouteParams;
use crate::table::RouteId;
use std::fmt;

// ============================================================================
// Pattern Errors
// ============================================================================

/// Why a path template could not be compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The template is the empty string
    EmptyPath,

    /// A `{` was opened but never closed
    UnclosedBrace { position: usize },

    /// A `}` appeared without a matching `{`
    UnopenedBrace { position: usize },

    /// A `{` appeared inside another `{...}` token
    NestedBrace { position: usize },

    /// `{}` with nothing between the braces
    EmptyParamName { position: usize },

    /// Parameter name is not a plain identifier
    InvalidParamName { name: String },

    /// The same parameter name appears twice in one template
    DuplicateParam { name: String },

    /// The generated matcher was rejected by the regex engine
    Compile { message: String },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::EmptyPath => write!(f, "route path cannot be empty"),
            PatternError::UnclosedBrace { position } => {
                write!(f, "unclosed '{{' at byte {}", position)
            }
            PatternError::UnopenedBrace { position } => {
                write!(f, "unmatched '}}' at byte {}", position)
            }
            PatternError::NestedBrace { position } => {
                write!(f, "nested '{{' at byte {}", position)
            }
            PatternError::EmptyParamName { position } => {
                write!(f, "empty parameter name at byte {}", position)
            }
            PatternError::InvalidParamName { name } => write!(
                f,
                "parameter '{}' must be an identifier (ASCII letters, digits, underscores)",
                name
            ),
            PatternError::DuplicateParam { name } => {
                write!(f, "duplicate route parameter '{}'", name)
            }
            PatternError::Compile { message } => write!(f, "matcher failed to compile: {}", message),
        }
    }
}

impl std::error::Error for PatternError {}

// ============================================================================
// Route Errors
// ============================================================================

/// Errors returned by the router's registration API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Path template failed to compile
    InvalidPattern { path: String, reason: PatternError },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidPattern { path, reason } => {
                write!(f, "Invalid route path '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::InvalidPattern { reason, .. } => Some(reason),
        }
    }
}

// ============================================================================
// Dispatch Outcome
// ============================================================================

/// What a single dispatch scheduled
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// A route matched; its callback has been deferred
    Matched { route: RouteId, params: RouteParams },
    /// Nothing matched; the not-found handler has been deferred
    NotFound { path: String },
    /// Nothing matched and no not-found handler is set
    Unhandled { path: String },
}

impl DispatchOutcome {
    /// Check if a route matched
    pub fn is_matched(&self) -> bool {
        matches!(self, DispatchOutcome::Matched { .. })
    }

    /// Check if the not-found handler was scheduled
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchOutcome::NotFound { .. })
    }

    /// Check if the path fell through with no handler at all
    pub fn is_unhandled(&self) -> bool {
        matches!(self, DispatchOutcome::Unhandled { .. })
    }

    /// Matched route id, if any
    pub fn route(&self) -> Option<RouteId> {
        match self {
            DispatchOutcome::Matched { route, .. } => Some(*route),
            _ => None,
        }
    }

    /// Extracted parameters, if a route matched
    pub fn params(&self) -> Option<&RouteParams> {
        match self {
            DispatchOutcome::Matched { params, .. } => Some(params),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
