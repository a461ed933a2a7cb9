//! Path template compilation
//!
//! A template such as `/users/{id}/posts/{post}` compiles to an anchored
//! regular expression with one capturing group per `{name}` token:
//!
//! - literal text is escaped and must match verbatim
//! - `{name}` captures one or more characters other than `/`
//! - the whole path must match, never a prefix of it
//!
//! Parameter names are kept in the order their tokens appear so captures can
//! be zipped back to names positionally.

use crate::error::PatternError;
use crate::params::RouteParams;
use regex::Regex;

/// Capture group substituted for every `{name}` token
const PARAM_GROUP: &str = "([^/]+)";

/// A compiled path template
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw_path: String,
    matcher: Regex,
    param_names: Vec<String>,
}

impl RoutePattern {
    /// Compile a path template
    ///
    /// # Example
    ///
    /// ```
    /// use spa_navigator::RoutePattern;
    ///
    /// let pattern = RoutePattern::compile("/profile/{id}").unwrap();
    /// assert_eq!(pattern.param_names(), ["id"]);
    ///
    /// let params = pattern.captures("/profile/42").unwrap();
    /// assert_eq!(params.get("id"), Some("42"));
    /// ```
    pub fn compile(path: &str) -> Result<Self, PatternError> {
        let tokens = tokenize(path)?;

        let mut source = String::with_capacity(path.len() + 8);
        source.push('^');
        let mut param_names = Vec::new();
        for token in &tokens {
            match token {
                Token::Literal(text) => source.push_str(&regex::escape(text)),
                Token::Param(name) => {
                    if param_names.iter().any(|existing| existing == name) {
                        return Err(PatternError::DuplicateParam {
                            name: (*name).to_string(),
                        });
                    }
                    param_names.push((*name).to_string());
                    source.push_str(PARAM_GROUP);
                }
            }
        }
        source.push('$');

        let matcher = Regex::new(&source).map_err(|e| PatternError::Compile {
            message: e.to_string(),
        })?;
        debug_assert_eq!(matcher.captures_len() - 1, param_names.len());

        Ok(Self {
            raw_path: path.to_string(),
            matcher,
            param_names,
        })
    }

    /// The template as registered
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// Parameter names in left-to-right token order
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The compiled matcher
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// Check whether `path` matches without extracting anything
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    /// Match `path` and zip the captures with the parameter names
    ///
    /// Returns `None` if the whole path does not match.
    pub fn captures(&self, path: &str) -> Option<RouteParams> {
        let captures = self.matcher.captures(path)?;
        Some(
            self.param_names
                .iter()
                .zip(captures.iter().skip(1))
                .filter_map(|(name, value)| value.map(|v| (name.as_str(), v.as_str())))
                .collect(),
        )
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw_path == other.raw_path
    }
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Literal(&'a str),
    Param(&'a str),
}

/// Split a template into literal runs and `{name}` tokens, validating braces
fn tokenize(path: &str) -> Result<Vec<Token<'_>>, PatternError> {
    if path.is_empty() {
        return Err(PatternError::EmptyPath);
    }

    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut open: Option<usize> = None;

    for (position, ch) in path.char_indices() {
        match (ch, open) {
            ('{', None) => {
                if literal_start < position {
                    tokens.push(Token::Literal(&path[literal_start..position]));
                }
                open = Some(position);
            }
            ('{', Some(_)) => return Err(PatternError::NestedBrace { position }),
            ('}', None) => return Err(PatternError::UnopenedBrace { position }),
            ('}', Some(start)) => {
                let name = &path[start + 1..position];
                validate_param_name(name, start)?;
                tokens.push(Token::Param(name));
                open = None;
                literal_start = position + 1;
            }
            _ => {}
        }
    }

    if let Some(position) = open {
        return Err(PatternError::UnclosedBrace { position });
    }
    if literal_start < path.len() {
        tokens.push(Token::Literal(&path[literal_start..]));
    }

    Ok(tokens)
}

fn validate_param_name(name: &str, position: usize) -> Result<(), PatternError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(PatternError::EmptyParamName { position });
    };

    let valid = (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PatternError::InvalidParamName {
            name: name.to_string(),
        })
    }
}
