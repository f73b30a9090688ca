//! Path pattern parsing, matching and substitution.
//!
//! # Responsibilities
//! - Parse patterns such as `/flights/seats/:flightId` into segments
//! - Match a normalized path and extract named parameters
//! - Build a concrete path from a pattern and a parameter map
//!
//! # Design Decisions
//! - Segment based, no regex in the hot path
//! - Empty segments are ignored, so `/a//b/` and `/a/b` are the same path
//! - Static segments compare case-insensitively unless asked otherwise
//! - Optional (`:tab?`) and catch-all (`:rest*`) parameters may only be last

use std::collections::BTreeMap;
use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Extracted or supplied route parameters, ordered by name.
pub type Params = BTreeMap<String, String>;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Error produced while parsing a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,
    #[error("invalid parameter name '{0}'")]
    InvalidParamName(String),
    #[error("parameter '{0}' appears more than once")]
    DuplicateParam(String),
    #[error("'{0}' must be the last segment")]
    NotLast(String),
}

/// One segment of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
    Optional(String),
    CatchAll(String),
}

impl Segment {
    fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Static(_) => None,
            Segment::Param(name) | Segment::Optional(name) | Segment::CatchAll(name) => {
                Some(name)
            }
        }
    }
}

/// A parsed route path pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
    case_sensitive: bool,
}

impl RoutePattern {
    /// Parse a pattern string.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash);
        }

        let parts: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        let mut segments = Vec::with_capacity(parts.len());
        let mut seen: Vec<&str> = Vec::new();

        for (i, part) in parts.iter().enumerate() {
            let is_last = i + 1 == parts.len();
            let Some(param) = part.strip_prefix(':') else {
                segments.push(Segment::Static((*part).to_string()));
                continue;
            };

            let (name, segment) = if let Some(name) = param.strip_suffix('?') {
                (name, Segment::Optional(name.to_string()))
            } else if let Some(name) = param.strip_suffix('*') {
                (name, Segment::CatchAll(name.to_string()))
            } else {
                (param, Segment::Param(param.to_string()))
            };

            if !is_identifier(name) {
                return Err(PatternError::InvalidParamName(name.to_string()));
            }
            if seen.contains(&name) {
                return Err(PatternError::DuplicateParam(name.to_string()));
            }
            if !is_last && !matches!(segment, Segment::Param(_)) {
                return Err(PatternError::NotLast((*part).to_string()));
            }
            seen.push(name);
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
            case_sensitive: false,
        })
    }

    /// Make static segments compare case-sensitively.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of every parameter in the pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::param_name)
    }

    /// Match a path (without query or hash). Returns the decoded parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut params = Params::new();
        let mut idx = 0;

        for segment in &self.segments {
            match segment {
                Segment::Static(expected) => {
                    let actual = parts.get(idx)?;
                    let equal = if self.case_sensitive {
                        actual == expected
                    } else {
                        actual.eq_ignore_ascii_case(expected)
                    };
                    if !equal {
                        return None;
                    }
                    idx += 1;
                }
                Segment::Param(name) => {
                    let actual = parts.get(idx)?;
                    params.insert(name.clone(), decode(actual));
                    idx += 1;
                }
                Segment::Optional(name) => {
                    if let Some(actual) = parts.get(idx) {
                        params.insert(name.clone(), decode(actual));
                        idx += 1;
                    }
                }
                Segment::CatchAll(name) => {
                    let rest: Vec<String> = parts[idx..].iter().map(|p| decode(p)).collect();
                    params.insert(name.clone(), rest.join("/"));
                    idx = parts.len();
                }
            }
        }

        (idx == parts.len()).then_some(params)
    }

    /// Substitute parameters into the pattern.
    ///
    /// Returns the name of the first missing required parameter on failure.
    pub fn build(&self, params: &Params) -> Result<String, String> {
        let mut path = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Static(s) => {
                    path.push('/');
                    path.push_str(s);
                }
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| name.clone())?;
                    path.push('/');
                    path.push_str(&encode(value));
                }
                Segment::Optional(name) => {
                    if let Some(value) = params.get(name).filter(|v| !v.is_empty()) {
                        path.push('/');
                        path.push_str(&encode(value));
                    }
                }
                Segment::CatchAll(name) => {
                    if let Some(value) = params.get(name) {
                        for piece in value.split('/').filter(|s| !s.is_empty()) {
                            path.push('/');
                            path.push_str(&encode(piece));
                        }
                    }
                }
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// True when both patterns accept exactly the same paths.
    pub fn is_equivalent(&self, other: &RoutePattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| match (a, b) {
                    (Segment::Static(x), Segment::Static(y)) => x.eq_ignore_ascii_case(y),
                    (Segment::Param(_), Segment::Param(_))
                    | (Segment::Optional(_), Segment::Optional(_))
                    | (Segment::CatchAll(_), Segment::CatchAll(_)) => true,
                    _ => false,
                })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}
