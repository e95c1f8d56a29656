//! Path patterns and parameter binding

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One segment of a parsed path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route path pattern.
///
/// Supports literal segments, at most one `:name` parameter, and a terminal
/// `*name` catch-all that binds the remainder of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    catch_all: Option<String>,
}

impl PathPattern {
    /// Parse a pattern such as `/food/:id` or `/*path`
    pub fn parse(pattern: &str) -> Result<Self, String> {
        if pattern.is_empty() {
            return Err("pattern cannot be empty".into());
        }
        if !pattern.starts_with('/') {
            return Err("pattern must start with '/'".into());
        }

        let trimmed = pattern.trim_end_matches('/');
        let mut segments = Vec::new();
        let mut catch_all = None;
        let mut bindings = 0;

        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed[1..].split('/').collect()
        };
        let last = parts.len().saturating_sub(1);

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err("pattern contains an empty segment".into());
            }

            if let Some(name) = part.strip_prefix(':') {
                validate_param_name(name)?;
                segments.push(Segment::Param(name.to_string()));
                bindings += 1;
            } else if let Some(name) = part.strip_prefix('*') {
                validate_param_name(name)?;
                if i != last {
                    return Err(format!("catch-all '*{}' must be the last segment", name));
                }
                catch_all = Some(name.to_string());
                bindings += 1;
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        if bindings > 1 {
            return Err("pattern may bind at most one parameter".into());
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
            catch_all,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this pattern ends in a catch-all segment
    pub fn is_catch_all(&self) -> bool {
        self.catch_all.is_some()
    }

    /// A catch-all with no leading segments, matching every path
    pub fn is_root_catch_all(&self) -> bool {
        self.catch_all.is_some() && self.segments.is_empty()
    }

    /// Match a request path, returning the bound parameters on success.
    ///
    /// Query strings and fragments are ignored, a trailing slash is
    /// optional, and literal segments compare case-insensitively.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts = split_path(path);
        let mut params = RouteParams::new();

        if self.catch_all.is_none() && parts.len() != self.segments.len() {
            return None;
        }
        if parts.len() < self.segments.len() {
            return None;
        }

        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if !lit.eq_ignore_ascii_case(part) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }

        if let Some(name) = &self.catch_all {
            let rest = parts[self.segments.len()..].join("/");
            params.insert(name.clone(), rest);
        }

        Some(params)
    }

    /// Build a concrete path from this pattern.
    ///
    /// Returns the name of the first parameter that has no value.
    pub fn build(&self, params: &RouteParams) -> Result<String, String> {
        let mut path = String::new();

        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => path.push_str(value),
                    _ => return Err(name.clone()),
                },
            }
        }

        if let Some(name) = &self.catch_all {
            let rest = params.get(name).unwrap_or_default();
            let rest = rest.trim_start_matches('/');
            if !rest.is_empty() {
                path.push('/');
                path.push_str(rest);
            }
        }

        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn validate_param_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("parameter name cannot be empty".into());
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("invalid parameter name '{}'", name));
    }
    Ok(())
}

/// Strip query and fragment, then split into segments.
/// `/` and the empty string both yield no segments.
fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    let path = path.strip_prefix('/').unwrap_or(path);

    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

/// Parameters bound while matching a route, exposed to the resolved view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
