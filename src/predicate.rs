//! Match predicate type and ready-made predicate constructors.
//!
//! A predicate decides whether a response set claims a request. Sets accept
//! any closure with the right signature; the constructors here cover the
//! common path and method shapes so callers rarely write one by hand.
//! Pattern-based predicates compile their pattern once, at construction.

use crate::error::Error;
use crate::request::{RequestProfile, UrlComponents};
use regex::Regex;

/// Boxed predicate held by a response set.
///
/// Expected to be cheap and side-effect-free; it is re-evaluated on every
/// match attempt, never cached.
pub type MatchPredicate = Box<dyn Fn(&RequestProfile, &UrlComponents) -> bool + Send + Sync>;

/// Match requests whose path equals `value` exactly.
pub fn exact_path(value: impl Into<String>) -> MatchPredicate {
    let value = value.into();
    Box::new(move |_request, components| components.path == value)
}

/// Match requests whose path starts with `value`.
pub fn path_prefix(value: impl Into<String>) -> MatchPredicate {
    let value = value.into();
    Box::new(move |_request, components| components.path.starts_with(&value))
}

/// Match requests whose path matches the given regex.
pub fn path_regex(pattern: &str) -> Result<MatchPredicate, Error> {
    let regex = Regex::new(pattern)
        .map_err(|e| Error::InvalidArgument(format!("invalid regex: {e}")))?;
    Ok(Box::new(move |_request, components| {
        regex.is_match(&components.path)
    }))
}

/// Match requests whose path matches the given glob pattern.
pub fn path_glob(pattern: &str) -> Result<MatchPredicate, Error> {
    let glob = globset::Glob::new(pattern)
        .map_err(|e| Error::InvalidArgument(format!("invalid glob: {e}")))?;
    let matcher = glob.compile_matcher();
    Ok(Box::new(move |_request, components| {
        matcher.is_match(&components.path)
    }))
}

/// Match requests whose path fits a parameterized template such as
/// `/users/{id}`. A parameter matches one non-empty path segment; the whole
/// path must be consumed.
pub fn path_template(template: &str) -> MatchPredicate {
    let template = PathTemplate::parse(template);
    Box::new(move |_request, components| template.matches(&components.path))
}

/// Match requests with the given HTTP method, case-insensitively.
pub fn method_is(method: impl Into<String>) -> MatchPredicate {
    let method = method.into();
    Box::new(move |request, _components| request.method.eq_ignore_ascii_case(&method))
}

/// Match only when every given predicate matches.
pub fn all(predicates: Vec<MatchPredicate>) -> MatchPredicate {
    Box::new(move |request, components| predicates.iter().all(|p| p(request, components)))
}

struct PathTemplate {
    segments: Vec<TemplateSegment>,
}

enum TemplateSegment {
    Literal(String),
    Param,
}

impl PathTemplate {
    fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut in_param = false;

        for ch in template.chars() {
            if ch == '{' && !in_param {
                if !current.is_empty() {
                    segments.push(TemplateSegment::Literal(current.clone()));
                    current.clear();
                }
                in_param = true;
            } else if ch == '}' && in_param {
                segments.push(TemplateSegment::Param);
                in_param = false;
            } else if !in_param {
                current.push(ch);
            }
        }

        if !current.is_empty() {
            segments.push(TemplateSegment::Literal(current));
        }

        Self { segments }
    }

    fn matches(&self, path: &str) -> bool {
        let mut remaining = path;
        let mut segments = self.segments.iter().peekable();

        while let Some(segment) = segments.next() {
            match segment {
                TemplateSegment::Literal(lit) => {
                    if let Some(rest) = remaining.strip_prefix(lit.as_str()) {
                        remaining = rest;
                    } else {
                        return false;
                    }
                }
                TemplateSegment::Param => {
                    // A parameter runs to the next literal, or to the next
                    // slash at the end of the template
                    let end_pos = match segments.peek() {
                        Some(TemplateSegment::Literal(next_lit)) => {
                            match remaining.find(next_lit.as_str()) {
                                Some(idx) => idx,
                                None => return false,
                            }
                        }
                        _ => remaining.find('/').unwrap_or(remaining.len()),
                    };

                    if end_pos == 0 {
                        return false;
                    }
                    remaining = &remaining[end_pos..];
                }
            }
        }

        remaining.is_empty()
    }
}
