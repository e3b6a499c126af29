//! Named route patterns: an ordered sequence of [`Segment`]s parsed from a
//! registration pattern, with reverse reconstruction to a literal path.

use std::collections::HashMap;
use std::fmt;

use crate::errors::RouteError;
use crate::segment::{Segment, SegmentKind};

/// Split the first component off a path.
///
/// Returns `(component, remainder)`, where the remainder keeps its leading
/// separator. Two consecutive separators are a [`RouteError::DoubleSlash`].
/// Both registration and matching tokenize through this function so the two
/// sides can never disagree on what a component is.
pub(crate) fn split_first(path: &str) -> Result<(&str, &str), RouteError> {
    if path.len() <= 1 {
        return Ok((path, ""));
    }
    let path = path.strip_prefix('/').unwrap_or(path);
    match path.find('/') {
        None => Ok((path, "")),
        Some(0) => Err(RouteError::DoubleSlash),
        Some(i) => Ok((&path[..i], &path[i..])),
    }
}

/// A named, immutable route pattern.
///
/// Routes are created once at registration, wrapped in `Arc`, and from then
/// on serve as identity keys in the handler table: two registrations of the
/// same pattern text under different names are two independent routes.
#[derive(Debug)]
pub struct Route {
    name: String,
    segments: Vec<Segment>,
    /// Capture field names in pattern order: every dynamic segment (even an
    /// unnamed one, under `""`) plus any named terminal segment.
    fields: Vec<Box<str>>,
}

impl Route {
    /// Parse `pattern` into a route named `name`.
    ///
    /// Enforces the two structural invariants: a terminal segment may only
    /// be followed by a trailing slash, and no two non-empty field names may
    /// repeat within one route.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, RouteError> {
        let name = name.into();
        let mut segments: Vec<Segment> = Vec::new();
        let mut fields: Vec<Box<str>> = Vec::new();
        let mut remainder = pattern;

        loop {
            let (definition, rest) = split_first(remainder)?;
            if definition.is_empty() {
                break;
            }
            remainder = rest;

            let segment = Segment::parse(definition)?;
            if let Some(last) = segments.last() {
                if last.kind() == SegmentKind::Terminal
                    && segment.kind() != SegmentKind::TrailingSlash
                {
                    return Err(RouteError::TerminalNotLast {
                        kind: segment.kind(),
                    });
                }
            }
            match &segment {
                Segment::Dynamic(field) => {
                    if !field.is_empty() && fields.contains(field) {
                        return Err(RouteError::DuplicateField {
                            name: field.to_string(),
                        });
                    }
                    fields.push(field.clone());
                }
                Segment::Terminal(field) if !field.is_empty() => {
                    if fields.contains(field) {
                        return Err(RouteError::DuplicateField {
                            name: field.to_string(),
                        });
                    }
                    fields.push(field.clone());
                }
                _ => {}
            }
            segments.push(segment);
        }

        Ok(Route {
            name,
            segments,
            fields,
        })
    }

    /// The unique registration name of this route.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full ordered segment list.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Capture field names in pattern order.
    #[must_use]
    pub fn fields(&self) -> &[Box<str>] {
        &self.fields
    }

    /// Reconstruct the literal path of this route.
    ///
    /// Static text and trailing slashes are emitted verbatim; every dynamic
    /// or terminal segment is substituted with its entry in `fields`. A
    /// named segment without an entry is a [`RouteError::MissingField`].
    pub fn path(&self, fields: &HashMap<String, String>) -> Result<String, RouteError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => {
                    out.push('/');
                    out.push_str(text);
                }
                Segment::Dynamic(name) | Segment::Terminal(name) => {
                    let value =
                        fields
                            .get(name.as_ref())
                            .ok_or_else(|| RouteError::MissingField {
                                route: self.to_string(),
                                field: name.to_string(),
                            })?;
                    out.push('/');
                    out.push_str(value);
                }
                Segment::TrailingSlash => out.push('/'),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Route {
    /// The canonical pattern text. Parsing a canonical pattern and
    /// displaying it round-trips exactly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
