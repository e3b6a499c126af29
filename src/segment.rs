//! Segment model: one classified unit of a route pattern.
//!
//! A pattern like `/users/[id]/posts/[...rest]/` decomposes into four kinds
//! of segment:
//!
//! | Kind | Matches | Captures |
//! |---|---|---|
//! | static | the identical literal only | no |
//! | dynamic | any non-empty single component | yes |
//! | terminal | the entire remaining path, separators included | yes (name optional) |
//! | trailing slash | the zero-length component ending a `/`-terminated path | no |
//!
//! Segments are parsed once at registration time; matching walks the
//! [`Node`](crate::router) tree directly and never re-inspects segment text.

use std::fmt;

use crate::errors::RouteError;

/// Kind of a [`Segment`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Exact literal text.
    Static,
    /// Single-component wildcard, `[name]`.
    Dynamic,
    /// Catch-all suffix, `[...name]`.
    Terminal,
    /// The `/` ending a slash-terminated pattern.
    TrailingSlash,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SegmentKind::Static => "static",
            SegmentKind::Dynamic => "dynamic",
            SegmentKind::Terminal => "terminal",
            SegmentKind::TrailingSlash => "trailing slash",
        })
    }
}

/// One slash-delimited component of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches its literal text exactly.
    Static(Box<str>),
    /// Matches any non-empty component, capturing it under the field name.
    /// The name may be empty for a positional-only capture.
    Dynamic(Box<str>),
    /// Matches the remainder of the path, separators included. A named
    /// terminal exposes the capture as a field; an unnamed one captures
    /// positionally only.
    Terminal(Box<str>),
    /// Matches the empty component that ends a `/`-terminated path.
    TrailingSlash,
}

impl Segment {
    /// Parse one raw segment definition.
    ///
    /// `"/"` is the trailing-slash marker; `[name]` is dynamic; `[...name]`
    /// is terminal; anything else is static text. A single leading `/` is
    /// tolerated and stripped.
    pub fn parse(definition: &str) -> Result<Self, RouteError> {
        match definition {
            "" => return Err(RouteError::EmptySegment),
            "/" => return Ok(Segment::TrailingSlash),
            _ => {}
        }
        let definition = definition.strip_prefix('/').unwrap_or(definition);
        if let Some(inner) = definition.strip_prefix('[') {
            let Some(inner) = inner.strip_suffix(']') else {
                return Err(RouteError::UnterminatedPattern {
                    definition: definition.to_string(),
                });
            };
            return Ok(match inner.strip_prefix("...") {
                Some(name) => Segment::Terminal(Box::from(name)),
                None => Segment::Dynamic(Box::from(inner)),
            });
        }
        Ok(Segment::Static(Box::from(definition)))
    }

    /// Kind of this segment.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Static(_) => SegmentKind::Static,
            Segment::Dynamic(_) => SegmentKind::Dynamic,
            Segment::Terminal(_) => SegmentKind::Terminal,
            Segment::TrailingSlash => SegmentKind::TrailingSlash,
        }
    }

    /// Field name bound by this segment, if it captures one.
    ///
    /// Dynamic segments always bind a field, even under the empty name;
    /// terminal segments bind one only when named; static and
    /// trailing-slash segments never do.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Segment::Dynamic(name) => Some(name),
            Segment::Terminal(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(text) => write!(f, "/{text}"),
            Segment::Dynamic(name) => write!(f, "/[{name}]"),
            Segment::Terminal(name) => write!(f, "/[...{name}]"),
            Segment::TrailingSlash => f.write_str("/"),
        }
    }
}
