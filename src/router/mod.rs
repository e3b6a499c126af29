//! # Router Module
//!
//! Path matching and route resolution. The router is a purpose-built trie:
//! each level of the tree consumes one path component, static children are
//! held in an adaptive list-or-map structure, dynamic segments share a
//! single child per depth, and three kinds of leaf (exact, trailing-slash,
//! catch-all) terminate patterns.
//!
//! Two phases with different rules:
//!
//! 1. **Registration** (`MuxBuilder::build`): single-threaded tree growth.
//!    Any ambiguity — two patterns resolving to the same leaf — is a
//!    registration error, never a runtime tie-break.
//! 2. **Serving** (`Mux::match_path` / `Handler::serve`): read-only walks
//!    of the finished tree, safe for unbounded concurrent lookups, with
//!    static segments taking priority over dynamic ones and catch-alls
//!    matching last.

mod branches;
mod builder;
mod core;
mod node;

pub use self::builder::MuxBuilder;
pub use self::core::{Mux, RouteMatch};
pub use self::node::{CaptureVec, MAX_INLINE_CAPTURES};
