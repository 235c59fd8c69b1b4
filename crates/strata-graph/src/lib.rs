//! Strata Cross-Reference Graph Resolver
//!
//! Builds the directed graph declared by every record's
//! cross-references and checks it corpus-wide: every target must
//! resolve, parent/child declarations should mirror each other, and
//! the hierarchy must stay acyclic. Findings come back in a
//! [`GraphReport`]; the queryable [`CrossRefGraph`] handle is only
//! produced when no finding is corpus-fatal, because traversals over a
//! cyclic or (in strict mode) dangling hierarchy would silently lie.
//!
//! This stage is a synchronization barrier: it needs every record's id
//! on hand before any edge can be judged, so it runs only after the
//! whole corpus is loaded — an id that merely hasn't been seen yet
//! would be indistinguishable from a genuinely missing one.

#![deny(unsafe_code)]

mod findings;
mod graph;
mod traverse;

pub use findings::{GraphFinding, GraphFindingKind, GraphReport};
pub use graph::{resolve, CrossRefGraph, GraphOutcome, ResolveMode};
pub use traverse::{Ancestors, Descendants, RelatedTo};
