//! Strata Registry/Category Index Builder
//!
//! Aggregates the loaded corpus into the immutable [`Index`] — the
//! id-keyed record map plus the category→ids listing — and checks it
//! against the separately declared category registry. Disagreement
//! between the two (an id collision, a drifted category list, a
//! dangling registry entry) is corpus-fatal: the builder still returns
//! the full [`ConsistencyReport`] so the caller can see why, but it
//! refuses to hand out an `Index` whose lookups would be ambiguous or
//! silently wrong.
//!
//! Like the graph resolver, this stage needs the whole corpus before
//! it can run; it is the second synchronization barrier in the
//! pipeline.

#![deny(unsafe_code)]

mod builder;
mod index;
mod report;

pub use builder::{build, BuildOutcome};
pub use index::Index;
pub use report::{ConsistencyFinding, ConsistencyFindingKind, ConsistencyReport};
