//! Strata Content Model
//!
//! This crate defines the domain types for the Strata educational
//! corpus: records that explain one topic at five escalating
//! complexity tiers, linked to each other through typed
//! cross-references and grouped into source categories.
//!
//! # Key Concepts
//!
//! - **ContentItem**: one topic record spanning all five tiers, plus
//!   media, citations, cross-references, tags, and lifecycle fields.
//! - **LevelContent**: the prose payload for a single tier. The prose
//!   itself is opaque to this crate; only its shape is modeled.
//! - **CrossReference**: a directed, typed edge to another record.
//!   Relationships form a closed enumeration so symmetry and cycle
//!   rules can be checked mechanically instead of by string matching.
//! - **Corpus**: the explicit load artifact — every record read into
//!   one immutable, category-grouped snapshot before any validation
//!   begins. No module-scoped registry object survives loading.
//!
//! This is a pure types crate with no runtime dependencies. All types
//! implement `Clone`, `Debug`, `Serialize`, `Deserialize`. Ids use the
//! newtype pattern and implement `Display`.

#![deny(unsafe_code)]

mod corpus;
mod ids;
mod item;
mod level;
mod source;
mod tags;
mod xref;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use corpus::*;
pub use ids::*;
pub use item::*;
pub use level::*;
pub use source::*;
pub use tags::*;
pub use xref::*;
