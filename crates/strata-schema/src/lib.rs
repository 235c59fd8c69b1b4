//! Strata Schema Validator
//!
//! Purely local shape and consistency checks for a single content
//! record: required fields, the five-tier level set, key-term
//! uniqueness, and well-formedness of the descriptor lists. The
//! validator never mutates its input, never consults other records,
//! and never aborts on a malformed record — every problem becomes a
//! [`Finding`] in the returned [`ValidationReport`], so one bad record
//! cannot take down validation of the rest of the corpus.
//!
//! Corpus-wide rules (id uniqueness, cross-reference resolvability,
//! registry agreement) live in `strata-graph` and `strata-registry`;
//! they need the whole corpus and run after this stage.
//!
//! Enumerated fields (status, relationship, clinical relevance, exam
//! flags) are closed enums in `strata-types`, so membership is
//! enforced at deserialization time; by the time a record reaches
//! this validator an out-of-vocabulary value cannot exist.

#![deny(unsafe_code)]

mod finding;
mod revision;
mod validator;

pub use finding::{Finding, Severity, ValidationReport};
pub use revision::check_revision;
pub use validator::{validate, validate_corpus};
