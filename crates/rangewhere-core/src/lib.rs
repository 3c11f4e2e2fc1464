//! Declarative range queries over an externally supplied ordered
//! key-value store.
//!
//! The pipeline: a key pattern is classified and lowered to a
//! conservative scan envelope, the store enumerates that envelope, and
//! each record is re-tested exactly, projected, and paginated. Bounds
//! may over-include; the per-record predicates never let an extra
//! record through.

pub mod bound;
pub mod diag;
pub mod error;
pub mod key;
pub mod pattern;
pub mod query;
pub mod select;
pub mod source;
pub mod types;
pub mod value;

mod predicate;

pub mod prelude {
    pub use crate::{
        diag::{Diagnostic, DiagnosticsReport, DiagnosticsSink},
        error::QueryError,
        key::{Key, KeyPart, StringSuccessor},
        pattern::{
            DONE, FieldRule, FieldSelector, KeyMatcher, KeyPattern, ValuePattern, Verdict,
        },
        query::{QueryOptions, ResultEntry, query_where},
        select::{SelectContext, SelectNode, SelectSpec},
        source::{MemorySource, RangeSource, ScanEntry, ScanOptions},
        types::Float64,
        value::Value,
    };
}
