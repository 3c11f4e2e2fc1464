use thiserror::Error as ThisError;

///
/// QueryError
///
/// Validation failures raised before any scan opens. Scan-time behavior is
/// the range source's own contract; this layer adds no retry and no
/// wrapping, and the DONE signal is never surfaced as an error.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("bump index {index} is out of range: pattern has {len} literal-bearing positions")]
    BumpIndexOutOfRange { index: usize, len: usize },

    #[error("bump index {index} points at a non-literal matcher; only literal key parts have successors")]
    BumpIndexNotBumpable { index: usize },
}
