use crate::{
    error::QueryError,
    key::{KeyPart, StringSuccessor, successor},
    pattern::{KeyMatcher, KeyPattern},
};

/// Run length of the maximal-string sentinel substituted for regex and
/// predicate positions in end bounds.
const MAX_TEXT_RUN: usize = 8;

/// Sentinel above every text part a store realistically holds, used where
/// an end bound needs a value for a non-literal position.
fn max_text() -> KeyPart {
    KeyPart::Text(char::MAX.to_string().repeat(MAX_TEXT_RUN))
}

///
/// ScanBounds
///
/// Conservative half-open envelope for the underlying scan. An absent
/// side means the scan uses the collection's natural boundary. Bounds
/// only over-approximate; the per-record predicate is exact.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScanBounds {
    pub start: Option<Vec<KeyPart>>,
    pub end: Option<Vec<KeyPart>>,
}

impl ScanBounds {
    /// Whether the pattern left any non-literal position that the bounds
    /// cannot pin down on the end side.
    #[must_use]
    pub const fn is_end_open(&self) -> bool {
        self.end.is_none()
    }
}

/// Derive scan bounds from a key pattern.
///
/// `bump_index` overrides which position of the literal prefix is
/// replaced by its successor in the end bound; it defaults to the last
/// literal position. Errors are validation only and never depend on
/// store content.
pub fn build_bounds(
    pattern: &KeyPattern,
    mode: StringSuccessor,
    bump_index: Option<usize>,
) -> Result<ScanBounds, QueryError> {
    match pattern {
        KeyPattern::Whole(_) => Ok(ScanBounds::default()),
        KeyPattern::Parts(matchers) => parts_bounds(matchers, mode, bump_index),
        KeyPattern::Span { start, end } => span_bounds(
            start.as_deref(),
            end.as_deref(),
            bump_index,
        ),
    }
}

fn parts_bounds(
    matchers: &[KeyMatcher],
    mode: StringSuccessor,
    bump_index: Option<usize>,
) -> Result<ScanBounds, QueryError> {
    let bump_index = resolve_bump_index(matchers, bump_index)?;

    // Start: the literal prefix verbatim, truncated at the first
    // non-literal position. A literal null in an array pattern is a real
    // bumpable part, so it stays.
    let mut start = Vec::new();
    for matcher in matchers {
        match matcher.as_literal() {
            Some(part) => start.push(part.clone()),
            None => break,
        }
    }

    let Some(bump_index) = bump_index else {
        // No literal anywhere: full scan, exact filtering only.
        return Ok(ScanBounds {
            start: none_if_empty(start),
            end: None,
        });
    };

    // End: positions up to and including the bump index, with the bumped
    // literal replaced by its successor and non-literal positions widened
    // to the maximal-string sentinel.
    let mut end = Vec::new();
    for (index, matcher) in matchers.iter().enumerate().take(bump_index + 1) {
        if index == bump_index {
            let part = matcher
                .as_literal()
                .ok_or(QueryError::BumpIndexNotBumpable { index })?;
            match successor(part, mode) {
                Some(bumped) => end.push(bumped),
                // Narrow mode with no successor: a truncated end would
                // sort below the start, so the end side stays open and
                // the per-record predicate does the filtering.
                None => {
                    return Ok(ScanBounds {
                        start: none_if_empty(start),
                        end: None,
                    });
                }
            }
        } else {
            match matcher.as_literal() {
                Some(part) => end.push(part.clone()),
                None => end.push(max_text()),
            }
        }
    }

    Ok(ScanBounds {
        start: none_if_empty(start),
        end: none_if_empty(end),
    })
}

fn span_bounds(
    start: Option<&[KeyMatcher]>,
    end: Option<&[KeyMatcher]>,
    bump_index: Option<usize>,
) -> Result<ScanBounds, QueryError> {
    // A supplied bump index is validated against the start sequence even
    // though span ends are used verbatim, so misuse fails loudly.
    if let Some(index) = bump_index {
        let matchers = start.unwrap_or(&[]);
        let literal_len = literal_bearing_len(matchers);
        if index >= literal_len {
            return Err(QueryError::BumpIndexOutOfRange {
                index,
                len: literal_len,
            });
        }
        if !matchers[index].is_literal() {
            return Err(QueryError::BumpIndexNotBumpable { index });
        }
    }

    // Start side: literal prefix, stopping at null or any non-literal.
    let start_bound = start.map_or_else(Vec::new, |matchers| {
        let mut bound = Vec::new();
        for matcher in matchers {
            match matcher.as_literal() {
                Some(KeyPart::Null) | None => break,
                Some(part) => bound.push(part.clone()),
            }
        }
        bound
    });

    // End side: verbatim, no successor step; non-literal positions widen
    // to the maximal-string sentinel and null still terminates.
    let end_bound = end.map_or_else(Vec::new, |matchers| {
        let mut bound = Vec::new();
        for matcher in matchers {
            match matcher.as_literal() {
                Some(KeyPart::Null) => break,
                Some(part) => bound.push(part.clone()),
                None => bound.push(max_text()),
            }
        }
        bound
    });

    Ok(ScanBounds {
        start: none_if_empty(start_bound),
        end: none_if_empty(end_bound),
    })
}

/// Default the bump index to the last literal position; validate a
/// supplied one. `Ok(None)` means the pattern has no literal at all.
fn resolve_bump_index(
    matchers: &[KeyMatcher],
    bump_index: Option<usize>,
) -> Result<Option<usize>, QueryError> {
    let last_literal = matchers.iter().rposition(KeyMatcher::is_literal);

    match bump_index {
        None => Ok(last_literal),
        Some(index) => {
            let literal_len = last_literal.map_or(0, |last| last + 1);
            if index >= literal_len {
                return Err(QueryError::BumpIndexOutOfRange {
                    index,
                    len: literal_len,
                });
            }
            if !matchers[index].is_literal() {
                return Err(QueryError::BumpIndexNotBumpable { index });
            }
            Ok(Some(index))
        }
    }
}

fn literal_bearing_len(matchers: &[KeyMatcher]) -> usize {
    matchers
        .iter()
        .rposition(KeyMatcher::is_literal)
        .map_or(0, |last| last + 1)
}

fn none_if_empty(parts: Vec<KeyPart>) -> Option<Vec<KeyPart>> {
    if parts.is_empty() { None } else { Some(parts) }
}

///
/// TESTS
///
