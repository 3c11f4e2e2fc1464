use crate::{
    bound::build_bounds,
    diag::{self, Diagnostic},
    error::QueryError,
    key::{Key, StringSuccessor},
    pattern::{CompiledValuePattern, KeyMatcher, KeyPattern, ValuePattern},
    predicate::{KeyDecision, decide_key},
    select::{SelectSpec, project},
    source::{RangeSource, ScanOptions},
    value::Value,
};

///
/// QueryOptions
///

#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    /// Use the append-a-NUL string successor instead of the narrow
    /// increment-and-truncate one when deriving end bounds.
    pub wide_range_key_strings: bool,
    /// Ask the store for write versions and carry them into results.
    pub versions: bool,
    /// Skip this many otherwise-matching records before yielding.
    pub offset: u32,
    /// Yield at most this many results.
    pub limit: Option<u32>,
    /// Override which literal position of the pattern is bumped when
    /// deriving the end bound.
    pub bump_index: Option<usize>,
    /// Suppress advisory diagnostics for this call.
    pub quiet: bool,
}

///
/// ResultEntry
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultEntry {
    pub key: Key,
    pub value: Value,
    pub version: Option<u64>,
}

/// Run a declarative range query against `source`.
///
/// Classifies the pattern, derives conservative scan bounds, then lazily
/// filters and projects the scan. Errors cover option validation only;
/// opening the scan never touches a record.
pub fn query_where<'a, S: RangeSource>(
    source: &'a S,
    pattern: KeyPattern,
    value_pattern: Option<ValuePattern>,
    select: Option<SelectSpec>,
    options: &QueryOptions,
) -> Result<QueryIter<'a, S>, QueryError> {
    let mode = if options.wide_range_key_strings {
        StringSuccessor::Wide
    } else {
        StringSuccessor::Narrow
    };

    let bounds = build_bounds(&pattern, mode, options.bump_index)?;

    if !options.quiet {
        emit_diagnostics(&pattern, bounds.is_end_open());
    }

    let scan = source.scan(ScanOptions {
        start: bounds.start,
        end: bounds.end,
        versions: options.versions,
    });

    Ok(QueryIter {
        scan,
        pattern,
        value_pattern: value_pattern.map(|pattern| pattern.compile()),
        select,
        offset_remaining: options.offset,
        limit_remaining: options.limit,
        stopped: false,
    })
}

/// Emitted once per call, before the first record is read.
fn emit_diagnostics(pattern: &KeyPattern, end_open: bool) {
    match pattern {
        KeyPattern::Span {
            start: None,
            end: None,
        } => diag::record(Diagnostic::SpanWithoutBounds),
        KeyPattern::Whole(_) => {
            if end_open {
                diag::record(Diagnostic::UnboundedPredicateScan);
            }
        }
        KeyPattern::Parts(matchers) => {
            let non_literal = matchers.iter().any(|matcher| !matcher.is_literal());
            if non_literal && end_open {
                diag::record(Diagnostic::UnboundedPredicateScan);
            }
        }
        KeyPattern::Span { start, end } => {
            let non_literal = start
                .iter()
                .chain(end.iter())
                .flatten()
                .any(|matcher: &KeyMatcher| !matcher.is_literal());
            if non_literal && end_open {
                diag::record(Diagnostic::UnboundedPredicateScan);
            }
        }
    }
}

///
/// QueryIter
///
/// Lazy result sequence. Nothing is read from the store until the first
/// `next`, and a `Done` verdict anywhere ends the sequence for good.
///

pub struct QueryIter<'a, S: RangeSource + 'a> {
    scan: S::Scan<'a>,
    pattern: KeyPattern,
    value_pattern: Option<CompiledValuePattern>,
    select: Option<SelectSpec>,
    offset_remaining: u32,
    limit_remaining: Option<u32>,
    stopped: bool,
}

impl<'a, S: RangeSource + 'a> Iterator for QueryIter<'a, S> {
    type Item = ResultEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped || self.limit_remaining == Some(0) {
            return None;
        }

        loop {
            let entry = self.scan.next()?;

            // Whole-key predicates run before the value test so a value
            // miss cannot swallow their Done signal; positional start/end
            // conditions still run after it, keeping the conjunction
            // order whole-key, value, conditions.
            let whole = matches!(self.pattern, KeyPattern::Whole(_));
            if whole {
                match decide_key(&self.pattern, entry.key.parts()) {
                    KeyDecision::Reject => continue,
                    KeyDecision::Stop => {
                        self.stopped = true;
                        return None;
                    }
                    KeyDecision::Accept => {}
                }
            }

            if let Some(value_pattern) = &self.value_pattern {
                let verdict = value_pattern.test(&entry.value);
                if verdict.is_done() {
                    self.stopped = true;
                    return None;
                }
                if !verdict.is_hit() {
                    continue;
                }
            }

            if !whole {
                match decide_key(&self.pattern, entry.key.parts()) {
                    KeyDecision::Reject => continue,
                    KeyDecision::Stop => {
                        self.stopped = true;
                        return None;
                    }
                    KeyDecision::Accept => {}
                }
            }

            let value = match &self.select {
                None => entry.value,
                Some(spec) => match project(spec, &entry.key, &entry.value) {
                    // An empty projection drops the record without
                    // consuming offset or limit budget.
                    None => continue,
                    Some(projected) => projected,
                },
            };

            if self.offset_remaining > 0 {
                self.offset_remaining -= 1;
                continue;
            }

            if let Some(limit) = &mut self.limit_remaining {
                *limit -= 1;
            }

            return Some(ResultEntry {
                key: entry.key,
                value,
                version: entry.version,
            });
        }
    }
}

///
/// TESTS
///
