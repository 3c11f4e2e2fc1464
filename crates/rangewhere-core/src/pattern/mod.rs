pub mod value;

pub use value::{CompiledValuePattern, FieldPredicate, FieldRule, ValuePattern};

use crate::key::KeyPart;
use regex::Regex;
use std::{fmt, sync::Arc};

///
/// Verdict
///
/// Outcome of one predicate call. `Done` is a control signal, not a
/// match: the record is excluded and the scan stops.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Hit,
    Miss,
    Done,
}

/// The early-termination verdict, for use inside predicate closures.
pub const DONE: Verdict = Verdict::Done;

impl Verdict {
    #[must_use]
    pub const fn from_bool(hit: bool) -> Self {
        if hit { Self::Hit } else { Self::Miss }
    }

    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl From<bool> for Verdict {
    fn from(hit: bool) -> Self {
        Self::from_bool(hit)
    }
}

/// Per-part predicate. Receives the key part at the matcher's position;
/// when the key is too short for the position the sequence misses and
/// the predicate is never invoked.
pub type KeyPartPredicate = dyn Fn(&KeyPart) -> Verdict + Send + Sync;

/// Whole-key predicate, called with the full part sequence.
pub type WholeKeyPredicate = dyn Fn(&[KeyPart]) -> Verdict + Send + Sync;

///
/// KeyMatcher
///
/// One position in a key pattern. Literals contribute to scan bounds;
/// regexes and predicates are checked per record only.
///

#[derive(Clone)]
pub enum KeyMatcher {
    Literal(KeyPart),
    Pattern(Regex),
    Predicate(Arc<KeyPartPredicate>),
}

impl KeyMatcher {
    #[must_use]
    pub fn literal(part: impl Into<KeyPart>) -> Self {
        Self::Literal(part.into())
    }

    #[must_use]
    pub const fn pattern(regex: Regex) -> Self {
        Self::Pattern(regex)
    }

    pub fn predicate(f: impl Fn(&KeyPart) -> Verdict + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(f))
    }

    /// Matcher that accepts any key part.
    #[must_use]
    pub fn any() -> Self {
        Self::predicate(|_| Verdict::Hit)
    }

    #[must_use]
    pub const fn as_literal(&self) -> Option<&KeyPart> {
        match self {
            Self::Literal(part) => Some(part),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

impl fmt::Debug for KeyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(part) => f.debug_tuple("Literal").field(part).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<KeyPart> for KeyMatcher {
    fn from(part: KeyPart) -> Self {
        Self::Literal(part)
    }
}

impl From<&str> for KeyMatcher {
    fn from(part: &str) -> Self {
        Self::Literal(KeyPart::from(part))
    }
}

impl From<Regex> for KeyMatcher {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

///
/// KeyPattern
///
/// What a query matches keys against. `Parts` positions matchers against
/// key parts one-to-one; `Span` bounds the scan between two optional
/// part sequences; `Whole` defers entirely to a predicate over the full
/// key and scans the whole collection.
///

#[derive(Clone)]
pub enum KeyPattern {
    Parts(Vec<KeyMatcher>),
    Span {
        start: Option<Vec<KeyMatcher>>,
        end: Option<Vec<KeyMatcher>>,
    },
    Whole(Arc<WholeKeyPredicate>),
}

impl KeyPattern {
    #[must_use]
    pub fn parts(matchers: impl IntoIterator<Item = KeyMatcher>) -> Self {
        Self::Parts(matchers.into_iter().collect())
    }

    /// Pattern of literal parts only.
    #[must_use]
    pub fn literals<P: Into<KeyPart>>(parts: impl IntoIterator<Item = P>) -> Self {
        Self::Parts(parts.into_iter().map(KeyMatcher::literal).collect())
    }

    #[must_use]
    pub fn span(
        start: Option<Vec<KeyMatcher>>,
        end: Option<Vec<KeyMatcher>>,
    ) -> Self {
        Self::Span { start, end }
    }

    pub fn whole(f: impl Fn(&[KeyPart]) -> Verdict + Send + Sync + 'static) -> Self {
        Self::Whole(Arc::new(f))
    }
}

impl fmt::Debug for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parts(matchers) => f.debug_tuple("Parts").field(matchers).finish(),
            Self::Span { start, end } => f
                .debug_struct("Span")
                .field("start", start)
                .field("end", end)
                .finish(),
            Self::Whole(_) => f.write_str("Whole(..)"),
        }
    }
}

///
/// FieldSelector
///
/// How value patterns and select specs name map fields: exactly, or by
/// regex over the field names present.
///

#[derive(Clone)]
pub enum FieldSelector {
    Name(String),
    Pattern(Regex),
}

impl FieldSelector {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    #[must_use]
    pub const fn pattern(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

impl fmt::Debug for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
        }
    }
}

impl From<&str> for FieldSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for FieldSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Regex> for FieldSelector {
    fn from(regex: Regex) -> Self {
        Self::Pattern(regex)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_from_bool() {
        assert_eq!(Verdict::from_bool(true), Verdict::Hit);
        assert_eq!(Verdict::from(false), Verdict::Miss);
        assert!(DONE.is_done());
        assert!(!DONE.is_hit());
    }

    #[test]
    fn any_matcher_hits_every_part() {
        let matcher = KeyMatcher::any();
        let KeyMatcher::Predicate(f) = &matcher else {
            panic!("any() is a predicate matcher");
        };

        assert_eq!(f(&KeyPart::Null), Verdict::Hit);
        assert_eq!(f(&KeyPart::from("x")), Verdict::Hit);
    }

    #[test]
    fn matcher_debug_is_closed_over_closures() {
        let rendered = format!("{:?}", KeyMatcher::predicate(|_| Verdict::Hit));
        assert_eq!(rendered, "Predicate(..)");

        let rendered = format!("{:?}", KeyMatcher::literal("hello"));
        assert!(rendered.contains("hello"));
    }
}
