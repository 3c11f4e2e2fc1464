use crate::{
    key::KeyPart,
    pattern::{KeyMatcher, KeyPattern, Verdict},
};

///
/// KeyDecision
///
/// Exact per-record outcome for one scanned key.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum KeyDecision {
    Accept,
    Reject,
    Stop,
}

/// Which side of the pattern a condition sequence came from. End-side
/// literals only shaped the scan bound, so they pass vacuously here;
/// start-side literals are re-checked exactly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Role {
    Start,
    End,
}

/// Re-test a scanned key against the original pattern.
///
/// Condition sequences combine as a logical OR; `Done` from any predicate
/// wins over everything and stops the scan.
pub(crate) fn decide_key(pattern: &KeyPattern, parts: &[KeyPart]) -> KeyDecision {
    match pattern {
        KeyPattern::Whole(f) => match f(parts) {
            Verdict::Hit => KeyDecision::Accept,
            Verdict::Miss => KeyDecision::Reject,
            Verdict::Done => KeyDecision::Stop,
        },
        KeyPattern::Parts(matchers) => {
            match evaluate_condition(Role::Start, matchers, parts) {
                Verdict::Hit => KeyDecision::Accept,
                Verdict::Miss => KeyDecision::Reject,
                Verdict::Done => KeyDecision::Stop,
            }
        }
        KeyPattern::Span { start, end } => {
            let sides = [
                (Role::Start, start.as_deref()),
                (Role::End, end.as_deref()),
            ];

            for (role, matchers) in sides {
                let Some(matchers) = matchers else {
                    continue;
                };
                match evaluate_condition(role, matchers, parts) {
                    Verdict::Done => return KeyDecision::Stop,
                    // First fully passing sequence accepts the key.
                    Verdict::Hit => return KeyDecision::Accept,
                    Verdict::Miss => {}
                }
            }

            // A span with no sequences accepts every scanned key.
            if start.is_none() && end.is_none() {
                KeyDecision::Accept
            } else {
                KeyDecision::Reject
            }
        }
    }
}

fn evaluate_condition(role: Role, matchers: &[KeyMatcher], parts: &[KeyPart]) -> Verdict {
    for (index, matcher) in matchers.iter().enumerate() {
        let part = parts.get(index);
        let verdict = match matcher {
            KeyMatcher::Literal(literal) => match role {
                Role::Start => Verdict::from_bool(part == Some(literal)),
                // Bound marker only; the envelope already enforced it.
                Role::End => Verdict::Hit,
            },
            KeyMatcher::Pattern(regex) => Verdict::from_bool(
                part.and_then(KeyPart::as_text)
                    .is_some_and(|text| regex.is_match(text)),
            ),
            // A key too short for the position fails the sequence before
            // the predicate runs, so short keys can never trigger Done.
            KeyMatcher::Predicate(f) => match part {
                Some(part) => f(part),
                None => Verdict::Miss,
            },
        };

        if !verdict.is_hit() {
            return verdict;
        }
    }

    Verdict::Hit
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn parts(key: &[KeyPart]) -> &[KeyPart] {
        key
    }

    #[test]
    fn literal_pattern_accepts_prefix_matches() {
        let pattern = KeyPattern::literals(["hello"]);

        let longer = [KeyPart::from("hello"), KeyPart::Bool(false)];
        assert_eq!(decide_key(&pattern, parts(&longer)), KeyDecision::Accept);

        let exact = [KeyPart::from("hello")];
        assert_eq!(decide_key(&pattern, parts(&exact)), KeyDecision::Accept);

        let other = [KeyPart::from("help")];
        assert_eq!(decide_key(&pattern, parts(&other)), KeyDecision::Reject);
    }

    #[test]
    fn short_keys_miss_literal_positions() {
        let pattern = KeyPattern::parts([KeyMatcher::literal("hello"), KeyMatcher::literal(true)]);

        let short = [KeyPart::from("hello")];
        assert_eq!(decide_key(&pattern, parts(&short)), KeyDecision::Reject);
    }

    #[test]
    fn regex_matchers_test_text_parts_only() {
        let pattern = KeyPattern::parts([
            KeyMatcher::literal("hello"),
            KeyMatcher::from(Regex::new("^w").expect("valid regex")),
        ]);

        let text = [KeyPart::from("hello"), KeyPart::from("world")];
        assert_eq!(decide_key(&pattern, parts(&text)), KeyDecision::Accept);

        let number = [KeyPart::from("hello"), KeyPart::from(1)];
        assert_eq!(decide_key(&pattern, parts(&number)), KeyDecision::Reject);
    }

    #[test]
    fn short_keys_reject_predicate_positions_without_invoking() {
        let pattern = KeyPattern::parts([
            KeyMatcher::literal("hello"),
            KeyMatcher::predicate(|_| Verdict::Done),
        ]);

        let short = [KeyPart::from("hello")];
        assert_eq!(decide_key(&pattern, parts(&short)), KeyDecision::Reject);
    }

    #[test]
    fn done_stops_instead_of_rejecting() {
        let pattern = KeyPattern::parts([KeyMatcher::predicate(|part| {
            if matches!(part, KeyPart::Number(_)) {
                Verdict::Done
            } else {
                Verdict::Hit
            }
        })]);

        let text = [KeyPart::from("a")];
        assert_eq!(decide_key(&pattern, parts(&text)), KeyDecision::Accept);

        let number = [KeyPart::from(1)];
        assert_eq!(decide_key(&pattern, parts(&number)), KeyDecision::Stop);
    }

    #[test]
    fn span_conditions_combine_as_or() {
        let pattern = KeyPattern::span(
            Some(vec![KeyMatcher::predicate(|part| {
                Verdict::from_bool(part.as_text().is_some_and(|text| text.starts_with('a')))
            })]),
            Some(vec![KeyMatcher::predicate(|part| {
                Verdict::from_bool(part.as_text().is_some_and(|text| text.starts_with('b')))
            })]),
        );

        let a = [KeyPart::from("apple")];
        let b = [KeyPart::from("banana")];
        let c = [KeyPart::from("cherry")];
        assert_eq!(decide_key(&pattern, parts(&a)), KeyDecision::Accept);
        assert_eq!(decide_key(&pattern, parts(&b)), KeyDecision::Accept);
        assert_eq!(decide_key(&pattern, parts(&c)), KeyDecision::Reject);
    }

    #[test]
    fn end_side_literals_pass_vacuously() {
        let pattern = KeyPattern::span(None, Some(vec![KeyMatcher::literal("m")]));

        let any = [KeyPart::from("zzz")];
        assert_eq!(decide_key(&pattern, parts(&any)), KeyDecision::Accept);
    }

    #[test]
    fn a_passing_sequence_short_circuits_later_conditions() {
        let pattern = KeyPattern::span(
            Some(vec![KeyMatcher::predicate(|_| Verdict::Hit)]),
            Some(vec![KeyMatcher::predicate(|_| Verdict::Done)]),
        );

        let any = [KeyPart::from("x")];
        assert_eq!(decide_key(&pattern, parts(&any)), KeyDecision::Accept);
    }

    #[test]
    fn done_from_a_missed_start_side_still_stops() {
        let pattern = KeyPattern::span(
            Some(vec![KeyMatcher::predicate(|_| Verdict::Done)]),
            Some(vec![KeyMatcher::predicate(|_| Verdict::Hit)]),
        );

        let any = [KeyPart::from("x")];
        assert_eq!(decide_key(&pattern, parts(&any)), KeyDecision::Stop);
    }

    #[test]
    fn empty_span_accepts_everything() {
        let pattern = KeyPattern::span(None, None);

        let any = [KeyPart::from("anything")];
        assert_eq!(decide_key(&pattern, parts(&any)), KeyDecision::Accept);
    }
}
