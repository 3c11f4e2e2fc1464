use super::*;
use proptest::prelude::*;

#[test]
fn cross_type_order_is_fixed() {
    let ladder = [
        KeyPart::Null,
        KeyPart::Bool(false),
        KeyPart::Bool(true),
        KeyPart::from(f64::NEG_INFINITY),
        KeyPart::from(-3.5),
        KeyPart::from(0.0),
        KeyPart::from(7),
        KeyPart::from(f64::INFINITY),
        KeyPart::from(""),
        KeyPart::from("a"),
        KeyPart::from("ab"),
        KeyPart::from("b"),
    ];

    for window in ladder.windows(2) {
        assert!(window[0] < window[1], "{} < {}", window[0], window[1]);
    }
}

#[test]
fn numbers_compare_numerically_not_lexically() {
    assert!(KeyPart::from(2) < KeyPart::from(10));
    assert!(KeyPart::from(-1.0) < KeyPart::from(0.5));
}

#[test]
fn scalar_and_one_part_composite_are_the_same_key() {
    let scalar = Key::from("hello");
    let composite = Key::from(vec![KeyPart::from("hello")]);

    assert_eq!(scalar, composite);
    assert_eq!(scalar.cmp(&composite), std::cmp::Ordering::Equal);
    assert!(scalar.is_scalar());
    assert!(!composite.is_scalar());
}

#[test]
fn composite_keys_compare_part_by_part() {
    let a = Key::from(("hello", false));
    let b = Key::from(("hello", true));
    let c = Key::from(("hello", 1));
    let d = Key::from(("hello", "x"));

    assert!(Key::from("hello") < a);
    assert!(a < b);
    assert!(b < c);
    assert!(c < d);
}

#[test]
fn shorter_prefix_sorts_first() {
    assert!(Key::from(("a", "b")) < Key::from(("a", "b", "c")));
}

#[test]
fn display_renders_part_lists() {
    assert_eq!(Key::from(("hello", true, 2)).to_string(), "[hello, true, 2]");
    assert_eq!(Key::from(KeyPart::Null).to_string(), "[null]");
}

fn arb_key_part() -> impl Strategy<Value = KeyPart> {
    prop_oneof![
        Just(KeyPart::Null),
        any::<bool>().prop_map(KeyPart::from),
        any::<f64>().prop_map(KeyPart::from),
        "[a-z]{0,6}".prop_map(KeyPart::from),
    ]
}

proptest! {
    #[test]
    fn successor_is_strictly_greater(part in arb_key_part()) {
        for mode in [StringSuccessor::Narrow, StringSuccessor::Wide] {
            if let Some(next) = successor(&part, mode) {
                prop_assert!(next > part);
            }
        }
    }

    #[test]
    fn narrow_successor_of_lowercase_text_always_exists(text in "[a-z]{1,8}") {
        let part = KeyPart::from(text);
        prop_assert!(successor(&part, StringSuccessor::Narrow).is_some());
    }

    #[test]
    fn part_order_is_total_and_consistent(a in arb_key_part(), b in arb_key_part()) {
        use std::cmp::Ordering;

        let ab = a.cmp(&b);
        prop_assert_eq!(b.cmp(&a), ab.reverse());
        prop_assert_eq!(a == b, ab == Ordering::Equal);
    }
}
