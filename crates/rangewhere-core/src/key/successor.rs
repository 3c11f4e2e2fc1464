use crate::{key::KeyPart, types::Float64};

///
/// StringSuccessor
///
/// How the successor of a text part is formed when deriving end bounds.
///
/// `Narrow` increments the last incrementable character and truncates
/// after it, which is tight but undefined for all-maximal strings.
/// `Wide` appends U+0000, which is always defined but also admits every
/// extension of the string; the caller filters those out exactly.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StringSuccessor {
    #[default]
    Narrow,
    Wide,
}

/// Least key part strictly greater than `part` in the cross-type order,
/// under the chosen text mode.
///
/// `None` only for text parts in narrow mode where every character is
/// already `char::MAX`.
#[must_use]
pub fn successor(part: &KeyPart, mode: StringSuccessor) -> Option<KeyPart> {
    match part {
        KeyPart::Null => Some(KeyPart::Bool(false)),
        KeyPart::Bool(false) => Some(KeyPart::Bool(true)),
        KeyPart::Bool(true) => Some(KeyPart::Number(Float64::MIN)),
        KeyPart::Number(number) => Some(match number.next_up() {
            Some(next) => KeyPart::Number(next),
            // Top of the number rank; the next rank starts at "".
            None => KeyPart::Text(String::new()),
        }),
        KeyPart::Text(text) => match mode {
            StringSuccessor::Narrow => narrow_successor(text).map(KeyPart::Text),
            StringSuccessor::Wide => {
                let mut wide = String::with_capacity(text.len() + 1);
                wide.push_str(text);
                wide.push('\u{0}');
                Some(KeyPart::Text(wide))
            }
        },
    }
}

/// Increment the last incrementable character and drop everything after it.
fn narrow_successor(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    for (index, ch) in chars.iter().enumerate().rev() {
        if let Some(next) = bump_char(*ch) {
            let mut bumped: String = chars[..index].iter().collect();
            bumped.push(next);
            return Some(bumped);
        }
    }

    None
}

/// Next scalar value after `ch`, skipping the surrogate gap.
const fn bump_char(ch: char) -> Option<char> {
    if ch as u32 == 0xD7FF {
        return Some('\u{E000}');
    }

    match char::from_u32(ch as u32 + 1) {
        Some(next) => Some(next),
        None => None,
    }
}

///
/// TESTS
///
