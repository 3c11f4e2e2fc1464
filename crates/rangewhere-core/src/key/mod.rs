pub mod successor;

#[cfg(test)]
mod tests;

pub use successor::{StringSuccessor, successor};

use crate::types::Float64;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    slice,
};

///
/// KeyPart
///
/// One component of a sort key. The order is a fixed cross-type total
/// order: null, then false, then true, then numbers, then text.
///
/// IMPORTANT:
/// Scan bounds are derived from this order. Changing ranks or same-rank
/// comparison changes which records a pattern reaches.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(untagged)]
pub enum KeyPart {
    #[default]
    Null,
    Bool(bool),
    Number(Float64),
    Text(String),
}

impl KeyPart {
    /// Position of the variant in the cross-type order.
    #[must_use]
    pub const fn canonical_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(false) => 1,
            Self::Bool(true) => 2,
            Self::Number(_) => 3,
            Self::Text(_) => 4,
        }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl PartialEq for KeyPart {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for KeyPart {}

impl PartialOrd for KeyPart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyPart {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.canonical_rank().cmp(&other.canonical_rank()),
        }
    }
}

impl Hash for KeyPart {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_rank().hash(state);
        match self {
            Self::Null | Self::Bool(_) => {}
            Self::Number(number) => number.hash(state),
            Self::Text(text) => text.hash(state),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for KeyPart {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for KeyPart {
    fn from(value: f64) -> Self {
        Self::Number(Float64::new(value))
    }
}

impl From<i32> for KeyPart {
    fn from(value: i32) -> Self {
        Self::Number(Float64::from(value))
    }
}

impl From<Float64> for KeyPart {
    fn from(value: Float64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// Key
///
/// Full sort key of a record. A scalar key compares as a one-part
/// composite key, so `Key::from("a")` and `Key::from(vec!["a".into()])`
/// land in the same slot.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Key {
    Scalar(KeyPart),
    Parts(Vec<KeyPart>),
}

impl Key {
    /// View the key as a part sequence.
    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        match self {
            Self::Scalar(part) => slice::from_ref(part),
            Self::Parts(parts) => parts,
        }
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.parts() == other.parts()
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts().cmp(other.parts())
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts().hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.parts();
        write!(f, "[")?;
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{part}")?;
        }
        write!(f, "]")
    }
}

impl From<KeyPart> for Key {
    fn from(part: KeyPart) -> Self {
        Self::Scalar(part)
    }
}

impl From<Vec<KeyPart>> for Key {
    fn from(parts: Vec<KeyPart>) -> Self {
        Self::Parts(parts)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Scalar(KeyPart::from(value))
    }
}

impl<A, B> From<(A, B)> for Key
where
    A: Into<KeyPart>,
    B: Into<KeyPart>,
{
    fn from((a, b): (A, B)) -> Self {
        Self::Parts(vec![a.into(), b.into()])
    }
}

impl<A, B, C> From<(A, B, C)> for Key
where
    A: Into<KeyPart>,
    B: Into<KeyPart>,
    C: Into<KeyPart>,
{
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::Parts(vec![a.into(), b.into(), c.into()])
    }
}
