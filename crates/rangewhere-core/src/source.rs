use crate::{
    key::{Key, KeyPart},
    value::Value,
};
use derive_more::{Deref, DerefMut};
use std::{
    collections::{BTreeMap, btree_map},
    ops::Bound,
};

///
/// ScanOptions
///
/// Half-open envelope and flags for one underlying scan.
///

#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    pub start: Option<Vec<KeyPart>>,
    pub end: Option<Vec<KeyPart>>,
    pub versions: bool,
}

///
/// ScanEntry
///
/// One record as the store hands it back. `version` is present only when
/// the scan requested versions.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanEntry {
    pub key: Key,
    pub value: Value,
    pub version: Option<u64>,
}

///
/// RangeSource
///
/// The external ordered store. Keys enumerate in ascending cross-type
/// order; the envelope is inclusive at the start and exclusive at the
/// end. The query layer never writes through this trait.
///

pub trait RangeSource {
    type Scan<'a>: Iterator<Item = ScanEntry> + 'a
    where
        Self: 'a;

    fn scan(&self, options: ScanOptions) -> Self::Scan<'_>;
}

///
/// Versioned
///
/// Stored record body: the value plus its per-key write version.
///

#[derive(Clone, Debug)]
pub struct Versioned {
    pub value: Value,
    pub version: u64,
}

///
/// MemorySource
///
/// Ordered in-memory store with per-key write versions. The reference
/// RangeSource implementation, and the store the tests run against.
///

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct MemorySource {
    #[deref]
    #[deref_mut]
    entries: BTreeMap<Key, Versioned>,
}

impl MemorySource {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or overwrite a record, returning its new version. Versions
    /// start at 1 and increment per overwrite of the same key.
    pub fn put(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> u64 {
        let key = key.into();
        let version = self.entries.get(&key).map_or(1, |held| held.version + 1);
        self.entries.insert(
            key,
            Versioned {
                value: value.into(),
                version,
            },
        );

        version
    }

    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key).map(|held| &held.value)
    }

    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.remove(key).map(|held| held.value)
    }
}

///
/// MemoryScan
///

pub struct MemoryScan<'a> {
    inner: btree_map::Range<'a, Key, Versioned>,
    versions: bool,
}

impl Iterator for MemoryScan<'_> {
    type Item = ScanEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, held) = self.inner.next()?;

        Some(ScanEntry {
            key: key.clone(),
            value: held.value.clone(),
            version: self.versions.then_some(held.version),
        })
    }
}

impl RangeSource for MemorySource {
    type Scan<'a> = MemoryScan<'a>;

    fn scan(&self, options: ScanOptions) -> Self::Scan<'_> {
        let start_key = options.start.map(Key::Parts);
        let end_key = options.end.map(Key::Parts);

        // BTreeMap::range panics on an inverted envelope; an equal
        // (Included, Excluded) pair is the canonical empty range.
        let (start, end) = match (start_key, end_key) {
            (Some(start), Some(end)) if start > end => {
                (Bound::Included(start.clone()), Bound::Excluded(start))
            }
            (start, end) => (
                start.map_or(Bound::Unbounded, Bound::Included),
                end.map_or(Bound::Unbounded, Bound::Excluded),
            ),
        };

        MemoryScan {
            inner: self.entries.range((start, end)),
            versions: options.versions,
        }
    }
}

///
/// TESTS
///
