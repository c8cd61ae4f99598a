use crate::model::ItemKind;
use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for item IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// An interned canvas item identifier such as `rect-3`.
/// 4 bytes, Copy, and O(1) Eq/Hash, so it can be passed around freely as
/// the selection reference and node lookup key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Spur);

impl ItemId {
    /// Intern a string as an ItemId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ItemId(INTERNER.get_or_intern(s))
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ItemId::intern(&s))
    }
}

/// Per-kind monotonic counters producing `{kind}-{n}` identifiers.
///
/// Counters belong to a document, not the process, so two documents can
/// both own a `rect-1`. Counters start at 1; `text-0` is reserved for the
/// welcome text of a fresh document.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: [u32; ItemKind::ALL.len()],
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self {
            next: [1; ItemKind::ALL.len()],
        }
    }

    /// Allocate the next ID for `kind` and advance its counter.
    pub fn allocate(&mut self, kind: ItemKind) -> ItemId {
        let slot = &mut self.next[kind.index()];
        let n = *slot;
        *slot += 1;
        ItemId::intern(&format!("{}-{n}", kind.as_str()))
    }

    /// The number the next `allocate(kind)` will use.
    pub fn peek(&self, kind: ItemKind) -> u32 {
        self.next[kind.index()]
    }
}
