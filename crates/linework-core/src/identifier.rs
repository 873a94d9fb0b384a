//! Interned identifiers and injectable id generation.
//!
//! [`Id`] is a copyable handle to an interned string, used for node ids, edge
//! ids, node type keys and port names. Fresh ids come from an
//! [`IdGenerator`] passed in by the caller, so factory output is
//! deterministic under test.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use linework_core::identifier::Id;
///
/// let a = Id::new("node_1");
/// let b: Id = "node_1".into();
/// assert_eq!(a, b);
/// assert_eq!(a, "node_1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns true if the identifier is the empty string
    pub fn is_empty(&self) -> bool {
        *self == ""
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| interner.resolve(self.0).map(str::to_owned));
        match value {
            Some(value) => f.write_str(&value),
            None => write!(f, "<unresolved {:?}>", self.0),
        }
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

/// Source of fresh identifiers.
///
/// Implementations must never hand out the same id twice.
pub trait IdGenerator {
    /// Returns a new identifier whose text starts with `prefix`.
    fn next_id(&mut self, prefix: &str) -> Id;
}

/// Monotonic counter producing `<prefix>_<n>` ids.
///
/// # Examples
///
/// ```
/// use linework_core::identifier::{IdGenerator, SequentialIds};
///
/// let mut ids = SequentialIds::default();
/// assert_eq!(ids.next_id("node"), "node_1");
/// assert_eq!(ids.next_id("edge"), "edge_2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    /// Creates a generator whose first id uses `start + 1`.
    pub fn starting_at(start: u64) -> Self {
        Self { counter: start }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, prefix: &str) -> Id {
        self.counter += 1;
        Id::new(&format!("{prefix}_{}", self.counter))
    }
}
