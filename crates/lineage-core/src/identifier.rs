//! Node identifiers backed by string interning.
//!
//! [`Id`] is a cheap `Copy` handle to an interned string. Ids read from a
//! source file keep their spelling; nodes without one get a fresh id from an
//! [`IdGenerator`].

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<T>(f: impl FnOnce(&mut DefaultStringInterner) -> T) -> T {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Stable identity of a person in the family tree.
///
/// # Examples
///
/// ```
/// use lineage_core::identifier::Id;
///
/// let ada = Id::new("ada");
/// assert_eq!(ada, Id::new("ada"));
/// assert_eq!(ada, "ada");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        });
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Monotonic generator for fresh node ids.
///
/// Produces `{prefix}-1`, `{prefix}-2`, ... and skips any id the caller
/// reports as already taken.
///
/// # Examples
///
/// ```
/// use lineage_core::identifier::{Id, IdGenerator};
///
/// let mut ids = IdGenerator::new("person");
/// let taken = Id::new("person-1");
///
/// let fresh = ids.next_id(|id| id == taken);
/// assert_eq!(fresh, "person-2");
/// ```
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    counter: usize,
}

impl IdGenerator {
    /// Creates a generator whose ids start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }

    /// Returns the next id for which `is_taken` returns `false`.
    pub fn next_id(&mut self, is_taken: impl Fn(Id) -> bool) -> Id {
        loop {
            self.counter += 1;
            let id = Id::new(&format!("{}-{}", self.prefix, self.counter));
            if !is_taken(id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("person")
    }
}
