//! Interned identifiers.
//!
//! Identifiers in the syntax arena are stored as [`Name`] handles. Equality
//! is an integer compare; the text is recovered through the
//! [`StringInterner`] that produced the handle.

use std::fmt;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Interned identifier text.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string, pre-interned by every interner.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Error when the interner runs out of 32-bit indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("string interner exceeded capacity ({count} strings)")]
pub struct InternError {
    pub count: usize,
}

#[derive(Default)]
struct Strings {
    map: FxHashMap<&'static str, Name>,
    texts: Vec<&'static str>,
}

/// Thread-safe string interner.
///
/// Interned text is leaked to obtain `'static` references, so lookups never
/// hold the lock past the call. Interners live for the whole compilation.
pub struct StringInterner {
    strings: RwLock<Strings>,
}

impl StringInterner {
    pub fn new() -> Self {
        let mut strings = Strings::default();
        strings.map.insert("", Name::EMPTY);
        strings.texts.push("");
        StringInterner {
            strings: RwLock::new(strings),
        }
    }

    /// Intern `text`, returning its handle or an error on overflow.
    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.strings.read().map.get(text) {
            return Ok(name);
        }

        let mut strings = self.strings.write();
        // Another writer may have won the race between the two locks.
        if let Some(&name) = strings.map.get(text) {
            return Ok(name);
        }
        let count = strings.texts.len();
        let name = Name(u32::try_from(count).map_err(|_| InternError { count })?);
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        strings.texts.push(leaked);
        strings.map.insert(leaked, name);
        Ok(name)
    }

    /// Intern `text`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` strings have been interned.
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text).unwrap_or_else(|e| panic!("{e}"))
    }

    /// The text of `name`.
    ///
    /// # Panics
    /// Panics if `name` was produced by a different interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        let strings = self.strings.read();
        match strings.texts.get(name.0 as usize) {
            Some(&text) => text,
            None => panic!("{name:?} was not produced by this interner"),
        }
    }

    pub fn len(&self) -> usize {
        self.strings.read().texts.len()
    }

    pub fn is_empty(&self) -> bool {
        // The empty string is always present.
        false
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
