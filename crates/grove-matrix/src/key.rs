//! Categorical keys.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::Equivalent;

use grove_core::{Region, UtilizationClass};

/// One component of a key tuple.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Key {
    /// A text alias (zone, species).
    Str(String),
    /// A numeric code (utilization class index, item number).
    Int(i32),
    /// A single-character code (stocking class).
    Char(char),
    /// A region.
    Region(Region),
}

impl Key {
    /// Borrowed form, used for lookups without allocating.
    pub fn as_key_ref(&self) -> KeyRef<'_> {
        match self {
            Self::Str(s) => KeyRef::Str(s),
            Self::Int(i) => KeyRef::Int(*i),
            Self::Char(c) => KeyRef::Char(*c),
            Self::Region(r) => KeyRef::Region(*r),
        }
    }
}

// Must agree with `KeyRef`'s hash so borrowed lookups find owned keys.
impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key_ref().hash(state);
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_key_ref().fmt(f)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<Region> for Key {
    fn from(r: Region) -> Self {
        Self::Region(r)
    }
}

impl From<UtilizationClass> for Key {
    fn from(u: UtilizationClass) -> Self {
        Self::Int(u.index())
    }
}

/// A borrowed key component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyRef<'a> {
    /// A text alias.
    Str(&'a str),
    /// A numeric code.
    Int(i32),
    /// A single-character code.
    Char(char),
    /// A region.
    Region(Region),
}

impl KeyRef<'_> {
    /// Owned copy.
    pub fn to_key(self) -> Key {
        match self {
            Self::Str(s) => Key::Str(s.to_string()),
            Self::Int(i) => Key::Int(i),
            Self::Char(c) => Key::Char(c),
            Self::Region(r) => Key::Region(r),
        }
    }
}

impl fmt::Display for KeyRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Int(i) => write!(f, "{i}"),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Region(r) => write!(f, "{r:?}"),
        }
    }
}

impl Equivalent<Key> for KeyRef<'_> {
    fn equivalent(&self, key: &Key) -> bool {
        *self == key.as_key_ref()
    }
}

impl<'a> From<&'a str> for KeyRef<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a Key> for KeyRef<'a> {
    fn from(k: &'a Key) -> Self {
        k.as_key_ref()
    }
}

impl From<i32> for KeyRef<'_> {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<char> for KeyRef<'_> {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<Region> for KeyRef<'_> {
    fn from(r: Region) -> Self {
        Self::Region(r)
    }
}

impl From<UtilizationClass> for KeyRef<'_> {
    fn from(u: UtilizationClass) -> Self {
        Self::Int(u.index())
    }
}

/// Anything that can address a key component.
pub trait AsKey {
    /// Borrowed key form.
    fn key_ref(&self) -> KeyRef<'_>;
}

impl<T: AsKey + ?Sized> AsKey for &T {
    fn key_ref(&self) -> KeyRef<'_> {
        (**self).key_ref()
    }
}

impl AsKey for str {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl AsKey for String {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Str(self)
    }
}

impl AsKey for i32 {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Int(*self)
    }
}

impl AsKey for char {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Char(*self)
    }
}

impl AsKey for Region {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Region(*self)
    }
}

impl AsKey for UtilizationClass {
    fn key_ref(&self) -> KeyRef<'_> {
        KeyRef::Int(self.index())
    }
}

impl AsKey for Key {
    fn key_ref(&self) -> KeyRef<'_> {
        self.as_key_ref()
    }
}

/// An owned key type a typed view can hand back during enumeration.
pub trait MatrixKey: AsKey + Clone + Sized {
    /// Convert a stored key, or `None` if it is the wrong kind.
    fn from_key(key: &Key) -> Option<Self>;
}

impl MatrixKey for String {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl MatrixKey for i32 {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl MatrixKey for char {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl MatrixKey for Region {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Region(r) => Some(*r),
            _ => None,
        }
    }
}

impl MatrixKey for UtilizationClass {
    fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::Int(i) => UtilizationClass::from_index(*i).ok(),
            _ => None,
        }
    }
}

impl MatrixKey for Key {
    fn from_key(key: &Key) -> Option<Self> {
        Some(key.clone())
    }
}
