//! Handles for definitions held by a registry.
//!
//! Handles are plain indices into the registry arenas. They stay valid for
//! the lifetime of the registry that issued them, even when the identifier
//! they were registered under is later overwritten.

use std::fmt;

/// Handle to a media type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaTypeId(pub u32);

impl MediaTypeId {
    /// Create a new MediaTypeId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MediaTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mt{}", self.0)
    }
}

/// Handle to a user (plain) type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserTypeId(pub u32);

impl UserTypeId {
    /// Create a new UserTypeId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UserTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ut{}", self.0)
    }
}

/// A type usable as a reference: either a user type or a media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    User(UserTypeId),
    Media(MediaTypeId),
}

impl From<UserTypeId> for TypeRef {
    fn from(id: UserTypeId) -> Self {
        TypeRef::User(id)
    }
}

impl From<MediaTypeId> for TypeRef {
    fn from(id: MediaTypeId) -> Self {
        TypeRef::Media(id)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::User(id) => write!(f, "{}", id),
            TypeRef::Media(id) => write!(f, "{}", id),
        }
    }
}
