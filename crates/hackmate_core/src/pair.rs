//! Canonical keys for unordered pairs of user identities
//!
//! Connection lookups must succeed regardless of which party initiated the
//! request, so every connection row carries a single order-independent key
//! derived from both identities. A UNIQUE index over that key is what makes
//! duplicate and reciprocal requests impossible at the store.

use std::fmt::{self, Display};

use crate::error::{CoreError, Result};
use crate::id::UserId;

/// An order-independent key for a pair of distinct user identities.
///
/// `PairKey::new(a, b)` and `PairKey::new(b, a)` produce the same key. The
/// rendered form (`"{lo}:{hi}"`, UUIDs sorted ascending) is the exact string
/// stored in the `pair_key` field and covered by its UNIQUE index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairKey {
    lo: UserId,
    hi: UserId,
}

impl PairKey {
    /// Canonicalize two identities into a pair key.
    ///
    /// Fails with `InvalidIdentity` if either identity is nil and with
    /// `SelfConnection` if both are the same user.
    pub fn new(a: UserId, b: UserId) -> Result<Self> {
        if a.is_nil() || b.is_nil() {
            return Err(CoreError::invalid_identity(if a.is_nil() { a } else { b }));
        }
        if a == b {
            return Err(CoreError::SelfConnection { user_id: a });
        }

        let (lo, hi) = if a.uuid() <= b.uuid() { (a, b) } else { (b, a) };
        Ok(Self { lo, hi })
    }

    /// The lexicographically smaller identity
    pub fn lo(&self) -> UserId {
        self.lo
    }

    /// The lexicographically larger identity
    pub fn hi(&self) -> UserId {
        self.hi
    }

    /// True if `user` is one of the two identities in the pair
    pub fn contains(&self, user: UserId) -> bool {
        self.lo == user || self.hi == user
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo.uuid(), self.hi.uuid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_symmetry() {
        let a = UserId::generate();
        let b = UserId::generate();

        let ab = PairKey::new(a, b).unwrap();
        let ba = PairKey::new(b, a).unwrap();

        assert_eq!(ab, ba);
        assert_eq!(ab.to_string(), ba.to_string());
    }

    #[test]
    fn test_pair_key_ordering() {
        let a = UserId::generate();
        let b = UserId::generate();

        let key = PairKey::new(a, b).unwrap();
        assert!(key.lo().uuid() < key.hi().uuid());
        assert!(key.contains(a));
        assert!(key.contains(b));
        assert!(!key.contains(UserId::generate()));
    }

    #[test]
    fn test_pair_key_rejects_self() {
        let a = UserId::generate();
        let err = PairKey::new(a, a).unwrap_err();
        assert!(matches!(err, CoreError::SelfConnection { .. }));
    }

    #[test]
    fn test_pair_key_rejects_nil() {
        let a = UserId::generate();
        assert!(matches!(
            PairKey::new(UserId::nil(), a).unwrap_err(),
            CoreError::InvalidIdentity { .. }
        ));
        assert!(matches!(
            PairKey::new(a, UserId::nil()).unwrap_err(),
            CoreError::InvalidIdentity { .. }
        ));
    }
}
