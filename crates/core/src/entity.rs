//! Records identified by a stable business key.

/// A record whose identity survives changes to its attributes.
///
/// Replacing a warehouse produces a new record under the same business-unit
/// code; comparing ids is how a successor is matched to its predecessor.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Whether `other` carries the same identity.
    fn same_identity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
