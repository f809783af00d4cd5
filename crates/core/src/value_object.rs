//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. Reference
/// data such as a location's limits is modelled this way: the core reads it,
/// copies it, and never mutates it.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
