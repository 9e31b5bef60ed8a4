//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are immutable once created: a document
/// status or a presentation category is fully described by its variant. To
/// "change" one, produce a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Shade { Light, Dark }
///
/// impl ValueObject for Shade {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
