//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values.
/// Construction should validate, so that holding one is proof the value is
/// well-formed (e.g. a discount factor that is finite and positive).
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Percent(f64);
///
/// impl ValueObject for Percent {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
