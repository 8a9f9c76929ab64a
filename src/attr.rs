//! Typed slots over [`http::Extensions`].
//!
//! A builder's attribute store is a type-keyed map. Each slot is addressed by a
//! marker type implementing [`AttributeKey`], which fixes the type of the value
//! stored under it. [`Attribute<K>`] is the entry actually inserted in the map,
//! so two keys sharing a value type never collide.

use http::Extensions;

/// Associates a slot marker type with the type of value stored in that slot.
pub(crate) trait AttributeKey: Copy + Clone + 'static {
    type Value: Clone + Send + Sync + 'static;
}

/// The entry stored in [`Extensions`] for the slot `K`.
///
/// An entry holding `None` and a missing entry both read as an empty slot.
#[derive(Clone)]
pub(crate) struct Attribute<K: AttributeKey>(Option<K::Value>);

impl<K: AttributeKey> Default for Attribute<K> {
    fn default() -> Self {
        Attribute(None)
    }
}

impl<K> Attribute<K>
where
    K: AttributeKey,
{
    /// Returns a reference to the value held in the slot, if any.
    #[inline]
    pub(crate) fn get(ext: &Extensions) -> Option<&K::Value> {
        ext.get::<Attribute<K>>().and_then(|v| v.0.as_ref())
    }

    /// Returns a mutable reference to the value held in the slot, filling an
    /// empty slot with `init()` first.
    #[inline]
    pub(crate) fn get_or_insert_with<F>(ext: &mut Extensions, init: F) -> &mut K::Value
    where
        F: FnOnce() -> K::Value,
    {
        ext.get_or_insert_default::<Attribute<K>>()
            .0
            .get_or_insert_with(init)
    }

    /// Removes the value from the slot and returns it, leaving the slot empty.
    #[inline]
    pub(crate) fn take(ext: &mut Extensions) -> Option<K::Value> {
        ext.remove::<Attribute<K>>().and_then(|v| v.0)
    }
}
