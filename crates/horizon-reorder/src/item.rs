//! Item identity for reorderable lists.
//!
//! The engine never inspects item payloads. All it needs is a stable,
//! position-independent identity per item so that a commit can detect when
//! the list changed underneath an open drag session. Hosts either implement
//! [`OrderedItem`] on their own row type or wrap plain values in [`Keyed`].

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for process-unique item IDs. Starts at 1 so 0 stays free for
/// hosts that want a sentinel in their own keying schemes.
static ITEM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an item, independent of its current position.
///
/// IDs compare by value only. Two lists may reuse the same raw IDs without
/// interfering, since a session is only ever validated against the list it
/// was begun on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(u64);

impl ItemId {
    /// Allocates a fresh process-unique ID.
    pub fn unique() -> Self {
        Self(ITEM_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps an identifier the host already maintains, such as a database
    /// key or a content hash.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Trait for items that can participate in drag reordering.
pub trait OrderedItem {
    /// Returns the stable identity of this item.
    ///
    /// The ID must stay constant for as long as the item is in the list and
    /// must be unique within that list.
    fn item_id(&self) -> ItemId;
}

impl OrderedItem for ItemId {
    fn item_id(&self) -> ItemId {
        *self
    }
}

/// Payload wrapper that pairs a value with a stable [`ItemId`].
///
/// Convenient for hosts whose row type has no natural key of its own:
///
/// ```
/// use horizon_reorder::Keyed;
///
/// let rows = Keyed::wrap(["alpha", "beta"]);
/// assert_eq!(*rows[0].value(), "alpha");
/// assert_ne!(rows[0].id(), rows[1].id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyed<T> {
    id: ItemId,
    value: T,
}

impl<T> Keyed<T> {
    /// Wraps a value with a freshly allocated ID.
    pub fn new(value: T) -> Self {
        Self {
            id: ItemId::unique(),
            value,
        }
    }

    /// Wraps a value with an ID the host chose itself.
    pub const fn with_id(id: ItemId, value: T) -> Self {
        Self { id, value }
    }

    /// Returns the stable ID of this entry.
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns a reference to the wrapped value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Returns a mutable reference to the wrapped value.
    ///
    /// Mutating the payload does not disturb an open drag session; only the
    /// ID participates in staleness checks.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consumes the entry and returns the wrapped value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Wraps each value in order, allocating a fresh ID per entry.
    pub fn wrap<I>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().map(Self::new).collect()
    }
}

impl<T> OrderedItem for Keyed<T> {
    fn item_id(&self) -> ItemId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_are_distinct() {
        let a = ItemId::unique();
        let b = ItemId::unique();
        assert_ne!(a, b);
    }

    #[test]
    fn test_raw_roundtrip() {
        let id = ItemId::from_raw(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id, ItemId::from_raw(42));
    }

    #[test]
    fn test_keyed_accessors() {
        let mut entry = Keyed::new(String::from("hello"));
        assert_eq!(entry.value(), "hello");
        assert_eq!(entry.item_id(), entry.id());

        entry.value_mut().push_str(" world");
        assert_eq!(entry.into_value(), "hello world");
    }

    #[test]
    fn test_with_id_keeps_host_key() {
        let entry = Keyed::with_id(ItemId::from_raw(7), "payload");
        assert_eq!(entry.id().raw(), 7);
    }

    #[test]
    fn test_wrap_preserves_order() {
        let rows = Keyed::wrap(["a", "b", "c"]);
        let values: Vec<&str> = rows.iter().map(|row| *row.value()).collect();
        assert_eq!(values, ["a", "b", "c"]);

        let ids: Vec<ItemId> = rows.iter().map(Keyed::id).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn test_item_id_implements_ordered_item() {
        let id = ItemId::from_raw(9);
        assert_eq!(id.item_id(), id);
    }
}
