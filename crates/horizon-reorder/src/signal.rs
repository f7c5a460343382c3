//! Signal/slot change notification.
//!
//! A synchronous take on the Qt-style signal/slot pattern: slots are plain
//! closures invoked on the emitting thread, in connection order. The engine
//! owns no event loop, so there are no queued or cross-thread deferred
//! connections; hosts that need deferred delivery connect a slot that
//! forwards into their own dispatch layer.
//!
//! Emission snapshots the connected slots first, so a slot may connect or
//! disconnect (including itself) while a dispatch is in flight.
//!
//! # Example
//!
//! ```
//! use horizon_reorder::Signal;
//!
//! let moved: Signal<(usize, usize)> = Signal::new();
//! moved.connect(|&(from, to)| {
//!     println!("row {from} moved to {to}");
//! });
//! moved.emit((0, 2));
//! ```

use std::sync::Arc;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Identifier for a single signal-slot connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type SlotTable<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A signal carrying values of type `Args` to connected slots.
///
/// Signals are `Send + Sync`; any thread may connect, disconnect, or emit.
/// Slots run synchronously on the emitting thread.
pub struct Signal<Args> {
    slots: Arc<SlotTable<Args>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Signal<Args> {
    /// Creates a signal with no connections.
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connects a slot and returns its connection ID.
    ///
    /// The slot stays connected until [`disconnect`](Self::disconnect) or
    /// [`disconnect_all`](Self::disconnect_all) removes it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Connects a slot whose lifetime is bound to the returned guard.
    ///
    /// Dropping the guard disconnects the slot. The guard may outlive the
    /// signal; disconnecting after the signal is gone is a no-op.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            slots: Arc::downgrade(&self.slots),
            id: self.connect(slot),
        }
    }

    /// Removes a connection. Returns `true` if it was still connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Removes every connection.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Returns the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Blocks or unblocks emission. A blocked signal drops emits silently.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::Release);
    }

    /// Returns whether the signal is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Acquire)
    }

    /// Invokes every connected slot with `args`, in connection order.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(
                target: "horizon_reorder::signal",
                "signal blocked, dropping emit"
            );
            return;
        }

        // Snapshot so slots can connect/disconnect re-entrantly while we
        // dispatch without holding the table lock.
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();

        tracing::trace!(
            target: "horizon_reorder::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in &slots {
            slot(&args);
        }
    }
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::Relaxed))
            .finish()
    }
}

/// RAII guard for a scoped connection.
///
/// Holds the connection open; dropping it disconnects the slot.
#[must_use = "dropping the guard immediately disconnects the slot"]
pub struct ConnectionGuard<Args> {
    slots: Weak<SlotTable<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// Returns the ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.lock().remove(self.id);
        }
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_connect_and_emit() {
        let signal: Signal<i32> = Signal::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = Arc::clone(&received);
        signal.connect(move |value| {
            received_clone.lock().push(*value);
        });

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1, 2]);
    }

    #[test]
    fn test_multiple_slots_run_in_connection_order() {
        let signal: Signal<()> = Signal::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order_clone = Arc::clone(&order);
            signal.connect(move |()| {
                order_clone.lock().push(tag);
            });
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_disconnect() {
        let signal: Signal<i32> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        let id = signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        signal.emit(2);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_disconnect_all() {
        let signal: Signal<()> = Signal::new();
        signal.connect(|()| {});
        signal.connect(|()| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_drops_emit() {
        let signal: Signal<i32> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = Arc::clone(&count);
        signal.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(1);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scoped_connection_disconnects_on_drop() {
        let signal: Signal<()> = Signal::new();
        let count = Arc::new(AtomicUsize::new(0));

        {
            let count_clone = Arc::clone(&count);
            let _guard = signal.connect_scoped(move |()| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            });
            signal.emit(());
        }

        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_outliving_signal_is_harmless() {
        let guard = {
            let signal: Signal<()> = Signal::new();
            signal.connect_scoped(|()| {})
        };
        drop(guard);
    }

    #[test]
    fn test_slot_can_connect_during_emit() {
        // Connecting from inside a slot must not deadlock.
        let signal = Arc::new(Signal::<()>::new());
        let signal_clone = Arc::clone(&signal);
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&count);

        signal.connect(move |()| {
            let count_inner = Arc::clone(&count_clone);
            signal_clone.connect(move |()| {
                count_inner.fetch_add(1, Ordering::SeqCst);
            });
        });

        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(signal.connection_count(), 2);

        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_signal_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Signal<(usize, usize)>>();
    }
}
