//! Reorderable list model.
//!
//! [`ReorderableList<T>`] pairs owned item storage with a
//! [`ReorderManager`] and a set of change signals, so a host can keep one
//! shared handle that views observe. Structural edits go through the model
//! and emit before/after signal pairs; drag gestures go through the same
//! manager operations as the pure engine, with a successful commit splicing
//! the storage in place and emitting the moved-rows pair.
//!
//! Interior mutability throughout: every method takes `&self`, so the model
//! can sit behind an `Arc` shared between the gesture source and the views.
//! Locks are held only while storage is touched, never while slots run,
//! with one exception: the mutation closure inside a before/after pair runs
//! under the write lock so observers on either side see a consistent list.
//!
//! # Example
//!
//! ```
//! use horizon_reorder::{DragGesture, Keyed, ReorderableList};
//!
//! let list = ReorderableList::new(Keyed::wrap(["a", "b", "c"]));
//! list.signals().rows_moved.connect(|&(from, to)| {
//!     println!("row {from} is now row {to}");
//! });
//!
//! list.handle_gesture(DragGesture::Start { index: 0 })?;
//! list.handle_gesture(DragGesture::Drop { index: 2 })?;
//!
//! let order: Vec<&str> = list.items().iter().map(|item| *item.value()).collect();
//! assert_eq!(order, ["b", "c", "a"]);
//! # Ok::<(), horizon_reorder::ReorderError>(())
//! ```

use parking_lot::{Mutex, RwLock};

use crate::drag::{DragGesture, DragSession, DragState, ReorderManager, TargetPolicy};
use crate::error::Result;
use crate::item::OrderedItem;
use crate::signal::Signal;

/// Change notifications for a [`ReorderableList`].
///
/// Structural signals come in before/after pairs around the mutation, so
/// observers can capture state on either side. Row arguments always refer
/// to the list the mutation applies to.
pub struct ListSignals {
    /// Emitted just before rows are inserted.
    /// Args: (first row, last row)
    pub rows_about_to_be_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted just before rows are removed.
    /// Args: (first row, last row)
    pub rows_about_to_be_removed: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted just before a committed drag splices the list.
    /// Args: (source row, destination row)
    pub rows_about_to_be_moved: Signal<(usize, usize)>,

    /// Emitted after a committed drag has spliced the list.
    /// Args: (source row, destination row)
    pub rows_moved: Signal<(usize, usize)>,

    /// Emitted after an item's payload was modified in place.
    /// Args: row of the modified item
    pub data_changed: Signal<usize>,

    /// Emitted before the whole list is replaced or cleared.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the whole list was replaced or cleared.
    pub model_reset: Signal<()>,
}

impl ListSignals {
    /// Creates a fresh set of disconnected signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            rows_about_to_be_moved: Signal::new(),
            rows_moved: Signal::new(),
            data_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits the insertion pair around `insert_fn`.
    pub fn emit_rows_inserted<F>(&self, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((first, last));
        insert_fn();
        self.rows_inserted.emit((first, last));
    }

    /// Emits the removal pair around `remove_fn`.
    pub fn emit_rows_removed<F>(&self, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((first, last));
        remove_fn();
        self.rows_removed.emit((first, last));
    }

    /// Emits the move pair around `move_fn`.
    pub fn emit_rows_moved<F>(&self, from: usize, to: usize, move_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_moved.emit((from, to));
        move_fn();
        self.rows_moved.emit((from, to));
    }

    /// Emits the reset pair around `reset_fn`.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

impl Default for ListSignals {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered list of items with signal-emitting edits and drag reordering.
///
/// The list owns its storage. Reads hand out a guard; writes go through
/// methods that wrap the mutation in the matching signal pair. Drag
/// gestures run through an internal [`ReorderManager`], so the lifecycle
/// and error behavior match the standalone engine exactly, except that a
/// successful commit splices the owned storage instead of returning a copy.
pub struct ReorderableList<T> {
    items: RwLock<Vec<T>>,
    manager: Mutex<ReorderManager>,
    signals: ListSignals,
}

impl<T> ReorderableList<T> {
    /// Creates a list over the given items.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            manager: Mutex::new(ReorderManager::new()),
            signals: ListSignals::new(),
        }
    }

    /// Creates an empty list.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a list with an explicit out-of-range drop policy.
    pub fn with_policy(items: Vec<T>, policy: TargetPolicy) -> Self {
        Self {
            items: RwLock::new(items),
            manager: Mutex::new(ReorderManager::with_policy(policy)),
            signals: ListSignals::new(),
        }
    }

    /// Returns the number of items in the list.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: T) {
        let row = self.items.read().len();
        self.signals.emit_rows_inserted(row, row, || {
            self.items.write().push(item);
        });
    }

    /// Inserts an item at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&self, index: usize, item: T) {
        self.signals.emit_rows_inserted(index, index, || {
            self.items.write().insert(index, item);
        });
    }

    /// Removes and returns the item at the specified index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&self, index: usize) -> T {
        let mut removed = None;
        self.signals.emit_rows_removed(index, index, || {
            removed = Some(self.items.write().remove(index));
        });
        removed.unwrap()
    }

    /// Removes all items from the list.
    pub fn clear(&self) {
        self.signals.emit_reset(|| {
            self.items.write().clear();
        });
    }

    /// Replaces all items in the list.
    pub fn set_items(&self, items: Vec<T>) {
        self.signals.emit_reset(|| {
            *self.items.write() = items;
        });
    }

    /// Returns read-only access to the items.
    ///
    /// The returned guard holds the read lock; drop it before calling any
    /// mutating method on the same thread.
    pub fn items(&self) -> impl std::ops::Deref<Target = Vec<T>> + '_ {
        self.items.read()
    }

    /// Provides mutable access to an item's payload via a closure.
    ///
    /// Emits `data_changed` after the closure returns. Returns `None` if
    /// `index` is out of range. Payload edits do not disturb an open drag
    /// session; identity is all the session checks.
    pub fn modify<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut items = self.items.write();
        if index >= items.len() {
            return None;
        }
        let result = f(&mut items[index]);
        drop(items);

        self.signals.data_changed.emit(index);
        Some(result)
    }

    /// Returns the signal set for connecting observers.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Returns the current drag state.
    pub fn drag_state(&self) -> DragState {
        self.manager.lock().state()
    }

    /// Returns whether a drag session is open.
    pub fn is_dragging(&self) -> bool {
        self.manager.lock().is_dragging()
    }

    /// Returns a copy of the open drag session, if any.
    pub fn session(&self) -> Option<DragSession> {
        self.manager.lock().session().copied()
    }

    /// Returns the out-of-range drop policy.
    pub fn target_policy(&self) -> TargetPolicy {
        self.manager.lock().target_policy()
    }

    /// Sets the out-of-range drop policy. Takes effect from the next commit.
    pub fn set_target_policy(&self, policy: TargetPolicy) {
        self.manager.lock().set_target_policy(policy);
    }

    /// Discards the open drag session, if any. The list is untouched.
    pub fn cancel_drag(&self) {
        self.manager.lock().cancel_drag();
    }
}

impl<T: OrderedItem> ReorderableList<T> {
    /// Opens a drag session for the item at `source_index`.
    ///
    /// # Errors
    ///
    /// Same as [`ReorderManager::begin_drag`].
    pub fn begin_drag(&self, source_index: usize) -> Result<DragSession> {
        let mut manager = self.manager.lock();
        let items = self.items.read();
        manager.begin_drag(&items, source_index)
    }

    /// Records the current hover candidate for the open session.
    ///
    /// # Errors
    ///
    /// Same as [`ReorderManager::update_target`].
    pub fn update_target(&self, target_index: isize) -> Result<DragSession> {
        self.manager.lock().update_target(target_index)
    }

    /// Validates and closes the open session, splicing the list in place.
    ///
    /// Returns the `(source, target)` move that was applied. A move that
    /// resolves to its own source leaves the list untouched and emits
    /// nothing; an effective move emits the moved-rows signal pair around
    /// the splice. On error nothing is emitted and the list is untouched.
    ///
    /// # Errors
    ///
    /// Same as [`ReorderManager::resolve_drop`].
    pub fn commit(&self) -> Result<(usize, usize)> {
        let (from, to) = {
            let mut manager = self.manager.lock();
            let items = self.items.read();
            manager.resolve_drop(&items)?
        };

        if from != to {
            self.signals.emit_rows_moved(from, to, || {
                let mut items = self.items.write();
                let moved = items.remove(from);
                items.insert(to, moved);
            });
        }

        Ok((from, to))
    }

    /// Feeds one host gesture into the drag lifecycle.
    ///
    /// [`DragGesture::Start`] opens a session, [`DragGesture::Over`]
    /// updates the hover target, [`DragGesture::Drop`] records the final
    /// target and commits, [`DragGesture::Cancel`] discards the session.
    /// Returns the applied move for a committing gesture, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Those of the underlying operation; a [`DragGesture::Drop`] with no
    /// open session fails with [`NoActiveSession`](crate::ReorderError::NoActiveSession)
    /// before touching the list.
    pub fn handle_gesture(&self, gesture: DragGesture) -> Result<Option<(usize, usize)>> {
        match gesture {
            DragGesture::Start { index } => {
                self.begin_drag(index)?;
                Ok(None)
            }
            DragGesture::Over { index } => {
                self.update_target(index)?;
                Ok(None)
            }
            DragGesture::Drop { index } => {
                self.update_target(index)?;
                self.commit().map(Some)
            }
            DragGesture::Cancel => {
                self.cancel_drag();
                Ok(None)
            }
        }
    }
}

impl<T: Clone> ReorderableList<T> {
    /// Returns a detached copy of the items.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T> Default for ReorderableList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReorderableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReorderableList")
            .field("items", &*self.items.read())
            .field("manager", &*self.manager.lock())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(
    ReorderableList<crate::item::Keyed<String>>: Send, Sync
);
