//! Drag-and-drop reordering for ordered lists, independent of any UI
//! framework.
//!
//! This crate implements the reorder lifecycle every list view needs and
//! nothing a particular toolkit would impose. A host maps its pointer
//! events onto four operations:
//!
//! - **begin** a drag on the item at a source position,
//! - **update** the hover target as the pointer moves,
//! - **commit** the drop, producing the reordered list, or
//! - **cancel**, discarding the gesture.
//!
//! Between begin and commit the engine holds a [`DragSession`] that
//! remembers where the drag started, what item it picked up, and the most
//! recent hover target. Commits are atomic and validated: if the list was
//! mutated while the drag was in flight, the commit fails with a
//! [`StaleSession`](ReorderError::StaleSession) error instead of moving
//! the wrong item.
//!
//! Two entry points cover the common hosting shapes:
//!
//! - [`ReorderManager`] is the pure engine. It never owns the list;
//!   `commit` borrows the items and returns a reordered copy.
//! - [`ReorderableList`] owns its items behind locks, splices them in
//!   place on commit, and emits [`Signal`]s around every structural
//!   change, in the style of a model/view toolkit.
//!
//! # Quick start
//!
//! ```
//! use horizon_reorder::{DragGesture, Keyed, ReorderableList};
//!
//! let list = ReorderableList::new(Keyed::wrap([
//!     "Item 1", "Item 2", "Item 3", "Item 4",
//! ]));
//!
//! // Views observe structural changes through signals.
//! list.signals().rows_moved.connect(|&(from, to)| {
//!     println!("row {from} moved to {to}");
//! });
//!
//! // The host forwards its pointer events as gestures.
//! list.handle_gesture(DragGesture::Start { index: 0 })?;
//! list.handle_gesture(DragGesture::Over { index: 2 })?;
//! let moved = list.handle_gesture(DragGesture::Drop { index: 2 })?;
//! assert_eq!(moved, Some((0, 2)));
//!
//! let order: Vec<&str> = list.items().iter().map(|item| *item.value()).collect();
//! assert_eq!(order, ["Item 2", "Item 3", "Item 1", "Item 4"]);
//! # Ok::<(), horizon_reorder::ReorderError>(())
//! ```
//!
//! # Item identity
//!
//! Staleness detection needs a stable identity per item, declared through
//! the [`OrderedItem`] trait. Types with a natural key implement it
//! directly; everything else can be wrapped in [`Keyed`], which allocates
//! a process-unique [`ItemId`] per entry.
//!
//! # Threading
//!
//! The gesture lifecycle is cooperative: one drag at a time, driven from
//! the host's event flow. [`ReorderableList`] is still `Send + Sync` so it
//! can be shared behind an `Arc`, and slots run synchronously on whichever
//! thread emits.

mod drag;
mod error;
mod item;
mod list;
mod signal;

pub use drag::{DragGesture, DragSession, DragState, ReorderManager, TargetPolicy};
pub use error::{ReorderError, Result, StaleReason};
pub use item::{ItemId, Keyed, OrderedItem};
pub use list::{ListSignals, ReorderableList};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
