//! Drag-session management for list reordering.
//!
//! A reorder gesture is a short-lived session over an immutable view of the
//! list. [`ReorderManager::begin_drag`] opens the session and captures the
//! source position, the source item's identity, and the list length.
//! [`ReorderManager::update_target`] records the current hover candidate;
//! the last value wins. [`ReorderManager::commit`] validates the session
//! against the list as it is *now* and produces the reordered list, and
//! [`ReorderManager::cancel_drag`] discards the session. Both commit and
//! cancel return the manager to idle, so a new drag can begin.
//!
//! A commit is all-or-nothing. It either yields a list with exactly one item
//! relocated or fails without producing anything; there is no partially
//! applied state to observe.
//!
//! # Example
//!
//! ```
//! use horizon_reorder::{Keyed, ReorderManager};
//!
//! let items = Keyed::wrap(["a", "b", "c"]);
//! let mut manager = ReorderManager::new();
//!
//! manager.begin_drag(&items, 2)?;
//! manager.update_target(0)?;
//! let reordered = manager.commit(&items)?;
//!
//! let order: Vec<&str> = reordered.iter().map(|item| *item.value()).collect();
//! assert_eq!(order, ["c", "a", "b"]);
//! # Ok::<(), horizon_reorder::ReorderError>(())
//! ```

use crate::error::{ReorderError, Result};
use crate::item::{ItemId, OrderedItem};

/// State of the reorder state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No drag session is open.
    Idle,
    /// A session is open and tracking a hover target.
    Dragging,
}

/// How a commit resolves a hover target outside the valid range.
///
/// The valid range for a resolved target is `0..len`, interpreted on the
/// list as it stands before the dragged item is taken out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetPolicy {
    /// Clamp to the nearest end of the list. Dragging past the edges of a
    /// list reads as "move to first" or "move to last", so this is the
    /// default.
    #[default]
    Clamp,
    /// Fail the commit with [`ReorderError::IndexOutOfRange`].
    Reject,
}

/// Pointer events as a host reports them, one constructor per engine
/// operation.
///
/// [`Drop`](DragGesture::Drop) folds a final [`Over`](DragGesture::Over)
/// and a commit into one notification, matching how toolkits deliver drop
/// events with a position attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragGesture {
    /// The pointer picked up the item at `index`.
    Start {
        /// Position of the grabbed item.
        index: usize,
    },
    /// The drag is hovering over candidate position `index`.
    Over {
        /// Current candidate position. May be out of range while hovering.
        index: isize,
    },
    /// The item was released over position `index`.
    Drop {
        /// Position the item was released on.
        index: isize,
    },
    /// The drag was aborted (escape key, pointer left the host, ...).
    Cancel,
}

/// Transient record of one in-progress reorder gesture.
///
/// Sessions are cheap copies handed back by the manager so hosts can render
/// drag feedback (highlight the source row, draw an insertion marker). They
/// carry no authority; the manager's internal session is the one that
/// commits. A session never outlives its gesture and is not meant to be
/// persisted.
///
/// Invariant: `list_len >= 1` and `source_index < list_len`, both
/// established at [`ReorderManager::begin_drag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    source_index: usize,
    target_index: Option<isize>,
    source_id: ItemId,
    list_len: usize,
}

impl DragSession {
    /// Position the dragged item had when the drag began.
    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Most recent hover candidate, or `None` if the drag never hovered.
    pub fn target_index(&self) -> Option<isize> {
        self.target_index
    }

    /// Identity of the dragged item.
    pub fn source_id(&self) -> ItemId {
        self.source_id
    }

    /// List length captured when the drag began.
    pub fn list_len(&self) -> usize {
        self.list_len
    }

    /// Checks that `items` is still the list this session was begun on.
    fn validate_against<T: OrderedItem>(&self, items: &[T]) -> Result<()> {
        if items.len() != self.list_len {
            return Err(ReorderError::stale_length(self.list_len, items.len()));
        }
        // Length is unchanged, so the captured source index is in bounds.
        if items[self.source_index].item_id() != self.source_id {
            return Err(ReorderError::stale_identity(self.source_index));
        }
        Ok(())
    }

    /// Resolves the hover target to a concrete position in `0..list_len`.
    ///
    /// A session that never hovered resolves to its own source, which makes
    /// the commit a no-op move.
    fn resolved_target(&self, policy: TargetPolicy) -> Result<usize> {
        let target = match self.target_index {
            Some(target) => target,
            None => return Ok(self.source_index),
        };

        let last = (self.list_len - 1) as isize;
        if (0..=last).contains(&target) {
            return Ok(target as usize);
        }

        match policy {
            TargetPolicy::Clamp => Ok(if target < 0 { 0 } else { last as usize }),
            TargetPolicy::Reject => Err(ReorderError::IndexOutOfRange {
                index: target,
                len: self.list_len,
            }),
        }
    }
}

/// Drives reorder gestures over a caller-owned list.
///
/// The manager holds at most one open [`DragSession`]. It never stores the
/// list itself; every operation that needs item data borrows it for the
/// duration of the call, which is what keeps [`commit`](Self::commit) pure.
/// One manager serves one list: validating a session against some other
/// list of the same length is indistinguishable from an identity mismatch.
///
/// Not synchronized. Wrap it in a lock for shared use, or reach for
/// [`ReorderableList`](crate::ReorderableList), which does exactly that.
#[derive(Debug)]
pub struct ReorderManager {
    session: Option<DragSession>,
    policy: TargetPolicy,
}

impl ReorderManager {
    /// Creates an idle manager with the default [`TargetPolicy`].
    pub fn new() -> Self {
        Self {
            session: None,
            policy: TargetPolicy::default(),
        }
    }

    /// Creates an idle manager with an explicit out-of-range policy.
    pub fn with_policy(policy: TargetPolicy) -> Self {
        Self {
            session: None,
            policy,
        }
    }

    /// Returns the current state of the state machine.
    #[inline]
    pub fn state(&self) -> DragState {
        if self.session.is_some() {
            DragState::Dragging
        } else {
            DragState::Idle
        }
    }

    /// Returns whether a drag session is open.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the open session, if any.
    #[inline]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns the out-of-range policy applied at commit time.
    #[inline]
    pub fn target_policy(&self) -> TargetPolicy {
        self.policy
    }

    /// Sets the out-of-range policy. Takes effect from the next commit.
    pub fn set_target_policy(&mut self, policy: TargetPolicy) {
        self.policy = policy;
    }

    /// Opens a drag session for the item at `source_index`.
    ///
    /// Captures the item's identity and the list length so the commit can
    /// detect mutations made while the drag was in flight. Returns a copy
    /// of the freshly opened session.
    ///
    /// # Errors
    ///
    /// [`ReorderError::SessionAlreadyActive`] if a session is already open;
    /// this is checked before anything else, so a badly indexed second call
    /// still reports the re-entrancy. [`ReorderError::IndexOutOfRange`] if
    /// `source_index` does not address an item (including any index into an
    /// empty list).
    pub fn begin_drag<T: OrderedItem>(
        &mut self,
        items: &[T],
        source_index: usize,
    ) -> Result<DragSession> {
        if self.session.is_some() {
            return Err(ReorderError::SessionAlreadyActive);
        }
        if source_index >= items.len() {
            return Err(ReorderError::IndexOutOfRange {
                index: source_index as isize,
                len: items.len(),
            });
        }

        let session = DragSession {
            source_index,
            target_index: None,
            source_id: items[source_index].item_id(),
            list_len: items.len(),
        };
        self.session = Some(session);

        tracing::trace!(
            target: "horizon_reorder::drag",
            source_index,
            list_len = session.list_len,
            "drag started"
        );

        Ok(session)
    }

    /// Records `target_index` as the current hover candidate.
    ///
    /// May be called any number of times per session; the last value wins.
    /// The index is accepted as-is, even far out of range, because hover
    /// positions wander past the list edges mid-gesture. Range handling is
    /// deferred to the commit, where [`TargetPolicy`] decides. Returns a
    /// copy of the updated session.
    ///
    /// # Errors
    ///
    /// [`ReorderError::NoActiveSession`] if no drag is open.
    pub fn update_target(&mut self, target_index: isize) -> Result<DragSession> {
        let session = self
            .session
            .as_mut()
            .ok_or(ReorderError::NoActiveSession)?;
        session.target_index = Some(target_index);
        Ok(*session)
    }

    /// Validates the open session against `items` and closes it, returning
    /// the `(source, target)` move it resolved to.
    ///
    /// This is the validation half of [`commit`](Self::commit) for callers
    /// that apply the move to storage they own. The session is consumed
    /// whether validation succeeds or fails; a failed drop is not
    /// retryable, the host starts a new gesture instead.
    ///
    /// # Errors
    ///
    /// [`ReorderError::NoActiveSession`] if no drag is open.
    /// [`ReorderError::StaleSession`] if the list length changed or the
    /// item at the captured source is no longer the dragged item.
    /// [`ReorderError::IndexOutOfRange`] if the hover target is out of
    /// range and the policy is [`TargetPolicy::Reject`].
    pub fn resolve_drop<T: OrderedItem>(&mut self, items: &[T]) -> Result<(usize, usize)> {
        let session = self.session.take().ok_or(ReorderError::NoActiveSession)?;
        session.validate_against(items)?;
        let target = session.resolved_target(self.policy)?;

        tracing::trace!(
            target: "horizon_reorder::drag",
            from = session.source_index,
            to = target,
            "drag resolved"
        );

        Ok((session.source_index, target))
    }

    /// Closes the open session and returns the reordered list.
    ///
    /// Pure with respect to `items`: the input is never touched, the result
    /// is a fresh `Vec` with exactly one item relocated. Relocation removes
    /// the item at the source and reinserts it at the target, so every
    /// other item keeps its relative order. A session whose target resolves
    /// to its source returns an equal list.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_drop`](Self::resolve_drop). On error the input is
    /// untouched and the session is gone.
    pub fn commit<T: OrderedItem + Clone>(&mut self, items: &[T]) -> Result<Vec<T>> {
        let (from, to) = self.resolve_drop(items)?;
        Ok(relocate(items, from, to))
    }

    /// Discards the open session, if any.
    ///
    /// Never fails and never touches the list; cancelling an idle manager
    /// is a no-op. After return the manager is idle.
    pub fn cancel_drag(&mut self) {
        if self.session.take().is_some() {
            tracing::trace!(target: "horizon_reorder::drag", "drag cancelled");
        }
    }
}

impl Default for ReorderManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a copy of `items` with the item at `from` moved to `to`.
fn relocate<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    next
}
