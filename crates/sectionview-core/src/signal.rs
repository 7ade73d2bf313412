//! Refresh notifications.
//!
//! An adapter cannot observe the host list widget, so it pushes changes to it:
//! the host registers slots on a [`Signal`] and the adapter emits after every
//! structural change. Emission is synchronous and happens on the emitting
//! thread; there is no queued delivery.
//!
//! # Example
//!
//! ```
//! use sectionview_core::Signal;
//!
//! let rows_inserted = Signal::<(usize, usize)>::new();
//!
//! let slot = rows_inserted.connect(|(start, count)| {
//!     println!("re-layout rows {start}..{}", start + count);
//! });
//!
//! assert_eq!(rows_inserted.emit((3, 2)), 1);
//! assert!(rows_inserted.disconnect(slot));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, SignalError};

new_key_type! {
    /// Handle returned by [`Signal::connect`], used to disconnect that slot.
    ///
    /// Handles are never reused by the same signal, so disconnecting with a
    /// stale handle is a harmless no-op.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of receivers for one kind of notification.
///
/// `Args` is what each receiver is handed: `()` for a bare "something
/// changed", a `(start, count)` tuple for row ranges.
///
/// Receivers are copied out before they run and the lock is released, so a
/// receiver may connect or disconnect slots on the signal it is handling.
/// Such changes apply from the next emission on.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Set while emission is suppressed.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Creates a signal nobody listens to yet.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Registers `slot` to run on every emission.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Unregisters the slot behind `id`. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Unregisters the slot behind `id`, failing if it was already gone.
    pub fn try_disconnect(&self, id: ConnectionId) -> Result<()> {
        if self.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }

    /// Unregisters every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of registered slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Suppresses (or resumes) emission. Emissions while blocked are dropped,
    /// not deferred.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Returns `true` while emission is suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Runs every registered slot with `args` and returns how many ran.
    ///
    /// Returns 0 without running anything while blocked.
    #[tracing::instrument(skip_all, target = "sectionview_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) -> usize {
        if self.is_blocked() {
            tracing::trace!(target: "sectionview_core::signal", "blocked, dropping emission");
            return 0;
        }

        let snapshot: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: "sectionview_core::signal", receivers = snapshot.len(), "emitting");

        for slot in &snapshot {
            slot(&args);
        }
        snapshot.len()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("slots", &self.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + 'static>(
        signal: &Signal<T>,
    ) -> (ConnectionId, Arc<Mutex<Vec<T>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let id = signal.connect(move |args: &T| sink.lock().push(args.clone()));
        (id, log)
    }

    #[test]
    fn test_ranges_reach_receiver() {
        let inserted = Signal::<(usize, usize)>::new();
        let (_, log) = recorder(&inserted);

        assert_eq!(inserted.emit((0, 4)), 1);
        inserted.emit((7, 1));

        assert_eq!(*log.lock(), vec![(0, 4), (7, 1)]);
    }

    #[test]
    fn test_disconnected_receiver_stops_hearing() {
        let changed = Signal::<()>::new();
        let (id, log) = recorder(&changed);

        changed.emit(());
        assert!(changed.disconnect(id));
        assert!(!changed.disconnect(id));
        changed.emit(());

        assert_eq!(log.lock().len(), 1);
        assert_eq!(changed.try_disconnect(id), Err(SignalError::InvalidConnection));
    }

    #[test]
    fn test_blocked_emissions_are_dropped() {
        let removed = Signal::<(usize, usize)>::new();
        let (_, log) = recorder(&removed);

        removed.set_blocked(true);
        assert!(removed.is_blocked());
        assert_eq!(removed.emit((2, 2)), 0);

        removed.set_blocked(false);
        assert_eq!(removed.emit((5, 1)), 1);
        assert_eq!(*log.lock(), vec![(5, 1)]);
    }

    #[test]
    fn test_every_receiver_runs() {
        let changed = Signal::<()>::new();
        let logs: Vec<_> = (0..4).map(|_| recorder(&changed).1).collect();

        assert_eq!(changed.connection_count(), 4);
        assert_eq!(changed.emit(()), 4);
        assert!(logs.iter().all(|log| log.lock().len() == 1));

        changed.disconnect_all();
        assert_eq!(changed.emit(()), 0);
    }

    #[test]
    fn test_receiver_may_connect_while_handling() {
        let changed = Arc::new(Signal::<()>::new());

        let inner = changed.clone();
        changed.connect(move |_| {
            inner.connect(|_| {});
        });

        // The slot added during emission does not run in the same emission.
        assert_eq!(changed.emit(()), 1);
        assert_eq!(changed.connection_count(), 2);
    }
}
