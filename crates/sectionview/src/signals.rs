//! Change notifications from an adapter to its host list widget.

use sectionview_core::Signal;

/// Collection of signals emitted by a [`HeterogeneousAdapter`](crate::HeterogeneousAdapter).
///
/// Hosts connect to these to learn which rows to re-query. Ranges are
/// `(flat start, count)`.
///
/// # Signal Usage
///
/// - **Structural changes** (sections added or removed, bulk edits):
///   `data_set_changed`
/// - **Row-level changes inside one section**: `items_changed`,
///   `items_inserted`, `items_removed`, translated from section-local to flat
///   positions by the adapter
pub struct AdapterSignals {
    /// Emitted when every row must be re-queried.
    pub data_set_changed: Signal<()>,

    /// Emitted when the data of existing rows changed.
    /// Args: (flat start, count)
    pub items_changed: Signal<(usize, usize)>,

    /// Emitted after rows have been inserted.
    /// Args: (flat start, count)
    pub items_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (flat start, count)
    pub items_removed: Signal<(usize, usize)>,
}

impl Default for AdapterSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSignals {
    /// Creates a new set of adapter signals.
    pub fn new() -> Self {
        Self {
            data_set_changed: Signal::new(),
            items_changed: Signal::new(),
            items_inserted: Signal::new(),
            items_removed: Signal::new(),
        }
    }

    /// Blocks or unblocks every signal at once.
    ///
    /// Useful for batching several mutations into one trailing refresh.
    pub fn set_blocked(&self, blocked: bool) {
        self.data_set_changed.set_blocked(blocked);
        self.items_changed.set_blocked(blocked);
        self.items_inserted.set_blocked(blocked);
        self.items_removed.set_blocked(blocked);
    }

    /// Disconnects every slot from every signal.
    pub fn disconnect_all(&self) {
        self.data_set_changed.disconnect_all();
        self.items_changed.disconnect_all();
        self.items_inserted.disconnect_all();
        self.items_removed.disconnect_all();
    }
}

impl std::fmt::Debug for AdapterSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterSignals")
            .field("data_set_changed", &self.data_set_changed)
            .field("items_changed", &self.items_changed)
            .field("items_inserted", &self.items_inserted)
            .field("items_removed", &self.items_removed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_signals_creation() {
        let signals = AdapterSignals::new();
        assert_eq!(signals.data_set_changed.connection_count(), 0);
        assert_eq!(signals.items_changed.connection_count(), 0);
    }

    #[test]
    fn test_block_all() {
        let signals = AdapterSignals::new();
        let counter = Arc::new(Mutex::new(0));

        let c1 = counter.clone();
        signals.data_set_changed.connect(move |_| {
            *c1.lock() += 1;
        });

        let c2 = counter.clone();
        signals.items_inserted.connect(move |(_, count)| {
            *c2.lock() += 10 * count;
        });

        signals.set_blocked(true);
        signals.data_set_changed.emit(());
        signals.items_inserted.emit((0, 1));
        assert_eq!(*counter.lock(), 0);

        signals.set_blocked(false);
        signals.data_set_changed.emit(());
        signals.items_inserted.emit((0, 2));
        assert_eq!(*counter.lock(), 21);

        signals.disconnect_all();
        assert_eq!(signals.items_inserted.connection_count(), 0);
    }
}
