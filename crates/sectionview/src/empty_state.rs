//! Placeholder rows for empty adapters.
//!
//! When every attached section is empty (or hidden, or there are no sections
//! at all), an adapter with an [`EmptyState`] installed reports exactly one
//! row and routes it here instead of to a section.

use std::fmt;

/// Generates the view shown when an adapter has no rows.
pub trait EmptyState<V> {
    /// Builds the placeholder view.
    fn create_view(&self) -> V;

    /// Called each time the placeholder is bound. Update any information the
    /// placeholder shows here, unless it never changes.
    fn update(&self, _view: &mut V) {}
}

/// An [`EmptyState`] assembled from closures.
///
/// # Example
///
/// ```
/// use sectionview::FnEmptyState;
///
/// let empty = FnEmptyState::new(|| String::from("Nothing here yet"));
/// ```
pub struct FnEmptyState<V> {
    create: Box<dyn Fn() -> V>,
    update: Option<Box<dyn Fn(&mut V)>>,
}

impl<V> FnEmptyState<V> {
    /// Creates an empty state from a view factory.
    pub fn new<F>(create: F) -> Self
    where
        F: Fn() -> V + 'static,
    {
        Self {
            create: Box::new(create),
            update: None,
        }
    }

    /// Sets the update hook.
    pub fn with_update<F>(mut self, update: F) -> Self
    where
        F: Fn(&mut V) + 'static,
    {
        self.update = Some(Box::new(update));
        self
    }
}

impl<V> EmptyState<V> for FnEmptyState<V> {
    fn create_view(&self) -> V {
        (self.create)()
    }

    fn update(&self, view: &mut V) {
        if let Some(ref update) = self.update {
            update(view);
        }
    }
}

impl<V> fmt::Debug for FnEmptyState<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEmptyState")
            .field("has_update", &self.update.is_some())
            .finish_non_exhaustive()
    }
}
