//! View holders handed to the host list widget.

use std::ops::{Deref, DerefMut};

use crate::type_code::TypeCode;

/// A host view together with the type code it was created for.
///
/// The host keeps holders in its recycling pool and passes them back to
/// [`HeterogeneousAdapter::bind_view`](crate::HeterogeneousAdapter::bind_view).
/// The type code tells the adapter whether the holder is the empty-state
/// placeholder or a section row.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewHolder<V> {
    view: V,
    type_code: TypeCode,
}

impl<V> ViewHolder<V> {
    pub(crate) fn new(view: V, type_code: TypeCode) -> Self {
        Self { view, type_code }
    }

    /// The type code this holder was created for.
    #[inline]
    pub fn type_code(&self) -> TypeCode {
        self.type_code
    }

    /// Returns `true` if this holder shows the empty-state placeholder.
    #[inline]
    pub fn is_empty_state(&self) -> bool {
        self.type_code.is_empty_state()
    }

    /// Returns the wrapped view.
    #[inline]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the wrapped view mutably.
    #[inline]
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Unwraps the view.
    pub fn into_view(self) -> V {
        self.view
    }
}

impl<V> Deref for ViewHolder<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.view
    }
}

impl<V> DerefMut for ViewHolder<V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
