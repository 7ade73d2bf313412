//! A section that always shows exactly one item.

use std::fmt;
use std::marker::PhantomData;

use super::renderer::{FnRenderer, ItemRenderer};
use super::{Section, Visibility};
use crate::item_id::LocalId;
use crate::type_code::Subtype;

/// A [`Section`] holding a single value, such as a header or a block of text.
///
/// The section has one row while visible and none while hidden. Use `()` as
/// `T` for sections with no data of their own.
///
/// # Example
///
/// ```
/// use sectionview::{FnRenderer, SingletonSection};
///
/// let mut header = SingletonSection::new(
///     "Static entries".to_string(),
///     FnRenderer::new(
///         |_| String::new(),
///         |view: &mut String, item: &String, _| view.clone_from(item),
///     ),
/// );
///
/// header.set_data("Footer".to_string());
/// assert_eq!(header.data(), "Footer");
/// ```
pub struct SingletonSection<T, V, R = FnRenderer<T, V>> {
    data: T,
    renderer: R,
    visibility: Visibility,
    _view: PhantomData<fn() -> V>,
}

impl<T, V, R> SingletonSection<T, V, R>
where
    R: ItemRenderer<T, V>,
{
    /// Creates a section showing `data` with `renderer`.
    pub fn new(data: T, renderer: R) -> Self {
        Self {
            data,
            renderer,
            visibility: Visibility::new(),
            _view: PhantomData,
        }
    }
}

impl<T, V, R> SingletonSection<T, V, R> {
    /// Returns the item.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns the item for in-place mutation.
    ///
    /// Refresh the owning adapter afterwards.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Replaces the item, returning the previous one.
    /// Refresh the owning adapter afterwards.
    pub fn set_data(&mut self, data: T) -> T {
        std::mem::replace(&mut self.data, data)
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns `true` if the section is shown.
    pub fn is_visible(&self) -> bool {
        self.visibility.get()
    }

    /// Shows or hides the section. Refresh the owning adapter afterwards.
    pub fn set_visible(&mut self, visible: bool) {
        self.visibility.set_visible(visible);
    }

    /// Makes visibility also depend on `predicate`, evaluated on every count.
    pub fn with_visibility<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.visibility.set_predicate(Box::new(predicate));
        self
    }

    /// Removes the visibility predicate installed by
    /// [`with_visibility`](Self::with_visibility).
    pub fn clear_visibility_predicate(&mut self) {
        self.visibility.clear_predicate();
    }
}

impl<T, V, R> Section<V> for SingletonSection<T, V, R>
where
    R: ItemRenderer<T, V>,
{
    type Item = T;

    fn item_count(&self) -> usize {
        1
    }

    fn item(&self, _index: usize) -> &T {
        &self.data
    }

    fn item_subtype(&self, index: usize) -> Subtype {
        self.renderer.subtype(&self.data, index)
    }

    fn item_local_id(&self, index: usize) -> Option<LocalId> {
        self.renderer.local_id(&self.data, index)
    }

    fn is_visible(&self) -> bool {
        self.visibility.get()
    }

    fn create_view(&self, subtype: Subtype) -> V {
        self.renderer.create_view(subtype)
    }

    fn bind(&self, view: &mut V, item: &T, index: usize) {
        self.renderer.bind(view, item, index);
    }
}

impl<T: fmt::Debug, V, R> fmt::Debug for SingletonSection<T, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonSection")
            .field("data", &self.data)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}
