//! A section showing a list of items of the same type.

use std::fmt;
use std::marker::PhantomData;

use super::renderer::{FnRenderer, ItemRenderer};
use super::{Section, Visibility};
use crate::item_id::LocalId;
use crate::type_code::Subtype;

/// A [`Section`] backed by a `Vec<T>`.
///
/// The section owns its items. Mutating methods change the data only: the
/// owning adapter performs no change detection, so every mutation must be
/// followed by a refresh on the adapter (for example
/// [`HeterogeneousAdapter::notify_data_set_changed`](crate::HeterogeneousAdapter::notify_data_set_changed)),
/// or be made through [`HeterogeneousAdapter::edit`](crate::HeterogeneousAdapter::edit),
/// which refreshes for you.
///
/// # Example
///
/// ```
/// use sectionview::{FnRenderer, ListSection};
///
/// let mut section = ListSection::new(
///     vec!["Static Entry 1".to_string(), "Static Entry 2".to_string()],
///     FnRenderer::new(
///         |_| String::new(),
///         |view: &mut String, item: &String, _| view.clone_from(item),
///     ),
/// );
///
/// section.push("Static Entry 3".to_string());
/// assert_eq!(section.len(), 3);
/// ```
pub struct ListSection<T, V, R = FnRenderer<T, V>> {
    items: Vec<T>,
    renderer: R,
    visibility: Visibility,
    _view: PhantomData<fn() -> V>,
}

impl<T, V, R> ListSection<T, V, R>
where
    R: ItemRenderer<T, V>,
{
    /// Creates a section showing `items` with `renderer`.
    pub fn new(items: Vec<T>, renderer: R) -> Self {
        Self {
            items,
            renderer,
            visibility: Visibility::new(),
            _view: PhantomData,
        }
    }

    /// Creates an empty section.
    pub fn empty(renderer: R) -> Self {
        Self::new(Vec::new(), renderer)
    }
}

impl<T, V, R> ListSection<T, V, R> {
    /// Returns the number of items, ignoring visibility.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the backing items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the backing items for in-place mutation.
    ///
    /// Refresh the owning adapter afterwards.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Appends an item. Refresh the owning adapter afterwards.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Inserts an item at `index`. Refresh the owning adapter afterwards.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, item: T) {
        self.items.insert(index, item);
    }

    /// Removes and returns the item at `index`, or `None` if out of bounds.
    /// Refresh the owning adapter afterwards.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes all items. Refresh the owning adapter afterwards.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Replaces all items. Refresh the owning adapter afterwards.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Provides mutable access to an item via a closure.
    ///
    /// Returns `None` if `index` is out of bounds. Refresh the owning adapter
    /// afterwards.
    pub fn modify<F, Out>(&mut self, index: usize, f: F) -> Option<Out>
    where
        F: FnOnce(&mut T) -> Out,
    {
        self.items.get_mut(index).map(f)
    }

    /// Swaps two items. Out-of-bounds indices are ignored.
    /// Refresh the owning adapter afterwards.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.items.len() && b < self.items.len() {
            self.items.swap(a, b);
        }
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

impl<T, V, R> Section<V> for ListSection<T, V, R>
where
    R: ItemRenderer<T, V>,
{
    type Item = T;

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item(&self, index: usize) -> &T {
        &self.items[index]
    }

    fn item_subtype(&self, index: usize) -> Subtype {
        self.renderer.subtype(&self.items[index], index)
    }

    fn item_local_id(&self, index: usize) -> Option<LocalId> {
        self.renderer.local_id(&self.items[index], index)
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

impl<T: fmt::Debug, V, R> fmt::Debug for ListSection<T, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSection")
            .field("items", &self.items)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::AnySection;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn entries(items: &[&str]) -> ListSection<String, String> {
        ListSection::new(
            items.iter().map(|s| s.to_string()).collect(),
            FnRenderer::new(
                |_| String::new(),
                |view: &mut String, item: &String, index| *view = format!("{index}. {item}"),
            ),
        )
    }

    #[test]
    fn test_mutators() {
        let mut section = entries(&["a", "b", "c"]);
        assert_eq!(section.len(), 3);

        section.push("d".into());
        section.insert(0, "z".into());
        assert_eq!(section.items(), ["z", "a", "b", "c", "d"]);

        assert_eq!(section.remove(1), Some("a".to_string()));
        assert_eq!(section.remove(10), None);

        section.swap(0, 3);
        assert_eq!(section.items(), ["d", "b", "c", "z"]);
        section.swap(0, 99);
        assert_eq!(section.get(0).map(String::as_str), Some("d"));

        assert_eq!(section.modify(1, |item| item.push('!')), Some(()));
        assert_eq!(section.modify(9, |item| item.push('!')), None);
        assert_eq!(section.get(1).map(String::as_str), Some("b!"));

        section.clear();
        assert!(section.is_empty());

        section.set_items(vec!["x".into()]);
        section.items_mut().push("y".into());
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_hidden_section_has_no_rows() {
        let mut section = entries(&["a", "b"]);
        section.set_visible(false);
        assert!(!section.is_visible());
        assert_eq!(AnySection::<String>::size(&section), 0);
        assert_eq!(section.item_count(), 2);
    }

    #[test]
    fn test_visibility_follows_dependency() {
        let dependency = Rc::new(RefCell::new(Vec::<String>::new()));
        let observed = dependency.clone();
        let header =
            entries(&["Dynamic entries"]).with_visibility(move || !observed.borrow().is_empty());

        assert_eq!(AnySection::<String>::size(&header), 0);
        dependency.borrow_mut().push("Entry 1".into());
        assert_eq!(AnySection::<String>::size(&header), 1);
    }

    #[test]
    fn test_bind_uses_renderer() {
        let section = entries(&["first", "second"]);
        let mut view = Section::create_view(&section, Subtype::UNDEFINED);
        section.bind_at(&mut view, 1);
        assert_eq!(view, "1. second");
    }
}
