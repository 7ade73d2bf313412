//! Sections: homogeneous runs of rows inside a heterogeneous adapter.
//!
//! A [`Section`] owns one slice of the data set and knows how to build and
//! bind views for it. The adapter places sections one after another and asks
//! each of them about its own rows only.
//!
//! # Implementing a Section
//!
//! ```
//! use sectionview::{Section, Subtype};
//!
//! struct Header {
//!     title: String,
//! }
//!
//! impl Section<String> for Header {
//!     type Item = String;
//!
//!     fn item_count(&self) -> usize {
//!         1
//!     }
//!
//!     fn item(&self, _index: usize) -> &String {
//!         &self.title
//!     }
//!
//!     fn create_view(&self, _subtype: Subtype) -> String {
//!         String::new()
//!     }
//!
//!     fn bind(&self, view: &mut String, item: &String, _index: usize) {
//!         view.clear();
//!         view.push_str(item);
//!     }
//! }
//! ```
//!
//! For the common shapes, use [`ListSection`] and [`SingletonSection`] with an
//! [`ItemRenderer`] instead of implementing the trait by hand.

mod list;
mod renderer;
mod singleton;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

pub use list::ListSection;
pub use renderer::{BindFn, FnRenderer, ItemRenderer, LocalIdFn, SubtypeFn, ViewFactory};
pub use singleton::SingletonSection;

use crate::item_id::LocalId;
use crate::type_code::{SectionId, Subtype};

/// The contract every section implements.
///
/// `V` is the host's view type; all sections attached to one adapter share it.
///
/// # Required methods
///
/// - [`item_count`](Section::item_count) - raw number of rows
/// - [`item`](Section::item) - the data for a row
/// - [`create_view`](Section::create_view) - build a view for a subtype
/// - [`bind`](Section::bind) - write a row's data into a view
///
/// # Visibility
///
/// The adapter never uses `item_count` directly. It uses the effective count
/// ([`AnySection::size`]), which is zero while [`is_visible`](Section::is_visible)
/// returns `false`.
pub trait Section<V> {
    /// The type of data this section holds.
    type Item;

    /// Returns the number of rows in this section's backing data set,
    /// ignoring visibility.
    fn item_count(&self) -> usize;

    /// Returns the row at `index`.
    ///
    /// The adapter only passes indices below the effective count.
    fn item(&self, index: usize) -> &Self::Item;

    /// Returns the view kind of the row at `index`.
    ///
    /// Must be [`Subtype::UNDEFINED`] or within `[0, 99]` when the adapter is
    /// not sharing item types; anything else is reported as a contract
    /// violation by the adapter.
    fn item_subtype(&self, _index: usize) -> Subtype {
        Subtype::UNDEFINED
    }

    /// Returns a stable id for the row at `index`, unique within this section.
    fn item_local_id(&self, _index: usize) -> Option<LocalId> {
        None
    }

    /// Returns `false` to hide the whole section.
    fn is_visible(&self) -> bool {
        true
    }

    /// Builds a new view for rows of the given subtype.
    fn create_view(&self, subtype: Subtype) -> V;

    /// Writes `item` into `view`.
    ///
    /// Views are recycled: the same view is bound many times with different
    /// rows, so every call must overwrite all item-dependent state.
    fn bind(&self, view: &mut V, item: &Self::Item, index: usize);
}

/// Object-safe view of a [`Section`], used by the adapter to store sections
/// with different item types side by side.
///
/// Implemented for every `Section<V> + 'static`; there is no need to
/// implement it by hand.
pub trait AnySection<V>: Any {
    /// Effective row count: the raw count when visible, 0 otherwise.
    fn size(&self) -> usize;

    /// See [`Section::item_subtype`].
    fn item_subtype(&self, index: usize) -> Subtype;

    /// See [`Section::item_local_id`].
    fn item_local_id(&self, index: usize) -> Option<LocalId>;

    /// See [`Section::is_visible`].
    fn is_visible(&self) -> bool;

    /// See [`Section::create_view`].
    fn create_view(&self, subtype: Subtype) -> V;

    /// Fetches the row at `index` and binds it into `view`.
    fn bind_at(&self, view: &mut V, index: usize);

    /// The concrete section type name, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Get this as Any for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get this as mutable Any for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Convert into a boxed Any for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<V, S> AnySection<V> for S
where
    S: Section<V> + 'static,
{
    fn size(&self) -> usize {
        if <S as Section<V>>::is_visible(self) {
            <S as Section<V>>::item_count(self)
        } else {
            0
        }
    }

    fn item_subtype(&self, index: usize) -> Subtype {
        <S as Section<V>>::item_subtype(self, index)
    }

    fn item_local_id(&self, index: usize) -> Option<LocalId> {
        <S as Section<V>>::item_local_id(self, index)
    }

    fn is_visible(&self) -> bool {
        <S as Section<V>>::is_visible(self)
    }

    fn create_view(&self, subtype: Subtype) -> V {
        <S as Section<V>>::create_view(self, subtype)
    }

    fn bind_at(&self, view: &mut V, index: usize) {
        let item = <S as Section<V>>::item(self, index);
        <S as Section<V>>::bind(self, view, item, index);
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<S>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Typed handle to a section attached to an adapter.
///
/// Returned by [`HeterogeneousAdapter::add_section`](crate::HeterogeneousAdapter::add_section).
/// The handle stays valid until the section is removed; after that, every
/// lookup through it returns `None`, even if other sections are added later.
pub struct SectionHandle<S> {
    id: SectionId,
    _marker: PhantomData<fn() -> S>,
}

impl<S> SectionHandle<S> {
    pub(crate) fn new(id: SectionId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// The id the adapter assigned to the section.
    #[inline]
    pub fn id(&self) -> SectionId {
        self.id
    }
}

impl<S> Clone for SectionHandle<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SectionHandle<S> {}

impl<S> PartialEq for SectionHandle<S> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<S> Eq for SectionHandle<S> {}

impl<S> std::hash::Hash for SectionHandle<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<S> fmt::Debug for SectionHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionHandle")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<S>())
            .finish()
    }
}

/// Visibility state shared by the ready-made sections.
///
/// A section is visible when its flag is set and its predicate, if any,
/// returns `true`. The predicate is re-evaluated on every count, which lets a
/// section follow external state (for example, a header that disappears when
/// the list below it is empty).
pub(crate) struct Visibility {
    visible: bool,
    predicate: Option<Box<dyn Fn() -> bool>>,
}

impl Visibility {
    pub(crate) fn new() -> Self {
        Self {
            visible: true,
            predicate: None,
        }
    }

    pub(crate) fn get(&self) -> bool {
        self.visible && self.predicate.as_ref().is_none_or(|predicate| predicate())
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            tracing::trace!(target: "sectionview::section", visible, "section visibility changed");
        }
        self.visible = visible;
    }

    pub(crate) fn set_predicate(&mut self, predicate: Box<dyn Fn() -> bool>) {
        self.predicate = Some(predicate);
    }

    pub(crate) fn clear_predicate(&mut self) {
        self.predicate = None;
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visibility")
            .field("visible", &self.visible)
            .field("has_predicate", &self.predicate.is_some())
            .finish()
    }
}
