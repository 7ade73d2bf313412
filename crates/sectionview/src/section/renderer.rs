//! Item renderers for the ready-made sections.
//!
//! [`ListSection`](super::ListSection) and [`SingletonSection`](super::SingletonSection)
//! own their data; what they need from the application is how to turn an item
//! into a view. That is an [`ItemRenderer`], either implemented on a type or
//! assembled from closures with [`FnRenderer`].

use std::fmt;

use crate::item_id::LocalId;
use crate::type_code::Subtype;

/// Builds and binds views for items of type `T`.
///
/// # Example
///
/// ```
/// use sectionview::{ItemRenderer, Subtype};
///
/// struct Label;
///
/// impl ItemRenderer<String, String> for Label {
///     fn create_view(&self, _subtype: Subtype) -> String {
///         String::new()
///     }
///
///     fn bind(&self, view: &mut String, item: &String, _index: usize) {
///         view.clone_from(item);
///     }
/// }
/// ```
pub trait ItemRenderer<T, V> {
    /// Builds a new view for the given subtype.
    fn create_view(&self, subtype: Subtype) -> V;

    /// Writes `item` into `view`, overwriting all item-dependent state.
    fn bind(&self, view: &mut V, item: &T, index: usize);

    /// Returns the view kind for `item`. Defaults to [`Subtype::UNDEFINED`].
    fn subtype(&self, _item: &T, _index: usize) -> Subtype {
        Subtype::UNDEFINED
    }

    /// Returns a stable local id for `item`. Defaults to none.
    fn local_id(&self, _item: &T, _index: usize) -> Option<LocalId> {
        None
    }
}

/// Type alias for a view factory function.
pub type ViewFactory<V> = Box<dyn Fn(Subtype) -> V>;

/// Type alias for a bind function.
pub type BindFn<T, V> = Box<dyn Fn(&mut V, &T, usize)>;

/// Type alias for a subtype extractor function.
pub type SubtypeFn<T> = Box<dyn Fn(&T, usize) -> Subtype>;

/// Type alias for a local id extractor function.
pub type LocalIdFn<T> = Box<dyn Fn(&T, usize) -> Option<LocalId>>;

/// An [`ItemRenderer`] assembled from closures.
///
/// # Example
///
/// ```
/// use sectionview::{FnRenderer, Subtype};
///
/// let renderer = FnRenderer::new(
///     |_subtype| String::new(),
///     |view: &mut String, item: &String, _index| view.clone_from(item),
/// )
/// .with_subtype(|item: &String, _index| {
///     if item.eq_ignore_ascii_case("red") {
///         Subtype::new(1)
///     } else {
///         Subtype::new(2)
///     }
/// });
/// ```
pub struct FnRenderer<T, V> {
    create: ViewFactory<V>,
    bind: BindFn<T, V>,
    subtype: Option<SubtypeFn<T>>,
    local_id: Option<LocalIdFn<T>>,
}

impl<T, V> FnRenderer<T, V> {
    /// Creates a renderer from a view factory and a bind function.
    pub fn new<C, B>(create: C, bind: B) -> Self
    where
        C: Fn(Subtype) -> V + 'static,
        B: Fn(&mut V, &T, usize) + 'static,
    {
        Self {
            create: Box::new(create),
            bind: Box::new(bind),
            subtype: None,
            local_id: None,
        }
    }

    /// Sets the subtype extractor.
    pub fn with_subtype<F>(mut self, subtype: F) -> Self
    where
        F: Fn(&T, usize) -> Subtype + 'static,
    {
        self.subtype = Some(Box::new(subtype));
        self
    }

    /// Sets the local id extractor.
    pub fn with_local_id<F>(mut self, local_id: F) -> Self
    where
        F: Fn(&T, usize) -> Option<LocalId> + 'static,
    {
        self.local_id = Some(Box::new(local_id));
        self
    }
}

impl<T, V> ItemRenderer<T, V> for FnRenderer<T, V> {
    fn create_view(&self, subtype: Subtype) -> V {
        (self.create)(subtype)
    }

    fn bind(&self, view: &mut V, item: &T, index: usize) {
        (self.bind)(view, item, index)
    }

    fn subtype(&self, item: &T, index: usize) -> Subtype {
        match self.subtype {
            Some(ref subtype) => subtype(item, index),
            None => Subtype::UNDEFINED,
        }
    }

    fn local_id(&self, item: &T, index: usize) -> Option<LocalId> {
        self.local_id.as_ref().and_then(|local_id| local_id(item, index))
    }
}

impl<T, V> fmt::Debug for FnRenderer<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRenderer")
            .field("has_subtype", &self.subtype.is_some())
            .field("has_local_id", &self.local_id.is_some())
            .finish_non_exhaustive()
    }
}
