//! Coordinates for addressing items inside an adapter's sections.
//!
//! A [`Coordinate`] is the answer to "which section, and which item inside it"
//! for a flat list position. It is modeled the same way as a model index: a
//! small value carrying a validity flag, so an out-of-range lookup yields
//! [`Coordinate::unknown()`] instead of an error.

/// Raw value used for both fields of an unknown coordinate in [`Coordinate::raw`].
pub const UNKNOWN_POSITION: isize = -1;

/// A (section index, item index) pair.
///
/// Either both fields are known or neither is. Coordinates are computed per
/// lookup and are not kept up to date: after any section is added, removed,
/// hidden, or resized, previously obtained coordinates may point elsewhere.
///
/// # Example
///
/// ```
/// use sectionview::Coordinate;
///
/// let mut coordinate = Coordinate::new(1, 4);
/// assert_eq!(coordinate.section(), Some(1));
/// assert_eq!(coordinate.item_index(), Some(4));
///
/// coordinate.clear();
/// assert!(!coordinate.is_known());
/// assert_eq!(coordinate.raw(), (-1, -1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    section: usize,
    item_index: usize,
    known: bool,
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::unknown()
    }
}

impl Coordinate {
    /// Creates the unknown coordinate.
    #[inline]
    pub const fn unknown() -> Self {
        Self {
            section: 0,
            item_index: 0,
            known: false,
        }
    }

    /// Creates a coordinate pointing at `item_index` inside section `section`.
    #[inline]
    pub const fn new(section: usize, item_index: usize) -> Self {
        Self {
            section,
            item_index,
            known: true,
        }
    }

    /// Resets this coordinate to the unknown state.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::unknown();
    }

    /// Points this coordinate at `item_index` inside section `section`.
    ///
    /// No validation is performed against any adapter.
    #[inline]
    pub fn set(&mut self, section: usize, item_index: usize) {
        *self = Self::new(section, item_index);
    }

    /// Sets the section index. An unknown coordinate becomes known, with its
    /// item index at 0.
    #[inline]
    pub fn set_section(&mut self, section: usize) {
        if !self.known {
            self.item_index = 0;
        }
        self.section = section;
        self.known = true;
    }

    /// Sets the item index. An unknown coordinate becomes known, with its
    /// section index at 0.
    #[inline]
    pub fn set_item_index(&mut self, item_index: usize) {
        if !self.known {
            self.section = 0;
        }
        self.item_index = item_index;
        self.known = true;
    }

    /// Returns `true` unless this is the unknown coordinate.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.known
    }

    /// The index of the section in display order.
    #[inline]
    pub fn section(&self) -> Option<usize> {
        self.known.then_some(self.section)
    }

    /// The index of the item within its section.
    #[inline]
    pub fn item_index(&self) -> Option<usize> {
        self.known.then_some(self.item_index)
    }

    /// Both fields at once.
    #[inline]
    pub fn get(&self) -> Option<(usize, usize)> {
        self.known.then_some((self.section, self.item_index))
    }

    /// Integer encoding for hosts that expect `-1` for unknown fields.
    pub fn raw(&self) -> (isize, isize) {
        match self.get() {
            Some((section, item_index)) => (section as isize, item_index as isize),
            None => (UNKNOWN_POSITION, UNKNOWN_POSITION),
        }
    }
}
