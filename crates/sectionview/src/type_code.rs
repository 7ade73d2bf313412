//! Item-type multiplexing.
//!
//! A host list widget recycles views by a single integer "view type". Every
//! section, however, numbers its own view kinds from zero. This module folds
//! the two together:
//!
//! - [`SectionId`] identifies an attached section for the lifetime of an adapter
//! - [`Subtype`] is a section-local view kind
//! - [`TypeCode`] is the global view type handed to the host
//!
//! In non-shared mode a type code is `section_id * 100 + subtype`, which is
//! collision-free because subtypes are bounded to `[0, 99]`. In shared mode
//! the subtype is used as the type code unchanged.

use std::fmt;

/// Identifier assigned to a section when it is attached to an adapter.
///
/// Ids come from a per-adapter counter starting at 1 and are never reused,
/// even after the section is removed. The counter stops at [`SectionId::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(u32);

impl SectionId {
    /// The first id an adapter hands out.
    pub const FIRST: SectionId = SectionId(1);

    /// The last id an adapter hands out.
    ///
    /// Zipping [`Subtype::UNDEFINED`] with any id up to this one yields a
    /// negative code, so undefined-subtype codes never meet the codes of
    /// ranged subtypes, which are all positive.
    pub const MAX: SectionId = SectionId(i32::MAX as u32 / TypeCode::MULTIPLIER as u32);

    /// Returns the raw id.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// The id following this one, or `None` once [`SectionId::MAX`] is reached.
    pub(crate) fn next(self) -> Option<SectionId> {
        (self < Self::MAX).then(|| SectionId(self.0 + 1))
    }
}

#[cfg(test)]
impl SectionId {
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A section-local view kind.
///
/// Sections with a single kind of view never need anything but
/// [`Subtype::UNDEFINED`]. Sections rendering several kinds return values in
/// `[Subtype::MIN_VALUE, Subtype::MAX_VALUE]` when the adapter runs in
/// non-shared mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Subtype(i32);

impl Subtype {
    /// The subtype of sections that do not distinguish view kinds.
    pub const UNDEFINED: Subtype = Subtype(i32::MIN);
    /// Smallest subtype accepted in non-shared mode.
    pub const MIN_VALUE: i32 = 0;
    /// Largest subtype accepted in non-shared mode.
    pub const MAX_VALUE: i32 = 99;

    /// Creates a subtype. No range check happens here; the adapter validates
    /// subtypes when it multiplexes them.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }

    /// Returns `true` for [`Subtype::UNDEFINED`].
    #[inline]
    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    /// Returns `true` if this subtype may be zipped with a section id.
    #[inline]
    pub fn is_zippable(self) -> bool {
        self.is_undefined() || (Self::MIN_VALUE..=Self::MAX_VALUE).contains(&self.0)
    }
}

impl From<i32> for Subtype {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            f.write_str("undefined")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// The global view type of a row, as handed to the host list widget.
///
/// Computed in 64 bits. Codes of [`Subtype::UNDEFINED`] rows are negative
/// for every id up to [`SectionId::MAX`]; codes of ranged subtypes start at
/// [`TypeCode::MULTIPLIER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeCode(i64);

impl TypeCode {
    /// Reserved for the empty-state row.
    pub const EMPTY: TypeCode = TypeCode(-2);

    /// Subtypes per section in non-shared mode.
    pub const MULTIPLIER: i64 = Subtype::MAX_VALUE as i64 + 1;

    /// Wraps a raw type code received from the host.
    #[inline]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }

    /// Non-shared mode: combines a section id and a subtype.
    #[inline]
    pub fn zip(section: SectionId, subtype: Subtype) -> Self {
        Self(i64::from(section.get()) * Self::MULTIPLIER + i64::from(subtype.get()))
    }

    /// Non-shared mode: recovers the subtype zipped with `section`.
    ///
    /// Returns `None` if this code was not produced by `section`.
    pub fn unzip(self, section: SectionId) -> Option<Subtype> {
        let raw = self.0 - i64::from(section.get()) * Self::MULTIPLIER;
        let subtype = Subtype(i32::try_from(raw).ok()?);
        subtype.is_zippable().then_some(subtype)
    }

    /// Shared mode: the subtype is the type code.
    #[inline]
    pub fn shared(subtype: Subtype) -> Self {
        Self(i64::from(subtype.get()))
    }

    /// Shared mode: the subtype this code was produced from.
    pub fn as_shared_subtype(self) -> Option<Subtype> {
        i32::try_from(self.0).ok().map(Subtype)
    }

    /// Returns `true` for [`TypeCode::EMPTY`].
    #[inline]
    pub fn is_empty_state(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
