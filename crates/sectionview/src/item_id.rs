//! Stable item identity across sections.

use crate::type_code::SectionId;

/// A section-local item id, unique within its section.
pub type LocalId = u32;

/// The identity of a flat row.
///
/// Stable ids pack the owning section's id into the high 32 bits and the
/// section-local id into the low 32 bits, so equal local ids in different
/// sections never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    /// The owning section does not provide stable ids.
    NoId,
    /// The single empty-state row.
    EmptyState,
    /// A packed (section id, local id) pair.
    Stable(u64),
}

impl ItemId {
    /// Host encoding of [`ItemId::NoId`].
    pub const NO_ID_RAW: i64 = -1;
    /// Host encoding of [`ItemId::EmptyState`].
    pub const EMPTY_STATE_RAW: i64 = -2;

    /// Packs a section id and a local id.
    #[inline]
    pub fn pack(section: SectionId, local: LocalId) -> Self {
        Self::Stable((u64::from(section.get()) << 32) | u64::from(local))
    }

    /// Returns `true` for [`ItemId::Stable`].
    #[inline]
    pub fn is_stable(self) -> bool {
        matches!(self, Self::Stable(_))
    }

    /// The raw id of the owning section, taken from the high bits.
    pub fn section_bits(self) -> Option<u32> {
        match self {
            Self::Stable(packed) => Some((packed >> 32) as u32),
            _ => None,
        }
    }

    /// The local id, taken from the low bits.
    pub fn local_id(self) -> Option<LocalId> {
        match self {
            Self::Stable(packed) => Some(packed as u32),
            _ => None,
        }
    }

    /// Integer encoding for host list widgets.
    ///
    /// Sentinels are negative. Packed ids keep their bit pattern and stay
    /// positive, since section ids never exceed [`SectionId::MAX`].
    pub fn to_raw(self) -> i64 {
        match self {
            Self::NoId => Self::NO_ID_RAW,
            Self::EmptyState => Self::EMPTY_STATE_RAW,
            Self::Stable(packed) => packed as i64,
        }
    }
}
