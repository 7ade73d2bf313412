//! Error types for sectionview.

use crate::type_code::{Subtype, TypeCode};

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors reported by a [`HeterogeneousAdapter`](crate::HeterogeneousAdapter).
///
/// `InvalidSubtype`, `ReservedSubtype`, and `UnknownTypeCode` are programming
/// errors in a section implementation or a desynchronized host. They are
/// always returned to the caller and never recovered from internally.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// A section returned a subtype outside `[0, 99]` while the adapter is not
    /// sharing item types.
    #[error(
        "invalid item subtype {subtype} at position {position} of section {section_index}: \
         subtype must be between {min} and {max}",
        min = Subtype::MIN_VALUE,
        max = Subtype::MAX_VALUE
    )]
    InvalidSubtype {
        position: usize,
        section_index: usize,
        subtype: Subtype,
    },

    /// A section returned the type code reserved for the empty state while the
    /// adapter is sharing item types.
    #[error(
        "item subtype at position {position} of section {section_index} collides with the reserved empty-state type code"
    )]
    ReservedSubtype {
        position: usize,
        section_index: usize,
    },

    /// A type code was dispatched that the adapter never emitted, or whose
    /// section has been removed.
    #[error("unknown type code {0}")]
    UnknownTypeCode(TypeCode),

    /// The empty-state type code was dispatched but no empty state is installed.
    #[error("empty-state row requested but no empty state is installed")]
    MissingEmptyState,

    /// A flat position past the end of the list.
    #[error("position {position} out of range for {count} rows")]
    PositionOutOfRange { position: usize, count: usize },

    /// A section index past the end of the section list.
    #[error("section index {index} out of range for {len} sections")]
    SectionIndexOutOfRange { index: usize, len: usize },

    /// The adapter has handed out every section id.
    #[error("section ids exhausted")]
    SectionIdsExhausted,

    /// Adapter settings could not be parsed.
    #[error("invalid adapter configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl AdapterError {
    /// Returns `true` for errors caused by a section breaking its contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSubtype { .. } | Self::ReservedSubtype { .. }
        )
    }
}
