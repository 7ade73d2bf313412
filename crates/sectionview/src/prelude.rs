//! Prelude module for sectionview.
//!
//! ```
//! use sectionview::prelude::*;
//! ```

// ============================================================================
// Adapter
// ============================================================================

pub use crate::{AdapterBuilder, AdapterConfig, AdapterError, HeterogeneousAdapter, ViewHolder};

// ============================================================================
// Sections
// ============================================================================

pub use crate::section::{
    FnRenderer, ItemRenderer, ListSection, Section, SectionHandle, SingletonSection,
};
pub use crate::{EmptyState, FnEmptyState};

// ============================================================================
// Identity and Types
// ============================================================================

pub use crate::{Coordinate, ItemId, LocalId, SectionId, Subtype, TypeCode};
