//! Sectionview - sectioned, heterogeneous adapters for virtualized list widgets.
//!
//! A host list widget (a recycler, a virtual stack) asks its adapter a small set
//! of questions about a flat list of rows. Sectionview answers them for a list
//! built out of independent [`Section`]s, each with its own data, its own view
//! kinds, and its own visibility:
//!
//! - [`HeterogeneousAdapter`] owns the sections and maps flat positions to
//!   (section, item) [`Coordinate`]s
//! - [`TypeCode`]s multiplex each section's [`Subtype`]s into one type space
//! - [`ItemId`]s combine section ids with section-local ids
//! - an optional [`EmptyState`] provides the placeholder row of an empty list
//!
//! # Example
//!
//! ```
//! use sectionview::prelude::*;
//!
//! fn label() -> FnRenderer<String, String> {
//!     FnRenderer::new(
//!         |_| String::new(),
//!         |view: &mut String, item: &String, _| view.clone_from(item),
//!     )
//! }
//!
//! let mut adapter = HeterogeneousAdapter::<String>::builder()
//!     .empty_state(FnEmptyState::new(|| "Nothing to show".to_string()))
//!     .build();
//!
//! let list = adapter.add_section(ListSection::new(Vec::new(), label()))?;
//! assert_eq!(adapter.item_type(0)?, TypeCode::EMPTY);
//!
//! adapter.edit(&list, |section| section.push("First".to_string()));
//! let mut holder = adapter.create_view(adapter.item_type(0)?)?;
//! adapter.bind_view(&mut holder, 0)?;
//! assert_eq!(holder.view(), "First");
//! # Ok::<(), sectionview::AdapterError>(())
//! ```
//!
//! # Logging
//!
//! Sectionview logs through `tracing`. Filter on the targets in
//! [`logging::targets`], e.g. `RUST_LOG=sectionview::adapter=debug`.

mod adapter;
mod config;
mod coordinate;
mod empty_state;
mod error;
mod item_id;
pub mod prelude;
pub mod section;
mod signals;
mod type_code;
mod view;

pub use adapter::{AdapterBuilder, HeterogeneousAdapter};
pub use config::AdapterConfig;
pub use coordinate::{Coordinate, UNKNOWN_POSITION};
pub use empty_state::{EmptyState, FnEmptyState};
pub use error::{AdapterError, Result};
pub use item_id::{ItemId, LocalId};
pub use section::{
    AnySection, BindFn, FnRenderer, ItemRenderer, ListSection, LocalIdFn, Section, SectionHandle,
    SingletonSection, SubtypeFn, ViewFactory,
};
pub use signals::AdapterSignals;
pub use type_code::{SectionId, Subtype, TypeCode};
pub use view::ViewHolder;

pub use sectionview_core::logging;
pub use sectionview_core::{ConnectionId, Signal, SignalError};
