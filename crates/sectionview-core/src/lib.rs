//! Core plumbing for sectionview.
//!
//! This crate provides the pieces of sectionview that do not depend on the
//! adapter itself:
//!
//! - **Signal/Slot System**: change notifications from an adapter to its host
//! - **Logging**: `tracing` target names for filtering sectionview's output
//!
//! # Signal/Slot Example
//!
//! ```
//! use sectionview_core::Signal;
//!
//! let data_set_changed = Signal::<()>::new();
//!
//! let conn_id = data_set_changed.connect(|_| {
//!     println!("refresh everything");
//! });
//!
//! data_set_changed.emit(());
//! data_set_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;

pub use error::{Result, SignalError};
pub use signal::{ConnectionId, Signal};
