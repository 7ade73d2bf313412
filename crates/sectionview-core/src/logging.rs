//! Logging facilities for sectionview.
//!
//! sectionview uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("sectionview=debug")
//!     .init();
//! ```
//!
//! Section attach/detach and refresh emission are logged at `debug`.
//! Coordinate lookups and view dispatch are logged at `trace`, so they stay
//! silent unless explicitly requested.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "sectionview_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "sectionview_core::signal";
    /// Adapter target (position mapping, type multiplexing, dispatch).
    pub const ADAPTER: &str = "sectionview::adapter";
    /// Section target (ready-made section implementations).
    pub const SECTION: &str = "sectionview::section";
}
