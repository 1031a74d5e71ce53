//! # Tracking sink trait.
//!
//! Provides [`Track`], the extension point for plugging analytics backends
//! into the instrumentation layer.
//!
//! Each sink gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-sink bounded queue** (capacity via [`Track::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Architecture
//! ```text
//! Tracker ──► SinkSet ──► [bounded queue] ──► worker task ──► sink.on_event()
//!                                          └─► panic caught → tracing::warn!
//! ```
//!
//! ## Rules
//! - Delivery is fire-and-forget: drivers never wait for sinks.
//! - Queue overflow drops the event **for this sink only**.
//! - Events are processed sequentially (FIFO) per sink.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use interactivity::tracking::{Track, TrackingEvent, TrackingKind};
//!
//! struct Beacon;
//!
//! #[async_trait]
//! impl Track for Beacon {
//!     async fn on_event(&self, ev: &TrackingEvent) {
//!         if matches!(ev.kind, TrackingKind::RouteInteractive) {
//!             // send to analytics, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "beacon" }
//! }
//! ```

use async_trait::async_trait;

use super::event::TrackingEvent;

/// Tracking sink for interactivity events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
/// - Slow processing affects only this sink's queue.
#[async_trait]
pub trait Track: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from a dedicated worker task, not in the driver's context.
    async fn on_event(&self, event: &TrackingEvent);

    /// Returns the sink name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this sink (clamped to at least 1).
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
