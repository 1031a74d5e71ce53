//! Tracking: event types, sinks and the fan-out used by the drivers.
//!
//! ## Contents
//! - [`TrackingKind`], [`TrackingEvent`] event classification and payload
//! - [`Track`] sink trait for analytics backends
//! - [`SinkSet`] non-blocking fan-out with per-sink queues
//! - [`Tracker`] config-aware front-end handed to the lifecycle drivers
//!
//! ## Quick reference
//! - **Publishers**: `ComponentInstrumentation`, `RouteInstrumentation`.
//! - **Consumers**: user sinks ([`Track`] impls), `LogWriter` (feature `logging`).

mod event;
#[cfg(feature = "logging")]
mod log;
mod set;
mod sink;
mod tracker;

pub use event::{TrackingEvent, TrackingKind};
#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SinkSet;
pub use sink::Track;
pub use tracker::Tracker;
