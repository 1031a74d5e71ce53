//! # Interactivity subscribers.
//!
//! Aggregation points that answer "have my named children reported
//! interactive, and how many of them?".
//!
//! ## Contents
//! - [`Subscriber`] shared count/check behavior
//! - [`ComponentSubscriber`] one per subscribing component, keyed by subscription id
//! - [`RouteSubscriber`] the single route slot
//! - [`ReporterCounts`], [`Query`], [`Predicate`] the tally and its read-only view
//! - [`CompletionSignal`], [`Completion`] set-once resolution
//!
//! ## Quick wiring
//! ```text
//! InteractivityRegistry
//!   ├─ components: HashMap<id, ComponentSubscriber>
//!   └─ route: RouteSubscriber
//!        each: ReporterCounts + Predicate + CompletionSignal ──► Completion (caller)
//! ```

mod component;
mod counts;
mod route;
mod signal;
mod subscriber;

pub use component::{ComponentSubscriber, ComponentSubscription};
pub use counts::{Predicate, Query, ReporterCounts, all_of, exactly, predicate};
pub use route::{RouteSubscriber, RouteSubscription};
pub use signal::{Completion, CompletionSignal};
pub use subscriber::Subscriber;
