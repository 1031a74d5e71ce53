//! # interactivity
//!
//! **Interactivity** tracks when routes and nested UI components become
//! usable, and reports timing events for them.
//!
//! Components and routes declare what "interactive" means for them as a
//! predicate over their descendants. Descendants report themselves
//! interactive (or not) and the crate aggregates those reports up the UI tree,
//! resolving each subscriber the moment its predicate holds.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  component   │   │  component   │   │    route     │
//!     │   (leaf)     │   │ (subscriber) │   │ (leaf/parent)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!  ComponentInstrumentation  ComponentInstrumentation  RouteInstrumentation
//!            │                  │                  │
//!            │ report           │ subscribe        │ subscribe
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  InteractivityRegistry                                            │
//! │  - component subscribers (by subscription id)                     │
//! │  - route slot (at most one active route)                          │
//! │  - ancestor walk: report ─► nearest subscribing ancestor          │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ Completion resolves
//!        ▼
//!  driver.monitor() ──► Tracker ──► SinkSet ──► worker ──► sink.on_event()
//!                  └──► TimelineMarker (marks + latency measure)
//! ```
//!
//! ### Aggregation
//! ```text
//! did_reporter_become_interactive(reporter)
//!   ├─► subscriber_for(reporter)          nearest ancestor with a subscription, else route
//!   ├─► counts[reporting_name] += 1
//!   └─► check_interactivity()
//!         ├─ predicate false ─► keep waiting
//!         └─ predicate true  ─► resolve Completion (once)
//!                               └─ route? ─► route slot disarmed
//! ```
//!
//! ## Features
//! | Area               | Description                                                  | Key types / traits                                   |
//! |--------------------|--------------------------------------------------------------|------------------------------------------------------|
//! | **Registry**       | Routes reports to subscribers and resolves predicates.       | [`InteractivityRegistry`], [`SubscriberTarget`]      |
//! | **Subscriptions**  | Declare interactivity conditions over descendants.           | [`ComponentSubscription`], [`RouteSubscription`], [`Query`] |
//! | **Lifecycle**      | Drive the registry from component/route hooks.               | [`lifecycle::ComponentInstrumentation`], [`lifecycle::RouteInstrumentation`] |
//! | **Tracking**       | Fan out timing events to analytics sinks.                    | [`tracking::Track`], [`tracking::Tracker`]           |
//! | **Timeline**       | Performance marks and latency measures.                      | [`timeline::TimelineMarker`]                         |
//! | **Errors**         | Typed errors for contract violations and cancellation.       | [`InteractivityError`]                               |
//! | **Configuration**  | Feature toggles loaded from the environment document.        | [`InteractivityConfig`]                              |
//!
//! ## Optional features
//! - `logging`: exports [`tracking::LogWriter`], a `tracing`-backed sink _(demo/reference only)_.
//! - `test-support`: exports the `testing` module (recording sinks, timelines and registry assertions).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use interactivity::lifecycle::{ComponentInstrumentation, Instruments, RouteInstrumentation, Transition};
//! use interactivity::reporter::{ViewNode, component_identity};
//! use interactivity::tracking::Tracker;
//! use interactivity::InteractivityRegistry;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = InteractivityRegistry::new();
//!     let instruments = Instruments::new(registry.clone(), Tracker::with_sinks(Vec::new()));
//!
//!     // The route is interactive once the feed is.
//!     let route = RouteInstrumentation::new("feed", instruments.clone())
//!         .with_predicate(|q| q.is_interactive("news-feed"));
//!     route.before_model(Transition::to("feed"));
//!     let completion = route.did_transition()?.expect("leaf route with predicate");
//!
//!     let root = ViewNode::root("<app@view:application-wrapper::ember1>");
//!     let feed = ComponentInstrumentation::new(
//!         ViewNode::child(&root, component_identity("app", "news-feed", "ember2")),
//!         instruments,
//!     );
//!     feed.will_insert()?;
//!     feed.report_interactive()?;
//!
//!     route.monitor(completion).await;
//!     assert!(!registry.is_route_active());
//!     Ok(())
//! }
//! ```
mod clock;
mod config;
mod core;
mod error;
mod subscribers;

pub mod lifecycle;
pub mod reporter;
pub mod timeline;
pub mod tracking;

// Recording doubles for tests.
// Enable downstream with: `--features test-support`
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// ---- Public re-exports ----

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{InstrumentationConfig, InteractivityConfig, TimelineMarkingConfig, TrackingConfig};
pub use core::{InteractivityRegistry, SubscriberTarget};
pub use error::InteractivityError;
pub use subscribers::{
    Completion, CompletionSignal, ComponentSubscriber, ComponentSubscription, Predicate, Query,
    ReporterCounts, RouteSubscriber, RouteSubscription, Subscriber, all_of, exactly, predicate,
};
pub use reporter::Reporter;
