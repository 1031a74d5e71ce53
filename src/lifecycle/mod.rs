//! Lifecycle drivers: glue between UI lifecycle hooks and the registry.
//!
//! - [`ComponentInstrumentation`] wraps one component instance.
//! - [`RouteInstrumentation`] wraps one route.
//! - [`Beacon`] is a ready-made leaf component.
//!
//! Drivers share an [`Instruments`] bundle (registry, tracker, timeline and
//! [`AppContext`]). They never fail rendering: errors surface as return
//! values or tracked error events.

mod beacon;
mod component;
mod context;
mod route;

pub use beacon::{Beacon, beacon_reporting_name};
pub use component::ComponentInstrumentation;
pub use context::{AppContext, Instruments};
pub use route::{
    REASON_MONITORING_CANCELLED, REASON_PREDICATE_FAILED, REASON_TRANSITIONED_AWAY,
    RouteInstrumentation, Transition,
};
