//! # LogWriter - tracking events as `tracing` records
//!
//! A minimal sink that writes every [`TrackingEvent`] as one structured
//! `tracing::info!` record under the `interactivity` target.
//! Use it for demos or local debugging.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO interactivity: componentInitializing component="feed" client_time=1700000000.1
//! INFO interactivity: componentInteractive component="feed" elapsed=0.12
//! INFO interactivity: routeInteractive route="posts.index" app_launch=true elapsed=812.0
//! WARN interactivity: error route="feed" reason="transitioned_before_interactive"
//! ```

use async_trait::async_trait;

use super::event::{TrackingEvent, TrackingKind};
use super::sink::Track;

/// Event writer sink.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Track for LogWriter {
    async fn on_event(&self, e: &TrackingEvent) {
        match e.kind {
            TrackingKind::ComponentInitializing => {
                tracing::info!(
                    target: "interactivity",
                    component = e.component.as_deref(),
                    client_time = e.client_time,
                    "componentInitializing"
                );
            }
            TrackingKind::ComponentInteractive => {
                tracing::info!(
                    target: "interactivity",
                    component = e.component.as_deref(),
                    elapsed = e.time_elapsed,
                    "componentInteractive"
                );
            }
            TrackingKind::RouteInitializing | TrackingKind::RouteActivating => {
                tracing::info!(
                    target: "interactivity",
                    route = e.route_name.as_deref(),
                    destination = e.destination.as_deref(),
                    "{}",
                    e.kind.name()
                );
            }
            TrackingKind::RouteInteractive => {
                tracing::info!(
                    target: "interactivity",
                    route = e.route_name.as_deref(),
                    app_launch = e.is_app_launch,
                    elapsed = e.time_elapsed,
                    "routeInteractive"
                );
            }
            TrackingKind::Error => {
                tracing::warn!(
                    target: "interactivity",
                    route = e.route_name.as_deref(),
                    reason = e.reason.as_deref(),
                    "error"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
