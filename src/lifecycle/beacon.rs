//! Beacon: a marker component that reports interactive once rendered.

use std::sync::Arc;

use crate::error::InteractivityError;
use crate::reporter::{Reporter, ViewNode};

use super::component::ComponentInstrumentation;
use super::context::Instruments;

/// Reporting name of the beacon with the given id.
pub fn beacon_reporting_name(beacon_id: &str) -> String {
    format!("beacon:{beacon_id}")
}

/// Leaf reporter dropped into a template to signal "this part has rendered".
///
/// Parents refer to it by `beacon:{id}` in their predicates.
///
/// ## Example
/// ```rust
/// use interactivity::InteractivityRegistry;
/// use interactivity::lifecycle::{Beacon, Instruments};
/// use interactivity::reporter::ViewNode;
/// use interactivity::tracking::Tracker;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = InteractivityRegistry::new();
/// let instruments = Instruments::new(registry.clone(), Tracker::with_sinks(Vec::new()));
/// let root = ViewNode::root("<app@view:application-wrapper::ember1>");
///
/// let beacon = Beacon::new(&root, "<app@component:interactivity-beacon::ember7>", "hero", instruments);
/// beacon.will_insert().unwrap();
/// beacon.rendered().unwrap();
/// assert_eq!(registry.route_count("beacon:hero"), 1);
/// # }
/// ```
pub struct Beacon {
    beacon_id: String,
    driver: ComponentInstrumentation,
}

impl Beacon {
    /// Mounts a beacon under `parent`.
    pub fn new(
        parent: &Arc<ViewNode>,
        identity: impl Into<String>,
        beacon_id: impl Into<String>,
        instruments: Instruments,
    ) -> Self {
        let beacon_id = beacon_id.into();
        let node = ViewNode::named(Some(parent), identity, beacon_reporting_name(&beacon_id));
        Self {
            beacon_id,
            driver: ComponentInstrumentation::new(node, instruments),
        }
    }

    /// Beacon id as given by the template.
    pub fn beacon_id(&self) -> &str {
        &self.beacon_id
    }

    /// Reporting name (`beacon:{id}`).
    pub fn reporting_name(&self) -> String {
        self.driver.reporter().reporting_name().into_owned()
    }

    /// Beacon is about to render.
    pub fn will_insert(&self) -> Result<(), InteractivityError> {
        self.driver.will_insert().map(|_| ())
    }

    /// Beacon finished rendering.
    pub fn rendered(&self) -> Result<(), InteractivityError> {
        self.driver.report_interactive()
    }

    /// Beacon is being torn down.
    pub fn will_destroy(&self) {
        self.driver.will_destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InteractivityRegistry;
    use crate::reporter::component_identity;
    use crate::subscribers::RouteSubscription;
    use crate::tracking::Tracker;

    #[tokio::test]
    async fn beacon_satisfies_route_predicate() {
        let registry = InteractivityRegistry::new();
        let instruments = Instruments::new(registry.clone(), Tracker::with_sinks(Vec::new()));
        let root = ViewNode::root("<app@view:application-wrapper::ember1>");

        let done = registry
            .subscribe_route(RouteSubscription::new("home").with_predicate(|q| q.is_interactive("beacon:hero")))
            .expect("subscribe");

        let beacon = Beacon::new(
            &root,
            component_identity("app", "interactivity-beacon", "ember7"),
            "hero",
            instruments,
        );
        assert_eq!(beacon.reporting_name(), "beacon:hero");
        assert_eq!(beacon.beacon_id(), "hero");

        beacon.will_insert().expect("beacon never subscribes");
        beacon.rendered().expect("beacon is a leaf");
        assert!(done.is_resolved());

        beacon.will_destroy();
        assert_eq!(registry.route_count("beacon:hero"), 0);
    }
}
