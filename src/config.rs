//! # Interactivity configuration.
//!
//! Provides [`InteractivityConfig`], the toggles read from the application's
//! environment document under the `interactivity` key:
//!
//! ```json
//! {
//!   "interactivity": {
//!     "tracking":        { "disableComponents": false, "disableLeafComponents": true },
//!     "timelineMarking": { "disableComponents": false, "disableLeafComponents": false,
//!                          "disableRoutes": false, "disableParentRoutes": true },
//!     "instrumentation": { "disableComponents": false, "disableRoutes": false }
//!   }
//! }
//! ```
//!
//! ## Defaults
//! Every unset path means "not disabled". An empty document enables everything.

use serde::Deserialize;

use crate::error::InteractivityError;

/// Toggles for tracking events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackingConfig {
    /// Drop every component tracking event.
    pub disable_components: bool,
    /// Drop tracking events of components without a predicate.
    pub disable_leaf_components: bool,
    /// Drop every route tracking event.
    pub disable_routes: bool,
    /// Drop tracking events of routes that are not the transition target.
    pub disable_parent_routes: bool,
}

/// Toggles for performance-timeline marks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineMarkingConfig {
    /// Never mark components.
    pub disable_components: bool,
    /// Never mark components without a predicate.
    pub disable_leaf_components: bool,
    /// Never mark routes.
    pub disable_routes: bool,
    /// Never mark routes that are not the transition target.
    pub disable_parent_routes: bool,
}

/// Toggles applied by the tracking sink itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstrumentationConfig {
    /// Component events never reach the sinks.
    pub disable_components: bool,
    /// Route events never reach the sinks.
    pub disable_routes: bool,
}

/// Configuration for component/route instrumentation.
///
/// ## Field semantics
/// - `tracking`: which tracking events the lifecycle drivers emit
/// - `timeline_marking`: which timeline marks the lifecycle drivers place
/// - `instrumentation`: which events the [`Tracker`](crate::tracking::Tracker) forwards
///
/// Prefer the helper accessors over reading flags directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractivityConfig {
    pub tracking: TrackingConfig,
    pub timeline_marking: TimelineMarkingConfig,
    pub instrumentation: InstrumentationConfig,
}

#[derive(Deserialize)]
struct Environment {
    interactivity: Option<InteractivityConfig>,
}

impl InteractivityConfig {
    /// Parses an environment document.
    ///
    /// Accepts either the full environment (reads its `interactivity` key) or
    /// the bare interactivity object.
    ///
    /// # Example
    /// ```
    /// use interactivity::InteractivityConfig;
    ///
    /// let cfg = InteractivityConfig::from_json(
    ///     r#"{ "interactivity": { "tracking": { "disableLeafComponents": true } } }"#,
    /// ).unwrap();
    /// assert!(cfg.tracking.disable_leaf_components);
    /// assert!(!cfg.tracking.disable_components);
    /// ```
    pub fn from_json(doc: &str) -> Result<Self, InteractivityError> {
        let value: serde_json::Value =
            serde_json::from_str(doc).map_err(|e| InteractivityError::Config {
                reason: e.to_string(),
            })?;

        let parsed = if value.get("interactivity").is_some() {
            serde_json::from_value::<Environment>(value).map(|env| env.interactivity.unwrap_or_default())
        } else {
            serde_json::from_value::<InteractivityConfig>(value)
        };
        parsed.map_err(|e| InteractivityError::Config {
            reason: e.to_string(),
        })
    }

    /// Whether a component may emit tracking events.
    #[inline]
    pub fn component_tracking_enabled(&self, is_subscriber: bool) -> bool {
        let t = &self.tracking;
        !(t.disable_components || (t.disable_leaf_components && !is_subscriber))
    }

    /// Whether a component may place timeline marks.
    #[inline]
    pub fn component_timeline_enabled(&self, is_subscriber: bool) -> bool {
        let t = &self.timeline_marking;
        !(t.disable_components || (t.disable_leaf_components && !is_subscriber))
    }

    /// Whether a route may emit tracking events.
    #[inline]
    pub fn route_tracking_enabled(&self, is_leaf: bool) -> bool {
        let t = &self.tracking;
        !(t.disable_routes || (t.disable_parent_routes && !is_leaf))
    }

    /// Whether a route may place timeline marks.
    #[inline]
    pub fn route_timeline_enabled(&self, is_leaf: bool) -> bool {
        let t = &self.timeline_marking;
        !(t.disable_routes || (t.disable_parent_routes && !is_leaf))
    }

    /// Whether component events reach the tracking sinks at all.
    #[inline]
    pub fn component_instrumentation_enabled(&self) -> bool {
        !self.instrumentation.disable_components
    }

    /// Whether route events reach the tracking sinks at all.
    #[inline]
    pub fn route_instrumentation_enabled(&self) -> bool {
        !self.instrumentation.disable_routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_enables_everything() {
        let cfg = InteractivityConfig::from_json("{}").expect("valid json");
        assert_eq!(cfg, InteractivityConfig::default());
        assert!(cfg.component_tracking_enabled(false));
        assert!(cfg.route_timeline_enabled(false));
        assert!(cfg.component_instrumentation_enabled());
    }

    #[test]
    fn environment_without_interactivity_key_is_default() {
        let cfg = InteractivityConfig::from_json(r#"{ "modulePrefix": "app" }"#).expect("valid json");
        assert_eq!(cfg, InteractivityConfig::default());
    }

    #[test]
    fn leaf_flags_only_hit_leaves() {
        let cfg = InteractivityConfig::from_json(
            r#"{ "tracking": { "disableLeafComponents": true },
                 "timelineMarking": { "disableParentRoutes": true } }"#,
        )
        .expect("valid json");

        assert!(!cfg.component_tracking_enabled(false));
        assert!(cfg.component_tracking_enabled(true));
        assert!(!cfg.route_timeline_enabled(false));
        assert!(cfg.route_timeline_enabled(true));
        assert!(cfg.route_tracking_enabled(false));
    }

    #[test]
    fn disable_all_wins_over_subscriber_status() {
        let mut cfg = InteractivityConfig::default();
        cfg.timeline_marking.disable_components = true;
        cfg.tracking.disable_routes = true;
        assert!(!cfg.component_timeline_enabled(true));
        assert!(!cfg.route_tracking_enabled(true));
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = InteractivityConfig::from_json("{ nope").unwrap_err();
        assert_eq!(err.as_label(), "invalid_config");
    }
}
