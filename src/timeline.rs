//! # Performance-timeline marking.
//!
//! Drivers place a mark when an entity starts initializing and another when it
//! becomes interactive; the second mark also records a latency measure
//! spanning both:
//!
//! ```text
//! mark_timeline(Initializing, label) ─► mark("Component Initializing: foo::ember1")
//! mark_timeline(Interactive,  label) ─► mark("Component Interactive: foo::ember1")
//!                                    └► measure("Component Latency: foo::ember1",
//!                                               from "... Initializing ...", to "... Interactive ...")
//! ```
//!
//! Marking is purely observational and never affects control flow.

use std::fmt;

/// Kind of timeline label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimelineLabel {
    /// Entity started rendering.
    Initializing,
    /// Entity became interactive.
    Interactive,
    /// Measure between the two marks.
    Latency,
}

impl TimelineLabel {
    /// Label text used in timeline entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineLabel::Initializing => "Initializing",
            TimelineLabel::Interactive => "Interactive",
            TimelineLabel::Latency => "Latency",
        }
    }
}

impl fmt::Display for TimelineLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Performance-timeline backend.
pub trait TimelineMarker: Send + Sync + 'static {
    /// Places a named mark.
    fn mark(&self, label: &str);

    /// Records a named measure between two previously placed marks.
    fn measure(&self, label: &str, start_mark: &str, end_mark: &str);
}

/// Marker that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTimeline;

impl TimelineMarker for NoopTimeline {
    fn mark(&self, _label: &str) {}

    fn measure(&self, _label: &str, _start_mark: &str, _end_mark: &str) {}
}

/// Marks `kind` on `marker`, adding a latency measure for [`TimelineLabel::Interactive`].
pub fn mark_timeline<F>(marker: &dyn TimelineMarker, kind: TimelineLabel, label: F)
where
    F: Fn(TimelineLabel) -> String,
{
    marker.mark(&label(kind));

    if kind == TimelineLabel::Interactive {
        marker.measure(
            &label(TimelineLabel::Latency),
            &label(TimelineLabel::Initializing),
            &label(TimelineLabel::Interactive),
        );
    }
}
