//! # SinkSet: non-blocking fan-out over multiple tracking sinks
//!
//! [`SinkSet`] distributes each [`TrackingEvent`] to multiple sinks
//! **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&TrackingEvent)` returns immediately.
//! - Per-sink FIFO (queue order).
//! - Panics inside sinks are caught and logged (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different sinks (use `seq`).
//! - No retries on per-sink queue overflow (events are dropped for that sink).
//!
//! ## Diagram
//! ```text
//!    emit(&TrackingEvent)
//!        │                        (Arc-clone per sink)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```
//!
//! Workers are spawned on the current Tokio runtime, so [`SinkSet::new`] must
//! be called from within one.

use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::{sync::mpsc, task::JoinHandle};

use super::event::TrackingEvent;
use super::sink::Track;

/// Per-sink channel with metadata.
struct SinkChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<TrackingEvent>>,
}

/// Composite fan-out with per-sink bounded queues and worker tasks.
pub struct SinkSet {
    channels: Mutex<Vec<SinkChannel>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl SinkSet {
    /// Creates a new set and spawns one worker per sink.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Track>>) -> Self {
        let mut channels = Vec::with_capacity(sinks.len());
        let mut workers = Vec::with_capacity(sinks.len());

        for sink in sinks {
            let cap = sink.queue_capacity().max(1);
            let name = sink.name();
            let (tx, mut rx) = mpsc::channel::<Arc<TrackingEvent>>(cap);
            let s = Arc::clone(&sink);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.on_event(ev.as_ref());
                    if let Err(panic) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        tracing::warn!(sink = s.name(), ?panic, "tracking sink panicked");
                    }
                }
            });

            channels.push(SinkChannel { name, sender: tx });
            workers.push(handle);
        }

        Self {
            channels: Mutex::new(channels),
            workers: Mutex::new(workers),
        }
    }

    /// Fan-out one event to all sinks (non-blocking).
    ///
    /// If a sink's queue is **full** or **closed**, the event is dropped for it
    /// and a warning is logged with the sink's name.
    pub fn emit(&self, event: &TrackingEvent) {
        let ev = Arc::new(event.clone());
        for channel in self.channels.lock().iter() {
            match channel.sender.try_send(Arc::clone(&ev)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    tracing::warn!(sink = channel.name, event = ev.name(), "tracking event dropped: queue full");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    tracing::warn!(sink = channel.name, event = ev.name(), "tracking event dropped: worker closed");
                }
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    ///
    /// Events already queued are delivered first. Later `emit` calls are no-ops.
    pub async fn shutdown(&self) {
        drop(std::mem::take(&mut *self.channels.lock()));
        let workers = std::mem::take(&mut *self.workers.lock());
        for h in workers {
            let _ = h.await;
        }
    }

    /// True if there are no sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.lock().is_empty()
    }

    /// Number of sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackingKind;
    use async_trait::async_trait;

    #[derive(Default)]
    struct Collect(Mutex<Vec<u64>>);

    #[async_trait]
    impl Track for Collect {
        async fn on_event(&self, event: &TrackingEvent) {
            self.0.lock().push(event.seq);
        }

        fn name(&self) -> &'static str {
            "collect"
        }
    }

    struct Explode;

    #[async_trait]
    impl Track for Explode {
        async fn on_event(&self, _event: &TrackingEvent) {
            panic!("sink failure");
        }

        fn name(&self) -> &'static str {
            "explode"
        }
    }

    #[tokio::test]
    async fn delivers_in_order_and_isolates_panics() {
        let collect = Arc::new(Collect::default());
        let sinks: Vec<Arc<dyn Track>> = vec![Arc::new(Explode), collect.clone()];
        let set = SinkSet::new(sinks);
        assert_eq!(set.len(), 2);

        let events: Vec<TrackingEvent> = (0..3)
            .map(|_| TrackingEvent::new(TrackingKind::RouteActivating))
            .collect();
        for ev in &events {
            set.emit(ev);
        }
        set.shutdown().await;

        let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
        assert_eq!(*collect.0.lock(), seqs);
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn emit_after_shutdown_is_dropped() {
        let collect = Arc::new(Collect::default());
        let set = SinkSet::new(vec![collect.clone() as Arc<dyn Track>]);
        set.shutdown().await;
        set.emit(&TrackingEvent::new(TrackingKind::RouteActivating));
        assert!(collect.0.lock().is_empty());
    }
}
