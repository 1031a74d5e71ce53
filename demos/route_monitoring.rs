//! # Example: route_monitoring
//!
//! Monitors a `feed` route that is interactive once its story list and a
//! sidebar beacon are. The story list is itself a subscriber waiting for
//! three stories.
//!
//! ## Tree
//! ```text
//! application-wrapper
//!   ├─ story-list   (is_interactive: 3 x story)
//!   │    ├─ story
//!   │    ├─ story
//!   │    └─ story
//!   └─ beacon:sidebar
//! ```
//!
//! ## Flow
//! ```text
//! route.before_model ─► routeInitializing
//! route.did_transition ─► subscribe_route(feed)
//! story x3 report ─► story-list resolves ─► componentInteractive ─► feed counts story-list
//! beacon rendered ─► feed resolves ─► routeInteractive (isAppLaunch = true)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=interactivity=info cargo run --example route_monitoring --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use interactivity::lifecycle::{
    AppContext, Beacon, ComponentInstrumentation, Instruments, RouteInstrumentation, Transition,
};
use interactivity::reporter::{ViewNode, component_identity};
use interactivity::tracking::{LogWriter, Track, Tracker};
use interactivity::{InteractivityConfig, InteractivityRegistry, SystemClock, all_of};
use tracing_subscriber::EnvFilter;

const ENVIRONMENT: &str = r#"{
  "interactivity": {
    "tracking": { "disableLeafComponents": true }
  }
}"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(InteractivityConfig::from_json(ENVIRONMENT)?);
    let sinks: Vec<Arc<dyn Track>> = vec![Arc::new(LogWriter::new())];
    let tracker = Tracker::new(config, Arc::new(SystemClock), sinks);
    let registry = InteractivityRegistry::new();
    let app = Arc::new(AppContext::new(tracker.now_millis() - 350.0));
    let instruments = Instruments::new(registry.clone(), tracker.clone()).with_app(app);

    let route = RouteInstrumentation::new("feed", instruments.clone())
        .with_shared_predicate(all_of(["story-list", "beacon:sidebar"]));
    route.before_model(Transition::to("feed"));
    route.activate();
    let Some(completion) = route.did_transition()? else {
        anyhow::bail!("feed is the transition target and declares a predicate");
    };

    let root = ViewNode::root("<demo@view:application-wrapper::ember1>");
    let list_node = ViewNode::child(&root, component_identity("demo", "story-list", "ember2"));
    let list = Arc::new(
        ComponentInstrumentation::new(list_node.clone(), instruments.clone())
            .with_predicate(|q| q.is_interactive_count("story", 3)),
    );
    if let Some(done) = list.will_insert()? {
        let list = Arc::clone(&list);
        tokio::spawn(async move { list.monitor(done).await });
    }

    for i in 0..3 {
        let story = ComponentInstrumentation::new(
            ViewNode::child(&list_node, component_identity("demo", "story", &format!("ember{}", 10 + i))),
            instruments.clone(),
        );
        story.will_insert()?;
        tokio::time::sleep(Duration::from_millis(40)).await;
        story.report_interactive()?;
    }

    let beacon = Beacon::new(
        &root,
        component_identity("demo", "interactivity-beacon", "ember20"),
        "sidebar",
        instruments,
    );
    beacon.will_insert()?;
    tokio::time::sleep(Duration::from_millis(20)).await;
    beacon.rendered()?;

    route.monitor(completion).await;
    tracing::info!(active = registry.is_route_active(), "feed monitoring finished");

    tracker.shutdown().await;
    Ok(())
}
