//! The basic back end driven by a real status loop on a paused clock.

use std::{sync::Arc, time::Duration};

use synclog_dispatch::{DisplayLevel, MemorySink, StatusConfig, StatusLoop, StatusPrinter};
use synclog_display::basic_display_system;
use synclog_harness::SimulatedNode;
use synclog_node::Node;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

const INTERVAL: Duration = Duration::from_secs(10);

fn spawn_basic(
    node: &Arc<SimulatedNode>,
    sink: &MemorySink,
    cancel: &CancellationToken,
) -> tokio::task::JoinHandle<synclog_dispatch::ProgressState> {
    let printer = StatusPrinter::new(Arc::new(sink.clone()), DisplayLevel::Info);
    StatusLoop::new(
        Arc::clone(node) as Arc<dyn Node>,
        basic_display_system(),
        StatusConfig::default().with_interval(INTERVAL),
        printer,
    )
    .spawn(cancel.clone())
}

/// While importing, a tick within one interval of a rendered chain insert is
/// skipped and the next one renders again.
#[tokio::test(start_paused = true)]
async fn import_ticks_back_off_after_chain_inserts() {
    let node = Arc::new(SimulatedNode::new());
    node.set_peer_count(5);
    node.import_blocks(&[1; 5], Duration::ZERO);
    node.set_height(5);

    let sink = MemorySink::new();
    let cancel = CancellationToken::new();
    let handle = spawn_basic(&node, &sink, &cancel);

    // t=1: the immediate first tick rendered, nothing was inserted yet.
    sleep(Duration::from_secs(1)).await;
    assert_eq!(sink.lines().len(), 1);

    // t=5: an insert renders at once.
    sleep(Duration::from_secs(4)).await;
    node.import_blocks(&[2], Duration::from_millis(3));
    sleep(Duration::from_secs(1)).await;
    assert_eq!(sink.lines().len(), 2);

    // t=12: the tick at t=10 came 5s after the insert and was skipped.
    sleep(Duration::from_secs(6)).await;
    assert_eq!(sink.lines().len(), 2);

    // t=21: the tick at t=20 is a full interval past the insert.
    sleep(Duration::from_secs(9)).await;
    assert_eq!(sink.lines().len(), 3);

    cancel.cancel();
    let state = handle.await.unwrap();
    assert!(sink.lines().iter().all(|line| line.starts_with("Import")));
    assert_eq!(state.current_block_number(), 6);
}

/// Outside of import every tick renders, inserts or not.
#[tokio::test(start_paused = true)]
async fn discover_renders_every_tick() {
    let node = Arc::new(SimulatedNode::new());
    node.set_height(50);

    let sink = MemorySink::new();
    let cancel = CancellationToken::new();
    let handle = spawn_basic(&node, &sink, &cancel);

    sleep(Duration::from_secs(5)).await;
    node.import_blocks(&[1], Duration::ZERO);
    sleep(Duration::from_secs(20)).await;

    cancel.cancel();
    handle.await.unwrap();
    let lines = sink.lines();
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|line| line.starts_with("Discover")));
}
