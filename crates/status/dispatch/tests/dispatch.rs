//! End-to-end tests of the status loop against the simulated node.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use synclog_dispatch::{
    DisplaySystem, EventKind, MemorySink, ProgressState, StatusConfig, StatusLoop, StatusPrinter,
    SyncMode,
};
use synclog_harness::SimulatedNode;
use synclog_node::{Node, NodeEvent};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

fn spawn(
    node: &Arc<SimulatedNode>,
    system: DisplaySystem,
    cancel: &CancellationToken,
) -> tokio::task::JoinHandle<ProgressState> {
    StatusLoop::new(
        Arc::clone(node) as Arc<dyn Node>,
        system,
        StatusConfig::default().with_interval(Duration::from_secs(3600)),
        StatusPrinter::default(),
    )
    .spawn(cancel.clone())
}

/// Three chain inserts in Import mode reach the handler once each, in order.
#[tokio::test]
async fn chain_inserts_dispatch_in_order() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let system = DisplaySystem::new("numbers").on(EventKind::ChainInsert, move |ctx, event| {
        if let Some(NodeEvent::ChainInsert(insert)) = event {
            ctx.state.advance_block_number(insert.last_number);
            let _ = tx.send(insert.last_number);
        }
    });

    let node = Arc::new(SimulatedNode::new());
    node.set_peer_count(5);
    let cancel = CancellationToken::new();
    let handle = spawn(&node, system, &cancel);

    for (count, height) in [(10, 10), (10, 20), (15, 35)] {
        node.set_height(height);
        node.import_blocks(&vec![1; count], Duration::from_millis(1));
    }

    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(tokio::time::timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap());
    }
    cancel.cancel();
    let state = handle.await.unwrap();

    assert_eq!(seen, vec![10, 20, 35]);
    assert!(rx.try_recv().is_err());
    assert_eq!(state.current_block_number(), 35);
    assert_eq!(state.mode, SyncMode::Import);
}

/// Downloader events are routed to their own kinds.
#[tokio::test]
async fn downloader_events_route_by_kind() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut system = DisplaySystem::new("downloader");
    for kind in
        [EventKind::DownloaderStart, EventKind::DownloaderDone, EventKind::DownloaderFailed]
    {
        let tx = tx.clone();
        system = system.on(kind, move |ctx, _| {
            let _ = tx.send((kind, ctx.state.mode));
        });
    }

    let node = Arc::new(SimulatedNode::new());
    node.set_peer_count(2);
    let cancel = CancellationToken::new();
    let handle = spawn(&node, system, &cancel);

    node.start_sync("peer", synclog_node::DownloaderMode::Fast);
    let (kind, mode) = rx.recv().await.unwrap();
    assert_eq!(kind, EventKind::DownloaderStart);
    assert_eq!(mode, SyncMode::FastSync);

    node.fail_sync("peer", "stalled");
    assert_eq!(rx.recv().await.map(|(kind, _)| kind), Some(EventKind::DownloaderFailed));

    cancel.cancel();
    handle.await.unwrap();
}

/// Lines written by handlers reach the printer's sink.
#[tokio::test]
async fn handlers_print_through_the_sink() {
    let sink = MemorySink::new();
    let printer = StatusPrinter::new(Arc::new(sink.clone()), Default::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let system = DisplaySystem::new("printer").on(EventKind::IntervalTick, move |ctx, _| {
        ctx.printer.info(&format!("{} peers", ctx.node.downloader().peer_count()));
        let _ = tx.send(());
    });

    let node = Arc::new(SimulatedNode::new());
    node.set_peer_count(3);
    let cancel = CancellationToken::new();
    let handle = StatusLoop::new(
        Arc::clone(&node) as Arc<dyn Node>,
        system,
        StatusConfig::default(),
        printer,
    )
    .spawn(cancel.clone());

    rx.recv().await.unwrap();
    cancel.cancel();
    handle.await.unwrap();
    assert_eq!(sink.lines(), vec!["3 peers".to_string()]);
}

/// Before runs once, the first tick is immediate, ticks repeat every interval
/// and After runs once cancelled, all on the loop's own state.
#[tokio::test(start_paused = true)]
async fn lifecycle_on_a_paused_clock() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let started = tokio::time::Instant::now();
    let mut system = DisplaySystem::new("lifecycle");
    for kind in [EventKind::Before, EventKind::IntervalTick, EventKind::After] {
        let log = Arc::clone(&log);
        system = system.on(kind, move |ctx, _| {
            let next = ctx.state.current_block_number() + 1;
            ctx.state.advance_block_number(next);
            log.lock().unwrap().push((kind, started.elapsed()));
        });
    }

    let mut seeded = ProgressState::default();
    seeded.advance_block_number(100);
    let status = StatusLoop::new(
        Arc::new(SimulatedNode::new()) as Arc<dyn Node>,
        system,
        StatusConfig::default().with_interval(Duration::from_secs(10)),
        StatusPrinter::default(),
    )
    .with_state(seeded);
    assert_eq!(status.config().interval, Duration::from_secs(10));
    assert_eq!(status.state().current_block_number(), 100);

    let cancel = CancellationToken::new();
    let handle = status.spawn(cancel.clone());
    tokio::time::sleep(Duration::from_secs(25)).await;
    cancel.cancel();
    let state = handle.await.unwrap();

    let secs = Duration::from_secs;
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            (EventKind::Before, secs(0)),
            (EventKind::IntervalTick, secs(0)),
            (EventKind::IntervalTick, secs(10)),
            (EventKind::IntervalTick, secs(20)),
            (EventKind::After, secs(25)),
        ]
    );
    assert_eq!(state.current_block_number(), 105);
    assert_eq!(state.mode, SyncMode::Discover);
}
