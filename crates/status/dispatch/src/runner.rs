//! The event dispatch loop.

use std::{sync::Arc, time::Duration};

use synclog_node::{Node, NodeEvent, Subscription};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    DEFAULT_SYNC_INTERVAL, DisplaySystem, EventKind, HandlerContext, ProgressState, StatusPrinter,
    classify,
};

/// Default maximum number of peers shown next to the peer count.
pub const DEFAULT_MAX_PEERS: usize = 25;

/// Status loop configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusConfig {
    /// Ticker interval (default: 60s).
    pub interval: Duration,
    /// Maximum number of peers shown next to the peer count (default: 25).
    pub max_peers: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { interval: DEFAULT_SYNC_INTERVAL, max_peers: DEFAULT_MAX_PEERS }
    }
}

impl StatusConfig {
    /// Sets the ticker interval.
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the maximum number of peers.
    pub const fn with_max_peers(mut self, max_peers: usize) -> Self {
        self.max_peers = max_peers;
        self
    }
}

/// Routes node events and ticks through a [`DisplaySystem`].
///
/// The loop is the only owner of the [`ProgressState`], so handlers bound to
/// events and handlers bound to ticks never run concurrently.
pub struct StatusLoop {
    node: Arc<dyn Node>,
    system: DisplaySystem,
    config: StatusConfig,
    printer: StatusPrinter,
    state: ProgressState,
    subscription: Subscription,
}

impl std::fmt::Debug for StatusLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusLoop")
            .field("system", &self.system)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl StatusLoop {
    /// Create a loop for `system` and subscribe to the node events it handles.
    ///
    /// Events posted after this call are delivered once the loop runs.
    pub fn new(
        node: Arc<dyn Node>,
        system: DisplaySystem,
        config: StatusConfig,
        printer: StatusPrinter,
    ) -> Self {
        let subscription = node.event_mux().subscribe(system.node_kinds());
        Self { node, system, config, printer, state: ProgressState::default(), subscription }
    }

    /// Replace the initial progress state.
    pub fn with_state(mut self, state: ProgressState) -> Self {
        self.state = state;
        self
    }

    /// The current progress state.
    pub const fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The loop configuration.
    pub const fn config(&self) -> &StatusConfig {
        &self.config
    }

    /// Refresh the sync mode and run the handlers bound to `kind`.
    ///
    /// The dispatch time is read from tokio's clock, the same clock the ticker
    /// runs on.
    fn dispatch(&mut self, kind: EventKind, event: Option<&NodeEvent>) {
        let node = &*self.node;
        self.state.mode = classify(node);
        let mut ctx = HandlerContext {
            node,
            state: &mut self.state,
            interval: self.config.interval,
            max_peers: self.config.max_peers,
            printer: &self.printer,
            now: tokio::time::Instant::now().into_std(),
        };
        let ran = self.system.dispatch(kind, &mut ctx, event);
        tracing::trace!(%kind, ran, mode = %self.state.mode, "Dispatched status event");
    }

    /// Run until `cancel` fires and return the final progress state.
    ///
    /// `Before` handlers run first. The ticker's first tick fires immediately,
    /// so an initial status is rendered right away. `After` handlers run once
    /// cancellation is observed.
    pub async fn run(mut self, cancel: CancellationToken) -> ProgressState {
        tracing::info!(
            system = self.system.name(),
            interval = ?self.config.interval,
            "Starting status loop"
        );
        self.dispatch(EventKind::Before, None);

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut events_open = true;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = self.subscription.recv(), if events_open => match event {
                    Some(event) => {
                        self.dispatch(EventKind::from(event.kind()), Some(&event));
                    }
                    None => {
                        tracing::debug!("Node event stream closed, ticking only");
                        events_open = false;
                    }
                },
                _ = ticker.tick() => self.dispatch(EventKind::IntervalTick, None),
            }
        }

        tracing::warn!(system = self.system.name(), "SYNC Stopping.");
        self.dispatch(EventKind::After, None);
        self.state
    }

    /// Spawn [`StatusLoop::run`] on the current tokio runtime.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<ProgressState> {
        tokio::spawn(self.run(cancel))
    }
}
