//! Handler registry.

use std::{
    fmt,
    time::{Duration, Instant},
};

use synclog_node::{Node, NodeEvent, NodeEventKind};

use crate::{EventKind, ProgressState, StatusPrinter};

/// A display handler.
///
/// Receives the dispatch context and the event payload, `None` for ticks and
/// lifecycle hooks.
pub type HandlerFn = Box<dyn FnMut(&mut HandlerContext<'_>, Option<&NodeEvent>) + Send>;

/// Everything a handler may read or update during one dispatch.
pub struct HandlerContext<'a> {
    /// The observed node.
    pub node: &'a dyn Node,
    /// Progress shared by the handlers of this display system.
    pub state: &'a mut ProgressState,
    /// Ticker interval of the loop.
    pub interval: Duration,
    /// Configured maximum number of peers.
    pub max_peers: usize,
    /// Output for rendered lines.
    pub printer: &'a StatusPrinter,
    /// When the dispatch started.
    pub now: Instant,
}

impl fmt::Debug for HandlerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerContext")
            .field("state", &self.state)
            .field("interval", &self.interval)
            .field("max_peers", &self.max_peers)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

/// Binds one [`EventKind`] to the handlers run for it, in order.
pub struct DisplayEventHandler {
    kind: EventKind,
    handlers: Vec<HandlerFn>,
}

impl fmt::Debug for DisplayEventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayEventHandler")
            .field("kind", &self.kind)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl DisplayEventHandler {
    /// Creates a binding for `kind` without handlers.
    pub fn new(kind: EventKind) -> Self {
        Self { kind, handlers: Vec::new() }
    }

    /// Appends a handler.
    pub fn with<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut HandlerContext<'_>, Option<&NodeEvent>) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    /// The bound kind.
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// Number of handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is bound.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// An ordered registry of [`DisplayEventHandler`]s forming one display back end.
pub struct DisplaySystem {
    name: &'static str,
    bindings: Vec<DisplayEventHandler>,
}

impl fmt::Debug for DisplaySystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplaySystem")
            .field("name", &self.name)
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl DisplaySystem {
    /// Creates an empty system.
    pub fn new(name: &'static str) -> Self {
        Self { name, bindings: Vec::new() }
    }

    /// Name of the system.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Appends a binding.
    pub fn bind(mut self, binding: DisplayEventHandler) -> Self {
        self.bindings.push(binding);
        self
    }

    /// Appends a binding of `kind` to a single handler.
    pub fn on<F>(self, kind: EventKind, handler: F) -> Self
    where
        F: FnMut(&mut HandlerContext<'_>, Option<&NodeEvent>) + Send + 'static,
    {
        self.bind(DisplayEventHandler::new(kind).with(handler))
    }

    /// Whether any handler is bound to `kind`.
    pub fn handles(&self, kind: EventKind) -> bool {
        self.bindings.iter().any(|b| b.kind == kind && !b.is_empty())
    }

    /// Bound kinds in registration order, without duplicates.
    pub fn kinds(&self) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        for binding in &self.bindings {
            if !kinds.contains(&binding.kind) {
                kinds.push(binding.kind);
            }
        }
        kinds
    }

    /// Node event kinds a loop running this system must subscribe to.
    pub fn node_kinds(&self) -> Vec<NodeEventKind> {
        self.kinds().into_iter().filter_map(EventKind::node_kind).collect()
    }

    /// Run every handler bound to `kind`, in registration order.
    ///
    /// Returns the number of handlers run.
    pub fn dispatch(
        &mut self,
        kind: EventKind,
        ctx: &mut HandlerContext<'_>,
        event: Option<&NodeEvent>,
    ) -> usize {
        let mut ran = 0;
        for binding in self.bindings.iter_mut().filter(|b| b.kind == kind) {
            for handler in &mut binding.handlers {
                handler(ctx, event);
                ran += 1;
            }
        }
        ran
    }
}
