//! Display system feeding the dashboard.

use std::{
    io,
    sync::{Arc, Mutex, PoisonError},
    time::SystemTime,
};

use synclog_dispatch::{BlockDiff, DisplaySystem, EventKind, HandlerContext};
use synclog_node::NodeEvent;

use crate::{DashState, DashUi};

fn refresh_header(ctx: &HandlerContext<'_>, state: &mut DashState) {
    let chain = ctx.node.chain();
    let head = chain
        .block_by_number(ctx.state.current_block_number())
        .unwrap_or_else(|| chain.current_block());
    state.set_header(ctx.state.mode, &head, SystemTime::now());
}

/// Keep a started dashboard. Without a terminal the system still tracks
/// progress, it just draws nothing.
fn install(slot: &Mutex<Option<DashUi>>, started: io::Result<DashUi>) {
    match started {
        Ok(dash) => *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(dash),
        Err(e) => tracing::warn!(error = %e, "Terminal unavailable, dashboard disabled"),
    }
}

/// Build the dashboard display system drawing into `state`.
///
/// The terminal is taken over on `Before` and released on `After`. Chain
/// inserts and ticks only update `state`, so the system keeps running, and
/// can be driven, without a terminal.
pub fn dash_display_system(state: Arc<Mutex<DashState>>) -> DisplaySystem {
    let ui: Arc<Mutex<Option<DashUi>>> = Arc::default();
    let before_ui = Arc::clone(&ui);
    let before_state = Arc::clone(&state);
    let insert_state = Arc::clone(&state);
    let tick_state = state;

    DisplaySystem::new("dash")
        .on(EventKind::Before, move |ctx, _| {
            if ctx.state.current_block_number() == 0 {
                ctx.state.advance_block_number(ctx.node.downloader().progress().current);
            }
            refresh_header(ctx, &mut before_state.lock().unwrap_or_else(PoisonError::into_inner));
            let started = DashUi::start(Arc::clone(&before_state), ctx.printer.clone());
            install(&before_ui, started);
        })
        .on(EventKind::ChainInsert, move |ctx, event| {
            let Some(NodeEvent::ChainInsert(insert)) = event else {
                return;
            };
            let progress = ctx.node.downloader().progress();
            let local = insert.last_number.max(progress.current);
            let mut dash = insert_state.lock().unwrap_or_else(PoisonError::into_inner);
            dash.set_sync_height(local, progress.height);

            let last = ctx.state.current_block_number();
            if last != 0 {
                let chain = ctx.node.chain();
                let Some(head) = chain.block_by_number(local) else {
                    tracing::debug!(local, "Local head missing, skipping dashboard sample");
                    return;
                };
                let diff = BlockDiff::between(chain, last, &head);
                dash.record_insert(local, diff, SystemTime::now(), insert.elapsed);
            }
            ctx.state.advance_block_number(local);
            refresh_header(ctx, &mut dash);
        })
        .on(EventKind::IntervalTick, move |ctx, _| {
            let peers = ctx.node.downloader().peers();
            let mut dash = tick_state.lock().unwrap_or_else(PoisonError::into_inner);
            dash.record_peers(&peers, ctx.max_peers);
            if ctx.node.is_listening() {
                refresh_header(ctx, &mut dash);
            }
        })
        .on(EventKind::After, move |_, _| {
            let dash = ui.lock().unwrap_or_else(PoisonError::into_inner).take();
            if let Some(mut dash) = dash {
                dash.stop();
            }
        })
}
