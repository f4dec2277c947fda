//! Fixed-width status lines.

use std::time::{Duration, Instant};

use synclog_dispatch::{
    BlockDiff, DisplaySystem, EventKind, HandlerContext, ProgressState, SyncMode,
};
use synclog_node::{Block, ChainInsertEvent, DownloaderMode, NodeEvent};
use synclog_tui_common::{calc_percent, format_block_number};

use crate::{basic_line, format_local_of_max, format_peers, format_progress_rate, short_hash};

/// Build the basic display system.
///
/// Chain inserts render immediately once the node is importing, mined blocks
/// always render, and ticks render when [`basic_tick_due`] says so.
pub fn basic_display_system() -> DisplaySystem {
    DisplaySystem::new("basic")
        .on(EventKind::ChainInsert, |ctx, event| {
            if ctx.state.mode != SyncMode::Import {
                return;
            }
            if let Some(NodeEvent::ChainInsert(insert)) = event {
                if let Some(number) = print_status_basic(ctx, Some(insert)) {
                    ctx.state.advance_block_number(number);
                }
                ctx.state.mark_chain_event(ctx.now);
            }
        })
        .on(EventKind::MinedBlock, |ctx, event| {
            if let Some(NodeEvent::MinedBlock(block)) = event {
                print_mined_basic(ctx, block);
                ctx.state.advance_block_number(block.number);
            }
        })
        .on(EventKind::IntervalTick, |ctx, _| {
            if !basic_tick_due(ctx.state, ctx.now, ctx.interval) {
                return;
            }
            if let Some(number) = print_status_basic(ctx, None) {
                ctx.state.advance_block_number(number);
            }
        })
}

/// Whether an interval tick should render a basic status line.
///
/// Outside of import every tick renders. While importing, ticks are
/// suppressed as long as a chain insert was rendered within the last
/// `interval`.
pub fn basic_tick_due(state: &ProgressState, now: Instant, interval: Duration) -> bool {
    state.mode != SyncMode::Import
        || state.since_chain_event(now).is_none_or(|since| since >= interval)
}

fn print_mined_basic(ctx: &HandlerContext<'_>, block: &Block) {
    let diff = BlockDiff::of_block(block);
    let line = basic_line(
        "Mined",
        &format_local_of_max(block.number, 0, 1),
        &short_hash(block),
        &format!("{:3}/{:2}", diff.txs, diff.mgas),
        "txs/mgas",
        &format_peers(ctx.node.downloader().peer_count(), ctx.max_peers),
    );
    ctx.printer.warn(&line);
}

/// Render one basic status line for the current mode.
///
/// Returns the local head number the line describes, or `None` in
/// [`SyncMode::Discover`] where only the peer count is shown.
pub fn print_status_basic(
    ctx: &HandlerContext<'_>,
    insert: Option<&ChainInsertEvent>,
) -> Option<u64> {
    let mode = ctx.state.mode;
    let node = ctx.node;
    let chain = node.chain();
    let downloader = node.downloader();
    let peers = format_peers(downloader.peer_count(), ctx.max_peers);

    if mode == SyncMode::Discover {
        ctx.printer.warn(&basic_line(&mode.to_string(), "", "", "", "", &peers));
        return None;
    }

    let progress = downloader.progress();
    let fast = downloader.mode() == DownloaderMode::Fast;
    let current = if fast { chain.current_fast_block().number } else { progress.current };

    let head = match insert {
        Some(insert) if mode == SyncMode::Import => chain.block_by_hash(&insert.last_hash),
        Some(_) => None,
        None => chain.block_by_number(current),
    }
    .unwrap_or_else(|| if fast { chain.current_fast_block() } else { chain.current_block() });

    let processed = insert.map_or(0, |insert| insert.processed);
    let last = ctx.state.current_block_number();
    let diff = if mode == SyncMode::Import && processed == 1 {
        BlockDiff::of_block(&head)
    } else {
        let baseline = if processed > 1 {
            head.number.saturating_sub(processed as u64)
        } else if last == 0 && progress.origin > 0 {
            progress.origin
        } else if last != 0 && last < head.number {
            last
        } else {
            head.number.saturating_sub(1)
        };
        BlockDiff::between(chain, baseline, &head)
    };

    let local_of_max = format_local_of_max(head.number, progress.height, processed);
    let (percent_or_hash, rate, units) = match mode {
        SyncMode::FastSync => {
            let rate = diff.per_second(ctx.interval);
            (
                format!("{:4.2}%", calc_percent(head.number, progress.height)),
                format_progress_rate(Some(rate.blocks), None, rate.mgas),
                "blk/mgas sec",
            )
        }
        SyncMode::FullSync => {
            let rate = diff.per_second(ctx.interval);
            (
                short_hash(&head),
                format_progress_rate(Some(rate.blocks), Some(rate.txs), rate.mgas),
                "blk/txs/mgas sec",
            )
        }
        SyncMode::Import => {
            (short_hash(&head), format_progress_rate(None, Some(diff.txs), diff.mgas), "txs/mgas")
        }
        SyncMode::Discover => unreachable!("discover returns early"),
    };

    ctx.printer.warn(&basic_line(
        &mode.to_string(),
        &local_of_max,
        &percent_or_hash,
        &rate,
        units,
        &peers,
    ));
    tracing::trace!(head = %format_block_number(head.number), %mode, "Rendered basic status");
    Some(head.number)
}
