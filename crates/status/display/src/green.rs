//! Colorized event lines and periodic summaries.

use std::time::{Duration, Instant, SystemTime};

use crossterm::style::Stylize;
use synclog_dispatch::{
    BlockDiff, DisplaySystem, EventKind, HandlerContext, ProgressState, SyncMode,
};
use synclog_node::{
    Block, ChainInsertEvent, DownloaderEvent, DownloaderMode, HeaderChainInsertEvent, NodeEvent,
};
use synclog_tui_common::{calc_percent, format_age, format_duration};

use crate::{format_peers, hex_prefix};

/// Domino glyphs indexed by a block's transaction count.
///
/// Counts past the end use the last glyph.
pub const DOMINOES: [&str; 13] =
    ["🁣", "🁤", "🁥", "🁦", "🁭", "🁴", "🁻", "🁼", "🂃", "🂄", "🂋", "🂌", "🂓"];

/// Maximum number of dominoes in one summary.
const MAX_DOMINOES: usize = 20;

const CHAIN_ICON: &str = "◼⋯⋯";
const FORK_ICON: &str = "◼⋯⦦";
const DISCOVER_SPINNERS: [&str; 3] = ["➫", "➬", "➭"];

const MS: Duration = Duration::from_millis(1);
const US: Duration = Duration::from_micros(1);

fn paren(inner: impl std::fmt::Display) -> String {
    format!("{}{inner}{}", "⟪".green(), "⟫".green())
}

fn red_paren(inner: impl std::fmt::Display) -> String {
    format!("{}{inner}{}", "⟪".red(), "⟫".red())
}

fn icon(tip: &'static str) -> String {
    format!("{CHAIN_ICON}{}", tip.green())
}

/// Icon shown before the mode in a summary.
///
/// Discover cycles through a spinner on every `spin`.
pub fn mode_icon(mode: SyncMode, spin: usize) -> &'static str {
    match mode {
        SyncMode::Discover => DISCOVER_SPINNERS[spin % DISCOVER_SPINNERS.len()],
        SyncMode::FullSync => "︎◉",
        SyncMode::FastSync => "◎",
        SyncMode::Import => "▶︎",
    }
}

/// One domino per transaction count, at most 20, with `…` appended when
/// counts were left out.
///
/// ```
/// use synclog_display::domino_graph;
///
/// assert_eq!(domino_graph([0, 1, 40]), "🁣🁤🂓");
/// ```
pub fn domino_graph(tx_counts: impl IntoIterator<Item = usize>) -> String {
    let mut graph = String::new();
    for (i, txs) in tx_counts.into_iter().enumerate() {
        if i == MAX_DOMINOES {
            graph.push('…');
            break;
        }
        graph.push_str(DOMINOES[txs.min(DOMINOES.len() - 1)]);
    }
    graph
}

/// Whether an interval tick should render a green summary.
///
/// Summaries are skipped while a chain event was printed within half the interval.
pub fn green_tick_due(state: &ProgressState, now: Instant, interval: Duration) -> bool {
    state.since_chain_event(now).is_none_or(|since| since > interval / 2)
}

/// Build the green display system.
pub fn green_display_system() -> DisplaySystem {
    let mut spin = 0usize;
    DisplaySystem::new("green")
        .on(EventKind::ChainInsert, |ctx, event| {
            if let Some(NodeEvent::ChainInsert(insert)) = event
                && ctx.printer.info(&insert_line(insert, SystemTime::now()))
            {
                ctx.state.mark_chain_event(ctx.now);
            }
        })
        .on(EventKind::ChainInsertSide, |ctx, event| {
            if let Some(NodeEvent::ChainSide(block)) = event {
                ctx.printer.info(&format!(
                    "{FORK_ICON}{} Insert {}={}",
                    "◼".green(),
                    "forked block".green(),
                    paren(format!("n={:8} hash={}…", block.number, block.hash_prefix(9))),
                ));
            }
        })
        .on(EventKind::HeaderChainInsert, |ctx, event| {
            if let Some(NodeEvent::HeaderChainInsert(headers)) = event
                && ctx.printer.info(&headers_line(headers))
            {
                ctx.state.mark_chain_event(ctx.now);
            }
        })
        .on(EventKind::MinedBlock, |ctx, event| {
            if let Some(NodeEvent::MinedBlock(block)) = event {
                ctx.printer.info(&mined_line(block));
            }
        })
        .on(EventKind::DownloaderStart, downloader_handler)
        .on(EventKind::DownloaderDone, downloader_handler)
        .on(EventKind::DownloaderFailed, downloader_handler)
        .on(EventKind::IntervalTick, move |ctx, _| {
            if !green_tick_due(ctx.state, ctx.now, ctx.interval) {
                return;
            }
            let current = print_status_green(ctx, spin);
            spin = spin.wrapping_add(1);
            ctx.state.advance_block_number(current);
        })
}

fn insert_line(insert: &ChainInsertEvent, now: SystemTime) -> String {
    format!(
        "{} Insert {}={} {}={} {}={}",
        icon("◼"),
        "blocks".green(),
        paren(format!(
            "processed={:4} queued={:4} ignored={:4} txs={:4}",
            insert.processed, insert.queued, insert.ignored, insert.tx_count
        )),
        "◼".green(),
        paren(format!(
            "n={:8} hash={}… time={} ago",
            insert.last_number,
            hex_prefix(&insert.last_hash, 9),
            format_age(insert.latest_block_time, now, MS)
        )),
        "took".green(),
        paren(format_duration(insert.elapsed, MS)),
    )
}

fn headers_line(headers: &HeaderChainInsertEvent) -> String {
    format!(
        "{} Insert {}={} {}={}{}={}",
        icon("❐"),
        "headers".green(),
        paren(format!("processed={:4} ignored={:4}", headers.processed, headers.ignored)),
        "❐".green(),
        paren(format!("n={:4} hash={}…", headers.last_number, hex_prefix(&headers.last_hash, 9))),
        "took".green(),
        paren(format_duration(headers.elapsed, US)),
    )
}

fn mined_line(block: &Block) -> String {
    let coinbase = format!("{:#x}", block.coinbase);
    format!(
        "{} Mined {}={}",
        icon("⟠"),
        "◼".green(),
        paren(format!(
            "n={:8} hash={}… coinbase={}… txs={:3} uncles={}",
            block.number,
            block.hash_prefix(9),
            &coinbase[..9],
            block.tx_count,
            block.uncle_count
        )),
    )
}

fn downloader_handler(ctx: &mut HandlerContext<'_>, event: Option<&NodeEvent>) {
    let Some(NodeEvent::Downloader(event)) = event else {
        return;
    };
    let line = match event {
        DownloaderEvent::Start { peer, hash, total_difficulty } => format!(
            "{} Start {} hash={} TD={}",
            icon("⬇"),
            paren(peer),
            paren(format!("{}…", hex_prefix(hash, 9))),
            paren(total_difficulty),
        ),
        DownloaderEvent::Done { peer, hash, total_difficulty } => format!(
            "{} Done  {} hash={} TD={}",
            icon("⬇"),
            paren(peer),
            paren(format!("{}…", hex_prefix(hash, 9))),
            paren(total_difficulty),
        ),
        DownloaderEvent::Failed { peer, error } => {
            format!("{} Fail  {} {}={}", icon("⬇"), paren(peer), "err".red(), red_paren(error))
        }
    };
    ctx.printer.info(&line);
}

/// Render the green summary line and return the local head number.
///
/// Rates cover the blocks after the last rendered number. The first summary
/// has no baseline and shows zero rates.
pub fn print_status_green(ctx: &HandlerContext<'_>, spin: usize) -> u64 {
    let mode = ctx.state.mode;
    let chain = ctx.node.chain();
    let downloader = ctx.node.downloader();

    let progress = downloader.progress();
    let current = if downloader.mode() == DownloaderMode::Fast {
        chain.current_fast_block().number
    } else {
        progress.current
    };
    let head_hash = chain.current_block().hash_prefix(9);

    let last = ctx.state.current_block_number();
    let mut diff = BlockDiff::default();
    let mut tx_counts = Vec::new();
    if last != 0 && current > last {
        diff.blocks = current - last;
        let mut gas = 0u64;
        for block in (last + 1..=current).filter_map(|n| chain.block_by_number(n)) {
            diff.txs += block.tx_count as u64;
            gas = gas.saturating_add(block.gas_used);
            tx_counts.push(block.tx_count);
        }
        diff.mgas = gas / 1_000_000;
    }

    let peers = paren(format_peers(downloader.peer_count(), ctx.max_peers));
    let head = paren(format!("#{current:7} {head_hash}…"));
    let icon = mode_icon(mode, spin).green();

    let line = if mode == SyncMode::Import {
        let totals = format!("{:4} blks {:4} txs {:8} mgas", diff.blocks, diff.txs, diff.mgas);
        let dominoes = domino_graph(tx_counts);
        format!(
            "{mode} {icon}{head} {}{} {}{peers} {}",
            "+".green(),
            paren(totals),
            "✌︎︎︎".green(),
            dominoes.green()
        )
    } else {
        let rate = diff.per_second(ctx.interval);
        let rates = format!(
            "{:4} blks {:4} txs {:2} mgas  {}",
            rate.blocks,
            rate.txs,
            rate.mgas,
            "/sec".green()
        );
        let height = if progress.height == 0 {
            String::new()
        } else {
            format!(
                "{}={}",
                "height".green(),
                paren(format!(
                    "{:7} {:4.2}%",
                    progress.height,
                    calc_percent(current, progress.height)
                ))
            )
        };
        let qos = downloader.qos();
        let qos = paren(format!(
            "rtt={} ttl={} conf={:.2}",
            format_duration(qos.rtt, MS),
            format_duration(qos.ttl, MS),
            qos.confidence
        ));
        format!(
            "{mode} {icon}{head} {}{} {}{peers} {height} {}={qos}",
            "~".green(),
            paren(rates),
            "✌︎︎︎".green(),
            "qos".green(),
        )
    };
    ctx.printer.warn(&line);
    current
}
