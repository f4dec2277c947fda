//! Column formatting shared by the text back ends.

use alloy_primitives::B256;
use synclog_node::Block;
use synclog_tui_common::format_block_number;

/// Assemble a basic status line from its six columns.
///
/// The layout is `mode(8) local_of_max(22) percent_or_hash(>8) rate(>13) units(16) peers(>11)`.
pub fn basic_line(
    mode: &str,
    local_of_max: &str,
    percent_or_hash: &str,
    rate: &str,
    units: &str,
    peers: &str,
) -> String {
    format!("{mode:<8} {local_of_max:<22} {percent_or_hash:>8} {rate:>13} {units:<16} {peers:>11}")
}

/// Format the local head against the sync target.
///
/// Below the target both are shown. At or past it only the local head is,
/// followed by the batch size when more than one block was just imported.
pub fn format_local_of_max(local: u64, target: u64, processed: usize) -> String {
    let formatted = format_block_number(local);
    if local < target {
        format!("{formatted:>9} of {:>9}", format_block_number(target))
    } else if processed > 1 {
        format!("{formatted:>9} (+{processed:>4})     ")
    } else {
        format!("{formatted:>9}             ")
    }
}

/// Format progress rates.
///
/// Without blocks: `txs/mgas`. Without transactions: `blk/mgas`. Otherwise
/// all three.
pub fn format_progress_rate(blocks: Option<u64>, txs: Option<u64>, mgas: u64) -> String {
    match (blocks, txs) {
        (None, Some(txs)) => format!("{txs:4}/{mgas:2}"),
        (Some(blocks), None) => format!("{blocks:3}/{mgas:2}"),
        (Some(blocks), Some(txs)) => format!("{blocks:3}/{txs:4}/{mgas:2}"),
        (None, None) => format!("{mgas:2}"),
    }
}

/// Format the peer count against the configured maximum.
pub fn format_peers(peers: usize, max_peers: usize) -> String {
    format!("{peers:2}/{max_peers:2} peers")
}

/// The first `len` characters of the `0x`-prefixed hex of `hash`.
pub fn hex_prefix(hash: &B256, len: usize) -> String {
    let hex = format!("{hash:#x}");
    hex[..len.min(hex.len())].to_string()
}

/// The first 8 hex characters of a block hash, without `0x`.
pub fn short_hash(block: &Block) -> String {
    block.hash_prefix(10)[2..].to_string()
}
