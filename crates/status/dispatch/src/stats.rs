//! Block statistics between two heads.

use std::time::Duration;

use synclog_node::{Block, ChainReader};

/// Gas units per displayed mgas.
const GAS_PER_MGAS: u64 = 1_000_000;

/// Blocks, transactions and gas imported between two chain heads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockDiff {
    /// Number of blocks.
    pub blocks: u64,
    /// Transactions across the blocks.
    pub txs: u64,
    /// Gas used across the blocks, in millions.
    pub mgas: u64,
}

impl BlockDiff {
    /// Totals of the blocks after `last` up to and including `head`.
    ///
    /// Blocks missing from the chain count towards `blocks` only.
    pub fn between(chain: &dyn ChainReader, last: u64, head: &Block) -> Self {
        let mut txs = 0u64;
        let mut gas = 0u64;
        for number in last.saturating_add(1)..=head.number {
            let block = if number == head.number {
                Some(head.clone())
            } else {
                chain.block_by_number(number)
            };
            if let Some(block) = block {
                txs += block.tx_count as u64;
                gas = gas.saturating_add(block.gas_used);
            }
        }
        Self { blocks: head.number.saturating_sub(last), txs, mgas: gas / GAS_PER_MGAS }
    }

    /// Totals of a single block.
    pub fn of_block(block: &Block) -> Self {
        Self { blocks: 1, txs: block.tx_count as u64, mgas: block.gas_used / GAS_PER_MGAS }
    }

    /// Per second rates over `interval`, counting at least one second.
    pub fn per_second(self, interval: Duration) -> Self {
        let secs = interval.as_secs().max(1);
        Self { blocks: self.blocks / secs, txs: self.txs / secs, mgas: self.mgas / secs }
    }
}
