//! Progress shared between the handlers of one display system.

use std::time::Instant;

use crate::SyncMode;

/// Progress shared between the handlers of one display system.
///
/// Owned by the [`StatusLoop`](crate::StatusLoop) and lent mutably to each
/// handler, so handlers never race on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressState {
    /// Mode computed before the current dispatch.
    pub mode: SyncMode,
    /// Last rendered block number, baseline for rate deltas.
    current_block_number: u64,
    /// When a chain insert was last rendered.
    pub chain_event_last_sent: Option<Instant>,
}

impl ProgressState {
    /// Last rendered block number.
    pub const fn current_block_number(&self) -> u64 {
        self.current_block_number
    }

    /// Advance the rendered block number to `number`.
    ///
    /// Numbers below the current one are ignored. Returns whether the state moved.
    pub fn advance_block_number(&mut self, number: u64) -> bool {
        if number <= self.current_block_number {
            return false;
        }
        self.current_block_number = number;
        true
    }

    /// Stamp a rendered chain insert at `now`.
    pub fn mark_chain_event(&mut self, now: Instant) {
        self.chain_event_last_sent = Some(now);
    }

    /// Time since the last rendered chain insert, `None` if there was none.
    pub fn since_chain_event(&self, now: Instant) -> Option<std::time::Duration> {
        self.chain_event_last_sent.map(|sent| now.saturating_duration_since(sent))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn block_number_is_monotonic() {
        let mut state = ProgressState::default();
        let mut rendered = Vec::new();
        for n in [10, 20, 15, 35, 0, 35, 36] {
            state.advance_block_number(n);
            rendered.push(state.current_block_number());
        }
        assert_eq!(rendered, vec![10, 20, 20, 35, 35, 35, 36]);
        assert!(rendered.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn advance_reports_movement() {
        let mut state = ProgressState::default();
        assert!(state.advance_block_number(1));
        assert!(!state.advance_block_number(1));
        assert!(!state.advance_block_number(0));
    }

    #[test]
    fn chain_event_timing() {
        let mut state = ProgressState::default();
        let now = Instant::now();
        assert_eq!(state.since_chain_event(now), None);
        state.mark_chain_event(now);
        assert_eq!(
            state.since_chain_event(now + Duration::from_secs(3)),
            Some(Duration::from_secs(3))
        );
    }
}
