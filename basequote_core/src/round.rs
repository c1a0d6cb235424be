//! Search round lifecycle.
//!
//! Every backend answers the poll contract from this three-state machine:
//! a round is started by `search_offers`, runs until its full result set
//! exists, and is complete once that set can be read in full.

/// Lifecycle state of one search round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundState {
    /// No search started, or state was cleared.
    #[default]
    Idle,
    /// A round is in flight; results may be partial.
    Running,
    /// The most recent round produced its full result set.
    Complete,
}

impl RoundState {
    /// Begin a new round. Valid from any state: a second `search_offers`
    /// before the previous round was read starts a brand-new round.
    pub fn start(&mut self) {
        *self = RoundState::Running;
    }

    /// Mark the in-flight round as finished.
    pub fn finish(&mut self) {
        *self = RoundState::Complete;
    }

    /// Discard any round, back to the never-searched state.
    pub fn reset(&mut self) {
        *self = RoundState::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self, RoundState::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_lifecycle() {
        let mut state = RoundState::default();
        assert_eq!(state, RoundState::Idle);
        assert!(!state.is_running());

        state.start();
        assert!(state.is_running());

        state.finish();
        assert_eq!(state, RoundState::Complete);
        assert!(!state.is_running());

        state.reset();
        assert_eq!(state, RoundState::Idle);
    }

    #[test]
    fn test_restart_from_running() {
        let mut state = RoundState::Running;
        state.start();
        assert!(state.is_running());
    }
}
