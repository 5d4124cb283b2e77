// Copyright 2025 RNS CLI Contributors
// Licensed under GPL-3.0

//! Bounded commitment-maturity poll
//!
//! The registrar enforces a minimum commitment age before a reveal is
//! accepted. Maturity is observed by polling `canReveal`; the poll is a
//! small explicit state machine so the bound and the transitions can be
//! unit-tested without a clock or a chain.

/// State of one bounded poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No attempt made yet
    Pending,
    /// `attempt` observations made, none reported maturity
    Polling { attempt: u32 },
    /// Maturity observed on attempt `attempts`
    Ready { attempts: u32 },
    /// Attempt budget exhausted without observing maturity
    TimedOut { attempts: u32 },
}

impl PollState {
    pub fn is_terminal(self) -> bool {
        matches!(self, PollState::Ready { .. } | PollState::TimedOut { .. })
    }
}

/// Drives `Pending -> Polling(n) -> Ready | TimedOut` from maturity
/// observations. Unbounded polling is a correctness bug, so the attempt
/// budget is fixed at construction.
#[derive(Debug)]
pub struct CommitmentPoll {
    max_attempts: u32,
    state: PollState,
}

impl CommitmentPoll {
    pub fn new(max_attempts: u32) -> Self {
        CommitmentPoll {
            max_attempts: max_attempts.max(1),
            state: PollState::Pending,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record one maturity observation and return the new state.
    ///
    /// Calling after a terminal state is a no-op; the poll never restarts.
    pub fn observe(&mut self, revealable: bool) -> PollState {
        if self.state.is_terminal() {
            return self.state;
        }

        let attempt = match self.state {
            PollState::Pending => 1,
            PollState::Polling { attempt } => attempt + 1,
            _ => unreachable!("terminal states handled above"),
        };

        self.state = if revealable {
            PollState::Ready { attempts: attempt }
        } else if attempt >= self.max_attempts {
            PollState::TimedOut { attempts: attempt }
        } else {
            PollState::Polling { attempt }
        };
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_on_first_observation() {
        let mut poll = CommitmentPoll::new(12);
        assert_eq!(poll.observe(true), PollState::Ready { attempts: 1 });
        assert!(poll.state().is_terminal());
    }

    #[test]
    fn counts_attempts_until_ready() {
        let mut poll = CommitmentPoll::new(12);
        assert_eq!(poll.observe(false), PollState::Polling { attempt: 1 });
        assert_eq!(poll.observe(false), PollState::Polling { attempt: 2 });
        assert_eq!(poll.observe(true), PollState::Ready { attempts: 3 });
    }

    #[test]
    fn times_out_at_attempt_budget() {
        let mut poll = CommitmentPoll::new(12);
        for attempt in 1..12 {
            assert_eq!(poll.observe(false), PollState::Polling { attempt });
        }
        assert_eq!(poll.observe(false), PollState::TimedOut { attempts: 12 });
    }

    #[test]
    fn terminal_states_are_sticky() {
        let mut poll = CommitmentPoll::new(1);
        assert_eq!(poll.observe(false), PollState::TimedOut { attempts: 1 });
        // a late maturity observation does not resurrect the poll
        assert_eq!(poll.observe(true), PollState::TimedOut { attempts: 1 });
    }

    #[test]
    fn budget_of_zero_is_clamped_to_one() {
        let mut poll = CommitmentPoll::new(0);
        assert_eq!(poll.max_attempts(), 1);
        assert_eq!(poll.observe(false), PollState::TimedOut { attempts: 1 });
    }
}
