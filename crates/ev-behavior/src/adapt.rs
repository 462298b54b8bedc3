//! Evolutionary cooperate/defect switching.
//!
//! Every tick each agent on the grid gets one history entry.  Once the
//! buffer holds `update_interval` entries it is summed into
//! `conflicts = Σ participants` and `cooperators = Σ cooperators`, cleared,
//! and (if there were any conflicts) the agent compares the expected payoff
//! of its current play with the opposite play:
//!
//! | Regime                           | Cooperator (cur, opp) | Defector (cur, opp) |
//! |----------------------------------|-----------------------|---------------------|
//! | `conflicts == cooperators = c`   | `(1/c, 1)`            | `(1, 1/c)`          |
//! | `conflicts − cooperators = k > 1`| `(0, 1/k²)`           | `(1/k², 0)`         |
//! | `conflicts − cooperators = 1`    | `(0, 0)`              | `(0, 0)`            |
//!
//! The current payoff is scaled by `strategy_inertia` and the agent switches
//! with probability `1 / (1 + exp((inertia·cur − opp) / 0.1))`.  In the
//! `k = 1` regime that is always exactly ½.

use ev_agent::{Agent, HistoryEntry};
use ev_core::{GameOutcome, PlayStrategy, SimRng};
use tracing::debug;

/// Temperature of the logistic switching rule.
pub const SWITCH_TEMPERATURE: f64 = 0.1;

/// What [`update_strategy`] did this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StrategyUpdate {
    /// The interval has not elapsed yet.
    Pending,
    /// The interval elapsed with no conflicts; history cleared, strategy kept.
    NoConflicts,
    /// Re-evaluated and kept.
    Kept,
    /// Re-evaluated and flipped.
    Switched,
}

/// `(current, opposite)` expected payoffs for `strategy`.
pub fn payoffs(strategy: PlayStrategy, conflicts: u64, cooperators: u64) -> (f64, f64) {
    if conflicts == 0 {
        return (0.0, 0.0);
    }
    if conflicts == cooperators {
        let shared = 1.0 / cooperators as f64;
        return match strategy {
            PlayStrategy::Cooperate => (shared, 1.0),
            PlayStrategy::Defect    => (1.0, shared),
        };
    }
    let gap = conflicts.saturating_sub(cooperators);
    if gap > 1 {
        let crowded = 1.0 / (gap as f64).powi(2);
        return match strategy {
            PlayStrategy::Cooperate => (0.0, crowded),
            PlayStrategy::Defect    => (crowded, 0.0),
        };
    }
    (0.0, 0.0)
}

/// Logistic switching probability.  Always finite and in `[0, 1]`.
pub fn switch_probability(current: f64, opposite: f64, inertia: f64) -> f64 {
    let p = 1.0 / (1.0 + ((inertia * current - opposite) / SWITCH_TEMPERATURE).exp());
    if p.is_nan() { 0.0 } else { p }
}

/// Record this tick and, every `update_interval` entries, re-evaluate the
/// agent's play.
///
/// Agents whose outcome is still `NotPlayed` get an idle `(0, 0)` entry so
/// that the interval counts ticks.  The outcome is reset afterwards.
pub fn update_strategy(agent: &mut Agent, rng: &mut SimRng) -> StrategyUpdate {
    if agent.outcome == GameOutcome::NotPlayed {
        agent.history.push(HistoryEntry::IDLE);
    }
    agent.outcome = GameOutcome::NotPlayed;

    if agent.history.len() < agent.update_interval.max(1) as usize {
        return StrategyUpdate::Pending;
    }

    let (conflicts, cooperators) = agent.history.totals();
    agent.history.clear();
    if conflicts == 0 {
        return StrategyUpdate::NoConflicts;
    }

    let (current, opposite) = payoffs(agent.strategy, conflicts, cooperators);
    let p = switch_probability(current, opposite, agent.strategy_inertia);
    if rng.gen_bool(p) {
        let from = agent.strategy;
        agent.strategy = from.opposite();
        debug!(agent = %agent.id, %from, to = %agent.strategy, p, "strategy switched");
        StrategyUpdate::Switched
    } else {
        StrategyUpdate::Kept
    }
}
