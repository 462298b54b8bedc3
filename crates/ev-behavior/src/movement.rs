//! Candidate-move selection.
//!
//! Each tick an agent looks at its walkable neighbours that were free at the
//! start of the tick and samples one of them.  The three models differ only
//! in the weights:
//!
//! | Model          | Weight of neighbour `c`                                     |
//! |----------------|-------------------------------------------------------------|
//! | `RandomWalk`   | 1                                                           |
//! | `FieldWalk`    | `exp(familiarity · field(c))`                               |
//! | `MomentumWalk` | `exp(familiarity · field(c)) · exp(3 − ‖step(c) − momentum‖)` |
//!
//! If any neighbour is an exit, the field models drop every other neighbour
//! and pick uniformly among the exits.  Weights are evaluated in log space
//! and shifted by their maximum before exponentiating, so large
//! familiarities never overflow into `inf`.  If every weight is zero (the
//! agent is sealed off from all exits) the agent stays put.

use ev_agent::Agent;
use ev_core::{AgentId, MovementStrategy, Pos, SimRng};
use ev_grid::{GridEnvironment, StaticField};

/// Bias added to the log-weight of a move that exactly repeats the previous
/// step.
const MOMENTUM_BONUS: f64 = 3.0;

/// Pluggable move selection.
///
/// `open` is the non-empty list of walkable, unoccupied neighbours in probe
/// order.
/// Implementations return the chosen cell (or `agent.pos` to stay) and may
/// update `momentum` and `familiarity`; they must not touch `candidate`.
pub trait MovementModel: Send + Sync {
    fn choose(&self, agent: &mut Agent, env: &GridEnvironment, open: &[Pos], rng: &mut SimRng) -> Pos;
}

/// Compute and store `agent.candidate` for this tick.
///
/// `occupancy` is the row-major pre-tick occupant of each cell; occupied
/// neighbours are never targeted.  An empty slice means nobody else is on
/// the grid.  Resets the agent's per-tick game state first.  With no open
/// neighbour the candidate is the current cell.
pub fn compute_candidate_move(
    agent: &mut Agent,
    env: &GridEnvironment,
    occupancy: &[Option<AgentId>],
    rng: &mut SimRng,
) -> Pos {
    agent.begin_tick();
    let open: Vec<Pos> = env
        .open_neighbours(agent.pos, agent.allow_diagonal)
        .into_iter()
        .filter(|&p| !is_occupied(env, occupancy, p))
        .collect();
    if open.is_empty() {
        return agent.pos;
    }
    let target = model_for(agent.movement).choose(agent, env, &open, rng);
    agent.candidate = target;
    target
}

fn is_occupied(env: &GridEnvironment, occupancy: &[Option<AgentId>], pos: Pos) -> bool {
    env.index_of(pos)
        .and_then(|i| occupancy.get(i).copied().flatten())
        .is_some()
}

fn model_for(strategy: MovementStrategy) -> &'static dyn MovementModel {
    match strategy {
        MovementStrategy::Random                  => &RandomWalk,
        MovementStrategy::StaticField             => &FieldWalk,
        MovementStrategy::StaticFieldWithMomentum => &MomentumWalk,
    }
}

// ── RandomWalk ────────────────────────────────────────────────────────────────

/// Uniform choice among open neighbours.  Leaves momentum untouched.
pub struct RandomWalk;

impl MovementModel for RandomWalk {
    fn choose(&self, agent: &mut Agent, _env: &GridEnvironment, open: &[Pos], rng: &mut SimRng) -> Pos {
        rng.choose(open).copied().unwrap_or(agent.pos)
    }
}

// ── FieldWalk ─────────────────────────────────────────────────────────────────

/// Softmax over the static field.
pub struct FieldWalk;

impl MovementModel for FieldWalk {
    fn choose(&self, agent: &mut Agent, env: &GridEnvironment, open: &[Pos], rng: &mut SimRng) -> Pos {
        let weights = move_weights(agent, env, open, false);
        sample_step(agent, open, &weights, rng).unwrap_or(agent.pos)
    }
}

// ── MomentumWalk ──────────────────────────────────────────────────────────────

/// Softmax over the static field biased toward the previous direction.
/// Every sampled move increments familiarity.
pub struct MomentumWalk;

impl MovementModel for MomentumWalk {
    fn choose(&self, agent: &mut Agent, env: &GridEnvironment, open: &[Pos], rng: &mut SimRng) -> Pos {
        let weights = move_weights(agent, env, open, true);
        match sample_step(agent, open, &weights, rng) {
            Some(target) => {
                agent.familiarity = agent.familiarity.saturating_add(1);
                target
            }
            None => agent.pos,
        }
    }
}

// ── Weighting ─────────────────────────────────────────────────────────────────

/// Unnormalised move weights for `open`, all finite and in `[0, 1]`.
///
/// Exit neighbours short-circuit to indicator weights.  Otherwise the
/// largest weight is exactly 1, unless every neighbour is unreachable, in
/// which case all weights are 0.
pub fn move_weights(agent: &Agent, env: &GridEnvironment, open: &[Pos], with_momentum: bool) -> Vec<f64> {
    let fields: Vec<f64> = open
        .iter()
        .map(|&c| env.static_field_for(c, agent.allow_diagonal))
        .collect();

    if fields.iter().any(|&f| StaticField::is_exit_value(f)) {
        return fields
            .iter()
            .map(|&f| if StaticField::is_exit_value(f) { 1.0 } else { 0.0 })
            .collect();
    }

    let familiarity = f64::from(agent.familiarity);
    let logits: Vec<f64> = open
        .iter()
        .zip(&fields)
        .map(|(&c, &f)| {
            if f == StaticField::UNREACHABLE {
                return f64::NEG_INFINITY;
            }
            let mut logit = familiarity * f;
            if with_momentum {
                logit += MOMENTUM_BONUS - agent.pos.delta_to(c).distance(agent.momentum);
            }
            logit
        })
        .collect();

    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return vec![0.0; open.len()];
    }
    logits.iter().map(|&l| (l - max).exp()).collect()
}

/// Draw one neighbour and record the step as momentum.  `None` if no weight
/// is positive.
fn sample_step(agent: &mut Agent, open: &[Pos], weights: &[f64], rng: &mut SimRng) -> Option<Pos> {
    let target = open[rng.choose_weighted(weights)?];
    agent.momentum = agent.pos.delta_to(target);
    Some(target)
}
