//! Integration tests for ev-sim.

use ev_core::{AgentId, EvError, MovementStrategy, PlayStrategy, Pos, RunConfig, Tick};
use ev_grid::{Cell, GridEnvironment};

use crate::{Fanout, NoopObserver, Sim, SimBuilder, SimError, SimObserver, StepSnapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// One spawn right next to one exit.
const ONE_STEP: &str = "\
#####
#   #
# SE#
#   #
#####";

/// Two spawns whose only open neighbour is the same exit.
const SHARED_EXIT: &str = "\
#####
#SES#
#####";

/// Sixteen spawns in an open room with one exit on the east wall.
const HALL: &str = "\
##########
#SSSSSSSS#
#SSSSSSSS#
#        #
#        E
#        #
##########";

/// A spawn that cannot reach the exit.
const SEALED: &str = "\
#####
#S#E#
#####";

/// One-wide corridor.
const CORRIDOR: &str = "\
#######
#SSS  E
#######";

fn config(movement: MovementStrategy) -> RunConfig {
    RunConfig {
        movement,
        environment: "test".into(),
        spawn_fraction: 1.0,
        max_ticks: Some(10_000),
        ..RunConfig::default()
    }
}

fn sim(map: &str, config: RunConfig) -> Sim {
    SimBuilder::new(config, GridEnvironment::load(map).unwrap()).build().unwrap()
}

/// Records every snapshot and the end-of-run tick.
#[derive(Default)]
struct Recorder {
    snaps: Vec<StepSnapshot>,
    ended: Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_step(&mut self, snapshot: &StepSnapshot) {
        self.snaps.push(snapshot.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn spawns_floor_of_fraction() {
        let cfg = RunConfig { spawn_fraction: 0.75, ..config(MovementStrategy::StaticField) };
        let s = sim(HALL, cfg);
        assert_eq!(s.agents.len(), 12);
        assert_eq!(s.state.on_grid(), 12);
        assert_eq!(s.current_tick(), Tick::ZERO);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = RunConfig { cooperate_fraction: 1.5, ..RunConfig::default() };
        let err = SimBuilder::new(cfg, GridEnvironment::load(HALL).unwrap()).build().err().unwrap();
        assert!(matches!(err, SimError::Core(EvError::Config(_))));
    }

    #[test]
    fn placement_on_obstacle_is_rejected() {
        let err = SimBuilder::new(RunConfig::default(), GridEnvironment::load(HALL).unwrap())
            .positions(vec![Pos::new(0, 0)])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Core(EvError::Config(_))));
    }

    #[test]
    fn missing_map_file_is_a_grid_error() {
        let err = SimBuilder::from_map_file(RunConfig::default(), std::path::Path::new("/nonexistent/map.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, SimError::Grid(_)));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use ev_core::{Delta, GameOutcome};

    use super::*;

    #[test]
    fn adjacent_exit_escapes_in_one_tick() {
        for seed in 0..50 {
            let cfg = RunConfig { seed, ..config(MovementStrategy::StaticField) };
            let mut s = sim(ONE_STEP, cfg);
            assert_eq!(s.agents.len(), 1);

            let snap = s.step().unwrap();
            assert_eq!(snap.tick, Tick(1));
            assert_eq!(snap.escaped, vec![AgentId(0)]);
            assert_eq!(snap.on_grid(), 0);
            assert_eq!(s.agents[AgentId(0)].escaped_at, Some(Tick(1)));
            assert_eq!(s.agents[AgentId(0)].pos, Pos::new(3, 2));
            assert!(s.is_finished());
        }
    }

    #[test]
    fn adjacent_exit_run_outcome() {
        let mut s = sim(ONE_STEP, config(MovementStrategy::StaticField));
        let outcome = s.run(&mut NoopObserver).unwrap();
        assert_eq!(outcome.ticks, 1);
        assert_eq!(outcome.escaped, 1);
        assert_eq!(outcome.stranded, 0);
        assert!(outcome.completed);
    }

    #[test]
    fn two_cooperators_one_wins_one_stays() {
        for seed in 0..100 {
            let cfg = RunConfig { seed, ..config(MovementStrategy::StaticFieldWithMomentum) };
            let start = [Pos::new(1, 1), Pos::new(3, 1)];
            let mut s = SimBuilder::new(cfg, GridEnvironment::load(SHARED_EXIT).unwrap())
                .positions(start.to_vec())
                .strategies(vec![PlayStrategy::Cooperate; 2])
                .build()
                .unwrap();

            let snap = s.step().unwrap();
            assert_eq!(snap.escaped.len(), 1);
            assert_eq!(snap.on_grid(), 1);

            let winner = snap.escaped[0];
            let loser = if winner == AgentId(0) { AgentId(1) } else { AgentId(0) };
            assert_eq!(s.agents[winner].history.entries()[0].outcome, GameOutcome::Won);
            assert_eq!(s.agents[loser].history.entries()[0].outcome, GameOutcome::Lost);
            assert_eq!(s.agents[loser].pos, start[loser.index()]);
            assert_eq!(s.agents[loser].momentum, Delta::ZERO);
            assert_eq!(snap.position_of(loser), Some(start[loser.index()]));
        }
    }

    #[test]
    fn sealed_agent_hits_tick_limit() {
        let cfg = RunConfig { max_ticks: Some(20), ..config(MovementStrategy::StaticField) };
        let mut s = sim(SEALED, cfg);
        let mut rec = Recorder::default();
        let outcome = s.run(&mut rec).unwrap();

        assert!(!outcome.completed);
        assert_eq!(outcome.ticks, 20);
        assert_eq!(outcome.stranded, 1);
        assert_eq!(rec.snaps.len(), 21);
        assert_eq!(rec.ended, Some(Tick(20)));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn first_snapshot_is_tick_zero() {
        let mut s = sim(HALL, config(MovementStrategy::StaticField));
        let mut rec = Recorder::default();
        s.run(&mut rec).unwrap();

        let first = &rec.snaps[0];
        assert_eq!(first.tick, Tick::ZERO);
        assert!(first.escaped.is_empty());
        assert_eq!(first.on_grid(), 16);
        for (i, snap) in rec.snaps.iter().enumerate() {
            assert_eq!(snap.tick, Tick(i as u64));
        }
    }

    #[test]
    fn canonical_maps_terminate() {
        for movement in MovementStrategy::ALL {
            for seed in 0..5 {
                let cfg = RunConfig { seed, spawn_fraction: 0.5, max_ticks: Some(100_000), ..config(movement) };
                let mut s = sim(HALL, cfg);
                let outcome = s.run(&mut NoopObserver).unwrap();
                assert!(outcome.completed, "{movement} seed {seed} hit the tick limit");
                assert_eq!(outcome.escaped, 8);
                assert_eq!(outcome.stranded, 0);
            }
        }
    }

    #[test]
    fn agents_are_conserved_every_tick() {
        for movement in MovementStrategy::ALL {
            let mut s = sim(HALL, config(movement));
            let mut rec = Recorder::default();
            s.run(&mut rec).unwrap();
            for snap in &rec.snaps {
                assert_eq!(snap.on_grid() + snap.escaped.len(), 16, "{movement} at {}", snap.tick);
                assert_eq!(snap.cooperators + snap.defectors, snap.on_grid());
            }
        }
    }

    #[test]
    fn same_seed_same_snapshots() {
        let run = |seed| {
            let cfg = RunConfig { seed, cooperate_fraction: 0.3, update_interval: 2, ..config(MovementStrategy::StaticFieldWithMomentum) };
            let mut s = sim(HALL, cfg);
            let mut rec = Recorder::default();
            s.run(&mut rec).unwrap();
            rec.snaps
        };
        let a = run(7);
        let b = run(7);
        assert_eq!(a, b);
        let text_a: Vec<String> = a.iter().map(ToString::to_string).collect();
        let text_b: Vec<String> = b.iter().map(ToString::to_string).collect();
        assert_eq!(text_a, text_b);
    }

    #[test]
    fn run_ticks_stops_when_grid_empties() {
        let mut s = sim(ONE_STEP, config(MovementStrategy::StaticField));
        let mut rec = Recorder::default();
        s.run_ticks(10, &mut rec).unwrap();
        assert_eq!(rec.snaps.len(), 1);
        assert_eq!(s.current_tick(), Tick(1));
        assert_eq!(rec.ended, None);
    }

    #[test]
    fn fanout_reaches_every_observer() {
        let mut s = sim(HALL, config(MovementStrategy::StaticField));
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        {
            let mut fan = Fanout::new().with(&mut a).with(&mut b);
            assert_eq!(fan.len(), 2);
            s.run(&mut fan).unwrap();
        }
        assert!(!a.snaps.is_empty());
        assert_eq!(a.snaps, b.snaps);
        assert_eq!(a.ended, b.ended);
        assert_eq!(a.ended, Some(s.current_tick()));
    }

    #[test]
    fn snapshot_renders_agents() {
        let s = sim(ONE_STEP, config(MovementStrategy::StaticField));
        let snap = s.snapshot();
        assert_eq!(snap.to_string(), "#####\n#   #\n# @E#\n#   #\n#####");
        assert_eq!(snap.cell(Pos::new(2, 2)), Some(Cell::Occupied(AgentId(0))));
        assert_eq!(snap.cell(Pos::new(5, 0)), None);
    }
}

// ── Occupied cells ────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy_tests {
    use ev_core::GameOutcome;

    use super::*;

    /// Two agents queued in a one-wide corridor, the front one beside the exit.
    const QUEUE: &str = "\
#####
#E  #
#####";

    fn assert_never_played(s: &Sim) {
        for agent in s.agents.iter() {
            assert_eq!(agent.outcome, GameOutcome::NotPlayed, "{}", agent.id);
            assert!(
                agent.history.entries().iter().all(|e| e.outcome == GameOutcome::NotPlayed),
                "{} has a game on record",
                agent.id
            );
        }
    }

    #[test]
    fn rear_agent_waits_while_the_front_agent_leaves() {
        for seed in 0..20 {
            let cfg = RunConfig { seed, ..config(MovementStrategy::StaticField) };
            let mut s = SimBuilder::new(cfg, GridEnvironment::load(QUEUE).unwrap())
                .positions(vec![Pos::new(2, 1), Pos::new(3, 1)])
                .build()
                .unwrap();
            let snap = s.step().unwrap();

            assert_eq!(snap.escaped, vec![AgentId(0)], "seed {seed}");
            assert_eq!(s.agents[AgentId(1)].pos, Pos::new(3, 1), "seed {seed}");
            assert_eq!(snap.position_of(AgentId(1)), Some(Pos::new(3, 1)));
            assert_never_played(&s);

            // The cell is free from the next tick on.
            let snap = s.step().unwrap();
            assert_eq!(snap.position_of(AgentId(1)), Some(Pos::new(2, 1)), "seed {seed}");
        }
    }

    #[test]
    fn queued_agents_do_not_contest_occupied_cells() {
        for seed in 0..20 {
            let cfg = RunConfig { seed, ..config(MovementStrategy::Random) };
            let mut s = sim(CORRIDOR, cfg);
            s.step().unwrap();

            // Only the front agent had a free neighbour.
            let mut cells: Vec<Pos> = s.agents.iter().map(|a| a.pos).collect();
            cells.sort_by_key(|p| (p.y, p.x));
            assert_eq!(cells, vec![Pos::new(1, 1), Pos::new(2, 1), Pos::new(4, 1)], "seed {seed}");
            assert_never_played(&s);
        }
    }

    #[test]
    fn corridor_never_double_books_a_cell() {
        for seed in 0..20 {
            let cfg = RunConfig { seed, ..config(MovementStrategy::Random) };
            let mut s = sim(CORRIDOR, cfg);
            let mut rec = Recorder::default();
            let outcome = s.run(&mut rec).unwrap();
            assert!(outcome.completed);
            for snap in &rec.snaps {
                assert_eq!(snap.on_grid() + snap.escaped.len(), 3);
            }
        }
    }
}
