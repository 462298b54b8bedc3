//! Unit tests for ev-agent.

use ev_core::{AgentId, PlayStrategy, Pos, RunConfig, SimRng};
use ev_grid::GridEnvironment;

use crate::{AgentStore, AgentStoreBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ten spawn cells in a walled room with one exit.
const ROOM: &str = "\
############
#SSSSSSSSSS#
#          E
############";

fn room() -> GridEnvironment {
    GridEnvironment::load(ROOM).unwrap()
}

// ── Agent lifecycle ───────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_tests {
    use ev_core::{Delta, GameOutcome};

    use super::*;
    use crate::HistoryEntry;

    fn one_agent() -> AgentStore {
        let mut store = AgentStore::new();
        store.insert(Pos::new(2, 2), PlayStrategy::Cooperate, &RunConfig::default());
        store
    }

    #[test]
    fn new_agent_takes_config_parameters() {
        let config = RunConfig { familiarity: 9, update_interval: 3, ..RunConfig::default() };
        let mut store = AgentStore::new();
        let id = store.insert(Pos::new(1, 1), PlayStrategy::Defect, &config);
        let a = &store[id];
        assert_eq!(a.familiarity, 9);
        assert_eq!(a.update_interval, 3);
        assert_eq!(a.candidate, a.pos);
        assert_eq!(a.momentum, Delta::ZERO);
        assert_eq!(a.outcome, GameOutcome::NotPlayed);
        assert!(a.history.is_empty());
    }

    #[test]
    fn lose_cancels_move_and_records() {
        let mut store = one_agent();
        let a = &mut store[AgentId(0)];
        a.candidate = Pos::new(3, 2);
        a.momentum = Delta::new(1, 0);
        a.lose(3, 1);
        assert_eq!(a.candidate, a.pos);
        assert_eq!(a.momentum, Delta::ZERO);
        assert_eq!(a.outcome, GameOutcome::Lost);
        assert_eq!(
            a.history.entries(),
            &[HistoryEntry { participants: 3, cooperators: 1, outcome: GameOutcome::Lost }]
        );
    }

    #[test]
    fn win_keeps_move() {
        let mut store = one_agent();
        let a = &mut store[AgentId(0)];
        a.candidate = Pos::new(3, 3);
        a.win(2, 2);
        assert_eq!(a.outcome, GameOutcome::Won);
        assert!(a.is_moving());
        a.commit();
        assert_eq!(a.pos, Pos::new(3, 3));
        assert!(!a.is_moving());
    }

    #[test]
    fn begin_tick_resets_outcome_and_candidate() {
        let mut store = one_agent();
        let a = &mut store[AgentId(0)];
        a.candidate = Pos::new(1, 1);
        a.outcome = GameOutcome::Lost;
        a.begin_tick();
        assert_eq!(a.outcome, GameOutcome::NotPlayed);
        assert_eq!(a.candidate, a.pos);
    }

    #[test]
    fn history_totals() {
        let mut store = one_agent();
        let a = &mut store[AgentId(0)];
        a.win(2, 1);
        a.history.push(HistoryEntry::IDLE);
        a.lose(4, 4);
        assert_eq!(a.history.len(), 3);
        assert_eq!(a.history.totals(), (6, 5));
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use ev_core::Tick;

    use super::*;

    #[test]
    fn ids_are_dense_and_ordered() {
        let config = RunConfig::default();
        let mut store = AgentStore::new();
        for x in 1..=3 {
            store.insert(Pos::new(x, 1), PlayStrategy::Cooperate, &config);
        }
        let ids: Vec<_> = store.ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
        assert_eq!(store.get(AgentId(2)).unwrap().pos, Pos::new(3, 1));
        assert!(store.get(AgentId(3)).is_none());
    }

    #[test]
    fn strategy_counts_skip_escaped() {
        let config = RunConfig::default();
        let mut store = AgentStore::new();
        store.insert(Pos::new(1, 1), PlayStrategy::Cooperate, &config);
        store.insert(Pos::new(2, 1), PlayStrategy::Defect, &config);
        store.insert(Pos::new(3, 1), PlayStrategy::Defect, &config);
        assert_eq!(store.strategy_counts(), (1, 2));
        store[AgentId(1)].escaped_at = Some(Tick(4));
        assert_eq!(store.strategy_counts(), (1, 1));
        assert_eq!(store.active().count(), 2);
        assert_eq!(store.len(), 3);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn spawn_fraction_floors() {
        let env = room();
        let config = RunConfig { spawn_fraction: 0.75, ..RunConfig::default() };
        let store = AgentStoreBuilder::new(&config).build(&env, &mut SimRng::new(1)).unwrap();
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn spawns_are_distinct_spawn_cells() {
        let env = room();
        let config = RunConfig { spawn_fraction: 1.0, ..RunConfig::default() };
        let store = AgentStoreBuilder::new(&config).build(&env, &mut SimRng::new(5)).unwrap();
        let mut cells: Vec<Pos> = store.iter().map(|a| a.pos).collect();
        assert!(cells.iter().all(|p| env.spawns().contains(p)));
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 10);
    }

    #[test]
    fn cooperate_fraction_extremes() {
        let env = room();
        let all_coop = RunConfig { spawn_fraction: 1.0, cooperate_fraction: 1.0, ..RunConfig::default() };
        let store = AgentStoreBuilder::new(&all_coop).build(&env, &mut SimRng::new(2)).unwrap();
        assert_eq!(store.strategy_counts(), (10, 0));

        let all_defect = RunConfig { spawn_fraction: 1.0, cooperate_fraction: 0.0, ..RunConfig::default() };
        let store = AgentStoreBuilder::new(&all_defect).build(&env, &mut SimRng::new(2)).unwrap();
        assert_eq!(store.strategy_counts(), (0, 10));
    }

    #[test]
    fn same_seed_same_population() {
        let env = room();
        let config = RunConfig { spawn_fraction: 0.5, ..RunConfig::default() };
        let a = AgentStoreBuilder::new(&config).build(&env, &mut SimRng::new(9)).unwrap();
        let b = AgentStoreBuilder::new(&config).build(&env, &mut SimRng::new(9)).unwrap();
        let sa: Vec<_> = a.iter().map(|x| (x.pos, x.strategy)).collect();
        let sb: Vec<_> = b.iter().map(|x| (x.pos, x.strategy)).collect();
        assert_eq!(sa, sb);
    }

    #[test]
    fn explicit_positions_and_strategies() {
        let env = room();
        let config = RunConfig::default();
        let store = AgentStoreBuilder::new(&config)
            .positions(vec![Pos::new(3, 2), Pos::new(4, 2)])
            .strategies(vec![PlayStrategy::Defect, PlayStrategy::Cooperate])
            .build(&env, &mut SimRng::new(0))
            .unwrap();
        assert_eq!(store[AgentId(0)].pos, Pos::new(3, 2));
        assert_eq!(store[AgentId(0)].strategy, PlayStrategy::Defect);
        assert_eq!(store[AgentId(1)].strategy, PlayStrategy::Cooperate);
    }

    #[test]
    fn rejects_bad_positions() {
        let env = room();
        let config = RunConfig::default();
        for bad in [
            vec![Pos::new(0, 0)],                    // obstacle
            vec![Pos::new(11, 2)],                   // exit
            vec![Pos::new(40, 2)],                   // outside
            vec![Pos::new(2, 2), Pos::new(2, 2)],    // duplicate
        ] {
            let result = AgentStoreBuilder::new(&config)
                .positions(bad.clone())
                .build(&env, &mut SimRng::new(0));
            assert!(result.is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn strategy_count_mismatch_errors() {
        let env = room();
        let config = RunConfig::default();
        let result = AgentStoreBuilder::new(&config)
            .positions(vec![Pos::new(2, 2)])
            .strategies(vec![PlayStrategy::Defect, PlayStrategy::Defect])
            .build(&env, &mut SimRng::new(0));
        assert!(result.is_err());
    }
}
