//! Unit tests for ev-grid.

use ev_core::Pos;

use crate::GridEnvironment;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 7×3 corridor with the exit on the right.
const CORRIDOR: &str = "\
#######
#S    E
#######";

fn corridor() -> GridEnvironment {
    GridEnvironment::load(CORRIDOR).unwrap()
}

// ── Parsing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod parse_tests {
    use super::*;
    use crate::{Cell, GridError};

    #[test]
    fn dimensions_and_registries() {
        let env = corridor();
        assert_eq!(env.width(), 7);
        assert_eq!(env.height(), 3);
        assert_eq!(env.spawns(), &[Pos::new(1, 1)]);
        assert_eq!(env.exits(), &[Pos::new(6, 1)]);
        assert_eq!(env.obstacles().len(), 7 + 1 + 7);
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "// a header comment\n\n#S E# // trailing note\n   \n#####\n";
        let env = GridEnvironment::load(text).unwrap();
        assert_eq!(env.height(), 2);
        // "#S E# " keeps the space before the marker.
        assert_eq!(env.width(), 6);
        assert_eq!(env.cell(Pos::new(2, 0)), Cell::Empty);
        assert_eq!(env.cell(Pos::new(3, 0)), Cell::Exit);
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let env = GridEnvironment::load("SE\n    \n##").unwrap();
        assert_eq!(env.height(), 2);
    }

    #[test]
    fn short_lines_are_padded_with_floor() {
        let env = GridEnvironment::load("S\nE  #").unwrap();
        assert_eq!(env.width(), 4);
        assert_eq!(env.cell(Pos::new(3, 0)), Cell::Empty);
        assert!(env.is_walkable(Pos::new(3, 0)));
    }

    #[test]
    fn custom_comment_marker() {
        let env = GridEnvironment::load_with_comment("SE ; ###\n; only comment", ";").unwrap();
        assert_eq!(env.height(), 1);
        assert_eq!(env.width(), 3);
    }

    #[test]
    fn empty_map_is_malformed() {
        for text in ["", "\n\n", "// nothing here\n   // still nothing"] {
            let err = GridEnvironment::load(text).unwrap_err();
            assert!(matches!(err, GridError::MalformedMap(_)), "{text:?} → {err}");
        }
    }

    #[test]
    fn unlisted_symbols_load_as_walls() {
        let env = GridEnvironment::load("S.E\n#\t#").unwrap();
        assert_eq!(env.cell(Pos::new(1, 0)), Cell::Wall('.'));
        assert_eq!(env.cell(Pos::new(1, 1)), Cell::Wall('\t'));
        assert!(!env.is_walkable(Pos::new(1, 0)));
        assert_eq!(env.static_field_at(Pos::new(1, 0)), f64::NEG_INFINITY);
        assert!(env.obstacles().contains(&Pos::new(1, 0)));
    }

    #[test]
    fn walls_keep_their_glyph() {
        let text = "S~~E\n####";
        assert_eq!(GridEnvironment::load(text).unwrap().to_string(), text);
    }

    #[test]
    fn display_renders_the_map() {
        assert_eq!(corridor().to_string(), CORRIDOR);
    }
}

// ── Walkability and neighbours ────────────────────────────────────────────────

#[cfg(test)]
mod walk_tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn out_of_bounds_is_an_obstacle() {
        let env = corridor();
        assert_eq!(env.cell(Pos::new(-1, 1)), Cell::Obstacle);
        assert_eq!(env.cell(Pos::new(7, 1)), Cell::Obstacle);
        assert!(!env.is_walkable(Pos::new(0, 3)));
    }

    #[test]
    fn walkable_kinds() {
        let env = corridor();
        assert!(env.is_walkable(Pos::new(1, 1))); // spawn
        assert!(env.is_walkable(Pos::new(3, 1))); // floor
        assert!(env.is_walkable(Pos::new(6, 1))); // exit
        assert!(!env.is_walkable(Pos::new(0, 0)));
    }

    #[test]
    fn neighbours_in_probe_order() {
        let env = GridEnvironment::load("#####\n#   #\n#   #\n#   #\n#####").unwrap();
        let all = env.open_neighbours(Pos::new(2, 2), true);
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], Pos::new(3, 2));
        assert_eq!(all[1], Pos::new(1, 2));
        assert_eq!(all[2], Pos::new(2, 3));
        assert_eq!(all[3], Pos::new(2, 1));

        let orthogonal = env.open_neighbours(Pos::new(2, 2), false);
        assert_eq!(orthogonal, all[..4].to_vec());
    }

    #[test]
    fn corner_has_three_neighbours() {
        let env = GridEnvironment::load("S \n E").unwrap();
        assert_eq!(env.open_neighbours(Pos::new(0, 0), true).len(), 3);
    }

    #[test]
    fn enclosed_cell_has_no_neighbours() {
        let env = GridEnvironment::load("###\n#S#\n###").unwrap();
        assert!(env.open_neighbours(Pos::new(1, 1), true).is_empty());
    }
}

// ── Static field ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod field_tests {
    use super::*;
    use crate::{GridError, StaticField};

    #[test]
    fn exit_and_obstacle_sentinels() {
        let env = corridor();
        assert_eq!(env.static_field_at(Pos::new(6, 1)), f64::MAX);
        assert_eq!(env.static_field_at(Pos::new(0, 0)), f64::NEG_INFINITY);
        assert_eq!(env.static_field_at(Pos::new(-3, 9)), StaticField::UNREACHABLE);
    }

    #[test]
    fn inverse_distance_to_exit() {
        let env = corridor();
        assert!((env.static_field_at(Pos::new(5, 1)) - 1.0).abs() < 1e-12);
        assert!((env.static_field_at(Pos::new(2, 1)) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn strictly_decreasing_away_from_exit() {
        let env = corridor();
        let values: Vec<f64> = (1..=6).rev().map(|x| env.static_field_at(Pos::new(x, 1))).collect();
        assert!(values.windows(2).all(|w| w[0] > w[1]), "{values:?}");
    }

    #[test]
    fn exit_beats_every_reachable_cell() {
        let env = GridEnvironment::load("S   \n  # \n E  \n   E").unwrap();
        let exit_value = env.static_field_at(Pos::new(1, 2));
        for (i, cell) in env.cells().iter().enumerate() {
            let pos = env.pos_of(i);
            if cell.is_walkable() && !cell.is_exit() {
                assert!(exit_value > env.static_field_at(pos));
                assert!(env.static_field_at(pos) > 0.0);
            }
        }
    }

    #[test]
    fn closest_exit_uses_taxicab_with_first_match_ties() {
        // Exits at (0,0) and (4,0); (2,0) is equidistant → first in scan order.
        let env = GridEnvironment::load("E   E\n  #  ").unwrap();
        assert_eq!(env.find_closest_exit(Pos::new(2, 0)), Some(Pos::new(0, 0)));
        assert_eq!(env.find_closest_exit(Pos::new(3, 1)), Some(Pos::new(4, 0)));
    }

    #[test]
    fn no_exit_means_unreachable() {
        let env = GridEnvironment::load("S  ").unwrap();
        assert_eq!(env.find_closest_exit(Pos::new(0, 0)), None);
        assert_eq!(env.static_field_at(Pos::new(1, 0)), f64::NEG_INFINITY);
    }

    #[test]
    fn sealed_room_is_unreachable() {
        let env = GridEnvironment::load("#####\n#S#E \n#####").unwrap();
        assert_eq!(env.static_field_at(Pos::new(1, 1)), f64::NEG_INFINITY);
        assert!(matches!(
            env.exit_reachable(Pos::new(1, 1), true),
            Err(GridError::UnreachableExit(p)) if p == Pos::new(1, 1)
        ));
        assert!(env.exit_reachable(Pos::new(4, 1), true).is_ok());
        assert!(matches!(env.exit_reachable(Pos::new(9, 9), true), Err(GridError::OutOfBounds(_))));
    }

    #[test]
    fn diagonal_gap_depends_on_connectivity() {
        let env = GridEnvironment::load("S#\n#E").unwrap();
        let spawn = Pos::new(0, 0);
        assert!(env.exit_reachable(spawn, true).is_ok());
        assert!(env.static_field_at(spawn) > 0.0);
        assert_eq!(env.static_field_for(spawn, true), env.static_field_at(spawn));

        assert!(matches!(env.exit_reachable(spawn, false), Err(GridError::UnreachableExit(_))));
        assert_eq!(env.static_field_for(spawn, false), StaticField::UNREACHABLE);
        // The exit itself is reachable either way.
        assert_eq!(env.static_field_for(Pos::new(1, 1), false), StaticField::EXIT);
    }
}
