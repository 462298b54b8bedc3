//! Closed strategy enumerations shared by agents, the resolver, and output.
//!
//! All three are plain `Copy` enums.  An unrecognised strategy can only come
//! from text (CLI flags, sweep files), so the only failure point is
//! [`MovementStrategy::from_str`], which returns
//! [`EvError::UnknownStrategy`].

use std::fmt;
use std::str::FromStr;

use crate::EvError;

// ── MovementStrategy ──────────────────────────────────────────────────────────

/// How an agent picks its candidate cell each tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MovementStrategy {
    /// Uniform choice among open neighbours.
    Random,
    /// Softmax over the static field.
    #[cfg_attr(feature = "serde", serde(alias = "static"))]
    StaticField,
    /// Static field plus a bias toward the previous direction of travel;
    /// familiarity grows by one with every sampled move.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "momentum"))]
    StaticFieldWithMomentum,
}

impl MovementStrategy {
    pub const ALL: [MovementStrategy; 3] = [
        MovementStrategy::Random,
        MovementStrategy::StaticField,
        MovementStrategy::StaticFieldWithMomentum,
    ];

    /// Short label used on the command line and in output paths.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementStrategy::Random                  => "random",
            MovementStrategy::StaticField             => "static",
            MovementStrategy::StaticFieldWithMomentum => "momentum",
        }
    }

    /// `true` if the variant weights moves by the static field.
    #[inline]
    pub fn uses_field(self) -> bool {
        !matches!(self, MovementStrategy::Random)
    }
}

impl fmt::Display for MovementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementStrategy {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random"                                    => Ok(MovementStrategy::Random),
            "static" | "static_field"                   => Ok(MovementStrategy::StaticField),
            "momentum" | "static_field_with_momentum"   => Ok(MovementStrategy::StaticFieldWithMomentum),
            _ => Err(EvError::UnknownStrategy(s.to_owned())),
        }
    }
}

// ── PlayStrategy ──────────────────────────────────────────────────────────────

/// What an agent plays in a contested-cell game.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlayStrategy {
    Cooperate,
    Defect,
}

impl PlayStrategy {
    #[inline]
    pub fn opposite(self) -> PlayStrategy {
        match self {
            PlayStrategy::Cooperate => PlayStrategy::Defect,
            PlayStrategy::Defect    => PlayStrategy::Cooperate,
        }
    }

    #[inline]
    pub fn cooperates(self) -> bool {
        matches!(self, PlayStrategy::Cooperate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayStrategy::Cooperate => "cooperate",
            PlayStrategy::Defect    => "defect",
        }
    }
}

impl fmt::Display for PlayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GameOutcome ───────────────────────────────────────────────────────────────

/// Result of the current tick's game for one agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameOutcome {
    #[default]
    NotPlayed,
    Won,
    Lost,
}
