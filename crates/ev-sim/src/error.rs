use ev_behavior::BehaviorError;
use ev_core::EvError;
use ev_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] EvError),

    #[error("map error: {0}")]
    Grid(#[from] GridError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
