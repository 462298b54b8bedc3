use ev_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// A conflict needs at least two contenders.
    #[error("conflict resolver called with {participants} participant(s); at least 2 required")]
    InvalidConflict { participants: usize },

    #[error("agent {0} is not in the store")]
    UnknownAgent(AgentId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
