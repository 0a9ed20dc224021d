//! Error types for the dispatch engine.

use thiserror::Error;

use crate::types::{ElevatorId, Floor, FloorRange};

/// Every failure the engine reports.
///
/// All of these are caller-input errors. A call that returns one of them has
/// not changed any engine state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid elevator id {id} (engine has {count} elevators)")]
    InvalidElevatorId { id: ElevatorId, count: usize },

    #[error("floor {floor} out of bounds {range}")]
    FloorOutOfBounds { floor: Floor, range: FloorRange },

    /// The floor exists in the building but the elevator cannot reach it.
    #[error("floor {floor} out of bounds for elevator {elevator} {range}")]
    ElevatorFloorOutOfBounds {
        elevator: ElevatorId,
        floor: Floor,
        range: FloorRange,
    },

    #[error("invalid request: pickup and destination are both floor {floor}")]
    InvalidRequest { floor: Floor },
}

/// Coarse classification of a [`DispatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidConfiguration,
    InvalidElevatorId,
    FloorOutOfBounds,
    InvalidRequest,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            Self::InvalidElevatorId { .. } => ErrorKind::InvalidElevatorId,
            Self::FloorOutOfBounds { .. } | Self::ElevatorFloorOutOfBounds { .. } => {
                ErrorKind::FloorOutOfBounds
            }
            Self::InvalidRequest { .. } => ErrorKind::InvalidRequest,
        }
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_variants_share_a_kind() {
        let range = FloorRange { min: 0, max: 4 };
        let global = DispatchError::FloorOutOfBounds { floor: 9, range };
        let scoped = DispatchError::ElevatorFloorOutOfBounds {
            elevator: 1,
            floor: 9,
            range,
        };

        assert_eq!(global.kind(), ErrorKind::FloorOutOfBounds);
        assert_eq!(scoped.kind(), ErrorKind::FloorOutOfBounds);
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = DispatchError::InvalidElevatorId { id: 7, count: 2 };
        assert_eq!(err.to_string(), "invalid elevator id 7 (engine has 2 elevators)");

        let err = DispatchError::FloorOutOfBounds {
            floor: 12,
            range: FloorRange { min: 0, max: 9 },
        };
        assert_eq!(err.to_string(), "floor 12 out of bounds [0, 9]");
    }
}
