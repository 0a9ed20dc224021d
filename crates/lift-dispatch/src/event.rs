use serde::{Deserialize, Serialize};

use crate::request::RequestId;
use crate::types::{ElevatorId, Floor};

/// Something that happened during a single step.
///
/// Events are facts: they describe a state change that has already been
/// applied to the engine. They are produced in the order the step applied
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DispatchEvent {
    Moved {
        elevator: ElevatorId,
        from: Floor,
        to: Floor,
    },
    Released {
        elevator: ElevatorId,
        request: RequestId,
        floor: Floor,
    },
    /// The elevator reached the end of its run and was sent the other way.
    Retargeted {
        elevator: ElevatorId,
        destination: Floor,
    },
    Boarded {
        elevator: ElevatorId,
        request: RequestId,
        floor: Floor,
    },
}
