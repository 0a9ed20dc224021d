use serde::{Deserialize, Serialize};

use crate::request::Request;
use crate::types::{ElevatorStatus, Floor, FloorRange};

/// A consistent, serializable picture of the whole engine at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub floor_count: usize,
    pub elevators: Vec<ElevatorSnapshot>,
    /// Only floors with someone waiting, bottom floor first.
    pub pending: Vec<FloorQueue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorSnapshot {
    #[serde(flatten)]
    pub status: ElevatorStatus,
    pub range: FloorRange,
    pub passengers: Vec<Request>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorQueue {
    pub floor: Floor,
    pub requests: Vec<Request>,
}

impl EngineSnapshot {
    /// Every request the engine is holding, waiting or riding.
    pub fn requests(&self) -> impl Iterator<Item = &Request> {
        self.pending
            .iter()
            .flat_map(|q| q.requests.iter())
            .chain(self.elevators.iter().flat_map(|e| e.passengers.iter()))
    }

    pub fn waiting_count(&self) -> usize {
        self.pending.iter().map(|q| q.requests.len()).sum()
    }

    pub fn riding_count(&self) -> usize {
        self.elevators.iter().map(|e| e.passengers.len()).sum()
    }
}
