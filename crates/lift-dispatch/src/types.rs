//! Plain value types shared across the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a floor, `0` is the bottom floor.
pub type Floor = u32;

/// Identity of an elevator, assigned 0-based at construction.
pub type ElevatorId = usize;

/// Inclusive range of floors an elevator may travel between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorRange {
    pub min: Floor,
    pub max: Floor,
}

impl FloorRange {
    pub fn contains(&self, floor: Floor) -> bool {
        floor >= self.min && floor <= self.max
    }
}

impl fmt::Display for FloorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Which way an elevator is currently heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Idle,
}

/// One row of [`status`](crate::ElevatorControlService::status).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorStatus {
    pub id: ElevatorId,
    pub current_floor: Floor,
    pub destination_floor: Floor,
}

impl ElevatorStatus {
    pub fn direction(&self) -> Direction {
        match self.destination_floor.cmp(&self.current_floor) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_follows_destination() {
        let status = |current_floor, destination_floor| ElevatorStatus {
            id: 0,
            current_floor,
            destination_floor,
        };

        assert_eq!(status(2, 5).direction(), Direction::Up);
        assert_eq!(status(5, 2).direction(), Direction::Down);
        assert_eq!(status(3, 3).direction(), Direction::Idle);
    }

    #[test]
    fn range_is_inclusive() {
        let range = FloorRange { min: 2, max: 4 };
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }
}
