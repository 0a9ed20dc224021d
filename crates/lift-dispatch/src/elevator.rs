use smallvec::SmallVec;

use crate::error::{DispatchError, DispatchResult};
use crate::request::Request;
use crate::types::{ElevatorId, ElevatorStatus, Floor, FloorRange};

pub(crate) type Passengers = SmallVec<[Request; 4]>;

/// A single car and the passengers riding in it.
#[derive(Debug, Clone)]
pub(crate) struct Elevator {
    id: ElevatorId,
    range: FloorRange,
    current_floor: Floor,
    destination_floor: Floor,
    passengers: Passengers,
}

impl Elevator {
    /// Parks a new elevator at its bottom floor.
    pub(crate) fn new(id: ElevatorId, range: FloorRange) -> DispatchResult<Self> {
        if range.min > range.max {
            return Err(DispatchError::config(format!(
                "elevator {id} has min floor {} above max floor {}",
                range.min, range.max
            )));
        }

        Ok(Self {
            id,
            range,
            current_floor: range.min,
            destination_floor: range.min,
            passengers: SmallVec::new(),
        })
    }

    pub(crate) fn range(&self) -> FloorRange {
        self.range
    }

    pub(crate) fn current_floor(&self) -> Floor {
        self.current_floor
    }

    pub(crate) fn destination_floor(&self) -> Floor {
        self.destination_floor
    }

    pub(crate) fn passengers(&self) -> &[Request] {
        &self.passengers
    }

    pub(crate) fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            id: self.id,
            current_floor: self.current_floor,
            destination_floor: self.destination_floor,
        }
    }

    pub(crate) fn set_destination(&mut self, floor: Floor) -> DispatchResult<()> {
        if !self.range.contains(floor) {
            return Err(DispatchError::ElevatorFloorOutOfBounds {
                elevator: self.id,
                floor,
                range: self.range,
            });
        }
        self.destination_floor = floor;
        Ok(())
    }

    /// Moves one floor toward the destination. Returns the floor it left.
    pub(crate) fn advance(&mut self) -> Floor {
        let prev = self.current_floor;
        if self.current_floor < self.destination_floor {
            self.current_floor += 1;
        } else if self.current_floor > self.destination_floor {
            self.current_floor -= 1;
        }
        prev
    }

    /// Where to head next after arriving from `prev`: back down after an
    /// upward arrival, back up otherwise.
    pub(crate) fn turnaround_target(&self, prev: Floor) -> Floor {
        if self.current_floor > prev {
            self.range.min
        } else {
            self.range.max
        }
    }

    /// Lets off everyone whose destination is the current floor.
    pub(crate) fn release_passengers(&mut self) -> Vec<Request> {
        let floor = self.current_floor;
        if !self.passengers.iter().any(|r| r.desired_floor == floor) {
            return Vec::new();
        }

        let (released, riding): (Passengers, Passengers) = std::mem::take(&mut self.passengers)
            .into_iter()
            .partition(|r| r.desired_floor == floor);
        self.passengers = riding;
        released.into_vec()
    }

    /// Whether a request waiting at the current floor may board.
    ///
    /// Only requests with a destination in `[destination, current)` qualify,
    /// so this never picks up anyone travelling above the current floor.
    pub(crate) fn accepts(&self, request: &Request) -> bool {
        request.desired_floor >= self.destination_floor
            && request.desired_floor < self.current_floor
    }

    pub(crate) fn board(&mut self, requests: impl IntoIterator<Item = Request>) {
        self.passengers.extend(requests);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elevator(min: Floor, max: Floor) -> Elevator {
        Elevator::new(0, FloorRange { min, max }).unwrap()
    }

    #[test]
    fn starts_parked_at_bottom_floor() {
        let e = elevator(2, 8);
        assert_eq!(e.current_floor(), 2);
        assert_eq!(e.destination_floor(), 2);
        assert!(e.passengers().is_empty());
    }

    #[test]
    fn rejects_inverted_range() {
        let err = Elevator::new(3, FloorRange { min: 5, max: 1 }).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidConfiguration(_)));
    }

    #[test]
    fn destination_must_be_reachable() {
        let mut e = elevator(2, 4);
        let err = e.set_destination(5).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ElevatorFloorOutOfBounds {
                elevator: 0,
                floor: 5,
                range: FloorRange { min: 2, max: 4 },
            }
        );
        assert_eq!(e.destination_floor(), 2);
    }

    #[test]
    fn advance_moves_one_floor_at_a_time() {
        let mut e = elevator(0, 9);
        e.set_destination(2).unwrap();

        assert_eq!(e.advance(), 0);
        assert_eq!(e.advance(), 1);
        assert_eq!(e.current_floor(), 2);

        // already there
        assert_eq!(e.advance(), 2);
        assert_eq!(e.current_floor(), 2);

        e.set_destination(0).unwrap();
        e.advance();
        assert_eq!(e.current_floor(), 1);
    }

    #[test]
    fn turnaround_depends_on_arrival_direction() {
        let mut e = elevator(0, 9);
        e.set_destination(3).unwrap();
        let mut prev = e.advance();
        while e.current_floor() != 3 {
            prev = e.advance();
        }
        assert_eq!(e.turnaround_target(prev), 0);

        e.set_destination(1).unwrap();
        let mut prev = e.advance();
        while e.current_floor() != 1 {
            prev = e.advance();
        }
        assert_eq!(e.turnaround_target(prev), 9);
    }

    #[test]
    fn releases_only_passengers_for_this_floor() {
        let mut e = elevator(0, 9);
        e.board([Request::new(1), Request::new(3), Request::new(1)]);
        e.set_destination(1).unwrap();
        e.advance();

        let released = e.release_passengers();
        assert_eq!(released.len(), 2);
        assert!(released.iter().all(|r| r.desired_floor == 1));
        assert_eq!(e.passengers().len(), 1);
        assert_eq!(e.passengers()[0].desired_floor, 3);
    }

    #[test]
    fn accepts_only_the_downward_window() {
        let mut e = elevator(0, 9);
        e.set_destination(6).unwrap();
        for _ in 0..6 {
            e.advance();
        }
        e.set_destination(2).unwrap();

        // window is [2, 6)
        assert!(!e.accepts(&Request::new(1)));
        assert!(e.accepts(&Request::new(2)));
        assert!(e.accepts(&Request::new(5)));
        assert!(!e.accepts(&Request::new(6)));
        assert!(!e.accepts(&Request::new(8)));
    }
}
