//! The dispatch engine: elevators, pending requests, and the step loop.

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, trace, warn};

use crate::config::DispatchConfig;
use crate::elevator::Elevator;
use crate::error::{DispatchError, DispatchResult};
use crate::event::DispatchEvent;
use crate::request::{PendingTable, Request, RequestId};
use crate::service::ElevatorControlService;
use crate::snapshot::{ElevatorSnapshot, EngineSnapshot, FloorQueue};
use crate::types::{ElevatorId, ElevatorStatus, Floor, FloorRange};

/// Owns every elevator and every waiting request.
///
/// All reads and writes of that state go through a single engine-wide lock,
/// so concurrent callers always see the engine between operations, never
/// halfway through one. Elevator bounds never change after construction and
/// are kept outside the lock.
#[derive(Debug)]
pub struct DispatchEngine {
    floor_count: usize,
    ranges: Box<[FloorRange]>,
    world: Mutex<World>,
}

#[derive(Debug)]
struct World {
    elevators: Vec<Elevator>,
    pending: PendingTable,
}

impl DispatchEngine {
    /// Builds an engine with `elevator_count` elevators serving floors
    /// `0..floor_count`, all parked at floor 0.
    pub fn new(floor_count: usize, elevator_count: usize) -> DispatchResult<Self> {
        Self::from_config(&DispatchConfig::new(floor_count, elevator_count))
    }

    pub fn from_config(config: &DispatchConfig) -> DispatchResult<Self> {
        config.validate()?;

        let building = FloorRange {
            min: 0,
            max: (config.floor_count - 1) as Floor,
        };
        let elevators = (0..config.elevator_count)
            .map(|id| Elevator::new(id, building))
            .collect::<DispatchResult<Vec<_>>>()?;
        let ranges = elevators.iter().map(Elevator::range).collect();

        info!(
            floors = config.floor_count,
            elevators = config.elevator_count,
            "dispatch engine ready"
        );

        Ok(Self {
            floor_count: config.floor_count,
            ranges,
            world: Mutex::new(World {
                elevators,
                pending: PendingTable::new(config.floor_count),
            }),
        })
    }

    pub fn floor_count(&self) -> usize {
        self.floor_count
    }

    pub fn elevator_count(&self) -> usize {
        self.ranges.len()
    }

    /// `(id, current floor, destination floor)` for every elevator, by id.
    pub fn status(&self) -> Vec<ElevatorStatus> {
        self.world().elevators.iter().map(Elevator::status).collect()
    }

    /// Every valid elevator id, `0..elevator_count`.
    pub fn id_set(&self) -> BTreeSet<ElevatorId> {
        let world = self.world();
        (0..world.elevators.len()).collect()
    }

    /// Bounds of one elevator. Does not take the engine lock.
    pub fn floor_range(&self, elevator: ElevatorId) -> DispatchResult<FloorRange> {
        self.ranges
            .get(elevator)
            .copied()
            .ok_or(DispatchError::InvalidElevatorId {
                id: elevator,
                count: self.ranges.len(),
            })
    }

    /// Redirects an elevator. Passengers and position are left alone.
    pub fn update(&self, elevator: ElevatorId, destination_floor: Floor) -> DispatchResult<()> {
        self.check_elevator(elevator)?;
        self.check_floor(destination_floor)?;

        let mut world = self.world();
        world.elevators[elevator].set_destination(destination_floor)?;
        debug!(elevator, destination = destination_floor, "destination updated");
        Ok(())
    }

    /// Queues a passenger at `pickup_floor` and returns the request's id.
    pub fn pickup(&self, pickup_floor: Floor, destination_floor: Floor) -> DispatchResult<RequestId> {
        self.check_floor(pickup_floor)?;
        self.check_floor(destination_floor)?;
        if pickup_floor == destination_floor {
            return Err(DispatchError::InvalidRequest {
                floor: pickup_floor,
            });
        }

        let request = Request::new(destination_floor);
        let id = request.id;
        self.world().pending.push(pickup_floor, request);
        debug!(
            request = %id,
            from = pickup_floor,
            to = destination_floor,
            "pickup queued"
        );
        Ok(id)
    }

    /// Advances the world by one tick.
    pub fn step(&self) {
        self.world().tick(None);
    }

    /// Same as [`step`](Self::step), returning what happened in order.
    pub fn step_with_events(&self) -> Vec<DispatchEvent> {
        let mut events = Vec::new();
        self.world().tick(Some(&mut events));
        events
    }

    pub fn pending_at(&self, floor: Floor) -> DispatchResult<Vec<Request>> {
        self.check_floor(floor)?;
        Ok(self.world().pending.at(floor).to_vec())
    }

    pub fn passengers(&self, elevator: ElevatorId) -> DispatchResult<Vec<Request>> {
        self.check_elevator(elevator)?;
        Ok(self.world().elevators[elevator].passengers().to_vec())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let world = self.world();
        EngineSnapshot {
            floor_count: self.floor_count,
            elevators: world
                .elevators
                .iter()
                .map(|e| ElevatorSnapshot {
                    status: e.status(),
                    range: e.range(),
                    passengers: e.passengers().to_vec(),
                })
                .collect(),
            pending: world
                .pending
                .occupied()
                .map(|(floor, requests)| FloorQueue {
                    floor,
                    requests: requests.to_vec(),
                })
                .collect(),
        }
    }

    fn world(&self) -> MutexGuard<'_, World> {
        self.world.lock().unwrap_or_else(|poisoned| {
            warn!("dispatch engine lock poisoned, recovering state");
            poisoned.into_inner()
        })
    }

    fn check_elevator(&self, elevator: ElevatorId) -> DispatchResult<()> {
        self.floor_range(elevator).map(|_| ())
    }

    fn check_floor(&self, floor: Floor) -> DispatchResult<()> {
        let range = FloorRange {
            min: 0,
            max: (self.floor_count - 1) as Floor,
        };
        if range.contains(floor) {
            Ok(())
        } else {
            Err(DispatchError::FloorOutOfBounds { floor, range })
        }
    }
}

impl World {
    /// One tick: move, let passengers off, turn around at the end of a run,
    /// then board whoever is waiting. Elevators go in id order.
    fn tick(&mut self, mut events: Option<&mut Vec<DispatchEvent>>) {
        let mut emit = |event: DispatchEvent| {
            if let Some(events) = events.as_deref_mut() {
                events.push(event);
            }
        };

        for (id, elevator) in self.elevators.iter_mut().enumerate() {
            let prev = elevator.advance();
            let floor = elevator.current_floor();
            let moved = floor != prev;
            if moved {
                trace!(elevator = id, from = prev, to = floor, "moved");
                emit(DispatchEvent::Moved {
                    elevator: id,
                    from: prev,
                    to: floor,
                });
            }

            for request in elevator.release_passengers() {
                debug!(elevator = id, request = %request.id, floor, "passenger released");
                emit(DispatchEvent::Released {
                    elevator: id,
                    request: request.id,
                    floor,
                });
            }

            if moved && floor == elevator.destination_floor() {
                let target = elevator.turnaround_target(prev);
                match elevator.set_destination(target) {
                    Ok(()) => {
                        debug!(elevator = id, floor, destination = target, "turned around");
                        emit(DispatchEvent::Retargeted {
                            elevator: id,
                            destination: target,
                        });
                    }
                    Err(error) => warn!(elevator = id, %error, "could not turn around"),
                }
            }

            let boarding = self.pending.take_matching(floor, |r| elevator.accepts(r));
            for request in &boarding {
                debug!(elevator = id, request = %request.id, floor, "passenger boarded");
                emit(DispatchEvent::Boarded {
                    elevator: id,
                    request: request.id,
                    floor,
                });
            }
            elevator.board(boarding);
        }

        trace!(waiting = self.pending.len(), "tick complete");
    }
}

impl ElevatorControlService for DispatchEngine {
    fn status(&self) -> Vec<ElevatorStatus> {
        DispatchEngine::status(self)
    }

    fn update(&self, elevator: ElevatorId, destination_floor: Floor) -> DispatchResult<()> {
        DispatchEngine::update(self, elevator, destination_floor)
    }

    fn floor_range(&self, elevator: ElevatorId) -> DispatchResult<FloorRange> {
        DispatchEngine::floor_range(self, elevator)
    }

    fn id_set(&self) -> BTreeSet<ElevatorId> {
        DispatchEngine::id_set(self)
    }

    fn pickup(&self, pickup_floor: Floor, destination_floor: Floor) -> DispatchResult<RequestId> {
        DispatchEngine::pickup(self, pickup_floor, destination_floor)
    }

    fn step(&self) {
        DispatchEngine::step(self)
    }
}
