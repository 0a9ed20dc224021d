//! Testing utilities for lift-dispatch.
//!
//! [`Harness`] wraps a [`DispatchEngine`], records every event and every
//! elevator position it produces, and checks that no request is ever lost or
//! duplicated.
//!
//! ```
//! use lift_dispatch_testing::Harness;
//!
//! let mut harness = Harness::new(5, 1).unwrap();
//! harness.update(0, 4).unwrap();
//! let id = harness.pickup(4, 1).unwrap();
//!
//! harness.run(7);
//!
//! assert_eq!(harness.positions(0), vec![1, 2, 3, 4, 3, 2, 1]);
//! assert_eq!(harness.journey(id).unwrap().released_at, Some(7));
//! harness.assert_conserved().unwrap();
//! ```

use std::collections::HashMap;

use anyhow::{bail, ensure, Context, Result};
use lift_dispatch::{
    DispatchEngine, DispatchEvent, ElevatorId, ElevatorStatus, Floor, RequestId,
};
use tracing::debug;

/// The life of one pickup as observed from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub from: Floor,
    pub to: Floor,
    /// Elevator and tick that picked the passenger up.
    pub boarded: Option<(ElevatorId, u64)>,
    pub released_at: Option<u64>,
    pub released_floor: Option<Floor>,
}

/// Drives an engine tick by tick and keeps a full record.
#[derive(Debug)]
pub struct Harness {
    engine: DispatchEngine,
    tick: u64,
    journeys: HashMap<RequestId, Journey>,
    order: Vec<RequestId>,
    events: Vec<(u64, DispatchEvent)>,
    trace: Vec<Vec<ElevatorStatus>>,
}

impl Harness {
    pub fn new(floor_count: usize, elevator_count: usize) -> Result<Self> {
        let engine = DispatchEngine::new(floor_count, elevator_count)
            .context("failed to build engine for harness")?;
        Ok(Self::with_engine(engine))
    }

    pub fn with_engine(engine: DispatchEngine) -> Self {
        Self {
            engine,
            tick: 0,
            journeys: HashMap::new(),
            order: Vec::new(),
            events: Vec::new(),
            trace: Vec::new(),
        }
    }

    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    /// Number of steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn pickup(&mut self, from: Floor, to: Floor) -> Result<RequestId> {
        let id = self.engine.pickup(from, to)?;
        self.order.push(id);
        self.journeys.insert(
            id,
            Journey {
                from,
                to,
                boarded: None,
                released_at: None,
                released_floor: None,
            },
        );
        Ok(id)
    }

    pub fn update(&mut self, elevator: ElevatorId, floor: Floor) -> Result<()> {
        self.engine.update(elevator, floor)?;
        Ok(())
    }

    /// Takes one step and returns the events it produced.
    pub fn step(&mut self) -> Vec<DispatchEvent> {
        self.tick += 1;
        let events = self.engine.step_with_events();

        for event in &events {
            match *event {
                DispatchEvent::Boarded {
                    elevator, request, ..
                } => {
                    if let Some(journey) = self.journeys.get_mut(&request) {
                        journey.boarded = Some((elevator, self.tick));
                    }
                }
                DispatchEvent::Released { request, floor, .. } => {
                    if let Some(journey) = self.journeys.get_mut(&request) {
                        journey.released_at = Some(self.tick);
                        journey.released_floor = Some(floor);
                    }
                }
                DispatchEvent::Moved { .. } | DispatchEvent::Retargeted { .. } => {}
            }
            self.events.push((self.tick, event.clone()));
        }

        self.trace.push(self.engine.status());
        debug!(tick = self.tick, events = events.len(), "harness step");
        events
    }

    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Steps until `done` holds, giving up after `limit` steps.
    pub fn run_until<F>(&mut self, limit: usize, mut done: F) -> Result<u64>
    where
        F: FnMut(&Self) -> bool,
    {
        for _ in 0..limit {
            if done(self) {
                return Ok(self.tick);
            }
            self.step();
        }
        if done(self) {
            return Ok(self.tick);
        }
        bail!("condition not reached within {limit} steps")
    }

    pub fn journey(&self, id: RequestId) -> Option<&Journey> {
        self.journeys.get(&id)
    }

    /// Requests in the order they were issued.
    pub fn issued(&self) -> &[RequestId] {
        &self.order
    }

    /// Every event so far, tagged with the tick that produced it.
    pub fn events(&self) -> &[(u64, DispatchEvent)] {
        &self.events
    }

    /// Floor of `elevator` after each step taken so far.
    pub fn positions(&self, elevator: ElevatorId) -> Vec<Floor> {
        self.trace
            .iter()
            .filter_map(|statuses| statuses.get(elevator))
            .map(|s| s.current_floor)
            .collect()
    }

    /// Checks that every issued request is either held by the engine exactly
    /// once or was released exactly once at its destination, never both.
    pub fn assert_conserved(&self) -> Result<()> {
        let snapshot = self.engine.snapshot();

        let mut held: HashMap<RequestId, usize> = HashMap::new();
        for request in snapshot.requests() {
            *held.entry(request.id).or_default() += 1;
        }

        let mut releases: HashMap<RequestId, usize> = HashMap::new();
        for (_, event) in &self.events {
            if let DispatchEvent::Released { request, .. } = event {
                *releases.entry(*request).or_default() += 1;
            }
        }

        for id in &self.order {
            let held = held.get(id).copied().unwrap_or(0);
            let released = releases.get(id).copied().unwrap_or(0);
            ensure!(
                held + released == 1,
                "request {id} is held {held} times and was released {released} times"
            );

            let journey = &self.journeys[id];
            if let Some(floor) = journey.released_floor {
                ensure!(
                    floor == journey.to,
                    "request {id} for floor {} was released at floor {floor}",
                    journey.to
                );
            }
        }

        ensure!(
            held.len() + releases.len() == self.order.len(),
            "engine holds requests the harness never issued"
        );
        Ok(())
    }

    /// Pretty JSON of the engine's current snapshot.
    pub fn dump(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.engine.snapshot())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_a_downward_journey() {
        let mut harness = Harness::new(6, 1).unwrap();
        harness.update(0, 5).unwrap();
        let id = harness.pickup(3, 0).unwrap();

        let tick = harness
            .run_until(30, |h| h.journey(id).unwrap().released_at.is_some())
            .unwrap();

        // Up to 5, turn, board on the way down at 3, ride to 0.
        let journey = harness.journey(id).unwrap();
        assert_eq!(journey.boarded, Some((0, 7)));
        assert_eq!(journey.released_at, Some(10));
        assert_eq!(journey.released_floor, Some(0));
        assert_eq!(tick, 10);
        harness.assert_conserved().unwrap();
    }

    #[test]
    fn upward_pickup_is_never_boarded() {
        let mut harness = Harness::new(5, 1).unwrap();
        harness.update(0, 4).unwrap();
        let id = harness.pickup(0, 4).unwrap();

        harness.run(4);
        assert_eq!(harness.positions(0), vec![1, 2, 3, 4]);
        assert_eq!(harness.engine().status()[0].destination_floor, 0);

        harness.run(40);
        assert_eq!(harness.journey(id).unwrap().boarded, None);
        assert!(harness.run_until(10, |h| h.journey(id).unwrap().boarded.is_some()).is_err());
        harness.assert_conserved().unwrap();
    }

    #[test]
    fn conserves_requests_over_a_busy_run() {
        let mut harness = Harness::new(8, 3).unwrap();
        harness.update(0, 7).unwrap();
        harness.update(1, 4).unwrap();
        harness.update(2, 2).unwrap();

        for from in 0..8 {
            for to in 0..8 {
                if from != to {
                    harness.pickup(from, to).unwrap();
                }
            }
        }

        for _ in 0..10 {
            harness.run(5);
            harness.assert_conserved().unwrap();
        }

        let served = harness
            .issued()
            .iter()
            .filter(|id| harness.journey(**id).unwrap().released_at.is_some())
            .count();
        assert!(served > 0);
    }

    #[test]
    fn failed_calls_are_not_recorded() {
        let mut harness = Harness::new(4, 1).unwrap();
        assert!(harness.pickup(2, 2).is_err());
        assert!(harness.pickup(9, 1).is_err());
        assert!(harness.update(1, 0).is_err());

        assert!(harness.issued().is_empty());
        harness.assert_conserved().unwrap();
    }

    #[test]
    fn dump_is_valid_json() {
        let mut harness = Harness::new(3, 2).unwrap();
        harness.pickup(2, 0).unwrap();

        let value: serde_json::Value = serde_json::from_str(&harness.dump().unwrap()).unwrap();
        assert_eq!(value["elevators"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn rejects_bad_configuration() {
        let err = Harness::new(0, 1).unwrap_err();
        assert!(err.to_string().contains("failed to build engine"));
    }
}
