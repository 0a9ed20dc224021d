use std::collections::BTreeSet;

use crate::error::DispatchResult;
use crate::request::RequestId;
use crate::types::{ElevatorId, ElevatorStatus, Floor, FloorRange};

/// The control surface a driver uses to run an elevator bank.
///
/// Implementations must be safe to call from several threads at once; each
/// call observes and leaves behind a consistent state.
pub trait ElevatorControlService: Send + Sync {
    /// `(id, current floor, destination floor)` for every elevator, by id.
    fn status(&self) -> Vec<ElevatorStatus>;

    /// Redirects an elevator. Passengers and position are left alone.
    fn update(&self, elevator: ElevatorId, destination_floor: Floor) -> DispatchResult<()>;

    fn floor_range(&self, elevator: ElevatorId) -> DispatchResult<FloorRange>;

    fn id_set(&self) -> BTreeSet<ElevatorId>;

    /// Queues a passenger at `pickup_floor`. Nobody is assigned until the
    /// next step.
    fn pickup(&self, pickup_floor: Floor, destination_floor: Floor) -> DispatchResult<RequestId>;

    /// Advances the world by one tick.
    fn step(&self);
}
