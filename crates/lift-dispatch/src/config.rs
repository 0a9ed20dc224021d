//! Engine sizing: a serde config struct and a builder.

use serde::{Deserialize, Serialize};

use crate::engine::DispatchEngine;
use crate::error::{DispatchError, DispatchResult};

/// Upper bound on the number of elevators one engine manages.
pub const MAX_ELEVATORS: usize = 16;

/// Shape of the building, as read by a driver from a file or flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub floor_count: usize,
    pub elevator_count: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            floor_count: 10,
            elevator_count: 1,
        }
    }
}

impl DispatchConfig {
    pub fn new(floor_count: usize, elevator_count: usize) -> Self {
        Self {
            floor_count,
            elevator_count,
        }
    }

    pub fn validate(&self) -> DispatchResult<()> {
        if self.floor_count < 1 {
            return Err(DispatchError::config("must be at least 1 floor"));
        }
        if u32::try_from(self.floor_count).is_err() {
            return Err(DispatchError::config(format!(
                "{} floors is more than a floor index can address",
                self.floor_count
            )));
        }
        if self.elevator_count < 1 {
            return Err(DispatchError::config("must be at least 1 elevator"));
        }
        if self.elevator_count > MAX_ELEVATORS {
            return Err(DispatchError::config(format!(
                "{} elevators exceeds the maximum of {MAX_ELEVATORS}",
                self.elevator_count
            )));
        }
        Ok(())
    }
}

/// Builder for [`DispatchEngine`].
///
/// ```
/// use lift_dispatch::DispatchEngineBuilder;
///
/// let engine = DispatchEngineBuilder::new()
///     .floors(12)
///     .elevators(3)
///     .build()
///     .unwrap();
/// assert_eq!(engine.elevator_count(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DispatchEngineBuilder {
    config: DispatchConfig,
}

impl DispatchEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floors(mut self, floor_count: usize) -> Self {
        self.config.floor_count = floor_count;
        self
    }

    pub fn elevators(mut self, elevator_count: usize) -> Self {
        self.config.elevator_count = elevator_count;
        self
    }

    pub fn build(self) -> DispatchResult<DispatchEngine> {
        DispatchEngine::from_config(&self.config)
    }
}

impl From<DispatchConfig> for DispatchEngineBuilder {
    fn from(config: DispatchConfig) -> Self {
        Self { config }
    }
}
