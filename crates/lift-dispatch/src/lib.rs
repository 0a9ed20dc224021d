//! # Lift Dispatch
//!
//! A deterministic, step-driven dispatch engine for a bank of elevators.
//!
//! ## Core Concepts
//!
//! The engine is a passive state machine. It never spawns threads and never
//! reads a clock: a driver owns the passage of time and calls into it.
//!
//! - [`DispatchEngine::pickup`] = Intent (someone is waiting at a floor)
//! - [`DispatchEngine::step`] = One tick of simulated time
//! - [`DispatchEvent`] = Facts (what a tick changed)
//!
//! ## Architecture
//!
//! ```text
//! Driver (CLI / harness / service)
//!     │
//!     ├─► pickup(from, to) ──► pending queue at `from`
//!     ├─► update(id, floor) ─► elevator destination
//!     │
//!     ▼ step()
//! for each elevator, in id order:
//!     │
//!     ├─► move one floor toward destination
//!     ├─► release passengers bound for this floor
//!     ├─► arrived? turn around (up ─► min floor, down ─► max floor)
//!     └─► board waiting requests with destination in [dest, current)
//! ```
//!
//! ## Key Invariants
//!
//! 1. **One owner per request** - A request is waiting at exactly one floor or
//!    riding in exactly one elevator, never both
//! 2. **Unit speed** - An elevator moves at most one floor per step
//! 3. **Failed calls change nothing** - Every error is detected before any mutation
//! 4. **One lock** - Every operation runs under a single engine-wide lock
//!
//! ## Boarding Policy
//!
//! Boarding is greedy and deliberately asymmetric: an elevator only takes
//! requests headed below its current floor and no further than its
//! destination. Upward pickups are never boarded by this policy.
//!
//! ## Example
//!
//! ```
//! use lift_dispatch::DispatchEngine;
//!
//! let engine = DispatchEngine::new(10, 2).unwrap();
//! engine.update(0, 9).unwrap();
//! engine.pickup(6, 2).unwrap();
//!
//! engine.step();
//!
//! let status = engine.status();
//! assert_eq!(status[0].current_floor, 1);
//! assert_eq!(status[1].current_floor, 0);
//! ```

// Core modules
mod config;
mod elevator;
mod engine;
mod error;
mod event;
mod request;
mod service;
mod snapshot;
mod types;


// Re-export engine types (primary entry point)
pub use engine::DispatchEngine;

// Re-export configuration
pub use config::{DispatchConfig, DispatchEngineBuilder, MAX_ELEVATORS};

// Re-export error types
pub use error::{DispatchError, DispatchResult, ErrorKind};

// Re-export the service trait
pub use service::ElevatorControlService;

// Re-export value types
pub use event::DispatchEvent;
pub use request::{Request, RequestId};
pub use snapshot::{ElevatorSnapshot, EngineSnapshot, FloorQueue};
pub use types::{Direction, ElevatorId, ElevatorStatus, Floor, FloorRange};
