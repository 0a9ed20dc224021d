//! Pickup requests and the per-floor table of requests waiting to board.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Floor;

/// Opaque identity of a single pickup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A passenger's wish to reach `desired_floor`.
///
/// The origin floor is not stored: it is whichever floor's queue currently
/// holds the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub id: RequestId,
    pub desired_floor: Floor,
}

impl Request {
    pub fn new(desired_floor: Floor) -> Self {
        Self {
            id: RequestId::new(),
            desired_floor,
        }
    }
}

/// Requests waiting at each floor, in arrival order.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingTable {
    floors: Vec<Vec<Request>>,
}

impl PendingTable {
    pub(crate) fn new(floor_count: usize) -> Self {
        Self {
            floors: vec![Vec::new(); floor_count],
        }
    }

    /// Caller guarantees `floor` is a valid floor.
    pub(crate) fn push(&mut self, floor: Floor, request: Request) {
        self.floors[floor as usize].push(request);
    }

    pub(crate) fn at(&self, floor: Floor) -> &[Request] {
        self.floors
            .get(floor as usize)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Removes and returns every request at `floor` accepted by `boards`.
    ///
    /// Requests that stay behind keep their relative order.
    pub(crate) fn take_matching<F>(&mut self, floor: Floor, mut boards: F) -> Vec<Request>
    where
        F: FnMut(&Request) -> bool,
    {
        let Some(queue) = self.floors.get_mut(floor as usize) else {
            return Vec::new();
        };
        if !queue.iter().any(&mut boards) {
            return Vec::new();
        }

        let (taken, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(queue).into_iter().partition(|r| boards(r));
        *queue = waiting;
        taken
    }

    /// Non-empty queues as `(floor, requests)`, bottom floor first.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (Floor, &[Request])> {
        self.floors
            .iter()
            .enumerate()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(floor, queue)| (floor as Floor, queue.as_slice()))
    }

    pub(crate) fn len(&self) -> usize {
        self.floors.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        let a = Request::new(3);
        let b = Request::new(3);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn take_matching_keeps_order_of_the_rest() {
        let mut table = PendingTable::new(4);
        for desired in [0, 3, 1, 2, 0] {
            table.push(2, Request::new(desired));
        }

        let taken = table.take_matching(2, |r| r.desired_floor < 2);
        let taken: Vec<_> = taken.iter().map(|r| r.desired_floor).collect();
        let left: Vec<_> = table.at(2).iter().map(|r| r.desired_floor).collect();

        assert_eq!(taken, vec![0, 1, 0]);
        assert_eq!(left, vec![3, 2]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn take_matching_on_empty_or_unknown_floor_is_a_no_op() {
        let mut table = PendingTable::new(2);
        assert!(table.take_matching(0, |_| true).is_empty());
        assert!(table.take_matching(9, |_| true).is_empty());
        assert!(table.at(9).is_empty());
    }

    #[test]
    fn occupied_skips_empty_floors() {
        let mut table = PendingTable::new(5);
        table.push(1, Request::new(0));
        table.push(4, Request::new(2));
        table.push(4, Request::new(3));

        let floors: Vec<_> = table.occupied().map(|(f, q)| (f, q.len())).collect();
        assert_eq!(floors, vec![(1, 1), (4, 2)]);
    }
}
