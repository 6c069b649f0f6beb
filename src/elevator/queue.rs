use std::collections::BTreeMap;

use crate::shared::{Floor, Passenger};

/// Waiting passengers of one tier, keyed by pickup floor in ascending order.
pub type FloorQueue = BTreeMap<Floor, Vec<Passenger>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Served by the sweep in progress.
    Current,
    /// Served after the next reversal.
    Next,
    /// Same direction as the sweep in progress but already passed.
    Future,
}

/**
 * Pickup queue of one elevator.
 *
 * Passengers only ever move forward through the tiers: `Next` becomes `Current` and `Future`
 * becomes `Next` on [`ElevatorQueue::rotate`], and `Current` is drained by boarding. The only
 * way back is [`ElevatorQueue::reset`] once the elevator has gone idle with nothing left.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElevatorQueue {
    current: FloorQueue,
    next: FloorQueue,
    future: FloorQueue,
}

impl ElevatorQueue {
    pub fn new() -> ElevatorQueue {
        ElevatorQueue::default()
    }

    #[cfg(test)]
    pub fn current(&self) -> &FloorQueue {
        &self.current
    }

    #[cfg(test)]
    pub fn next(&self) -> &FloorQueue {
        &self.next
    }

    #[cfg(test)]
    pub fn future(&self) -> &FloorQueue {
        &self.future
    }

    pub fn tier(&self, tier: Tier) -> &FloorQueue {
        match tier {
            Tier::Current => &self.current,
            Tier::Next => &self.next,
            Tier::Future => &self.future,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut FloorQueue {
        match tier {
            Tier::Current => &mut self.current,
            Tier::Next => &mut self.next,
            Tier::Future => &mut self.future,
        }
    }

    pub fn add_to_queue(&mut self, tier: Tier, passenger: Passenger) {
        self.tier_mut(tier).entry(passenger.start_floor).or_default().push(passenger);
    }

    /// Takes every passenger of the current sweep waiting at `floor`, in arrival order.
    pub fn take_current_at(&mut self, floor: Floor) -> Vec<Passenger> {
        self.current.remove(&floor).unwrap_or_default()
    }

    pub fn has_current_at(&self, floor: Floor) -> bool {
        self.current.get(&floor).map_or(false, |passengers| !passengers.is_empty())
    }

    pub fn serviced_current_passengers(&self) -> bool {
        self.current.is_empty()
    }

    #[cfg(test)]
    pub fn has_pending_passengers(&self) -> bool {
        !(self.next.is_empty() && self.future.is_empty())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.serviced_current_passengers() && !self.has_pending_passengers()
    }

    /// NEXT -> CURRENT, FUTURE -> NEXT, FUTURE emptied.
    pub fn rotate(&mut self) {
        self.current = std::mem::take(&mut self.next);
        self.next = std::mem::take(&mut self.future);
    }

    pub fn reset(&mut self) {
        self.current.clear();
        self.next.clear();
        self.future.clear();
    }

    pub fn lowest_current_floor(&self) -> Option<Floor> {
        self.current.keys().next().copied()
    }

    pub fn highest_current_floor(&self) -> Option<Floor> {
        self.current.keys().next_back().copied()
    }

    /// Tier currently holding the passenger with this id.
    pub fn find(&self, passenger_id: &str) -> Option<Tier> {
        [Tier::Current, Tier::Next, Tier::Future].into_iter().find(|&tier| {
            self.tier(tier)
                .values()
                .flatten()
                .any(|passenger| passenger.id == passenger_id)
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        [&self.current, &self.next, &self.future]
            .iter()
            .map(|queue| queue.values().map(Vec::len).sum::<usize>())
            .sum()
    }
}
