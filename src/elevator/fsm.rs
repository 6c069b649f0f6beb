use std::collections::BTreeMap;
use std::fmt;

use crate::shared::{
    CapacityExceeded, Direction, ElevatorId, ElevatorSnapshot, Floor, Passenger, SimulationError,
    Status, Tick,
};

/**
 * State machine of a single car.
 *
 * The elevator is either `Idle` (no direction, nothing to do) or `InUse`. While in use it
 * carries two directions: `direction` is where the car physically moves on the next tick,
 * `passenger_direction` is the direction of the sweep it is serving. The two differ while the
 * car travels to the far end of its committed pickups, marked by `pickup_floor_bound`.
 *
 * # Fields
 * - `id`:                  Position of the elevator in the fleet, also its iteration order.
 * - `n_floors`:            Highest floor. Floors are numbered from 1.
 * - `capacity`:            Maximum number of passengers onboard.
 * - `current_floor`:       Floor the car is at.
 * - `direction`:           Direction of motion, `None` when idle.
 * - `passenger_direction`: Direction of the sweep being served, `None` when idle.
 * - `status`:              `Idle` or `InUse`.
 * - `pickup_floor_bound`:  Lowest pending pickup of an UP sweep, highest of a DOWN sweep.
 * - `onboard`:             Passengers onboard keyed by destination floor, in boarding order.
 * - `passenger_count`:     Total number of passengers in `onboard`.
 */
#[derive(Debug, Clone)]
pub struct Elevator {
    id: ElevatorId,
    n_floors: Floor,
    capacity: usize,
    current_floor: Floor,
    direction: Option<Direction>,
    passenger_direction: Option<Direction>,
    status: Status,
    pickup_floor_bound: Floor,
    onboard: BTreeMap<Floor, Vec<Passenger>>,
    passenger_count: usize,
}

impl Elevator {
    pub fn new(id: ElevatorId, n_floors: Floor, capacity: usize) -> Elevator {
        Elevator {
            id,
            n_floors,
            capacity,
            current_floor: 1,
            direction: None,
            passenger_direction: None,
            status: Status::Idle,
            pickup_floor_bound: 1,
            onboard: BTreeMap::new(),
            passenger_count: 0,
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    pub fn n_floors(&self) -> Floor {
        self.n_floors
    }

    pub fn at_floor(&self) -> Floor {
        self.current_floor
    }

    pub fn passenger_direction(&self) -> Option<Direction> {
        self.passenger_direction
    }

    pub fn pickup_floor_bound(&self) -> Floor {
        self.pickup_floor_bound
    }

    pub fn passenger_count(&self) -> usize {
        self.passenger_count
    }

    pub fn is_idle(&self) -> bool {
        self.status == Status::Idle
    }

    pub fn is_at_max_capacity(&self) -> bool {
        self.passenger_count >= self.capacity
    }

    /// True once the car moves in the direction of the sweep it serves.
    pub fn is_sweeping(&self) -> bool {
        self.direction.is_some() && self.direction == self.passenger_direction
    }

    /// IDLE -> IN_USE for a first passenger waiting at `pickup_floor`.
    pub fn start_trip(&mut self, pickup_floor: Floor, passenger_direction: Direction) {
        self.status = Status::InUse;
        self.begin_sweep(passenger_direction, pickup_floor);
    }

    /// Commits the car to a new sweep whose farthest pickup is `bound`.
    pub fn begin_sweep(&mut self, passenger_direction: Direction, bound: Floor) {
        self.passenger_direction = Some(passenger_direction);
        self.pickup_floor_bound = bound;
        self.head_towards(bound);
    }

    fn head_towards(&mut self, floor: Floor) {
        self.direction = Direction::between(self.current_floor, floor).or(self.passenger_direction);
    }

    /// Pulls the bound toward `floor`; it never loosens within a sweep.
    pub fn update_pick_up_floor(&mut self, floor: Floor) {
        match self.passenger_direction {
            Some(Direction::Up) => self.pickup_floor_bound = self.pickup_floor_bound.min(floor),
            Some(Direction::Down) => self.pickup_floor_bound = self.pickup_floor_bound.max(floor),
            None => {}
        }
    }

    /**
     * Turns the car into its passenger direction when it stands on the pickup bound, then
     * reports whether it is moving with its passengers.
     */
    pub fn is_moving_in_pass_direction(&mut self) -> bool {
        if self.current_floor == self.pickup_floor_bound && self.direction != self.passenger_direction {
            self.direction = self.passenger_direction;
        }
        self.is_sweeping()
    }

    pub fn update_at_floor(&mut self) -> Result<(), SimulationError> {
        let next_floor = match self.direction {
            Some(Direction::Up) => self.current_floor + 1,
            Some(Direction::Down) => self.current_floor.saturating_sub(1),
            None => return Ok(()),
        };

        if next_floor < 1 || next_floor > self.n_floors {
            return Err(SimulationError::InvariantViolation(format!(
                "elevator {} would leave the building moving {:?} from floor {}",
                self.id, self.direction, self.current_floor
            )));
        }

        self.current_floor = next_floor;
        Ok(())
    }

    pub fn add_passenger(&mut self, mut passenger: Passenger, pick_up_time: Tick) -> Result<(), CapacityExceeded> {
        if self.is_at_max_capacity() {
            return Err(CapacityExceeded { passenger });
        }

        passenger.set_pickup_time(pick_up_time);
        self.onboard.entry(passenger.end_floor).or_default().push(passenger);
        self.passenger_count += 1;
        Ok(())
    }

    /// Removes everyone travelling to the current floor and closes their trips.
    pub fn drop_passengers(&mut self, time: Tick) -> Vec<Passenger> {
        let mut passengers = self.onboard.remove(&self.current_floor).unwrap_or_default();
        self.passenger_count -= passengers.len();
        for passenger in passengers.iter_mut() {
            passenger.set_end_time(time);
        }
        passengers
    }

    pub fn go_idle(&mut self) {
        self.status = Status::Idle;
        self.direction = None;
        self.passenger_direction = None;
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            elevator: self.id,
            floor: self.current_floor,
            status: self.status,
            direction: self.direction,
            passenger_direction: self.passenger_direction,
            onboard: self.passenger_count,
        }
    }

    pub fn check_invariants(&self) -> Result<(), SimulationError> {
        let counted: usize = self.onboard.values().map(Vec::len).sum();
        if counted != self.passenger_count || self.passenger_count > self.capacity {
            return Err(SimulationError::InvariantViolation(format!(
                "elevator {} carries {} passengers (counter {}, capacity {})",
                self.id, counted, self.passenger_count, self.capacity
            )));
        }
        if self.current_floor < 1 || self.current_floor > self.n_floors {
            return Err(SimulationError::InvariantViolation(format!(
                "elevator {} is at floor {} outside 1..={}",
                self.id, self.current_floor, self.n_floors
            )));
        }
        for passenger in self.onboard.values().flatten() {
            if passenger.pickup_time.is_none() || passenger.end_time.is_some() {
                return Err(SimulationError::InvariantViolation(format!(
                    "elevator {} carries passenger {} outside its trip",
                    self.id, passenger.id
                )));
            }
            passenger.check_timeline()?;
        }
        if self.is_idle() != self.direction.is_none() {
            return Err(SimulationError::InvariantViolation(format!(
                "elevator {} is {} with direction {:?}",
                self.id, self.status, self.direction
            )));
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[cfg(test)]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    #[cfg(test)]
    pub fn status(&self) -> Status {
        self.status
    }

    #[cfg(test)]
    pub fn onboard(&self) -> &BTreeMap<Floor, Vec<Passenger>> {
        &self.onboard
    }

    #[cfg(test)]
    pub fn test_set_floor(&mut self, floor: Floor) {
        self.current_floor = floor;
    }
}

impl fmt::Display for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |direction: Option<Direction>| match direction {
            Some(d) => d.to_string(),
            None => "None".to_string(),
        };
        write!(
            f,
            "Elevator ID: {} Floor: {} Passengers: {} Status: {}\t\t[Direction: {}, Passenger Direction: {}]",
            self.id,
            self.current_floor,
            self.passenger_count,
            self.status,
            show(self.direction),
            show(self.passenger_direction)
        )
    }
}
