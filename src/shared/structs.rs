/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::error::SimulationError;

/***************************************/
/*            Type aliases             */
/***************************************/
pub type Floor = u32;
pub type Tick = u64;
pub type ElevatorId = usize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Direction of travel from `from` to `to`, `None` when already there.
    pub fn between(from: Floor, to: Floor) -> Option<Direction> {
        if to > from {
            Some(Direction::Up)
        } else if to < from {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "idle")]
    Idle,
    #[serde(rename = "inUse")]
    InUse,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "IDLE"),
            Status::InUse => write!(f, "IN_USE"),
        }
    }
}

/**
 * One entry of the request feed.
 *
 * Field names follow the long form used by the dispatcher API; the short names used by
 * hand-written request lists (`source`, `dest`, `time`) are accepted as aliases.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub id: String,
    #[serde(alias = "source")]
    pub source_floor: Floor,
    #[serde(alias = "dest")]
    pub dest_floor: Floor,
    #[serde(alias = "time")]
    pub arrival_tick: Tick,
}

/**
 * A single trip and its lifecycle timestamps.
 *
 * # Fields
 * - `start_time`:          Tick the request was admitted.
 * - `pickup_time`:         Tick the passenger boarded, set exactly once.
 * - `end_time`:            Tick the passenger was dropped off. The passenger is closed afterwards.
 * - `assigned_elevator`:   Last elevator the scheduler committed this passenger to.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub id: String,
    pub start_floor: Floor,
    pub end_floor: Floor,
    pub start_time: Tick,
    pub pickup_time: Option<Tick>,
    pub end_time: Option<Tick>,
    pub assigned_elevator: Option<ElevatorId>,
}

impl Passenger {
    pub fn new(id: impl Into<String>, start_floor: Floor, end_floor: Floor, start_time: Tick) -> Passenger {
        Passenger {
            id: id.into(),
            start_floor,
            end_floor,
            start_time,
            pickup_time: None,
            end_time: None,
            assigned_elevator: None,
        }
    }

    pub fn from_request(request: &Request, start_time: Tick) -> Passenger {
        Passenger::new(request.id.clone(), request.source_floor, request.dest_floor, start_time)
    }

    pub fn direction(&self) -> Direction {
        if self.end_floor > self.start_floor {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn assign_elevator(&mut self, elevator: ElevatorId) {
        self.assigned_elevator = Some(elevator);
    }

    pub fn set_pickup_time(&mut self, tick: Tick) {
        self.pickup_time = Some(tick);
    }

    pub fn set_end_time(&mut self, tick: Tick) {
        self.end_time = Some(tick);
    }

    /// Admission, pickup and drop-off must happen in that order.
    pub fn check_timeline(&self) -> Result<(), SimulationError> {
        match (self.pickup_time, self.end_time) {
            (Some(pickup), _) if pickup < self.start_time => Err(SimulationError::InvariantViolation(format!(
                "passenger {} picked up at tick {} before admission at tick {}",
                self.id, pickup, self.start_time
            ))),
            (None, Some(end)) => Err(SimulationError::InvariantViolation(format!(
                "passenger {} dropped off at tick {} without a pickup",
                self.id, end
            ))),
            (Some(pickup), Some(end)) if end < pickup => Err(SimulationError::InvariantViolation(format!(
                "passenger {} dropped off at tick {} before pickup at tick {}",
                self.id, end, pickup
            ))),
            _ => Ok(()),
        }
    }

    pub fn is_trip_complete(&self) -> bool {
        self.end_time.is_some()
    }

    // Both metrics count the admission tick itself.
    pub fn wait_time(&self) -> Option<Tick> {
        self.pickup_time.map(|pickup| pickup - self.start_time + 1)
    }

    pub fn total_time(&self) -> Option<Tick> {
        self.end_time.map(|end| end - self.start_time + 1)
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elevator = match self.assigned_elevator {
            Some(id) => id.to_string(),
            None => "-".to_string(),
        };
        let duration = match self.total_time() {
            Some(total) => total.to_string(),
            None => "N/A".to_string(),
        };
        let wait = match self.wait_time() {
            Some(wait) => wait.to_string(),
            None => "N/A".to_string(),
        };
        write!(
            f,
            "Passenger: {}; Trip Completed: {}; Elevator: {}; Duration: {} (Wait Time: {})",
            self.id,
            if self.is_trip_complete() { "YES" } else { "NO" },
            elevator,
            duration,
            wait
        )
    }
}

/**
 * Point-in-time view of one elevator, reported once per tick.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorSnapshot {
    pub elevator: ElevatorId,
    pub floor: Floor,
    pub status: Status,
    pub direction: Option<Direction>,
    #[serde(rename = "passengerDirection")]
    pub passenger_direction: Option<Direction>,
    pub onboard: usize,
}
