use std::fmt;

use crate::shared::structs::Passenger;

/***************************************/
/*           Simulation errors         */
/***************************************/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Missing or out-of-range fleet configuration, or a config file that cannot be read.
    Configuration(String),

    /// Request that can never be served (bad floors, duplicate id).
    InvalidRequest(String),

    /// Internal state no longer satisfies the fleet invariants.
    InvariantViolation(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            SimulationError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            SimulationError::InvariantViolation(msg) => {
                write!(f, "Invariant violation: {}", msg)
            }
        }
    }
}

impl std::error::Error for SimulationError {}

/**
 * Boarding was refused because the elevator is full.
 *
 * Not an error condition: the passenger is handed back so it can be rescheduled within the
 * same tick.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityExceeded {
    pub passenger: Passenger,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elevator full, passenger {} must be rescheduled", self.passenger.id)
    }
}
