/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Dispatcher;
use crate::elevator::Elevator;
use crate::shared::{Direction, ElevatorId, Floor, Passenger, ReportSink, SimulationError, Tick};

/**
 * Chooses an elevator for every new request.
 *
 * The scheduler only reads the fleet. Once an elevator is chosen the passenger is handed to
 * [`Dispatcher::add_passenger_to_elevator_queue`], which stays the single writer of elevator
 * and queue state.
 */
#[derive(Debug, Default, Clone, Copy)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler
    }

    /// Ticks until `elevator` could reach a rider waiting at `pick_up_floor`.
    pub fn get_elevator_pick_up_time(
        &self,
        elevator: &Elevator,
        pick_up_floor: Floor,
        pick_up_direction: Direction,
    ) -> Tick {
        Tick::from(floors_to_pick_up(elevator, pick_up_floor, pick_up_direction))
    }

    /**
     * Elevator with the lowest estimate. Ties go to an elevator already in use over an idle
     * one, then to the lowest id.
     */
    pub fn get_min_trip_elevator(
        &self,
        elevators: &[Elevator],
        start_floor: Floor,
        direction: Direction,
    ) -> Option<(ElevatorId, Tick)> {
        let mut pick_up_elevator: Option<(&Elevator, Tick)> = None;

        for elevator in elevators.iter() {
            let trip_time = self.get_elevator_pick_up_time(elevator, start_floor, direction);
            let better = match pick_up_elevator {
                None => true,
                Some((chosen, min_trip_time)) => {
                    trip_time < min_trip_time
                        || (trip_time == min_trip_time && chosen.is_idle() && !elevator.is_idle())
                }
            };
            if better {
                pick_up_elevator = Some((elevator, trip_time));
            }
        }

        pick_up_elevator.map(|(elevator, trip_time)| (elevator.id(), trip_time))
    }

    pub fn schedule_elevator(
        &self,
        dispatcher: &mut Dispatcher,
        passengers: Vec<Passenger>,
        tick: Tick,
        sink: &mut dyn ReportSink,
    ) -> Result<(), SimulationError> {
        for passenger in passengers {
            let (elevator_id, trip_time) = self
                .get_min_trip_elevator(dispatcher.elevators(), passenger.start_floor, passenger.direction())
                .ok_or_else(|| {
                    SimulationError::InvariantViolation("no elevator available for scheduling".to_string())
                })?;

            debug!(
                "Elevator {} reaches {} at floor {} in {} ticks",
                elevator_id, passenger.id, passenger.start_floor, trip_time
            );
            dispatcher.add_passenger_to_elevator_queue(elevator_id, passenger, tick, sink)?;
        }
        Ok(())
    }
}

/// Floors the car travels before it can board a rider at `pick_up_floor`.
fn floors_to_pick_up(elevator: &Elevator, pick_up_floor: Floor, pick_up_direction: Direction) -> Floor {
    let at_floor = elevator.at_floor();

    let sweep = match elevator.passenger_direction() {
        Some(direction) if !elevator.is_idle() => direction,
        _ => return pick_up_floor.abs_diff(at_floor),
    };
    let sweep_end = terminus(elevator, sweep);

    if sweep != pick_up_direction {
        // Finish this sweep, cross the building, then come back for the rider.
        let far_end = terminus(elevator, sweep.opposite());
        return at_floor.abs_diff(sweep_end)
            + (elevator.n_floors() - 1)
            + pick_up_floor.abs_diff(far_end);
    }

    if !elevator.is_sweeping() {
        // Still heading for the far end of its pickups; the sweep starts there.
        let start = match sweep {
            Direction::Up => elevator.pickup_floor_bound().min(pick_up_floor),
            Direction::Down => elevator.pickup_floor_bound().max(pick_up_floor),
        };
        return at_floor.abs_diff(start) + start.abs_diff(pick_up_floor);
    }

    // A full car standing on the pickup floor leaves the rider behind.
    let ahead = match sweep {
        Direction::Up => pick_up_floor > at_floor,
        Direction::Down => pick_up_floor < at_floor,
    } || (pick_up_floor == at_floor && !elevator.is_at_max_capacity());
    if ahead {
        pick_up_floor.abs_diff(at_floor)
    } else {
        sweep_end.abs_diff(at_floor) + sweep_end.abs_diff(pick_up_floor)
    }
}

fn terminus(elevator: &Elevator, direction: Direction) -> Floor {
    match direction {
        Direction::Up => elevator.n_floors(),
        Direction::Down => 1,
    }
}
