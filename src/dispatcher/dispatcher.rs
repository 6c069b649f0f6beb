/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, warn};
use std::fmt;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::BuildingConfig;
use crate::elevator::{Elevator, ElevatorQueue, Tier};
use crate::shared::{
    CapacityExceeded, Direction, ElevatorId, Floor, Passenger, ReportSink, SimEvent,
    SimulationError, Tick,
};

/***************************************/
/*       Public data structures        */
/***************************************/
/**
 * Result of one dispatch pass over the fleet.
 *
 * # Fields
 * - `completed`:   Passengers dropped off during the pass, their trips closed.
 * - `rescheduled`: Passengers that found their elevator full and must be assigned again in the
 *                  same tick.
 */
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub completed: Vec<Passenger>,
    pub rescheduled: Vec<Passenger>,
}

/**
 * Owner of the fleet.
 *
 * The dispatcher is the only writer of elevator and queue state. Every elevator `i` is paired
 * with the pickup queue at the same index; both vectors are walked in id order so runs are
 * reproducible.
 */
pub struct Dispatcher {
    elevators: Vec<Elevator>,
    elevator_passenger_queue: Vec<ElevatorQueue>,
}

impl Dispatcher {
    pub fn new(config: &BuildingConfig) -> Result<Dispatcher, SimulationError> {
        config.validate()?;

        let elevators = (0..config.elevators)
            .map(|id| Elevator::new(id, config.floors, config.capacity))
            .collect::<Vec<Elevator>>();
        let elevator_passenger_queue = (0..config.elevators)
            .map(|_| ElevatorQueue::new())
            .collect::<Vec<ElevatorQueue>>();

        Ok(Dispatcher {
            elevators,
            elevator_passenger_queue,
        })
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn are_all_elevators_idle(&self) -> bool {
        self.elevators.iter().all(Elevator::is_idle)
    }

    pub fn move_elevators(&mut self) -> Result<(), SimulationError> {
        for elevator in self.elevators.iter_mut().filter(|e| !e.is_idle()) {
            elevator.update_at_floor()?;
        }
        Ok(())
    }

    /**
     * Commits `passenger` to the elevator `elevator_id` and files it in the right tier.
     *
     * An idle elevator is started toward the passenger. A moving one takes the passenger into
     * the running sweep when it travels the same way and has not passed the pickup floor yet,
     * defers it to FUTURE when it has, and to NEXT when it travels the other way.
     */
    pub fn add_passenger_to_elevator_queue(
        &mut self,
        elevator_id: ElevatorId,
        mut passenger: Passenger,
        tick: Tick,
        sink: &mut dyn ReportSink,
    ) -> Result<Tier, SimulationError> {
        let (elevator, queue) = match (
            self.elevators.get_mut(elevator_id),
            self.elevator_passenger_queue.get_mut(elevator_id),
        ) {
            (Some(elevator), Some(queue)) => (elevator, queue),
            _ => {
                return Err(SimulationError::InvariantViolation(format!(
                    "passenger {} assigned to unknown elevator {}",
                    passenger.id, elevator_id
                )))
            }
        };

        if let Some(tier) = queue.find(&passenger.id) {
            return Err(SimulationError::InvariantViolation(format!(
                "passenger {} is already waiting for elevator {} in {:?}",
                passenger.id, elevator_id, tier
            )));
        }

        passenger.assign_elevator(elevator_id);
        if elevator.is_idle() {
            queue.reset();
            elevator.start_trip(passenger.start_floor, passenger.direction());
        }

        let tier = classify(elevator, &passenger);
        if tier == Tier::Current {
            elevator.update_pick_up_floor(passenger.start_floor);
        }

        debug!(
            "Assigned {} ({} -> {}) to elevator {} in {:?}",
            passenger.id, passenger.start_floor, passenger.end_floor, elevator_id, tier
        );
        sink.report(SimEvent::Assigned {
            tick,
            passenger: passenger.id.clone(),
            elevator: elevator_id,
        });
        queue.add_to_queue(tier, passenger);

        Ok(tier)
    }

    /**
     * Drops off, picks up and re-plans every elevator in use.
     *
     * Calling it again within the same tick only boards passengers assigned since the last
     * pass, which is how rescheduled passengers get their second chance.
     */
    pub fn dispatch(&mut self, run_timer: Tick, sink: &mut dyn ReportSink) -> Result<DispatchOutcome, SimulationError> {
        let mut outcome = DispatchOutcome::default();

        for (elevator, queue) in self
            .elevators
            .iter_mut()
            .zip(self.elevator_passenger_queue.iter_mut())
        {
            if elevator.is_idle() {
                continue;
            }

            for passenger in elevator.drop_passengers(run_timer) {
                passenger.check_timeline()?;
                debug!("Dropped ==> {}", passenger);
                sink.report(SimEvent::DroppedOff {
                    tick: run_timer,
                    elevator: elevator.id(),
                    passenger: passenger.clone(),
                });
                outcome.completed.push(passenger);
            }

            pick_up_passengers(elevator, queue, run_timer, sink, &mut outcome.rescheduled);

            if update_elevator_status(elevator, queue) {
                // The new sweep may start right where the old one ended.
                pick_up_passengers(elevator, queue, run_timer, sink, &mut outcome.rescheduled);
            }

            elevator.check_invariants()?;
        }

        Ok(outcome)
    }

    pub fn report_snapshots(&self, tick: Tick, sink: &mut dyn ReportSink) {
        for elevator in self.elevators.iter() {
            sink.report(SimEvent::Snapshot {
                tick,
                state: elevator.snapshot(),
            });
        }
    }

    #[cfg(test)]
    pub fn elevator(&self, id: ElevatorId) -> Option<&Elevator> {
        self.elevators.get(id)
    }

    #[cfg(test)]
    pub fn queue(&self, id: ElevatorId) -> Option<&ElevatorQueue> {
        self.elevator_passenger_queue.get(id)
    }

    #[cfg(test)]
    pub fn test_elevator_mut(&mut self, id: ElevatorId) -> &mut Elevator {
        &mut self.elevators[id]
    }
}

impl fmt::Display for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .elevators
            .iter()
            .map(|elevator| elevator.to_string())
            .collect::<Vec<String>>();
        write!(f, "{}", lines.join("\n"))
    }
}

/***************************************/
/*          Private functions          */
/***************************************/
fn classify(elevator: &Elevator, passenger: &Passenger) -> Tier {
    let direction = passenger.direction();
    if elevator.passenger_direction() != Some(direction) {
        return Tier::Next;
    }

    // Still travelling to the far end of its pickups, the sweep has not started yet.
    if !elevator.is_sweeping() {
        return Tier::Current;
    }

    let floor = elevator.at_floor();
    let ahead = match direction {
        Direction::Up => passenger.start_floor > floor,
        Direction::Down => passenger.start_floor < floor,
    };

    // A full car standing on the pickup floor has already been passed by.
    if ahead || (passenger.start_floor == floor && !elevator.is_at_max_capacity()) {
        Tier::Current
    } else {
        Tier::Future
    }
}

fn pick_up_passengers(
    elevator: &mut Elevator,
    queue: &mut ElevatorQueue,
    run_timer: Tick,
    sink: &mut dyn ReportSink,
    rescheduled: &mut Vec<Passenger>,
) {
    if queue.serviced_current_passengers() {
        return;
    }
    if !elevator.is_moving_in_pass_direction() || !queue.has_current_at(elevator.at_floor()) {
        return;
    }

    let floor = elevator.at_floor();
    for passenger in queue.take_current_at(floor) {
        let id = passenger.id.clone();
        match elevator.add_passenger(passenger, run_timer) {
            Ok(()) => {
                debug!("Picked up {} at floor {} by elevator {}", id, floor, elevator.id());
                sink.report(SimEvent::PickedUp {
                    tick: run_timer,
                    passenger: id,
                    elevator: elevator.id(),
                    floor,
                });
            }
            Err(CapacityExceeded { passenger }) => {
                warn!(
                    "Elevator {} is full at floor {}, rescheduling {}",
                    elevator.id(),
                    floor,
                    passenger.id
                );
                sink.report(SimEvent::Rescheduled {
                    tick: run_timer,
                    passenger: id,
                    elevator: elevator.id(),
                    floor,
                });
                rescheduled.push(passenger);
            }
        }
    }
}

/// Extremum of the current tier a sweep in `direction` has to reach first.
fn sweep_bound(queue: &ElevatorQueue, direction: Direction) -> Option<Floor> {
    match direction {
        Direction::Up => queue.lowest_current_floor(),
        Direction::Down => queue.highest_current_floor(),
    }
}

/**
 * Re-plans an elevator that has nobody onboard and nothing left in its sweep.
 *
 * NEXT is served first, in the opposite direction. Only when it is empty does FUTURE get its
 * turn, as a continuation of the finished sweep's direction. With all three tiers exhausted
 * the elevator goes idle. Returns true when a new sweep was started.
 */
fn update_elevator_status(elevator: &mut Elevator, queue: &mut ElevatorQueue) -> bool {
    if elevator.passenger_count() > 0 || !queue.serviced_current_passengers() {
        return false;
    }

    let finished = match elevator.passenger_direction() {
        Some(direction) => direction,
        None => return false,
    };

    queue.rotate();
    if let Some(bound) = sweep_bound(queue, finished.opposite()) {
        debug!(
            "Elevator {} reverses to serve {} from floor {}",
            elevator.id(),
            finished.opposite(),
            bound
        );
        elevator.begin_sweep(finished.opposite(), bound);
        return true;
    }

    queue.rotate();
    if let Some(bound) = sweep_bound(queue, finished) {
        debug!(
            "Elevator {} continues serving {} from floor {}",
            elevator.id(),
            finished,
            bound
        );
        elevator.begin_sweep(finished, bound);
        return true;
    }

    debug!("Elevator {} is idle at floor {}", elevator.id(), elevator.at_floor());
    elevator.go_idle();
    queue.reset();
    false
}
