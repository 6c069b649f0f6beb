/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::scheduler::Scheduler;
use crate::shared::{Floor, Passenger, ReportSink, Request, SimulationError, Tick};
use crate::simulation::requests::validate_requests;
use crate::simulation::stats::PassengerStats;

/***************************************/
/*       Public data structures        */
/***************************************/
/// Floor of every elevator at the end of a tick, in elevator id order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub tick: Tick,
    pub floors: Vec<Floor>,
}

/**
 * Everything a finished run produced.
 *
 * # Fields
 * - `ticks`:           Number of ticks simulated.
 * - `passengers`:      Every admitted passenger in admission order, with final timestamps.
 * - `elevator_trace`:  One row per tick.
 * - `stats`:           Aggregates over the completed trips.
 */
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub ticks: Tick,
    pub passengers: Vec<Passenger>,
    pub elevator_trace: Vec<TraceRow>,
    pub stats: PassengerStats,
}

/**
 * Drives the fleet through discrete ticks.
 *
 * Each tick moves the elevators, admits the requests that have arrived, assigns them, runs the
 * dispatcher and records where every elevator ended up. Passengers left behind by a full
 * elevator are assigned again and served in the same tick.
 *
 * # Fields
 * - `requests`:        Request feed sorted by arrival tick, ties in input order.
 * - `next_request`:    Index of the first request not admitted yet.
 * - `passengers`:      Admitted passengers; `passenger_index` maps ids to positions.
 * - `max_ticks`:       A run still busy at this tick is treated as stuck.
 */
pub struct Building<S: ReportSink> {
    dispatcher: Dispatcher,
    scheduler: Scheduler,
    requests: Vec<Request>,
    next_request: usize,
    passengers: Vec<Passenger>,
    passenger_index: HashMap<String, usize>,
    elevator_trace: Vec<TraceRow>,
    run_timer: Tick,
    max_ticks: Tick,
    sink: S,
}

impl<S: ReportSink> Building<S> {
    pub fn new(config: &Config, mut requests: Vec<Request>, sink: S) -> Result<Building<S>, SimulationError> {
        let dispatcher = Dispatcher::new(&config.building)?;
        validate_requests(&requests, config.building.floors)?;
        requests.sort_by_key(|request| request.arrival_tick);

        info!(
            "Building with {} elevators, {} floors, capacity {}; {} requests",
            config.building.elevators,
            config.building.floors,
            config.building.capacity,
            requests.len()
        );

        Ok(Building {
            dispatcher,
            scheduler: Scheduler::new(),
            requests,
            next_request: 0,
            passengers: Vec::new(),
            passenger_index: HashMap::new(),
            elevator_trace: Vec::new(),
            run_timer: 0,
            max_ticks: config.simulation.max_ticks,
            sink,
        })
    }

    #[cfg(test)]
    pub fn tick(&self) -> Tick {
        self.run_timer
    }

    #[cfg(test)]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    #[cfg(test)]
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn are_all_requests_admitted(&self) -> bool {
        self.next_request >= self.requests.len()
    }

    pub fn is_finished(&self) -> bool {
        self.are_all_requests_admitted() && self.dispatcher.are_all_elevators_idle()
    }

    pub fn step(&mut self) -> Result<(), SimulationError> {
        if self.run_timer >= self.max_ticks {
            return Err(SimulationError::InvariantViolation(format!(
                "simulation still busy after {} ticks",
                self.max_ticks
            )));
        }

        self.dispatcher.move_elevators()?;

        let arrivals = self.admit_requests();
        if !arrivals.is_empty() {
            self.scheduler
                .schedule_elevator(&mut self.dispatcher, arrivals, self.run_timer, &mut self.sink)?;
        }

        let mut outcome = self.dispatcher.dispatch(self.run_timer, &mut self.sink)?;
        loop {
            for passenger in outcome.completed {
                self.record_completed(passenger);
            }
            if outcome.rescheduled.is_empty() {
                break;
            }
            self.scheduler
                .schedule_elevator(&mut self.dispatcher, outcome.rescheduled, self.run_timer, &mut self.sink)?;
            outcome = self.dispatcher.dispatch(self.run_timer, &mut self.sink)?;
        }

        self.dispatcher.report_snapshots(self.run_timer, &mut self.sink);
        self.elevator_trace.push(TraceRow {
            tick: self.run_timer,
            floors: self.dispatcher.elevators().iter().map(|e| e.at_floor()).collect(),
        });

        debug!("---------- TIMER: {} ----------\n{}", self.run_timer, self.dispatcher);
        self.run_timer += 1;
        Ok(())
    }

    pub fn run(mut self) -> Result<SimulationReport, SimulationError> {
        while !self.is_finished() {
            self.step()?;
        }

        info!("All requests served after {} ticks", self.run_timer);
        let stats = PassengerStats::from_passengers(&self.passengers);
        Ok(SimulationReport {
            ticks: self.run_timer,
            passengers: self.passengers,
            elevator_trace: self.elevator_trace,
            stats,
        })
    }

    fn admit_requests(&mut self) -> Vec<Passenger> {
        let mut arrivals = Vec::new();

        while let Some(request) = self.requests.get(self.next_request) {
            if request.arrival_tick > self.run_timer {
                break;
            }
            let passenger = Passenger::from_request(request, self.run_timer);
            self.passenger_index.insert(passenger.id.clone(), self.passengers.len());
            self.passengers.push(passenger.clone());
            arrivals.push(passenger);
            self.next_request += 1;
        }

        arrivals
    }

    fn record_completed(&mut self, passenger: Passenger) {
        match self.passenger_index.get(&passenger.id) {
            Some(&index) => self.passengers[index] = passenger,
            None => debug!("Dropped unknown passenger {}", passenger.id),
        }
    }
}
