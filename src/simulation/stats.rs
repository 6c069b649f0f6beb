/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Passenger, Tick};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub min: Tick,
    pub max: Tick,
    pub mean: f64,
}

/**
 * Aggregates over the passengers whose trip is complete.
 *
 * # Fields
 * - `count`:   Number of completed trips.
 * - `pickup`:  Tick at which passengers boarded.
 * - `wait`:    Ticks from admission to boarding.
 * - `trip`:    Ticks from admission to drop-off.
 */
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PassengerStats {
    pub count: usize,
    pub pickup: Option<Summary>,
    pub wait: Option<Summary>,
    pub trip: Option<Summary>,
}

impl Summary {
    fn over(values: &[Tick]) -> Option<Summary> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let mean = values.iter().sum::<Tick>() as f64 / values.len() as f64;
        Some(Summary { min, max, mean })
    }
}

impl PassengerStats {
    pub fn from_passengers(passengers: &[Passenger]) -> PassengerStats {
        let completed = passengers
            .iter()
            .filter(|p| p.is_trip_complete())
            .collect::<Vec<&Passenger>>();

        let pickups = completed.iter().filter_map(|p| p.pickup_time).collect::<Vec<Tick>>();
        let waits = completed.iter().filter_map(|p| p.wait_time()).collect::<Vec<Tick>>();
        let trips = completed.iter().filter_map(|p| p.total_time()).collect::<Vec<Tick>>();

        PassengerStats {
            count: completed.len(),
            pickup: Summary::over(&pickups),
            wait: Summary::over(&waits),
            trip: Summary::over(&trips),
        }
    }

    pub fn log(&self) {
        info!("Completed trips: {}", self.count);
        for (name, summary) in [("PickUpTime", &self.pickup), ("WaitTime", &self.wait), ("TotalTime", &self.trip)] {
            match summary {
                Some(s) => info!("{:<10}  min: {:>5}  max: {:>5}  mean: {:>8.2}", name, s.min, s.max, s.mean),
                None => info!("{:<10}  no data", name),
            }
        }
    }
}
