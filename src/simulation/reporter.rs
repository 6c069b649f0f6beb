/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::io::Write;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{SimEvent, SimulationError};

/**
 * Consumer end of the event channel.
 *
 * Runs on its own thread until every sender is dropped. Each event is written as one JSON
 * line when an output is given, otherwise it goes to the log.
 *
 * # Fields
 * - `event_rx`:    Receives events from the simulation thread.
 * - `output`:      JSON-lines destination, if any.
 */
pub struct Reporter {
    event_rx: cbc::Receiver<SimEvent>,
    output: Option<Box<dyn Write + Send>>,
}

impl Reporter {
    pub fn new(event_rx: cbc::Receiver<SimEvent>, output: Option<Box<dyn Write + Send>>) -> Reporter {
        Reporter { event_rx, output }
    }

    /// Returns the number of events handled.
    pub fn run(mut self) -> Result<usize, SimulationError> {
        let mut handled = 0;

        for event in self.event_rx.iter() {
            match self.output.as_mut() {
                Some(output) => write_event(output, &event)?,
                None => log_event(&event),
            }
            handled += 1;
        }

        if let Some(output) = self.output.as_mut() {
            output
                .flush()
                .map_err(|e| SimulationError::Configuration(format!("failed to flush event log: {}", e)))?;
        }
        Ok(handled)
    }
}

fn write_event(output: &mut Box<dyn Write + Send>, event: &SimEvent) -> Result<(), SimulationError> {
    let line = serde_json::to_string(event)
        .map_err(|e| SimulationError::Configuration(format!("failed to encode event: {}", e)))?;
    writeln!(output, "{}", line)
        .map_err(|e| SimulationError::Configuration(format!("failed to write event log: {}", e)))
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::Assigned { tick, passenger, elevator } => {
            info!("[{}] {} assigned to elevator {}", tick, passenger, elevator)
        }
        SimEvent::PickedUp { tick, passenger, elevator, floor } => {
            info!("[{}] {} picked up by elevator {} at floor {}", tick, passenger, elevator, floor)
        }
        SimEvent::DroppedOff { tick, elevator, passenger } => {
            info!("[{}] elevator {} dropped off {}", tick, elevator, passenger)
        }
        SimEvent::Rescheduled { tick, passenger, elevator, floor } => {
            info!("[{}] {} left behind by full elevator {} at floor {}", tick, passenger, elevator, floor)
        }
        SimEvent::Snapshot { tick, state } => debug!("[{}] {:?}", tick, state),
    }
}
