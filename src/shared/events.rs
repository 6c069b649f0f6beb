/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::structs::{ElevatorId, ElevatorSnapshot, Floor, Passenger, Tick};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SimEvent {
    Assigned {
        tick: Tick,
        passenger: String,
        elevator: ElevatorId,
    },
    PickedUp {
        tick: Tick,
        passenger: String,
        elevator: ElevatorId,
        floor: Floor,
    },
    DroppedOff {
        tick: Tick,
        elevator: ElevatorId,
        passenger: Passenger,
    },
    Rescheduled {
        tick: Tick,
        passenger: String,
        elevator: ElevatorId,
        floor: Floor,
    },
    Snapshot {
        tick: Tick,
        #[serde(flatten)]
        state: ElevatorSnapshot,
    },
}

/**
 * Consumer of everything the dispatcher has to say about the fleet.
 *
 * Injected into the dispatcher on every call that can produce events. Formatting and export
 * belong to the implementor; the dispatcher never touches files or sockets.
 */
pub trait ReportSink {
    fn report(&mut self, event: SimEvent);
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn report(&mut self, event: SimEvent) {
        (**self).report(event);
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn report(&mut self, event: SimEvent) {
        (**self).report(event);
    }
}

/// Forwards events to another thread.
pub struct ChannelSink {
    event_tx: cbc::Sender<SimEvent>,
}

impl ChannelSink {
    pub fn new(event_tx: cbc::Sender<SimEvent>) -> ChannelSink {
        ChannelSink { event_tx }
    }
}

impl ReportSink for ChannelSink {
    fn report(&mut self, event: SimEvent) {
        // A closed receiver only means nobody is listening any more.
        if let Err(e) = self.event_tx.send(event) {
            log::trace!("Dropping event, reporter is gone: {:?}", e.into_inner());
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<SimEvent>,
}

#[cfg(test)]
impl ReportSink for RecordingSink {
    fn report(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}
