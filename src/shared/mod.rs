pub mod error;
pub mod events;
pub mod macros;
pub mod structs;

pub use error::CapacityExceeded;
pub use error::SimulationError;
pub use events::ChannelSink;
pub use events::ReportSink;
pub use events::SimEvent;
pub use structs::Direction;
pub use structs::ElevatorId;
pub use structs::ElevatorSnapshot;
pub use structs::Floor;
pub use structs::Passenger;
pub use structs::Request;
pub use structs::Status;
pub use structs::Tick;
