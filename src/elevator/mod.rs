pub mod fsm;
pub mod queue;
pub mod fsm_tests;

pub use fsm::Elevator;
pub use queue::ElevatorQueue;
pub use queue::Tier;
