pub mod scheduler;
pub mod scheduler_tests;

pub use scheduler::Scheduler;
