pub mod dispatcher;

pub use dispatcher::DispatchOutcome;
pub use dispatcher::Dispatcher;
