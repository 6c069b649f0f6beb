pub mod building;
pub mod reporter;
pub mod requests;
pub mod stats;

pub use building::Building;
pub use building::SimulationReport;
pub use reporter::Reporter;
pub use requests::load_requests;
pub use requests::parse_requests;
pub use stats::PassengerStats;
