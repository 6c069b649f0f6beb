/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::thread::Builder;

/* Custom libraries */
use shared::{ChannelSink, SimEvent, SimulationError};
use simulation::{Building, Reporter, SimulationReport};

/* Modules */
mod config;
mod dispatcher;
mod elevator;
mod scheduler;
mod shared;
mod simulation;

/* Main */
fn main() {
    // Logging defaults to info, RUST_LOG overrides
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("elevator_fleet")
        .about("Discrete-tick elevator fleet dispatch simulator")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .takes_value(true)
                .default_value("config.toml")
                .help("Building configuration"),
        )
        .arg(
            Arg::new("requests")
                .long("requests")
                .value_name("PATH")
                .takes_value(true)
                .help("JSON request list, replaces the requests in the configuration"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("PATH")
                .takes_value(true)
                .help("Write the simulation report as JSON"),
        )
        .arg(
            Arg::new("events")
                .long("events")
                .value_name("PATH")
                .takes_value(true)
                .help("Write every event as one JSON line"),
        )
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let config = unwrap_or_exit!(config::load_config(Path::new(config_path)), "loading configuration");
    let requests = match matches.value_of("requests") {
        Some(path) => unwrap_or_exit!(simulation::load_requests(Path::new(path)), "loading requests"),
        None => config.requests.clone(),
    };

    // Start the reporter
    let (event_tx, event_rx) = cbc::unbounded::<SimEvent>();
    let events_output = match matches.value_of("events") {
        Some(path) => Some(unwrap_or_exit!(open_output(path), "opening event log")),
        None => None,
    };
    let reporter = Reporter::new(event_rx, events_output);
    let reporter_thread = unwrap_or_exit!(
        Builder::new().name("reporter".into()).spawn(move || reporter.run()),
        "starting reporter"
    );

    // Run the simulation, the sink is dropped with the building
    let building = unwrap_or_exit!(
        Building::new(&config, requests, ChannelSink::new(event_tx)),
        "building setup"
    );
    let report = unwrap_or_exit!(building.run());

    match reporter_thread.join() {
        Ok(result) => {
            let handled = unwrap_or_exit!(result, "event reporting");
            info!("Reporter handled {} events", handled);
        }
        Err(_) => {
            log::error!("ERROR: reporter thread panicked");
            std::process::exit(1);
        }
    }

    for passenger in report.passengers.iter() {
        info!("{}", passenger);
    }
    report.stats.log();

    if let Some(path) = matches.value_of("output") {
        unwrap_or_exit!(write_report(&report, path), "writing report");
        info!("Report written to {}", path);
    }
}

fn open_output(path: &str) -> Result<Box<dyn Write + Send>, SimulationError> {
    let file = File::create(path)
        .map_err(|e| SimulationError::Configuration(format!("failed to create {}: {}", path, e)))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn write_report(report: &SimulationReport, path: &str) -> Result<(), SimulationError> {
    let report_str = serde_json::to_string_pretty(report)
        .map_err(|e| SimulationError::Configuration(format!("failed to encode report: {}", e)))?;
    std::fs::write(path, report_str)
        .map_err(|e| SimulationError::Configuration(format!("failed to write {}: {}", path, e)))
}
