/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Floor, Request, SimulationError, Tick};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub building: BuildingConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub requests: Vec<Request>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildingConfig {
    pub elevators: usize,
    pub floors: Floor,
    pub capacity: usize,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    #[serde(default = "default_max_ticks")]
    pub max_ticks: Tick,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            max_ticks: default_max_ticks(),
        }
    }
}

fn default_max_ticks() -> Tick {
    100_000
}

impl BuildingConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.elevators < 1 {
            return Err(SimulationError::Configuration(
                "at least one elevator is required".to_string(),
            ));
        }
        if self.floors < 2 {
            return Err(SimulationError::Configuration(format!(
                "a building needs at least 2 floors, got {}",
                self.floors
            )));
        }
        if self.capacity < 1 {
            return Err(SimulationError::Configuration(
                "elevator capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config, SimulationError> {
    let config: Config = toml::from_str(config_str)
        .map_err(|e| SimulationError::Configuration(format!("failed to parse configuration: {}", e)))?;
    config.building.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, SimulationError> {
    let config_str = fs::read_to_string(path).map_err(|e| {
        SimulationError::Configuration(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
}
