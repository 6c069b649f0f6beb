/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Floor, Request, SimulationError};

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_requests(requests_str: &str) -> Result<Vec<Request>, SimulationError> {
    serde_json::from_str::<Vec<Request>>(requests_str)
        .map_err(|e| SimulationError::InvalidRequest(format!("failed to parse request list: {}", e)))
}

/// Reads a JSON array of requests, e.g. `[{"id": "a", "source": 1, "dest": 5, "time": 0}]`.
pub fn load_requests(path: &Path) -> Result<Vec<Request>, SimulationError> {
    let requests_str = fs::read_to_string(path).map_err(|e| {
        SimulationError::InvalidRequest(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_requests(&requests_str)
}

/**
 * Rejects a request feed the fleet could never serve.
 *
 * Every request must name two different floors inside `1..=n_floors`, and ids must be unique
 * across the whole feed.
 */
pub fn validate_requests(requests: &[Request], n_floors: Floor) -> Result<(), SimulationError> {
    let mut seen = HashSet::new();

    for request in requests {
        for floor in [request.source_floor, request.dest_floor] {
            if floor < 1 || floor > n_floors {
                return Err(SimulationError::InvalidRequest(format!(
                    "request {} uses floor {} outside 1..={}",
                    request.id, floor, n_floors
                )));
            }
        }
        if request.source_floor == request.dest_floor {
            return Err(SimulationError::InvalidRequest(format!(
                "request {} starts and ends at floor {}",
                request.id, request.source_floor
            )));
        }
        if !seen.insert(request.id.as_str()) {
            return Err(SimulationError::InvalidRequest(format!(
                "request id {} is used more than once",
                request.id
            )));
        }
    }

    Ok(())
}
