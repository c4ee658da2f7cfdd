//! Content digest of a (scenario, parameters) combination.

use hc_params::SimulationParameters;
use sha2::{Digest, Sha256};

use crate::ResultsResult;

pub fn parameter_hash(scenario: &str, parameters: &SimulationParameters) -> ResultsResult<String> {
    let mut hasher = Sha256::new();
    hasher.update(scenario.as_bytes());
    hasher.update([0u8]);
    hasher.update(serde_json::to_string(parameters)?.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
