//! File-backed result store and simulation record index.
//!
//! Layout under the root directory:
//! - `results/<id>.json` raw results
//! - `simulations/<id>.json` one simulation record per result
//! - `scenarios.json` last-change marker per scenario

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::types::{RawResults, ResultId, SimulationRecord};
use crate::{ResultsError, ResultsResult};

const MAX_ID_ATTEMPTS: u32 = 1000;

#[derive(Clone)]
pub struct ResultStore {
    root_dir: PathBuf,
    markers: Arc<Mutex<()>>,
}

impl ResultStore {
    pub fn open(root_dir: PathBuf) -> ResultsResult<Self> {
        fs::create_dir_all(root_dir.join("results"))?;
        fs::create_dir_all(root_dir.join("simulations"))?;
        Ok(Self {
            root_dir,
            markers: Arc::new(Mutex::new(())),
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn result_path(&self, id: ResultId) -> PathBuf {
        self.root_dir.join("results").join(format!("{id}.json"))
    }

    fn record_path(&self, id: ResultId) -> PathBuf {
        self.root_dir.join("simulations").join(format!("{id}.json"))
    }

    fn markers_path(&self) -> PathBuf {
        self.root_dir.join("scenarios.json")
    }

    fn ids_in(dir: &Path) -> ResultsResult<Vec<ResultId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<ResultId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    /// Persist raw results under a freshly allocated id.
    ///
    /// Ids are claimed with exclusive file creation so concurrent workers
    /// never share one.
    pub fn store_results(&self, results: &RawResults) -> ResultsResult<ResultId> {
        let content = serde_json::to_vec(results)?;
        let mut candidate = Self::ids_in(&self.root_dir.join("results"))?
            .last()
            .map_or(1, |last| last + 1);

        for _ in 0..MAX_ID_ATTEMPTS {
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.result_path(candidate))
            {
                Ok(mut file) => {
                    file.write_all(&content)?;
                    debug!(result_id = candidate, "stored raw results");
                    return Ok(candidate);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => candidate += 1,
                Err(e) => return Err(e.into()),
            }
        }
        Err(ResultsError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    pub fn has_result(&self, id: ResultId) -> bool {
        self.result_path(id).exists()
    }

    pub fn restore_results(&self, id: ResultId) -> ResultsResult<RawResults> {
        let path = self.result_path(id);
        if !path.exists() {
            return Err(ResultsError::ResultNotFound { result_id: id });
        }
        let content = fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    pub fn save_record(&self, record: &SimulationRecord) -> ResultsResult<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.record_path(record.result_id), json)?;
        info!(
            scenario = %record.scenario,
            result_id = record.result_id,
            "simulation record saved"
        );
        Ok(())
    }

    /// Records of one scenario, oldest first.
    pub fn records_for(&self, scenario: &str) -> ResultsResult<Vec<SimulationRecord>> {
        let mut records = Vec::new();
        for id in Self::ids_in(&self.root_dir.join("simulations"))? {
            let content = fs::read_to_string(self.record_path(id))?;
            let record: SimulationRecord = serde_json::from_str(&content)?;
            if record.scenario == scenario {
                records.push(record);
            }
        }
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.result_id.cmp(&b.result_id))
        });
        Ok(records)
    }

    fn read_markers(&self) -> ResultsResult<BTreeMap<String, DateTime<Utc>>> {
        let path = self.markers_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn scenario_last_change(&self, scenario: &str) -> ResultsResult<Option<DateTime<Utc>>> {
        Ok(self.read_markers()?.get(scenario).copied())
    }

    pub fn set_scenario_last_change(
        &self,
        scenario: &str,
        when: DateTime<Utc>,
    ) -> ResultsResult<()> {
        let _guard = self.markers.lock().unwrap_or_else(|p| p.into_inner());
        let mut markers = self.read_markers()?;
        markers.insert(scenario.to_string(), when);
        fs::write(self.markers_path(), serde_json::to_string_pretty(&markers)?)?;
        Ok(())
    }

    /// Mark a scenario definition as changed now; older records go stale.
    pub fn touch_scenario(&self, scenario: &str) -> ResultsResult<DateTime<Utc>> {
        let now = Utc::now();
        self.set_scenario_last_change(scenario, now)?;
        info!(scenario, "scenario definition changed");
        Ok(now)
    }

    /// Administrative reset: drop every record and result.
    pub fn reset(&self) -> ResultsResult<()> {
        for dir in ["results", "simulations"] {
            let path = self.root_dir.join(dir);
            if path.exists() {
                fs::remove_dir_all(&path)?;
            }
            fs::create_dir_all(&path)?;
        }
        info!(root = %self.root_dir.display(), "result store reset");
        Ok(())
    }
}
