//! Deployment configuration.
//!
//! Loaded once from YAML and passed explicitly to the services that need
//! it. Every field has a default, so an empty file is a valid
//! configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use hc_analysis::ScenarioDisplay;
use hc_core::DEFAULT_PERIODS;
use hc_scenarios::{ScenarioKind, ScenarioRegistry};
use hc_solver::SolveOptions;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the result store.
    pub store_dir: PathBuf,
    /// Hours simulated per run.
    pub periods: usize,
    pub activated_scenarios: Vec<ScenarioKind>,
    /// Per-scenario presentation and change markers, keyed by scenario name.
    pub scenarios: BTreeMap<String, ScenarioConfig>,
    pub solver: SolverConfig,
    pub worker: WorkerConfig,
    pub parameter_file: PathBuf,
    /// Hourly profiles; the built-in synthetic library when absent.
    pub profile_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("store"),
            periods: DEFAULT_PERIODS,
            activated_scenarios: ScenarioKind::ALL.to_vec(),
            scenarios: BTreeMap::new(),
            solver: SolverConfig::default(),
            worker: WorkerConfig::default(),
            parameter_file: PathBuf::from("data/parameters.yaml"),
            profile_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Records created before this instant are stale.
    pub last_change: Option<DateTime<Utc>>,
    pub display: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub mip_gap: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mip_gap: SolveOptions::default().mip_gap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Deadline for a submitted simulation; none waits forever.
    pub poll_timeout_s: Option<u64>,
    pub dispatch_retries: u32,
    pub retry_backoff_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_timeout_s: None,
            dispatch_retries: 3,
            retry_backoff_ms: 200,
        }
    }
}

impl WorkerConfig {
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.poll_timeout_s.map(Duration::from_secs)
    }

    /// Backoff before retry number `attempt` (0-based), doubling each time.
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(1 << attempt.min(16)))
    }
}

impl AppConfig {
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.store_dir.as_os_str().is_empty() {
            return Err(AppError::Config("store_dir must not be empty".into()));
        }
        if self.periods == 0 {
            return Err(AppError::Config("periods must be positive".into()));
        }
        if self.activated_scenarios.is_empty() {
            return Err(AppError::Config(
                "activated_scenarios must name at least one scenario".into(),
            ));
        }
        if !(self.solver.mip_gap >= 0.0 && self.solver.mip_gap < 1.0) {
            return Err(AppError::Config(format!(
                "solver.mip_gap must be in [0, 1), got {}",
                self.solver.mip_gap
            )));
        }
        if self.worker.poll_timeout_s == Some(0) {
            return Err(AppError::Config("worker.poll_timeout_s must be positive".into()));
        }
        for name in self.scenarios.keys() {
            name.parse::<ScenarioKind>()
                .map_err(|_| AppError::Config(format!("scenarios: unknown scenario '{name}'")))?;
        }
        Ok(())
    }

    pub fn registry(&self) -> ScenarioRegistry {
        ScenarioRegistry::new(self.activated_scenarios.iter().copied())
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            mip_gap: self.solver.mip_gap,
        }
    }

    pub fn scenario(&self, kind: ScenarioKind) -> Option<&ScenarioConfig> {
        self.scenarios.get(kind.name())
    }

    /// Presentation of a scenario, falling back to its registry name.
    pub fn display(&self, kind: ScenarioKind) -> ScenarioDisplay {
        let configured = self.scenario(kind);
        ScenarioDisplay {
            name: configured
                .and_then(|c| c.display.clone())
                .unwrap_or_else(|| kind.name().to_string()),
            pros: configured.map(|c| c.pros.clone()).unwrap_or_default(),
            cons: configured.map(|c| c.cons.clone()).unwrap_or_default(),
        }
    }
}
