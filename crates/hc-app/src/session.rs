//! Per-scenario simulation state machine.
//!
//! ```text
//! NotSubmitted -> (cache check) -> CacheHit(id)
//!                               -> Submitted -> Ready(id) | Failed(reason)
//! ```
//!
//! The cache check looks at the stored simulation records of the scenario:
//! records older than the scenario's last change are stale, and only an
//! exact parameter match (by content hash) counts. Polling never returns an error to the
//! caller; anything that goes wrong ends in `Failed`.

use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use hc_demand::{Demand, DemandEntity};
use hc_params::{ParameterPatch, ParameterSet, ParameterValue, SimulationParameters, ValueType};
use hc_results::{parameter_hash, ResultId, SimulationRecord};
use hc_scenarios::ScenarioKind;
use indexmap::IndexMap;
use tracing::{debug, error, info, warn};

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::jobs::{JobHandle, SimulationJob};

/// User form input: component -> parameter -> override.
pub type Overrides = IndexMap<String, IndexMap<String, ParameterPatch>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureReason {
    #[error("could not dispatch: {0}")]
    Dispatch(String),

    #[error("{0}")]
    Simulation(String),

    #[error("could not record result: {0}")]
    Record(String),

    #[error("simulation timed out")]
    Timeout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationState {
    NotSubmitted,
    CacheHit(ResultId),
    Submitted { handle: JobHandle, since: Instant },
    Ready(ResultId),
    Failed(FailureReason),
}

impl SimulationState {
    pub fn result_id(&self) -> Option<ResultId> {
        match self {
            SimulationState::CacheHit(id) | SimulationState::Ready(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SimulationState::Submitted { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            SimulationState::CacheHit(_) | SimulationState::Ready(_) | SimulationState::Failed(_)
        )
    }
}

/// Newest instant before which records of `kind` are stale.
fn stale_before(ctx: &AppContext, kind: ScenarioKind) -> AppResult<Option<DateTime<Utc>>> {
    let configured = ctx.config.scenario(kind).and_then(|c| c.last_change);
    let marked = ctx.store.scenario_last_change(kind.name())?;
    Ok(configured.max(marked))
}

/// Result of an earlier, still valid simulation with exactly these
/// parameters.
pub fn check_for_result(
    ctx: &AppContext,
    kind: ScenarioKind,
    parameters: &SimulationParameters,
) -> AppResult<Option<ResultId>> {
    let cutoff = stale_before(ctx, kind)?;
    let hash = parameter_hash(kind.name(), parameters)?;
    for record in ctx.store.records_for(kind.name())? {
        if cutoff.is_some_and(|c| record.created_at < c) {
            debug!(scenario = %kind, result_id = record.result_id, "skipping stale record");
            continue;
        }
        // Compared by digest of the in-memory key; parsed floats may differ
        // from the ones that were written.
        if record.parameter_hash != hash {
            continue;
        }
        if !ctx.store.has_result(record.result_id) {
            warn!(scenario = %kind, result_id = record.result_id, "record without stored result");
            continue;
        }
        return Ok(Some(record.result_id));
    }
    Ok(None)
}

/// One scenario simulated for one demand entity.
pub struct SessionSimulation {
    kind: ScenarioKind,
    demand: Demand,
    demand_id: u32,
    overrides: Overrides,
    parameters: Option<SimulationParameters>,
    state: SimulationState,
}

impl SessionSimulation {
    pub fn new(kind: ScenarioKind, demand: Demand, demand_id: u32) -> Self {
        Self {
            kind,
            demand,
            demand_id,
            overrides: Overrides::new(),
            parameters: None,
            state: SimulationState::NotSubmitted,
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn result_id(&self) -> Option<ResultId> {
        self.state.result_id()
    }

    /// Reference parameters merged with the overrides, plus the
    /// demand-derived ones. This is exactly what gets hashed and solved.
    pub fn parameters(&self, ctx: &AppContext) -> AppResult<ParameterSet> {
        let scenario = ctx.registry.get(self.kind.name())?;
        let demand_type = self.demand.demand_type();
        let mut parameters = ctx
            .parameters
            .get_scenario_parameters(scenario.name(), demand_type)?;
        parameters.merge(&self.overrides);
        parameters.insert(
            "demand",
            "index",
            ParameterValue::new(self.demand_id.to_string(), ValueType::Integer),
        );
        parameters.insert(
            "demand",
            "type",
            ParameterValue::new(demand_type.suffix(), ValueType::String),
        );
        // Derived values replace reference ones, so the reference set must
        // be complete on its own.
        scenario.needed_parameters().check(&parameters)?;
        scenario.add_dynamic_parameters(&self.demand, &ctx.profiles, &mut parameters)?;
        Ok(parameters)
    }

    /// Resolve from the cache or submit a new job.
    ///
    /// Configuration errors are returned; a job that cannot be dispatched
    /// after the configured retries ends in `Failed`.
    pub fn load_or_simulate(&mut self, ctx: &AppContext) -> AppResult<&SimulationState> {
        if self.state.is_pending() {
            return Ok(&self.state);
        }
        let parameters = self.parameters(ctx)?;
        let key = parameters.to_simulation_parameters()?;

        if let Some(result_id) = check_for_result(ctx, self.kind, &key)? {
            info!(scenario = %self.kind, result_id, "cache hit");
            self.parameters = Some(key);
            self.state = SimulationState::CacheHit(result_id);
            return Ok(&self.state);
        }

        let job = SimulationJob {
            scenario: self.kind,
            demand: self.demand.clone(),
            parameters,
            periods: ctx.config.periods,
        };
        self.parameters = Some(key);
        self.state = match dispatch(ctx, job) {
            Ok(handle) => SimulationState::Submitted {
                handle,
                since: Instant::now(),
            },
            Err(e) => {
                error!(scenario = %self.kind, error = %e, "giving up on dispatch");
                SimulationState::Failed(FailureReason::Dispatch(e.to_string()))
            }
        };
        Ok(&self.state)
    }

    /// Advance a submitted simulation without blocking.
    pub fn poll(&mut self, ctx: &AppContext) -> &SimulationState {
        let SimulationState::Submitted { handle, since } = self.state else {
            return &self.state;
        };
        if ctx
            .config
            .worker
            .poll_timeout()
            .is_some_and(|deadline| since.elapsed() >= deadline)
        {
            warn!(scenario = %self.kind, job_id = %handle, "simulation timed out");
            self.state = SimulationState::Failed(FailureReason::Timeout);
            return &self.state;
        }

        self.state = match ctx.queue.poll(handle) {
            Ok(status) if status.pending => return &self.state,
            Ok(status) => match (status.result_id, status.error) {
                (Some(result_id), _) => match self.record(ctx, result_id) {
                    Ok(()) => SimulationState::Ready(result_id),
                    Err(e) => {
                        error!(scenario = %self.kind, result_id, error = %e, "recording failed");
                        SimulationState::Failed(FailureReason::Record(e.to_string()))
                    }
                },
                (None, error) => SimulationState::Failed(FailureReason::Simulation(
                    error.unwrap_or_else(|| "no result".to_string()),
                )),
            },
            Err(e) => {
                error!(scenario = %self.kind, job_id = %handle, error = %e, "poll failed");
                SimulationState::Failed(FailureReason::Simulation(e.to_string()))
            }
        };
        &self.state
    }

    fn record(&self, ctx: &AppContext, result_id: ResultId) -> AppResult<()> {
        let parameters = self.parameters.clone().unwrap_or_default();
        let record = SimulationRecord {
            scenario: self.kind.name().to_string(),
            parameter_hash: parameter_hash(self.kind.name(), &parameters)?,
            parameters,
            result_id,
            created_at: Utc::now(),
        };
        ctx.store.save_record(&record)?;
        Ok(())
    }
}

/// Submit, retrying dispatch failures with exponential backoff.
fn dispatch(ctx: &AppContext, job: SimulationJob) -> AppResult<JobHandle> {
    let worker = &ctx.config.worker;
    let mut attempt = 0;
    loop {
        match ctx.queue.submit(job.clone()) {
            Ok(handle) => return Ok(handle),
            Err(AppError::Dispatch(message)) if attempt < worker.dispatch_retries => {
                let wait = worker.backoff(attempt);
                warn!(
                    scenario = %job.scenario,
                    attempt = attempt + 1,
                    wait_ms = wait.as_millis() as u64,
                    %message,
                    "dispatch failed, retrying"
                );
                thread::sleep(wait);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// All scenarios a user picked for one demand entity.
pub struct UserSession {
    demand_name: String,
    simulations: Vec<SessionSimulation>,
}

impl UserSession {
    pub fn new(
        demand: Demand,
        demand_id: u32,
        kinds: impl IntoIterator<Item = ScenarioKind>,
    ) -> Self {
        Self {
            demand_name: demand.name().to_string(),
            simulations: kinds
                .into_iter()
                .map(|kind| SessionSimulation::new(kind, demand.clone(), demand_id))
                .collect(),
        }
    }

    pub fn demand_name(&self) -> &str {
        &self.demand_name
    }

    pub fn simulations(&self) -> &[SessionSimulation] {
        &self.simulations
    }

    /// Start every scenario. Stops at the first configuration error.
    pub fn start(&mut self, ctx: &AppContext) -> AppResult<()> {
        for simulation in &mut self.simulations {
            simulation.load_or_simulate(ctx)?;
        }
        Ok(())
    }

    pub fn poll(&mut self, ctx: &AppContext) {
        for simulation in &mut self.simulations {
            simulation.poll(ctx);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.simulations.iter().all(|s| s.state().is_finished())
    }

    /// Poll on a fixed interval until every scenario is finished.
    pub fn wait(&mut self, ctx: &AppContext, interval: Duration) {
        loop {
            self.poll(ctx);
            if self.is_finished() {
                break;
            }
            thread::sleep(interval);
        }
    }

    /// Scenarios with a result, in session order.
    pub fn results(&self) -> Vec<(ScenarioKind, ResultId)> {
        self.simulations
            .iter()
            .filter_map(|s| s.result_id().map(|id| (s.kind(), id)))
            .collect()
    }
}
