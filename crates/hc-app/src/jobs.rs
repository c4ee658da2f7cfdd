//! Simulation jobs and the worker queue they run on.
//!
//! The queue is the only concurrency seam: a job is built, solved and
//! stored on its own worker, and the caller only ever sees a handle it can
//! poll without blocking.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use hc_demand::{Demand, ProfileLibrary};
use hc_params::ParameterSet;
use hc_results::{ResultId, ResultStore};
use hc_scenarios::{build_energy_system, ScenarioKind};
use hc_solver::SolveOptions;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Everything a worker needs to produce a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationJob {
    pub scenario: ScenarioKind,
    pub demand: Demand,
    /// Complete parameters, dynamic ones included.
    pub parameters: ParameterSet,
    pub periods: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle(pub Uuid);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blocking view of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub pending: bool,
    pub result_id: Option<ResultId>,
    pub error: Option<String>,
}

impl JobStatus {
    pub fn pending() -> Self {
        Self {
            pending: true,
            ..Self::default()
        }
    }

    pub fn done(result_id: ResultId) -> Self {
        Self {
            result_id: Some(result_id),
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Submit-and-poll job transport.
pub trait JobQueue: Send + Sync {
    /// Hand a job to a worker. Errors here are dispatch failures.
    fn submit(&self, job: SimulationJob) -> AppResult<JobHandle>;

    /// Current state of a job; never blocks. Once a job has reported a
    /// result or an error its handle may be forgotten.
    fn poll(&self, handle: JobHandle) -> AppResult<JobStatus>;
}

/// Build, solve and store one job. Runs on the worker.
pub fn run_job(
    job: &SimulationJob,
    store: &ResultStore,
    profiles: &ProfileLibrary,
    options: &SolveOptions,
) -> AppResult<ResultId> {
    let started = Instant::now();
    let scenario = job.scenario.scenario();
    let system = build_energy_system(
        scenario,
        &job.demand,
        &job.parameters,
        profiles,
        job.periods,
    )?;
    let results = hc_solver::simulate(system, options)?;
    let result_id = store.store_results(&results)?;
    info!(
        scenario = scenario.name(),
        result_id,
        periods = job.periods,
        elapsed_s = started.elapsed().as_secs_f64(),
        "simulation finished"
    );
    Ok(result_id)
}

type Outcome = Result<ResultId, String>;

/// One worker thread per job.
pub struct ThreadJobQueue {
    store: ResultStore,
    profiles: Arc<ProfileLibrary>,
    options: SolveOptions,
    jobs: Mutex<HashMap<JobHandle, Receiver<Outcome>>>,
}

impl ThreadJobQueue {
    pub fn new(store: ResultStore, profiles: Arc<ProfileLibrary>, options: SolveOptions) -> Self {
        Self {
            store,
            profiles,
            options,
            jobs: Mutex::new(HashMap::new()),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

impl JobQueue for ThreadJobQueue {
    fn submit(&self, job: SimulationJob) -> AppResult<JobHandle> {
        let handle = JobHandle(Uuid::new_v4());
        let (tx, rx) = channel();
        let store = self.store.clone();
        let profiles = Arc::clone(&self.profiles);
        let options = self.options.clone();
        let scenario = job.scenario;

        thread::Builder::new()
            .name(format!("hc-worker-{handle}"))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_job(&job, &store, &profiles, &options)
                }));
                let outcome = match outcome {
                    Ok(Ok(result_id)) => Ok(result_id),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(payload) => Err(panic_message(payload.as_ref())),
                };
                if let Err(message) = &outcome {
                    error!(job_id = %handle, scenario = %scenario, %message, "simulation failed");
                }
                let _ = tx.send(outcome);
            })
            .map_err(|e| AppError::Dispatch(e.to_string()))?;

        self.jobs
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(handle, rx);
        info!(job_id = %handle, scenario = %scenario, "simulation submitted");
        Ok(handle)
    }

    fn poll(&self, handle: JobHandle) -> AppResult<JobStatus> {
        let mut jobs = self.jobs.lock().unwrap_or_else(|p| p.into_inner());
        let rx = jobs
            .get(&handle)
            .ok_or_else(|| AppError::UnknownJob(handle.to_string()))?;

        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return Ok(JobStatus::pending()),
            Err(TryRecvError::Disconnected) => {
                Err("worker exited without reporting a result".to_string())
            }
        };
        // A terminal status is reported once; the handle is forgotten after.
        jobs.remove(&handle);
        Ok(match outcome {
            Ok(result_id) => JobStatus::done(result_id),
            Err(message) => JobStatus::failed(message),
        })
    }
}
