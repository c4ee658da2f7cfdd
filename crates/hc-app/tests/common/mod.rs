#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use hc_app::{
    AppConfig, AppContext, AppError, AppResult, JobHandle, JobQueue, JobStatus, SessionSimulation,
    SimulationJob, SimulationState, ThreadJobQueue,
};
use hc_demand::{
    Demand, HeatType, HotWaterLevel, HouseType, Household, HouseholdInput, ProfileLibrary,
};
use hc_params::ParameterStore;

pub const PERIODS: usize = 48;

pub fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

pub fn temp_store(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hc-app-{name}-{}", uuid::Uuid::new_v4()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

pub fn config(name: &str) -> AppConfig {
    let mut config = AppConfig {
        store_dir: temp_store(name),
        periods: PERIODS,
        parameter_file: data_file("parameters.yaml"),
        ..AppConfig::default()
    };
    config.worker.retry_backoff_ms = 1;
    config
}

pub fn context_with(config: AppConfig) -> AppContext {
    let parameters =
        ParameterStore::load(&config.parameter_file).expect("failed to load reference parameters");
    AppContext::new(config, parameters, ProfileLibrary::synthetic())
        .expect("failed to build context")
}

pub fn context(name: &str) -> AppContext {
    context_with(config(name))
}

pub fn household(name: &str, persons: u32, heat_type: HeatType) -> Household {
    Household::new(HouseholdInput {
        name: name.to_string(),
        house_type: HouseType::Efh,
        persons,
        area: 150.0,
        heat_type,
        warm_water_per_day: HotWaterLevel::Medium.liters(),
        heat_demand: None,
    })
    .expect("valid household")
}

pub fn efh() -> Demand {
    Demand::Single(household("efh", 10, HeatType::Radiator))
}

/// Poll until the simulation leaves `Submitted`.
pub fn wait(simulation: &mut SessionSimulation, ctx: &AppContext) -> SimulationState {
    let started = Instant::now();
    while simulation.poll(ctx).is_pending() {
        assert!(
            started.elapsed() < Duration::from_secs(60),
            "simulation did not finish"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
    simulation.state().clone()
}

/// Thread queue that counts submissions.
pub struct CountingQueue {
    inner: ThreadJobQueue,
    pub submits: AtomicUsize,
}

impl CountingQueue {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            inner: ThreadJobQueue::new(
                ctx.store.clone(),
                Arc::clone(&ctx.profiles),
                ctx.config.solve_options(),
            ),
            submits: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }
}

impl JobQueue for CountingQueue {
    fn submit(&self, job: SimulationJob) -> AppResult<JobHandle> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.inner.submit(job)
    }

    fn poll(&self, handle: JobHandle) -> AppResult<JobStatus> {
        self.inner.poll(handle)
    }
}

/// Queue whose first `failures` submissions are refused.
pub struct FlakyQueue {
    pub failures: usize,
    pub attempts: AtomicUsize,
}

impl JobQueue for FlakyQueue {
    fn submit(&self, _job: SimulationJob) -> AppResult<JobHandle> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(AppError::Dispatch("queue unavailable".into()));
        }
        Ok(JobHandle(uuid::Uuid::new_v4()))
    }

    fn poll(&self, _handle: JobHandle) -> AppResult<JobStatus> {
        Ok(JobStatus::pending())
    }
}

/// Queue that accepts everything and answers every poll with `status`.
pub struct FixedQueue {
    pub status: AppResult<JobStatus>,
}

impl JobQueue for FixedQueue {
    fn submit(&self, _job: SimulationJob) -> AppResult<JobHandle> {
        Ok(JobHandle(uuid::Uuid::new_v4()))
    }

    fn poll(&self, _handle: JobHandle) -> AppResult<JobStatus> {
        match &self.status {
            Ok(status) => Ok(status.clone()),
            Err(e) => Err(AppError::Solver(e.to_string())),
        }
    }
}
