//! Services shared by every session.

use std::sync::Arc;

use hc_demand::ProfileLibrary;
use hc_params::ParameterStore;
use hc_results::ResultStore;
use hc_scenarios::ScenarioRegistry;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::jobs::{JobQueue, ThreadJobQueue};

pub struct AppContext {
    pub config: AppConfig,
    pub registry: ScenarioRegistry,
    pub parameters: ParameterStore,
    pub profiles: Arc<ProfileLibrary>,
    pub store: ResultStore,
    pub queue: Arc<dyn JobQueue>,
}

impl AppContext {
    /// Wire the services from already loaded parts, with a thread worker
    /// queue writing into the configured store.
    pub fn new(
        config: AppConfig,
        parameters: ParameterStore,
        profiles: ProfileLibrary,
    ) -> AppResult<Self> {
        config.validate()?;
        let store = ResultStore::open(config.store_dir.clone())?;
        let profiles = Arc::new(profiles);
        let queue = Arc::new(ThreadJobQueue::new(
            store.clone(),
            Arc::clone(&profiles),
            config.solve_options(),
        ));
        Ok(Self {
            registry: config.registry(),
            config,
            parameters,
            profiles,
            store,
            queue,
        })
    }

    /// Load the parameter and profile files named by the configuration.
    pub fn from_config(config: AppConfig) -> AppResult<Self> {
        let parameters = ParameterStore::load(&config.parameter_file)?;
        let profiles = match &config.profile_file {
            Some(path) => ProfileLibrary::load(path)?,
            None => ProfileLibrary::synthetic(),
        };
        info!(
            store = %config.store_dir.display(),
            periods = config.periods,
            scenarios = config.activated_scenarios.len(),
            "application context ready"
        );
        Self::new(config, parameters, profiles)
    }

    /// Replace the job transport.
    pub fn with_queue(mut self, queue: Arc<dyn JobQueue>) -> Self {
        self.queue = queue;
        self
    }
}
