//! Named hourly profiles.
//!
//! Heat and hot-water profiles are normalized (they sum to one over the full
//! year) and scaled by each household's yearly energy. Temperature (°C) and
//! PV yield (kWh per installed kW) are absolute.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::path::Path;

use hc_core::{Real, DEFAULT_PERIODS};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::{DemandError, DemandResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileLibrary {
    profiles: BTreeMap<String, Vec<Real>>,
}

impl ProfileLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, profile: Vec<Real>) {
        self.profiles.insert(name.into(), profile);
    }

    pub fn get(&self, name: &str) -> DemandResult<&[Real]> {
        self.profiles
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DemandError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn load(path: &Path) -> DemandResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let lib = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(lib)
    }

    /// Deterministic year of reference profiles for a temperate climate.
    pub fn synthetic() -> Self {
        let temperature: Vec<Real> = (0..DEFAULT_PERIODS).map(ambient_temperature).collect();

        let heat_raw = |base: Real| -> Vec<Real> {
            temperature
                .iter()
                .map(|t| (18.0 - t).max(0.0) + base)
                .collect()
        };
        let hot_water_raw: Vec<Real> = (0..DEFAULT_PERIODS)
            .map(|h| {
                let hod = (h % 24) as Real;
                0.2 + (-(hod - 7.0).powi(2) / 2.0).exp() + 0.8 * (-(hod - 19.0).powi(2) / 4.0).exp()
            })
            .collect();
        let pv: Vec<Real> = (0..DEFAULT_PERIODS).map(pv_yield).collect();

        let mut lib = Self::new();
        lib.insert(HEAT_PROFILE_EFH, normalize(heat_raw(0.5)));
        lib.insert(HEAT_PROFILE_MFH, normalize(heat_raw(1.5)));
        lib.insert(HOT_WATER_PROFILE, normalize(hot_water_raw));
        lib.insert(TEMPERATURE_PROFILE, temperature);
        lib.insert(PV_PROFILE, pv);
        lib
    }
}

fn ambient_temperature(hour: usize) -> Real {
    let day = hour as Real / 24.0;
    let hod = (hour % 24) as Real;
    let seasonal = 9.0 - 10.0 * (2.0 * PI * (day - 20.0) / 365.0).cos();
    let diurnal = 4.0 * (2.0 * PI * (hod - 9.0) / 24.0).sin();
    seasonal + diurnal
}

fn pv_yield(hour: usize) -> Real {
    let day = hour as Real / 24.0;
    let hod = (hour % 24) as Real;
    if !(6.0..=18.0).contains(&hod) {
        return 0.0;
    }
    let sun = (PI * (hod - 6.0) / 12.0).sin();
    let season = 0.5 - 0.3 * (2.0 * PI * (day + 10.0) / 365.0).cos();
    (sun * season).max(0.0)
}

fn normalize(raw: Vec<Real>) -> Vec<Real> {
    let total: Real = raw.iter().sum();
    if total <= 0.0 {
        return raw;
    }
    raw.into_iter().map(|v| v / total).collect()
}
