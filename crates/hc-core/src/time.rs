//! Hourly simulation time index.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{HcError, HcResult, Real};

/// One year at hourly resolution.
pub const DEFAULT_PERIODS: usize = 8760;

/// Fixed hourly index; hour 0 is the first hour of the reference year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeIndex {
    pub start: NaiveDateTime,
    pub periods: usize,
}

impl TimeIndex {
    pub fn hourly(periods: usize) -> HcResult<Self> {
        if periods == 0 {
            return Err(HcError::invalid("time index needs at least one period"));
        }
        let start = NaiveDate::from_ymd_opt(2016, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or(HcError::Invariant {
                what: "reference start date",
            })?;
        Ok(Self { start, periods })
    }

    pub fn len(&self) -> usize {
        self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.periods == 0
    }

    pub fn timestamp(&self, hour: usize) -> NaiveDateTime {
        self.start + Duration::hours(hour as i64)
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        (0..self.periods).map(move |h| self.timestamp(h))
    }

    /// Cut a longer profile down to this index, keeping hour 0 aligned.
    pub fn truncate(&self, profile: &[Real]) -> HcResult<Vec<Real>> {
        if profile.len() < self.periods {
            return Err(HcError::ProfileTooShort {
                needed: self.periods,
                available: profile.len(),
            });
        }
        Ok(profile[..self.periods].to_vec())
    }
}
