//! Flow attributes.

use hc_core::Real;
use serde::{Deserialize, Serialize};

/// Scalar or hourly coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Scalar(Real),
    Hourly(Vec<Real>),
}

impl Series {
    pub fn at(&self, t: usize) -> Real {
        match self {
            Series::Scalar(v) => *v,
            Series::Hourly(values) => values.get(t).copied().unwrap_or(0.0),
        }
    }

    pub fn hourly_len(&self) -> Option<usize> {
        match self {
            Series::Scalar(_) => None,
            Series::Hourly(values) => Some(values.len()),
        }
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = Real> + '_> {
        match self {
            Series::Scalar(v) => Box::new(std::iter::once(*v)),
            Series::Hourly(values) => Box::new(values.iter().copied()),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.values().all(|v| v == 0.0)
    }
}

impl Default for Series {
    fn default() -> Self {
        Series::Scalar(0.0)
    }
}

impl From<Real> for Series {
    fn from(v: Real) -> Self {
        Series::Scalar(v)
    }
}

impl From<Vec<Real>> for Series {
    fn from(v: Vec<Real>) -> Self {
        Series::Hourly(v)
    }
}

/// Optional sizing decision on a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    /// Equivalent periodic cost per unit of capacity.
    pub ep_costs: Real,
    /// Specific capital expenditure per unit of capacity.
    #[serde(default)]
    pub capex: Option<Real>,
    /// Upper bound on the installed capacity.
    #[serde(default)]
    pub maximum: Option<Real>,
}

impl Investment {
    pub fn new(ep_costs: Real) -> Self {
        Self {
            ep_costs,
            capex: None,
            maximum: None,
        }
    }

    pub fn capex(mut self, capex: Real) -> Self {
        self.capex = Some(capex);
        self
    }

    pub fn maximum(mut self, maximum: Real) -> Self {
        self.maximum = Some(maximum);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub variable_costs: Series,
    pub nominal_value: Option<Real>,
    /// Flow is pinned to `capacity * profile[t]`.
    pub fixed_profile: Option<Vec<Real>>,
    /// Minimal relative load whenever the flow is active.
    pub min: Option<Real>,
    pub investment: Option<Investment>,
    pub co2_emissions: Option<Real>,
    pub is_fossil: bool,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable_costs(mut self, costs: impl Into<Series>) -> Self {
        self.variable_costs = costs.into();
        self
    }

    pub fn nominal_value(mut self, value: Real) -> Self {
        self.nominal_value = Some(value);
        self
    }

    pub fn fixed(mut self, profile: Vec<Real>, nominal_value: Real) -> Self {
        self.fixed_profile = Some(profile);
        self.nominal_value = Some(nominal_value);
        self
    }

    /// Fixed profile scaled by the invested capacity.
    pub fn fixed_invest(mut self, profile: Vec<Real>, investment: Investment) -> Self {
        self.fixed_profile = Some(profile);
        self.investment = Some(investment);
        self
    }

    pub fn min(mut self, min: Real) -> Self {
        self.min = Some(min);
        self
    }

    pub fn investment(mut self, investment: Investment) -> Self {
        self.investment = Some(investment);
        self
    }

    pub fn co2_emissions(mut self, co2: Real) -> Self {
        self.co2_emissions = Some(co2);
        self
    }

    pub fn fossil(mut self) -> Self {
        self.is_fossil = true;
        self
    }
}
