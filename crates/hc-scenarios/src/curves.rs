//! Piecewise power-law cost and efficiency curves of CHP units.

use hc_core::Real;

use crate::{ScenarioError, ScenarioResult};

/// `coefficient * size^exponent` on `[lower, upper)` kW.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub lower: Real,
    pub upper: Real,
    pub coefficient: Real,
    pub exponent: Real,
}

impl PowerLaw {
    const fn new(lower: Real, upper: Real, coefficient: Real, exponent: Real) -> Self {
        Self {
            lower,
            upper,
            coefficient,
            exponent,
        }
    }

    pub fn contains(&self, size_kw: Real) -> bool {
        size_kw >= self.lower && size_kw < self.upper
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeCurve {
    pub name: &'static str,
    pub segments: &'static [PowerLaw],
}

impl SizeCurve {
    /// Value at `size_kw`; sizes outside every segment have no data.
    pub fn evaluate(&self, size_kw: Real) -> ScenarioResult<Real> {
        self.segments
            .iter()
            .find(|s| s.contains(size_kw))
            .map(|s| s.coefficient * size_kw.powf(s.exponent))
            .ok_or(ScenarioError::NoCurveData {
                curve: self.name,
                size_kw,
            })
    }
}

/// Specific capex in €/kW of a natural gas CHP.
pub const BHKW_CAPEX: SizeCurve = SizeCurve {
    name: "BHKW capex",
    segments: &[
        PowerLaw::new(0.0, 1.0, 9585.0, 0.0),
        PowerLaw::new(1.0, 10.0, 9585.0, -0.542),
        PowerLaw::new(10.0, 100.0, 5438.0, -0.351),
        PowerLaw::new(100.0, 1000.0, 4907.0, -0.352),
        PowerLaw::new(1000.0, 19000.0, 460.89, -0.015),
    ],
};

/// Electrical efficiency in percent of a natural gas CHP.
pub const BHKW_EFFICIENCY: SizeCurve = SizeCurve {
    name: "BHKW efficiency",
    segments: &[
        PowerLaw::new(0.0, 1.0, 21.794, 0.0),
        PowerLaw::new(1.0, 10.0, 21.794, 0.108),
        PowerLaw::new(10.0, 100.0, 22.56, 0.1032),
        PowerLaw::new(100.0, 1000.0, 25.416, 0.0732),
        PowerLaw::new(1000.0, 19000.0, 29.627, 0.0498),
    ],
};

/// Specific capex in €/kW of a biogas CHP. Units below 10 kW are not built.
pub const BIO_BHKW_CAPEX: SizeCurve = SizeCurve {
    name: "BioBHKW capex",
    segments: &[
        PowerLaw::new(10.0, 100.0, 10267.0, -0.497),
        PowerLaw::new(100.0, 1000.0, 4276.0, -0.325),
        PowerLaw::new(1000.0, 9000.0, 1.0001, -0.117),
    ],
};

pub const BIO_BHKW_EFFICIENCY: SizeCurve = SizeCurve {
    name: "BioBHKW efficiency",
    segments: &[
        PowerLaw::new(10.0, 100.0, 21.636, 0.1149),
        PowerLaw::new(100.0, 1000.0, 29.667, 0.0503),
        PowerLaw::new(1000.0, 9000.0, 31.577, 0.0385),
    ],
};
