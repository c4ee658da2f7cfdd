//! Static catalogue of scenarios.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bhkw::ChpScenario;
use crate::boiler::BoilerScenario;
use crate::pv_heatpump::PvHeatpumpScenario;
use crate::scenario::Scenario;
use crate::{ScenarioError, ScenarioResult};

static GAS: BoilerScenario = BoilerScenario::GAS;
static OIL: BoilerScenario = BoilerScenario::OIL;
static WOODCHIP: BoilerScenario = BoilerScenario::WOODCHIP;
static BHKW: ChpScenario = ChpScenario::BHKW;
static BIO_BHKW: ChpScenario = ChpScenario::BIO_BHKW;
static PV_HEATPUMP: PvHeatpumpScenario = PvHeatpumpScenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScenarioKind {
    Gas,
    Oil,
    Woodchip,
    Bhkw,
    BioBhkw,
    PvHeatpump,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 6] = [
        ScenarioKind::Gas,
        ScenarioKind::Oil,
        ScenarioKind::Woodchip,
        ScenarioKind::Bhkw,
        ScenarioKind::BioBhkw,
        ScenarioKind::PvHeatpump,
    ];

    pub fn scenario(self) -> &'static dyn Scenario {
        match self {
            ScenarioKind::Gas => &GAS,
            ScenarioKind::Oil => &OIL,
            ScenarioKind::Woodchip => &WOODCHIP,
            ScenarioKind::Bhkw => &BHKW,
            ScenarioKind::BioBhkw => &BIO_BHKW,
            ScenarioKind::PvHeatpump => &PV_HEATPUMP,
        }
    }

    pub fn name(self) -> &'static str {
        self.scenario().name()
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = ScenarioError;

    /// Case-insensitive scenario name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ScenarioKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_string()))
    }
}

impl TryFrom<String> for ScenarioKind {
    type Error = ScenarioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScenarioKind> for String {
    fn from(kind: ScenarioKind) -> Self {
        kind.name().to_string()
    }
}

/// Scenarios activated for this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioRegistry {
    activated: Vec<ScenarioKind>,
}

impl Default for ScenarioRegistry {
    fn default() -> Self {
        Self::all()
    }
}

impl ScenarioRegistry {
    pub fn new(activated: impl IntoIterator<Item = ScenarioKind>) -> Self {
        let mut activated: Vec<_> = activated.into_iter().collect();
        activated.sort();
        activated.dedup();
        Self { activated }
    }

    pub fn all() -> Self {
        Self::new(ScenarioKind::ALL)
    }

    pub fn kinds(&self) -> &[ScenarioKind] {
        &self.activated
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Scenario> + '_ {
        self.activated.iter().map(|k| k.scenario())
    }

    /// Look up an activated scenario by name.
    pub fn get(&self, name: &str) -> ScenarioResult<&'static dyn Scenario> {
        let kind: ScenarioKind = name.parse()?;
        if self.activated.contains(&kind) {
            Ok(kind.scenario())
        } else {
            Err(ScenarioError::UnknownScenario(name.to_string()))
        }
    }
}
