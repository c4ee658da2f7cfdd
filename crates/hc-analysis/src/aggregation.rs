//! Cross-scenario aggregation of analyzer results.

use hc_core::Real;
use hc_results::{RawResults, ResultId};
use hc_scenarios::Scenario;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzerKind;
use crate::engine::Analysis;
use crate::table::{Cell, Table};
use crate::AnalysisResult;

/// LCOE shares at or below this magnitude are dropped.
pub const LCOE_THRESHOLD: Real = 0.001;

pub const INVESTMENT_CATEGORY: &str = "Investment";

/// How a scenario is presented in comparisons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDisplay {
    pub name: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

/// One simulated scenario with all analyzers run.
pub struct AnalyzedScenario {
    pub scenario: &'static dyn Scenario,
    pub result_id: ResultId,
    pub display: ScenarioDisplay,
    pub analysis: Analysis,
}

impl AnalyzedScenario {
    pub fn new(
        scenario: &'static dyn Scenario,
        result_id: ResultId,
        display: ScenarioDisplay,
        results: RawResults,
    ) -> AnalysisResult<Self> {
        Ok(Self {
            scenario,
            result_id,
            display,
            analysis: Analysis::full(results)?,
        })
    }

    /// Column or row label, unique per stored result.
    pub fn label(&self) -> String {
        format!("{} #{}", self.display.name, self.result_id)
    }

    /// Per-edge values of one analyzer summed by comparison category.
    pub fn by_category(&self, kind: AnalyzerKind) -> IndexMap<String, Real> {
        let mut categories = IndexMap::new();
        if let Some(result) = self.analysis.get(kind) {
            for (edge, value) in &result.per_edge {
                let label = self
                    .scenario
                    .data_label(edge, self.analysis.results(), false);
                *categories.entry(label).or_insert(0.0) += value;
            }
        }
        categories
    }

    /// LCOE split into the investment share and per-category variable costs.
    pub fn lcoe_shares(&self) -> IndexMap<String, Real> {
        let mut shares = IndexMap::new();
        let Some(result) = self.analysis.get(AnalyzerKind::Lcoe) else {
            return shares;
        };
        for (edge, share) in &result.shares {
            if share.investment.abs() > LCOE_THRESHOLD {
                *shares.entry(INVESTMENT_CATEGORY.to_string()).or_insert(0.0) += share.investment;
            }
            if share.variable_costs.abs() > LCOE_THRESHOLD {
                let label = self
                    .scenario
                    .data_label(edge, self.analysis.results(), false);
                *shares.entry(label).or_insert(0.0) += share.variable_costs;
            }
        }
        shares
    }
}

/// Rows are scenarios, columns the union of categories in first-seen order.
fn scenario_table(name: &str, rows: Vec<(String, IndexMap<String, Real>)>) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for (_, values) in &rows {
        for category in values.keys() {
            if !columns.contains(category) {
                columns.push(category.clone());
            }
        }
    }
    let mut table = Table::new(name, columns);
    for (label, values) in rows {
        let cells = table
            .columns
            .iter()
            .map(|c| values.get(c).map_or(Cell::Empty, |v| Cell::Number(*v)))
            .collect();
        table.push_row(label, cells);
    }
    table
}

/// Sum one analyzer per comparison category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAggregation {
    pub name: String,
    pub analyzer: AnalyzerKind,
}

impl CategoryAggregation {
    pub fn new(name: impl Into<String>, analyzer: AnalyzerKind) -> Self {
        Self {
            name: name.into(),
            analyzer,
        }
    }

    pub fn aggregate(&self, scenarios: &[AnalyzedScenario]) -> Table {
        let rows = scenarios
            .iter()
            .map(|s| (s.label(), s.by_category(self.analyzer)))
            .collect();
        scenario_table(&self.name, rows)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LcoeAggregation;

impl LcoeAggregation {
    pub const NAME: &'static str = "LCOE";

    pub fn aggregate(&self, scenarios: &[AnalyzedScenario]) -> Table {
        let rows = scenarios
            .iter()
            .map(|s| (s.label(), s.lcoe_shares()))
            .collect();
        scenario_table(Self::NAME, rows)
    }
}

/// Side-by-side comparison: one row per metric, one column per scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TechnologyComparison;

impl TechnologyComparison {
    pub const NAME: &'static str = "Technologievergleich";

    pub const ROWS: [&'static str; 8] = [
        "Wärmekosten",
        "Investitionskosten",
        "Brennstoffkosten",
        "CO2 Emissionen",
        "Primärenergiefaktor",
        "Primärenergie",
        "Vorteile",
        "Nachteile",
    ];

    pub fn aggregate(&self, scenarios: &[AnalyzedScenario]) -> Table {
        let mut table = Table::new(Self::NAME, Self::ROWS.map(String::from).to_vec());
        for s in scenarios {
            let total = |kind| s.analysis.total(kind).map_or(Cell::Empty, Cell::Number);
            let pe = s.scenario.primary_factor_and_energy(s.analysis.results());
            table.push_row(
                s.label(),
                vec![
                    total(AnalyzerKind::Lcoe),
                    total(AnalyzerKind::TotalInvestment),
                    total(AnalyzerKind::FossilCosts),
                    total(AnalyzerKind::Co2),
                    Cell::Number(pe.factor),
                    Cell::Number(pe.energy),
                    Cell::Text(s.display.pros.join("\n")),
                    Cell::Text(s.display.cons.join("\n")),
                ],
            );
        }
        table.transpose()
    }
}
