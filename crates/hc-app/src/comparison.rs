//! Comparison of finished simulations.

use hc_analysis::{
    AnalyzedScenario, AnalyzerKind, CategoryAggregation, LcoeAggregation, Order, RankedEntry,
    Ranking, Table, TechnologyComparison,
};
use hc_results::{ResultId, SimulationRecord};
use hc_scenarios::ScenarioKind;
use serde::Serialize;
use tracing::{debug, info};

use crate::context::AppContext;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
pub struct RankingTable {
    pub ranking: Ranking,
    pub entries: Vec<RankedEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    /// Metrics as rows, scenarios as columns.
    pub technologies: Table,
    pub lcoe: Table,
    pub co2: Table,
    pub investment: Table,
    pub rankings: Vec<RankingTable>,
}

pub struct ComparisonService<'a> {
    ctx: &'a AppContext,
}

impl<'a> ComparisonService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Simulation record of a stored result, searched across the
    /// activated scenarios.
    pub fn record(&self, result_id: ResultId) -> AppResult<SimulationRecord> {
        for kind in self.ctx.registry.kinds() {
            if let Some(record) = self
                .ctx
                .store
                .records_for(kind.name())?
                .into_iter()
                .find(|r| r.result_id == result_id)
            {
                return Ok(record);
            }
        }
        Err(AppError::Results(format!("no simulation record for result {result_id}")))
    }

    pub fn analyze(&self, kind: ScenarioKind, result_id: ResultId) -> AppResult<AnalyzedScenario> {
        let results = self.ctx.store.restore_results(result_id)?;
        debug!(scenario = %kind, result_id, flows = results.flows.len(), "analyzing");
        Ok(AnalyzedScenario::new(
            kind.scenario(),
            result_id,
            self.ctx.config.display(kind),
            results,
        )?)
    }

    /// Analyze results given only by id.
    pub fn compare_ids(&self, result_ids: &[ResultId]) -> AppResult<Comparison> {
        let mut entries = Vec::with_capacity(result_ids.len());
        for &id in result_ids {
            let record = self.record(id)?;
            let kind: ScenarioKind = record.scenario.parse()?;
            entries.push((kind, id));
        }
        self.compare(&entries)
    }

    pub fn compare(&self, entries: &[(ScenarioKind, ResultId)]) -> AppResult<Comparison> {
        let scenarios = entries
            .iter()
            .map(|&(kind, id)| self.analyze(kind, id))
            .collect::<AppResult<Vec<_>>>()?;

        let technologies = TechnologyComparison.aggregate(&scenarios);
        let lcoe = LcoeAggregation.aggregate(&scenarios);
        let co2 = CategoryAggregation::new("CO2", AnalyzerKind::Co2).aggregate(&scenarios);
        let investment =
            CategoryAggregation::new("Investitionskosten", AnalyzerKind::TotalInvestment)
                .aggregate(&scenarios);

        let rankings = [
            (Ranking::new("Wärmekosten", Order::Ascending, 3), &lcoe),
            (Ranking::new("CO2 Emissionen", Order::Ascending, 0), &co2),
            (Ranking::new("Investitionskosten", Order::Ascending, 0), &investment),
        ]
        .into_iter()
        .map(|(ranking, table)| RankingTable {
            entries: ranking.rank(table),
            ranking,
        })
        .collect();

        info!(scenarios = scenarios.len(), "comparison ready");
        Ok(Comparison {
            technologies,
            lcoe,
            co2,
            investment,
            rankings,
        })
    }
}
