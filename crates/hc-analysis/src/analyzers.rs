//! The concrete analyzers.

use hc_core::{EdgeKey, Real};
use hc_results::{EdgeParameters, FlowResult, RawResults};
use tracing::warn;

use crate::analyzer::{AnalysisContext, Analyzer, AnalyzerKind, AnalyzerResult, LcoeShare};
use crate::AnalysisResult;

/// Tag of the sinks the LCOE is levelized over.
pub const DEMAND_TAG: &str = "demand";

fn parameters<'a>(results: &'a RawResults, edge: &EdgeKey) -> Option<&'a EdgeParameters> {
    results.parameters.get(edge)
}

/// Scale a dependency's per-edge value by a scalar edge parameter.
fn scale_by(
    ctx: &AnalysisContext<'_>,
    dependency: AnalyzerKind,
    key: &str,
) -> AnalysisResult<AnalyzerResult> {
    let base = ctx.dependency(dependency)?;
    let mut result = AnalyzerResult::default();
    for (edge, value) in &base.per_edge {
        let Some(factor) = parameters(ctx.results, edge).and_then(|p| p.number(key)) else {
            continue;
        };
        result.insert(edge.clone(), value * factor);
    }
    Ok(result)
}

/// Installed capacity of every invested flow.
pub struct SizeAnalyzer;

impl Analyzer for SizeAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Size
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        let mut result = AnalyzerResult::default();
        for (edge, flow) in &ctx.results.flows {
            if let Some(size) = flow.invest {
                result.insert(edge.clone(), size);
            }
        }
        Ok(result)
    }
}

/// Total flow over the horizon.
pub struct SequenceFlowSumAnalyzer;

impl Analyzer for SequenceFlowSumAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::SequenceFlowSum
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        let mut result = AnalyzerResult::default();
        for (edge, flow) in &ctx.results.flows {
            result.insert(edge.clone(), flow.total());
        }
        Ok(result)
    }
}

/// Sum of hourly variable cost times flow.
pub struct VariableCostAnalyzer;

fn variable_cost(params: &EdgeParameters, flow: &FlowResult) -> Option<Real> {
    if let Some(costs) = params.sequence("variable_costs") {
        return Some(costs.iter().zip(&flow.sequence).map(|(c, f)| c * f).sum());
    }
    params.number("variable_costs").map(|c| c * flow.total())
}

impl Analyzer for VariableCostAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::VariableCost
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        let mut result = AnalyzerResult::default();
        for (edge, flow) in &ctx.results.flows {
            if let Some(cost) = parameters(ctx.results, edge).and_then(|p| variable_cost(p, flow)) {
                result.insert(edge.clone(), cost);
            }
        }
        Ok(result)
    }
}

/// Annualized investment: size × equivalent periodic costs.
pub struct InvestmentAnalyzer;

impl Analyzer for InvestmentAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Investment
    }

    fn depends_on(&self) -> &'static [AnalyzerKind] {
        &[AnalyzerKind::Size]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        scale_by(ctx, AnalyzerKind::Size, "investment_ep_costs")
    }
}

/// Up-front investment: size × capex.
pub struct TotalInvestmentAnalyzer;

impl Analyzer for TotalInvestmentAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::TotalInvestment
    }

    fn depends_on(&self) -> &'static [AnalyzerKind] {
        &[AnalyzerKind::Size]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        scale_by(ctx, AnalyzerKind::Size, "investment_capex")
    }
}

/// Emissions: total flow × specific CO2.
pub struct Co2Analyzer;

impl Analyzer for Co2Analyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Co2
    }

    fn depends_on(&self) -> &'static [AnalyzerKind] {
        &[AnalyzerKind::SequenceFlowSum]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        scale_by(ctx, AnalyzerKind::SequenceFlowSum, "co2_emissions")
    }
}

/// Variable costs of fossil flows only.
pub struct FossilCostsAnalyzer;

impl Analyzer for FossilCostsAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::FossilCosts
    }

    fn depends_on(&self) -> &'static [AnalyzerKind] {
        &[AnalyzerKind::VariableCost]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        let costs = ctx.dependency(AnalyzerKind::VariableCost)?;
        let mut result = AnalyzerResult::default();
        for (edge, cost) in &costs.per_edge {
            let fossil = parameters(ctx.results, edge).and_then(|p| p.flag("is_fossil"));
            if fossil == Some(true) {
                result.insert(edge.clone(), *cost);
            }
        }
        Ok(result)
    }
}

/// Levelized cost of heat over every sink tagged `demand`.
pub struct LcoeAutomatedDemandAnalyzer;

impl LcoeAutomatedDemandAnalyzer {
    pub fn demand(results: &RawResults) -> Real {
        results
            .flows
            .iter()
            .filter(|(edge, _)| results.target_has_tag(edge, DEMAND_TAG))
            .map(|(_, flow)| flow.total())
            .sum()
    }
}

impl Analyzer for LcoeAutomatedDemandAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Lcoe
    }

    fn depends_on(&self) -> &'static [AnalyzerKind] {
        &[AnalyzerKind::Investment, AnalyzerKind::VariableCost]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
        let investment = ctx.dependency(AnalyzerKind::Investment)?;
        let variable = ctx.dependency(AnalyzerKind::VariableCost)?;
        let mut result = AnalyzerResult::default();

        let demand = Self::demand(ctx.results);
        if demand <= 0.0 {
            warn!("no demand-tagged flow found, LCOE left empty");
            return Ok(result);
        }

        for (edge, value) in &investment.per_edge {
            result.shares.entry(edge.clone()).or_default().investment = value / demand;
        }
        for (edge, value) in &variable.per_edge {
            result.shares.entry(edge.clone()).or_default().variable_costs = value / demand;
        }
        let totals: Vec<_> = result
            .shares
            .iter()
            .map(|(edge, share)| (edge.clone(), share.total()))
            .collect();
        for (edge, total) in totals {
            result.insert(edge, total);
        }
        Ok(result)
    }
}

/// One instance of every analyzer.
pub fn all() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(SizeAnalyzer),
        Box::new(SequenceFlowSumAnalyzer),
        Box::new(VariableCostAnalyzer),
        Box::new(InvestmentAnalyzer),
        Box::new(TotalInvestmentAnalyzer),
        Box::new(Co2Analyzer),
        Box::new(FossilCostsAnalyzer),
        Box::new(LcoeAutomatedDemandAnalyzer),
    ]
}
