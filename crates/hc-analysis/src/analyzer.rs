//! Analyzer trait and result types.

use core::fmt;
use std::collections::BTreeMap;

use hc_core::{EdgeKey, Real};
use hc_results::RawResults;
use serde::{Deserialize, Serialize};

use crate::{AnalysisError, AnalysisResult};

/// Identity of an analyzer; results are memoized under this key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalyzerKind {
    Size,
    SequenceFlowSum,
    VariableCost,
    Investment,
    TotalInvestment,
    Co2,
    FossilCosts,
    Lcoe,
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalyzerKind::Size => "SizeAnalyzer",
            AnalyzerKind::SequenceFlowSum => "SequenceFlowSumAnalyzer",
            AnalyzerKind::VariableCost => "VariableCostAnalyzer",
            AnalyzerKind::Investment => "InvestmentAnalyzer",
            AnalyzerKind::TotalInvestment => "TotalInvestmentAnalyzer",
            AnalyzerKind::Co2 => "CO2Analyzer",
            AnalyzerKind::FossilCosts => "FossilCostsAnalyzer",
            AnalyzerKind::Lcoe => "LCOEAutomatedDemandAnalyzer",
        };
        f.write_str(name)
    }
}

/// Levelized cost of one edge, split by origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LcoeShare {
    pub investment: Real,
    pub variable_costs: Real,
}

impl LcoeShare {
    pub fn total(&self) -> Real {
        self.investment + self.variable_costs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerResult {
    pub per_edge: BTreeMap<EdgeKey, Real>,
    /// Investment/variable split; only the LCOE analyzer fills it.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shares: BTreeMap<EdgeKey, LcoeShare>,
    pub total: Real,
}

impl AnalyzerResult {
    pub fn insert(&mut self, edge: EdgeKey, value: Real) {
        self.total += value;
        self.per_edge.insert(edge, value);
    }

    pub fn get(&self, edge: &EdgeKey) -> Option<Real> {
        self.per_edge.get(edge).copied()
    }
}

/// Raw results plus the results of analyzers that already ran.
pub struct AnalysisContext<'a> {
    pub results: &'a RawResults,
    pub(crate) analyzer: AnalyzerKind,
    pub(crate) done: &'a BTreeMap<AnalyzerKind, AnalyzerResult>,
}

impl AnalysisContext<'_> {
    /// Completed result of a declared dependency.
    pub fn dependency(&self, kind: AnalyzerKind) -> AnalysisResult<&AnalyzerResult> {
        self.done
            .get(&kind)
            .ok_or(AnalysisError::UnsatisfiedDependency {
                analyzer: self.analyzer,
                dependency: kind,
            })
    }
}

/// Computes one derived value per edge.
///
/// An edge that lacks a coefficient the analyzer needs is skipped; it never
/// fails the analysis.
pub trait Analyzer: Send + Sync {
    fn kind(&self) -> AnalyzerKind;

    fn depends_on(&self) -> &'static [AnalyzerKind] {
        &[]
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult>;
}
