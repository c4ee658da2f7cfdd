//! hc-analysis: derived metrics over raw simulation results.
//!
//! Analyzers compute one value per edge (installed size, total flow, cost,
//! CO2, ...) and may depend on other analyzers. An [`Analysis`] runs them in
//! dependency order and memoizes each result by [`AnalyzerKind`].
//! Aggregations relabel edge values to comparison categories per scenario
//! and assemble scenario tables; rankings reduce tables to one sorted value
//! per scenario.

pub mod aggregation;
pub mod analyzer;
pub mod analyzers;
pub mod engine;
pub mod ranking;
pub mod table;

pub use aggregation::{
    AnalyzedScenario, CategoryAggregation, LcoeAggregation, ScenarioDisplay,
    TechnologyComparison,
};
pub use analyzer::{AnalysisContext, Analyzer, AnalyzerKind, AnalyzerResult, LcoeShare};
pub use engine::Analysis;
pub use ranking::{Order, RankedEntry, Ranking};
pub use table::{Cell, Table};

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{analyzer} depends on {dependency}, which has no result yet")]
    UnsatisfiedDependency {
        analyzer: AnalyzerKind,
        dependency: AnalyzerKind,
    },

    #[error("Circular analyzer dependency involving {0}")]
    Cycle(AnalyzerKind),

    #[error("{0} is registered twice")]
    Duplicate(AnalyzerKind),
}
