//! Dependency-ordered execution of analyzers.

use std::collections::BTreeMap;

use hc_core::Real;
use hc_results::RawResults;
use petgraph::algo::toposort;
use petgraph::Graph;
use tracing::debug;

use crate::analyzer::{AnalysisContext, Analyzer, AnalyzerKind, AnalyzerResult};
use crate::analyzers;
use crate::{AnalysisError, AnalysisResult};

/// Analyzers over one set of raw results.
///
/// Each analyzer runs at most once; later lookups hit the memoized result.
pub struct Analysis {
    results: RawResults,
    analyzers: Vec<Box<dyn Analyzer>>,
    done: BTreeMap<AnalyzerKind, AnalyzerResult>,
}

impl Analysis {
    pub fn new(results: RawResults) -> Self {
        Self {
            results,
            analyzers: Vec::new(),
            done: BTreeMap::new(),
        }
    }

    /// Every analyzer registered and run.
    pub fn full(results: RawResults) -> AnalysisResult<Self> {
        let mut analysis = Self::new(results);
        for analyzer in analyzers::all() {
            analysis.add_analyzer(analyzer)?;
        }
        analysis.analyze()?;
        Ok(analysis)
    }

    pub fn results(&self) -> &RawResults {
        &self.results
    }

    pub fn add_analyzer(&mut self, analyzer: Box<dyn Analyzer>) -> AnalysisResult<()> {
        let kind = analyzer.kind();
        if self.analyzers.iter().any(|a| a.kind() == kind) {
            return Err(AnalysisError::Duplicate(kind));
        }
        self.analyzers.push(analyzer);
        Ok(())
    }

    /// Run all registered analyzers, dependencies first.
    ///
    /// A dependency that is neither registered nor already computed is an
    /// error, as is a dependency cycle.
    pub fn analyze(&mut self) -> AnalysisResult<()> {
        for index in self.execution_order()? {
            let analyzer = &self.analyzers[index];
            let kind = analyzer.kind();
            if self.done.contains_key(&kind) {
                continue;
            }
            let ctx = AnalysisContext {
                results: &self.results,
                analyzer: kind,
                done: &self.done,
            };
            let result = analyzer.analyze(&ctx)?;
            debug!(
                analyzer = %kind,
                edges = result.per_edge.len(),
                total = result.total,
                "analyzer finished"
            );
            self.done.insert(kind, result);
        }
        Ok(())
    }

    fn execution_order(&self) -> AnalysisResult<Vec<usize>> {
        let mut graph = Graph::<usize, ()>::new();
        let nodes: Vec<_> = (0..self.analyzers.len()).map(|i| graph.add_node(i)).collect();

        let mut edges = Vec::new();
        for (i, analyzer) in self.analyzers.iter().enumerate() {
            for dependency in analyzer.depends_on() {
                match self.analyzers.iter().position(|a| a.kind() == *dependency) {
                    Some(j) => edges.push((nodes[j], nodes[i])),
                    None if self.done.contains_key(dependency) => {}
                    None => {
                        return Err(AnalysisError::UnsatisfiedDependency {
                            analyzer: analyzer.kind(),
                            dependency: *dependency,
                        })
                    }
                }
            }
        }
        graph.extend_with_edges(&edges);

        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().map(|n| graph[n]).collect()),
            Err(cycle) => Err(AnalysisError::Cycle(
                self.analyzers[graph[cycle.node_id()]].kind(),
            )),
        }
    }

    /// Run a single analyzer against what has been computed so far.
    ///
    /// Refuses to run when any dependency has no result yet.
    pub fn run(&mut self, analyzer: Box<dyn Analyzer>) -> AnalysisResult<&AnalyzerResult> {
        let kind = analyzer.kind();
        if !self.done.contains_key(&kind) {
            let ctx = AnalysisContext {
                results: &self.results,
                analyzer: kind,
                done: &self.done,
            };
            for dependency in analyzer.depends_on() {
                ctx.dependency(*dependency)?;
            }
            let result = analyzer.analyze(&ctx)?;
            self.done.insert(kind, result);
        }
        if !self.analyzers.iter().any(|a| a.kind() == kind) {
            self.analyzers.push(analyzer);
        }
        Ok(&self.done[&kind])
    }

    pub fn get(&self, kind: AnalyzerKind) -> Option<&AnalyzerResult> {
        self.done.get(&kind)
    }

    pub fn total(&self, kind: AnalyzerKind) -> Option<Real> {
        self.get(kind).map(|r| r.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::*;

    struct Looping(AnalyzerKind, AnalyzerKind);

    impl Analyzer for Looping {
        fn kind(&self) -> AnalyzerKind {
            self.0
        }

        fn depends_on(&self) -> &'static [AnalyzerKind] {
            match self.1 {
                AnalyzerKind::Size => &[AnalyzerKind::Size],
                _ => &[AnalyzerKind::SequenceFlowSum],
            }
        }

        fn analyze(&self, _ctx: &AnalysisContext<'_>) -> AnalysisResult<AnalyzerResult> {
            Ok(AnalyzerResult::default())
        }
    }

    #[test]
    fn dependent_without_dependency_is_rejected() {
        let mut analysis = Analysis::new(RawResults::default());
        let err = analysis.run(Box::new(Co2Analyzer)).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::UnsatisfiedDependency {
                analyzer: AnalyzerKind::Co2,
                dependency: AnalyzerKind::SequenceFlowSum,
            }
        );
        assert!(analysis.get(AnalyzerKind::Co2).is_none());

        analysis.run(Box::new(SequenceFlowSumAnalyzer)).unwrap();
        assert!(analysis.run(Box::new(Co2Analyzer)).is_ok());
    }

    #[test]
    fn registration_order_does_not_matter() {
        let mut analysis = Analysis::new(RawResults::default());
        analysis.add_analyzer(Box::new(FossilCostsAnalyzer)).unwrap();
        analysis.add_analyzer(Box::new(VariableCostAnalyzer)).unwrap();
        analysis.analyze().unwrap();
        assert!(analysis.get(AnalyzerKind::FossilCosts).is_some());
    }

    #[test]
    fn unregistered_dependency_fails_before_running() {
        let mut analysis = Analysis::new(RawResults::default());
        analysis.add_analyzer(Box::new(TotalInvestmentAnalyzer)).unwrap();
        assert!(matches!(
            analysis.analyze(),
            Err(AnalysisError::UnsatisfiedDependency {
                dependency: AnalyzerKind::Size,
                ..
            })
        ));
        assert!(analysis.get(AnalyzerKind::TotalInvestment).is_none());
    }

    #[test]
    fn cycles_are_detected() {
        let mut analysis = Analysis::new(RawResults::default());
        analysis
            .add_analyzer(Box::new(Looping(AnalyzerKind::SequenceFlowSum, AnalyzerKind::Size)))
            .unwrap();
        analysis
            .add_analyzer(Box::new(Looping(AnalyzerKind::Size, AnalyzerKind::SequenceFlowSum)))
            .unwrap();
        assert!(matches!(analysis.analyze(), Err(AnalysisError::Cycle(_))));
    }

    #[test]
    fn duplicates_are_refused() {
        let mut analysis = Analysis::new(RawResults::default());
        analysis.add_analyzer(Box::new(SizeAnalyzer)).unwrap();
        assert_eq!(
            analysis.add_analyzer(Box::new(SizeAnalyzer)),
            Err(AnalysisError::Duplicate(AnalyzerKind::Size))
        );
    }
}
