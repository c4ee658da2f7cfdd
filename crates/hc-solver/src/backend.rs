//! Solver backends.

use std::time::Instant;

use minilp::{ComparisonOp, LinearExpr, OptimizationDirection, Problem};
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::model::{Comparison, LpModel, LpSolution};

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Relative optimality gap handed to backends that support one.
    pub mip_gap: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { mip_gap: 0.005 }
    }
}

/// A black-box optimizer for `LpModel`s.
pub trait SolverBackend: Send + Sync {
    fn name(&self) -> &str;

    fn solve(&self, model: &LpModel, options: &SolveOptions) -> SolverResult<LpSolution>;
}

/// Pure-Rust dual simplex. Solves to optimality, which satisfies any gap.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinilpBackend;

impl SolverBackend for MinilpBackend {
    fn name(&self) -> &str {
        "minilp"
    }

    fn solve(&self, model: &LpModel, options: &SolveOptions) -> SolverResult<LpSolution> {
        let started = Instant::now();
        let mut problem = Problem::new(OptimizationDirection::Minimize);
        let vars: Vec<_> = model
            .vars
            .iter()
            .map(|v| problem.add_var(v.cost, (v.lower, v.upper)))
            .collect();

        for c in &model.constraints {
            let mut expr = LinearExpr::empty();
            for (var, coeff) in &c.terms {
                expr.add(vars[var.0], *coeff);
            }
            let op = match c.op {
                Comparison::Eq => ComparisonOp::Eq,
                Comparison::Le => ComparisonOp::Le,
                Comparison::Ge => ComparisonOp::Ge,
            };
            problem.add_constraint(expr, op, c.rhs);
        }

        let solution = problem.solve().map_err(|e| match e {
            minilp::Error::Infeasible => SolverError::Infeasible,
            minilp::Error::Unbounded => SolverError::Unbounded,
        })?;

        debug!(
            backend = self.name(),
            mip_gap = options.mip_gap,
            vars = model.vars.len(),
            constraints = model.constraints.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "LP solved"
        );

        Ok(LpSolution {
            objective: solution.objective(),
            values: vars.iter().map(|v| solution[*v]).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_tiny_lp() {
        // min x + 2y  s.t. x + y >= 3, y >= 1
        let mut model = LpModel::default();
        let x = model.add_var(1.0, 0.0, f64::INFINITY);
        let y = model.add_var(2.0, 1.0, f64::INFINITY);
        model.add_constraint(vec![(x, 1.0), (y, 1.0)], Comparison::Ge, 3.0);
        let sol = MinilpBackend.solve(&model, &SolveOptions::default()).unwrap();
        assert!((sol.value(x) - 2.0).abs() < 1e-9);
        assert!((sol.value(y) - 1.0).abs() < 1e-9);
        assert!((sol.objective - 4.0).abs() < 1e-9);
    }

    #[test]
    fn infeasible_is_reported() {
        let mut model = LpModel::default();
        let x = model.add_var(1.0, 0.0, 1.0);
        model.add_constraint(vec![(x, 1.0)], Comparison::Ge, 2.0);
        assert_eq!(
            MinilpBackend.solve(&model, &SolveOptions::default()),
            Err(SolverError::Infeasible)
        );
    }
}
