//! Primary energy accounting over raw results.

use hc_core::Real;
use hc_results::RawResults;
use serde::{Deserialize, Serialize};

use crate::constants::{TAG_DEMAND, TAG_GRID, TAG_PRIMARY_SOURCE};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryEnergy {
    /// Primary energy per unit of delivered heat.
    pub factor: Real,
    pub energy: Real,
}

/// Weigh every flow leaving a supplying bus with its carrier factor and
/// subtract the credit for grid exports.
///
/// The result is never negative; a scenario that exports more than it
/// consumes reports zero primary energy.
pub fn account(
    results: &RawResults,
    factors: &[(&str, Real)],
    export_credit: Option<Real>,
) -> PrimaryEnergy {
    let mut energy = 0.0;
    let mut demand = 0.0;
    for (edge, flow) in &results.flows {
        if results.target_has_tag(edge, TAG_DEMAND) {
            demand += flow.total();
        }
        if let Some(source) = results.node(&edge.source) {
            if source.has_tag(TAG_PRIMARY_SOURCE) {
                if let Some((_, factor)) = factors.iter().find(|(tag, _)| source.has_tag(tag)) {
                    energy += flow.total() * factor;
                }
            }
        }
        if let Some(credit) = export_credit {
            if results.target_has_tag(edge, TAG_GRID) {
                energy -= flow.total() * credit;
            }
        }
    }
    let energy = energy.max(0.0);
    let factor = if demand > 0.0 { energy / demand } else { 0.0 };
    PrimaryEnergy { factor, energy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_core::EdgeKey;
    use hc_graph::Label;
    use hc_results::FlowResult;

    fn flow(total: Real) -> FlowResult {
        FlowResult {
            sequence: vec![total],
            invest: None,
        }
    }

    fn results() -> RawResults {
        let mut r = RawResults::default();
        for label in [
            Label::bus("b_gas").tag(TAG_PRIMARY_SOURCE).tag("gas"),
            Label::converter("h_chp"),
            Label::bus("b_net_el").tag(TAG_PRIMARY_SOURCE).tag(TAG_GRID),
            Label::sink("demand_h_th").tag(TAG_DEMAND),
            Label::bus("b_h_th"),
        ] {
            r.nodes.insert(label.name.clone(), label);
        }
        r.flows.insert(EdgeKey::new("b_gas", "h_chp"), flow(100.0));
        r.flows.insert(EdgeKey::new("h_chp", "b_net_el"), flow(30.0));
        r.flows.insert(EdgeKey::new("b_h_th", "demand_h_th"), flow(50.0));
        r
    }

    #[test]
    fn fuel_weighted_by_carrier_factor() {
        let pe = account(&results(), &[("gas", 1.1)], None);
        assert!((pe.energy - 110.0).abs() < 1e-9);
        assert!((pe.factor - 2.2).abs() < 1e-9);
    }

    #[test]
    fn export_is_credited_and_clipped() {
        let pe = account(&results(), &[("gas", 1.1)], Some(2.8));
        assert!((pe.energy - 26.0).abs() < 1e-9);

        let pe = account(&results(), &[("gas", 0.5)], Some(2.8));
        assert_eq!(pe.energy, 0.0);
        assert_eq!(pe.factor, 0.0);
    }
}
