use hc_analysis::{
    AnalyzedScenario, AnalyzerKind, Cell, CategoryAggregation, LcoeAggregation, Order, Ranking,
    ScenarioDisplay, TechnologyComparison,
};
use hc_core::EdgeKey;
use hc_graph::Label;
use hc_results::{EdgeParameters, FlowResult, RawResults, Scalar};
use hc_scenarios::ScenarioKind;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9 * b.abs().max(1.0)
}

fn params(entries: &[(&str, Scalar)]) -> EdgeParameters {
    let mut p = EdgeParameters::default();
    for (key, value) in entries {
        p.scalars.insert(key.to_string(), value.clone());
    }
    p
}

fn flow(sequence: &[f64], invest: Option<f64>) -> FlowResult {
    FlowResult {
        sequence: sequence.to_vec(),
        invest,
    }
}

/// A solved gas boiler over two hours, written out by hand.
fn gas_results() -> RawResults {
    let mut r = RawResults {
        periods: 2,
        ..RawResults::default()
    };
    for label in [
        Label::bus("b_gas").tag("primary_source").tag("gas"),
        Label::converter("h_gas_heating").belongs_to("h").tag("gas_heating"),
        Label::bus("b_h_th").belongs_to("h").tag("heat"),
        Label::sink("demand_h_th").belongs_to("h").tag("demand"),
        Label::sink("excess_h_th").belongs_to("h").tag("excess"),
    ] {
        r.nodes.insert(label.name.clone(), label);
    }

    let fuel = EdgeKey::new("b_gas", "h_gas_heating");
    r.flows.insert(fuel.clone(), flow(&[10.0, 10.0], Some(12.0)));
    r.parameters.insert(
        fuel,
        params(&[
            ("variable_costs", Scalar::Number(0.07)),
            ("investment_ep_costs", Scalar::Number(20.0)),
            ("investment_capex", Scalar::Number(300.0)),
            ("co2_emissions", Scalar::Number(202.0)),
            ("is_fossil", Scalar::Flag(true)),
        ]),
    );

    let heat = EdgeKey::new("h_gas_heating", "b_h_th");
    r.flows.insert(heat.clone(), flow(&[9.0, 9.0], None));
    r.parameters.insert(
        heat,
        params(&[
            ("variable_costs", Scalar::Number(0.002)),
            ("is_fossil", Scalar::Flag(false)),
        ]),
    );

    for sink in ["demand_h_th", "excess_h_th"] {
        let edge = EdgeKey::new("b_h_th", sink);
        let seq = if sink == "demand_h_th" { [9.0, 9.0] } else { [0.0, 0.0] };
        r.flows.insert(edge.clone(), flow(&seq, None));
        r.parameters.insert(
            edge,
            params(&[
                ("variable_costs", Scalar::Number(0.0)),
                ("is_fossil", Scalar::Flag(false)),
            ]),
        );
    }
    r
}

fn analyzed(result_id: u64) -> AnalyzedScenario {
    AnalyzedScenario::new(
        ScenarioKind::Gas.scenario(),
        result_id,
        ScenarioDisplay {
            name: "Gasheizung".into(),
            pros: vec!["günstig".into()],
            cons: vec!["fossil".into(), "CO2".into()],
        },
        gas_results(),
    )
    .unwrap()
}

#[test]
fn analyzers_over_hand_written_results() {
    let s = analyzed(7);
    let a = &s.analysis;
    let fuel = EdgeKey::new("b_gas", "h_gas_heating");

    assert_eq!(a.total(AnalyzerKind::Size), Some(12.0));
    assert_eq!(a.get(AnalyzerKind::TotalInvestment).unwrap().get(&fuel), Some(3600.0));
    assert_eq!(a.total(AnalyzerKind::Investment), Some(240.0));
    assert!(close(a.total(AnalyzerKind::VariableCost).unwrap(), 1.4 + 0.036));
    assert!(close(a.total(AnalyzerKind::FossilCosts).unwrap(), 1.4));

    // only the fuel edge declares co2; the others are skipped
    let co2 = a.get(AnalyzerKind::Co2).unwrap();
    assert_eq!(co2.per_edge.len(), 1);
    assert_eq!(co2.total, 4040.0);

    let lcoe = a.get(AnalyzerKind::Lcoe).unwrap();
    let share = lcoe.shares[&fuel];
    assert!(close(share.investment, 240.0 / 18.0));
    assert!(close(share.variable_costs, 1.4 / 18.0));
    assert!(close(lcoe.total, (240.0 + 1.4 + 0.036) / 18.0));
}

#[test]
fn lcoe_aggregation_separates_investment() {
    let scenarios = [analyzed(1)];
    let table = LcoeAggregation.aggregate(&scenarios);
    assert_eq!(table.index, ["Gasheizung #1"]);
    assert_eq!(table.columns, ["Investment", "Gas", "Gas heating"]);
    assert!(close(table.number("Gasheizung #1", "Investment").unwrap(), 240.0 / 18.0));
    assert!(close(table.number("Gasheizung #1", "Gas heating").unwrap(), 0.036 / 18.0));
}

#[test]
fn category_aggregation_relabels_edges() {
    let scenarios = [analyzed(1), analyzed(2)];
    let table = CategoryAggregation::new("CO2", AnalyzerKind::Co2).aggregate(&scenarios);
    assert_eq!(table.columns, ["Gas"]);
    assert_eq!(table.number("Gasheizung #2", "Gas"), Some(4040.0));

    let ranked = Ranking::new("CO2", Order::Ascending, 0).rank(&table);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].value, 4040.0);
}

#[test]
fn technology_comparison_has_metric_rows() {
    let scenarios = [analyzed(3)];
    let table = TechnologyComparison.aggregate(&scenarios);
    assert_eq!(table.index, TechnologyComparison::ROWS);
    assert_eq!(table.columns, ["Gasheizung #3"]);
    assert_eq!(table.number("Investitionskosten", "Gasheizung #3"), Some(3600.0));
    assert!(close(
        table.number("Primärenergiefaktor", "Gasheizung #3").unwrap(),
        22.0 / 18.0
    ));
    assert_eq!(
        table.get("Nachteile", "Gasheizung #3"),
        Some(&Cell::Text("fossil\nCO2".into()))
    );
}
