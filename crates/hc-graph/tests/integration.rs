//! Integration tests for hc-graph.

use hc_core::TimeIndex;
use hc_graph::*;

fn index(periods: usize) -> TimeIndex {
    TimeIndex::hourly(periods).unwrap()
}

#[test]
fn build_boiler_system() {
    let mut b = EnergySystemBuilder::new(index(2));
    let gas = b.add_bus(Label::bus("b_gas"), false);
    let heat = b.add_bus(Label::bus("b_a_th").belongs_to("a"), true);
    let demand = b.add_sink(Label::sink("demand_a_th").belongs_to("a").tag("demand"));
    let excess = b.add_sink(Label::sink("excess_a_th").belongs_to("a"));
    let boiler = b.add_converter(
        Label::converter("a_gas_heating"),
        (
            gas,
            Flow::new()
                .variable_costs(0.07)
                .investment(Investment::new(50.0).capex(600.0))
                .co2_emissions(202.0)
                .fossil(),
        ),
        vec![(heat, Flow::new().variable_costs(0.01), Series::Scalar(0.95))],
    );
    b.connect(heat, demand, Flow::new().fixed(vec![3.0, 4.0], 1.0));
    b.connect(heat, excess, Flow::new());

    let system = b.build().unwrap();
    assert_eq!(system.periods(), 2);
    assert_eq!(system.nodes().len(), 5);
    assert_eq!(system.flows().len(), 4);

    let demands: Vec<_> = system.nodes_with_tag("demand").collect();
    assert_eq!(demands.len(), 1);
    assert_eq!(demands[0].label.name, "demand_a_th");

    let input = system.inputs(boiler).next().unwrap();
    assert_eq!(system.edge_key(input).to_string(), "(b_gas, a_gas_heating)");
    assert!(input.flow.is_fossil);
    assert_eq!(system.outputs(boiler).count(), 1);
    assert_eq!(system.node_by_name("b_gas").unwrap().id, gas);
}

#[test]
fn duplicate_names_rejected() {
    let mut b = EnergySystemBuilder::new(index(1));
    b.add_bus(Label::bus("x"), true);
    b.add_sink(Label::sink("x"));
    assert!(matches!(b.build(), Err(GraphError::DuplicateName { .. })));
}

#[test]
fn names_that_break_edge_keys_rejected() {
    let mut b = EnergySystemBuilder::new(index(1));
    b.add_bus(Label::bus("b_Müller, Hans_th"), true);
    match b.build() {
        Err(GraphError::InvalidName { name }) => assert_eq!(name, "b_Müller, Hans_th"),
        other => panic!("expected InvalidName, got {other:?}"),
    }
}

#[test]
fn series_must_match_time_index() {
    let mut b = EnergySystemBuilder::new(index(3));
    let bus = b.add_bus(Label::bus("b"), true);
    let sink = b.add_sink(Label::sink("s"));
    b.connect(bus, sink, Flow::new().fixed(vec![1.0, 2.0], 1.0));
    let err = b.build().unwrap_err();
    assert!(matches!(err, GraphError::SeriesLength { len: 2, periods: 3, .. }));
    assert!(err.to_string().contains("(b, s)"));
}

#[test]
fn conversion_factor_must_be_a_fraction_range() {
    let mut b = EnergySystemBuilder::new(index(1));
    let gas = b.add_bus(Label::bus("b_gas"), false);
    let heat = b.add_bus(Label::bus("b_th"), true);
    // 95 instead of 0.95: percent leaked through
    b.add_converter(
        Label::converter("boiler"),
        (gas, Flow::new()),
        vec![(heat, Flow::new(), Series::Scalar(95.0))],
    );
    assert!(matches!(
        b.build(),
        Err(GraphError::InvalidConversion { .. })
    ));
}

#[test]
fn fixed_flow_needs_capacity() {
    let mut b = EnergySystemBuilder::new(index(1));
    let bus = b.add_bus(Label::bus("b"), true);
    let pv = b.add_source(Label::source("pv"));
    let mut flow = Flow::new();
    flow.fixed_profile = Some(vec![0.5]);
    b.connect(pv, bus, flow);
    assert!(matches!(b.build(), Err(GraphError::InvalidFlow { .. })));
}

#[test]
fn sources_cannot_receive_flow() {
    let mut b = EnergySystemBuilder::new(index(1));
    let bus = b.add_bus(Label::bus("b"), true);
    let src = b.add_source(Label::source("src"));
    b.connect(bus, src, Flow::new());
    assert!(matches!(
        b.build(),
        Err(GraphError::InvalidConnection { .. })
    ));
}
