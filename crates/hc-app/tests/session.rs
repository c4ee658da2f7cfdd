mod common;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use common::*;
use hc_analysis::AnalyzerKind;
use hc_app::{
    check_for_result, AppContext, AppError, ComparisonService, FailureReason, JobStatus, Overrides,
    ScenarioConfig, SessionSimulation, SimulationState,
};
use hc_core::EdgeKey;
use hc_demand::{Demand, HeatType, ProfileLibrary};
use hc_params::{ParameterPatch, ParameterStore};
use hc_scenarios::ScenarioKind;

#[test]
fn gas_end_to_end() {
    let ctx = context("e2e");
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);

    let state = simulation
        .load_or_simulate(&ctx)
        .expect("gas parameters are complete");
    assert!(state.is_pending(), "unexpected state {state:?}");

    let state = wait(&mut simulation, &ctx);
    let result_id = match state {
        SimulationState::Ready(id) => id,
        other => panic!("simulation failed: {other:?}"),
    };

    let records = ctx.store.records_for("Gas").expect("records readable");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].result_id, result_id);
    assert_eq!(records[0].parameter_hash.len(), 64);
    assert_eq!(
        records[0].parameters.get("demand", "type"),
        Some(&serde_json::json!("single"))
    );

    let results = ctx.store.restore_results(result_id).expect("results stored");
    assert_eq!(results.periods, PERIODS);
    let fuel = EdgeKey::new("b_gas", "efh_gas_heating");
    let size = results.flows[&fuel].invest.expect("boiler is invested");
    assert!(size > 0.0);

    let analyzed = ComparisonService::new(&ctx)
        .analyze(ScenarioKind::Gas, result_id)
        .expect("analysis runs");
    let investment = analyzed
        .analysis
        .get(AnalyzerKind::TotalInvestment)
        .and_then(|r| r.get(&fuel))
        .expect("investment of the boiler");
    assert!((investment - 300.0 * size).abs() <= 1e-6 * investment.max(1.0));
}

#[test]
fn second_request_hits_the_cache() {
    let ctx = context("cache");
    let queue = Arc::new(CountingQueue::new(&ctx));
    let ctx = ctx.with_queue(queue.clone());

    let mut first = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    first.load_or_simulate(&ctx).expect("submitted");
    let result_id = wait(&mut first, &ctx)
        .result_id()
        .expect("first run succeeds");

    let mut second = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    let state = second.load_or_simulate(&ctx).expect("cache lookup");
    assert_eq!(state, &SimulationState::CacheHit(result_id));
    assert_eq!(queue.count(), 1);

    // another demand index is another cache key
    let mut other = SessionSimulation::new(ScenarioKind::Gas, efh(), 2);
    assert!(other.load_or_simulate(&ctx).expect("submitted").is_pending());
    assert_eq!(queue.count(), 2);
    wait(&mut other, &ctx);
}

#[test]
fn curve_derived_parameters_hit_the_cache() {
    let ctx = context("bhkw-cache");
    let queue = Arc::new(CountingQueue::new(&ctx));
    let ctx = ctx.with_queue(queue.clone());

    let sizes = [6, 11, 16, 21, 29];
    for persons in sizes {
        let demand = Demand::Single(household("efh", persons, HeatType::Radiator));
        let mut first = SessionSimulation::new(ScenarioKind::Bhkw, demand.clone(), persons);
        first.load_or_simulate(&ctx).expect("submitted");
        let result_id = wait(&mut first, &ctx)
            .result_id()
            .expect("BHKW run succeeds");
        let capex = first
            .parameters(&ctx)
            .and_then(|p| Ok(p.number("BHKW", "capex")?))
            .expect("derived capex");
        assert_ne!(capex, 3000.0, "capex comes from the size curve");

        let mut second = SessionSimulation::new(ScenarioKind::Bhkw, demand, persons);
        let state = second.load_or_simulate(&ctx).expect("cache lookup");
        assert_eq!(state, &SimulationState::CacheHit(result_id), "persons {persons}");
    }
    assert_eq!(queue.count(), sizes.len());
}

#[test]
fn missing_component_lists_its_derived_keys_too() {
    let config = config("missing-component");
    let yaml = r#"
scenarios:
  BHKW:
    General:
      wacc: { value: 3.0 }
      net_costs: { value: 0.28 }
      gas_price: { value: 0.07 }
      gas_rate: { value: 2.0 }
      bhkw_feedin_tariff: { value: 0.08 }
"#;
    let parameters = ParameterStore::from_yaml_str(yaml).expect("valid YAML");
    let ctx = AppContext::new(config, parameters, ProfileLibrary::synthetic()).expect("context");

    let mut simulation = SessionSimulation::new(ScenarioKind::Bhkw, efh(), 1);
    let message = simulation.load_or_simulate(&ctx).unwrap_err().to_string();
    for key in [
        "BHKW.capex",
        "BHKW.lifetime",
        "BHKW.conversion_factor_el",
        "BHKW.conversion_factor_th",
        "BHKW.co2_emissions",
        "BHKW.minimal_load",
        "Gas.efficiency",
    ] {
        assert!(message.contains(key), "{message} should mention {key}");
    }
    assert_eq!(simulation.state(), &SimulationState::NotSubmitted);
}

#[test]
fn overrides_change_the_cache_key() {
    let ctx = context("overrides");
    let mut first = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    first.load_or_simulate(&ctx).expect("submitted");
    wait(&mut first, &ctx).result_id().expect("first run succeeds");

    let mut overrides = Overrides::new();
    overrides
        .entry("Gas".to_string())
        .or_default()
        .insert("capex".to_string(), ParameterPatch::value(350.0));
    let mut cheaper = SessionSimulation::new(ScenarioKind::Gas, efh(), 1).with_overrides(overrides);
    let parameters = cheaper.parameters(&ctx).expect("parameters merge");
    assert_eq!(parameters.number("Gas", "capex").expect("capex"), 350.0);
    assert!(cheaper.load_or_simulate(&ctx).expect("submitted").is_pending());
    wait(&mut cheaper, &ctx);
}

#[test]
fn touched_scenario_invalidates_records() {
    let ctx = context("touch");
    let mut first = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    first.load_or_simulate(&ctx).expect("submitted");
    wait(&mut first, &ctx).result_id().expect("first run succeeds");

    let key = first
        .parameters(&ctx)
        .and_then(|p| Ok(p.to_simulation_parameters()?))
        .expect("parameters");
    assert!(check_for_result(&ctx, ScenarioKind::Gas, &key)
        .expect("lookup")
        .is_some());

    std::thread::sleep(Duration::from_millis(5));
    ctx.store.touch_scenario("Gas").expect("marker written");
    assert_eq!(
        check_for_result(&ctx, ScenarioKind::Gas, &key).expect("lookup"),
        None
    );
}

#[test]
fn configured_last_change_invalidates_records() {
    let mut config = config("last-change");
    let ctx = context_with(config.clone());
    let mut first = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    first.load_or_simulate(&ctx).expect("submitted");
    wait(&mut first, &ctx).result_id().expect("first run succeeds");
    let key = first
        .parameters(&ctx)
        .and_then(|p| Ok(p.to_simulation_parameters()?))
        .expect("parameters");

    config.scenarios.insert(
        "Gas".to_string(),
        ScenarioConfig {
            last_change: Some(Utc::now() + ChronoDuration::hours(1)),
            ..ScenarioConfig::default()
        },
    );
    let changed = context_with(config);
    assert_eq!(
        check_for_result(&changed, ScenarioKind::Gas, &key).expect("lookup"),
        None
    );
}

#[test]
fn missing_parameters_fail_before_dispatch() {
    let config = config("missing");
    let reference = std::fs::read_to_string(&config.parameter_file)
        .expect("reference file")
        .replace("      efficiency: { value: 95.0, parameter_type: technical }\n", "");
    let parameters = ParameterStore::from_yaml_str(&reference).expect("still valid YAML");
    let ctx = AppContext::new(config, parameters, ProfileLibrary::synthetic()).expect("context");

    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    let err = simulation.load_or_simulate(&ctx).unwrap_err();
    assert_eq!(err.to_string(), "Parameter error: Missing parameters: Gas.efficiency");
    assert_eq!(simulation.state(), &SimulationState::NotSubmitted);
}

#[test]
fn unparsable_override_is_a_configuration_error() {
    let ctx = context("unparsable");
    let mut overrides = Overrides::new();
    overrides.entry("Gas".to_string()).or_default().insert(
        "efficiency".to_string(),
        ParameterPatch::value("not a number"),
    );
    let mut simulation =
        SessionSimulation::new(ScenarioKind::Gas, efh(), 1).with_overrides(overrides);
    let err = simulation.load_or_simulate(&ctx).unwrap_err();
    assert!(matches!(err, AppError::Parameters(_)));
    assert!(err.to_string().contains("Gas.efficiency"), "{err}");
    assert_eq!(simulation.state(), &SimulationState::NotSubmitted);
}

#[test]
fn deactivated_scenario_is_rejected() {
    let mut config = config("deactivated");
    config.activated_scenarios = vec![ScenarioKind::Oil];
    let ctx = context_with(config);
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    let err = simulation.load_or_simulate(&ctx).unwrap_err();
    assert!(err.to_string().contains("Unknown scenario 'Gas'"), "{err}");
}

#[test]
fn dispatch_is_retried() {
    let ctx = context("retry").with_queue(Arc::new(FlakyQueue {
        failures: 2,
        attempts: AtomicUsize::new(0),
    }));
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    assert!(simulation.load_or_simulate(&ctx).expect("retried").is_pending());
}

#[test]
fn dispatch_gives_up_after_retries() {
    let ctx = context("give-up").with_queue(Arc::new(FlakyQueue {
        failures: 10,
        attempts: AtomicUsize::new(0),
    }));
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    let state = simulation.load_or_simulate(&ctx).expect("no error raised");
    assert!(matches!(state, SimulationState::Failed(FailureReason::Dispatch(_))));
}

#[test]
fn worker_failure_ends_in_failed() {
    let ctx = context("worker-failure").with_queue(Arc::new(FixedQueue {
        status: Ok(JobStatus::failed("No valid solution: the model is infeasible")),
    }));
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    simulation.load_or_simulate(&ctx).expect("submitted");
    let state = simulation.poll(&ctx).clone();
    assert_eq!(
        state,
        SimulationState::Failed(FailureReason::Simulation(
            "No valid solution: the model is infeasible".into()
        ))
    );
    assert!(ctx.store.records_for("Gas").expect("records").is_empty());
}

#[test]
fn poll_errors_are_not_raised() {
    let ctx = context("poll-error").with_queue(Arc::new(FixedQueue {
        status: Err(AppError::Dispatch("broker gone".into())),
    }));
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    simulation.load_or_simulate(&ctx).expect("submitted");
    assert!(matches!(
        simulation.poll(&ctx),
        SimulationState::Failed(FailureReason::Simulation(_))
    ));
}

#[test]
fn pending_simulation_times_out() {
    let mut config = config("timeout");
    config.worker.poll_timeout_s = Some(1);
    let ctx = context_with(config).with_queue(Arc::new(FixedQueue {
        status: Ok(JobStatus::pending()),
    }));
    let mut simulation = SessionSimulation::new(ScenarioKind::Gas, efh(), 1);
    simulation.load_or_simulate(&ctx).expect("submitted");
    assert!(simulation.poll(&ctx).is_pending());

    std::thread::sleep(Duration::from_millis(1100));
    assert_eq!(
        simulation.poll(&ctx),
        &SimulationState::Failed(FailureReason::Timeout)
    );
}
