use hc_demand::DemandType;
use hc_params::{ParameterStore, SimulationParameters};

const FILE: &str = r#"
scenarios:
  Oil:
    General:
      wacc: { value: 3.0, unit: "%" }
      oil_price: { value: 0.07, unit: "€/kWh" }
      oil_rate: { value: 2 }
    Oil:
      lifetime: { value: 20, unit: a }
      capex: { value: 700.0 }
      is_fossil: { value: true }
      label: { value: Heizöl }
"#;

#[test]
fn cache_key_projection_survives_the_wire() {
    let store = ParameterStore::from_yaml_str(FILE).unwrap();
    let first = store
        .get_scenario_parameters("Oil", DemandType::Single)
        .unwrap()
        .to_simulation_parameters()
        .unwrap();

    let wire = serde_json::to_string(&first).unwrap();
    let decoded: SimulationParameters = serde_json::from_str(&wire).unwrap();

    let refetched = store
        .get_scenario_parameters("Oil", DemandType::Single)
        .unwrap()
        .to_simulation_parameters()
        .unwrap();

    assert_eq!(decoded, refetched);
    assert_eq!(decoded.get("Oil", "is_fossil"), Some(&serde_json::json!(true)));
    assert_eq!(decoded.get("Oil", "lifetime"), Some(&serde_json::json!(20)));
}

#[test]
fn full_parameter_set_round_trips_as_job_payload() {
    let store = ParameterStore::from_yaml_str(FILE).unwrap();
    let set = store
        .get_scenario_parameters("Oil", DemandType::District)
        .unwrap();
    let json = serde_json::to_string(&set).unwrap();
    let back: hc_params::ParameterSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
}

#[test]
fn curve_derived_floats_survive_the_wire() {
    let store = ParameterStore::from_yaml_str(FILE).unwrap();
    for step in 0..200 {
        let size = 1.0 + step as f64 * 0.045;
        let mut set = store
            .get_scenario_parameters("Oil", DemandType::Single)
            .unwrap();
        set.set_value("Oil", "capex", 9585.0 * size.powf(-0.542));
        let key = set.to_simulation_parameters().unwrap();

        let stored = serde_json::to_string_pretty(&key).unwrap();
        let restored: SimulationParameters = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, key, "size {size}");
        assert_eq!(
            restored.get("Oil", "capex").and_then(|v| v.as_f64()),
            Some(9585.0 * size.powf(-0.542))
        );
    }
}
