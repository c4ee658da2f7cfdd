mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::*;
use hc_analysis::{Cell, TechnologyComparison};
use hc_app::{
    AppError, ComparisonService, JobHandle, JobQueue, SimulationJob, ThreadJobQueue, UserSession,
};
use hc_demand::{Demand, District, DistrictMember, HeatType};
use hc_params::ParameterSet;
use hc_scenarios::ScenarioKind;

fn quarter() -> Demand {
    Demand::District(
        District::new(
            "quarter",
            vec![
                DistrictMember {
                    household: household("a", 4, HeatType::Radiator),
                    amount: 3,
                },
                DistrictMember {
                    household: household("b", 2, HeatType::Floor),
                    amount: 2,
                },
            ],
        )
        .expect("valid district"),
    )
}

#[test]
fn district_session_compares_scenarios() {
    let mut config = config("district");
    config.scenarios.insert(
        "Oil".to_string(),
        hc_app::ScenarioConfig {
            display: Some("Ölheizung".into()),
            pros: vec!["kein Gasnetz nötig".into()],
            ..Default::default()
        },
    );
    let ctx = context_with(config);

    let mut session = UserSession::new(quarter(), 1, [ScenarioKind::Gas, ScenarioKind::Oil]);
    assert_eq!(session.demand_name(), "quarter");
    session.start(&ctx).expect("both scenarios submitted");
    session.wait(&ctx, Duration::from_millis(10));
    assert!(session.is_finished());

    let results = session.results();
    let states: Vec<_> = session.simulations().iter().map(|s| s.state()).collect();
    assert_eq!(results.len(), 2, "{states:?}");

    let service = ComparisonService::new(&ctx);
    let comparison = service.compare(&results).expect("comparison");
    let table = &comparison.technologies;
    assert_eq!(table.index, TechnologyComparison::ROWS);
    assert_eq!(table.columns.len(), 2);
    let oil = format!("Ölheizung #{}", results[1].1);
    assert_eq!(
        table.get("Vorteile", &oil),
        Some(&Cell::Text("kein Gasnetz nötig".into()))
    );
    assert!(table.number("Wärmekosten", &oil).expect("LCOE") > 0.0);
    assert!(table.number("Investitionskosten", &oil).expect("investment") > 0.0);

    assert_eq!(comparison.lcoe.columns[0], "Investment");
    assert_eq!(comparison.rankings.len(), 3);
    assert!(comparison.rankings.iter().all(|r| r.entries.len() == 2));

    // the district's own reference row is used
    let records = ctx.store.records_for("Gas").expect("records");
    assert_eq!(
        records[0].parameters.get("Gas", "capex"),
        Some(&serde_json::json!(150.0))
    );

    let ids: Vec<_> = results.iter().map(|(_, id)| *id).collect();
    let by_id = service.compare_ids(&ids).expect("comparison by id");
    assert_eq!(by_id.technologies.columns, table.columns);
}

#[test]
fn unknown_result_id_is_reported() {
    let ctx = context("unknown-id");
    let err = ComparisonService::new(&ctx).compare_ids(&[42]).unwrap_err();
    assert!(err.to_string().contains("42"), "{err}");
}

#[test]
fn worker_reports_build_errors() {
    let ctx = context("worker-error");
    let queue = ThreadJobQueue::new(
        ctx.store.clone(),
        Arc::clone(&ctx.profiles),
        ctx.config.solve_options(),
    );
    let handle = queue
        .submit(SimulationJob {
            scenario: ScenarioKind::Gas,
            demand: efh(),
            parameters: ParameterSet::new(),
            periods: PERIODS,
        })
        .expect("dispatched");

    let started = Instant::now();
    let status = loop {
        let status = queue.poll(handle).expect("known job");
        if !status.pending {
            break status;
        }
        assert!(started.elapsed() < Duration::from_secs(30));
        std::thread::sleep(Duration::from_millis(5));
    };
    assert_eq!(status.result_id, None);
    let message = status.error.expect("error reported");
    assert!(message.contains("Missing parameters"), "{message}");

    // finished jobs are forgotten once reported
    assert!(matches!(queue.poll(handle), Err(AppError::UnknownJob(_))));

    let stranger = JobHandle(uuid::Uuid::new_v4());
    assert!(matches!(queue.poll(stranger), Err(AppError::UnknownJob(_))));
}
