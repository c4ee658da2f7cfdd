use hc_demand::*;
use proptest::prelude::*;

fn household(name: &str, persons: u32, house_type: HouseType) -> Household {
    Household::new(HouseholdInput {
        name: name.to_string(),
        house_type,
        persons,
        area: 120.0,
        heat_type: HeatType::Floor,
        warm_water_per_day: HotWaterLevel::Low.liters(),
        heat_demand: None,
    })
    .unwrap()
}

#[test]
fn repository_resolves_both_kinds() {
    let yaml = r#"
households:
  1:
    name: efh
    house_type: EFH
    persons: 3
    area: 130
    heat_type: radiator
    warm_water_per_day: 66
  2:
    name: mfh
    house_type: MFH
    persons: 2
    area: 70
    heat_type: floor
    warm_water_per_day: 43
districts:
  7:
    name: quarter
    members:
      - { household: 1, amount: 2 }
      - { household: 2, amount: 5 }
"#;
    let file: DemandFile = serde_yaml::from_str(yaml).unwrap();
    let repo = InMemoryDemandRepository::from_file(file).unwrap();

    let single = repo.get_demand(DemandType::Single, 1).unwrap();
    assert_eq!(single.name(), "efh");
    assert_eq!(single.demand_type(), DemandType::Single);

    let district = repo.get_demand(DemandType::District, 7).unwrap();
    assert_eq!(district.name(), "quarter");
    assert!(district.contains_radiator());

    let err = repo.get_demand(DemandType::District, 1).unwrap_err();
    assert!(matches!(err, DemandError::NotFound { id: 1, .. }));
}

#[test]
fn district_with_unknown_member_is_rejected() {
    let yaml = "districts:\n  1:\n    name: d\n    members:\n      - { household: 9, amount: 1 }\n";
    let file: DemandFile = serde_yaml::from_str(yaml).unwrap();
    assert!(InMemoryDemandRepository::from_file(file).is_err());
}

#[test]
fn missing_profile_surfaces_as_not_found() {
    let h = household("a", 2, HouseType::Efh);
    let err = h.annual_heat_demand(&ProfileLibrary::new()).unwrap_err();
    assert!(matches!(err, DemandError::ProfileNotFound { ref name } if name == "heat_efh"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn district_demand_is_weighted_sum_of_members(
        members in prop::collection::vec((1u32..=30, 1u32..=6, any::<bool>()), 1..4)
    ) {
        let lib = ProfileLibrary::synthetic();
        let members: Vec<DistrictMember> = members
            .iter()
            .enumerate()
            .map(|(i, &(persons, amount, efh))| DistrictMember {
                household: household(
                    &format!("h{i}"),
                    persons,
                    if efh { HouseType::Efh } else { HouseType::Mfh },
                ),
                amount,
            })
            .collect();
        let district = District::new("d", members.clone()).unwrap();
        let aggregate = district.annual_heat_demand(&lib).unwrap();

        let mut expected = vec![0.0; aggregate.len()];
        for m in &members {
            let series = m.household.annual_heat_demand(&lib).unwrap();
            for (e, v) in expected.iter_mut().zip(series) {
                *e += m.amount as f64 * v;
            }
        }
        for (a, e) in aggregate.iter().zip(&expected) {
            prop_assert!((a - e).abs() <= 1e-9 * e.abs().max(1.0));
        }
    }
}

#[test]
fn demand_file_rejects_names_that_break_node_labels() {
    let yaml = r#"
households:
  2:
    name: "Müller, Hans"
    house_type: EFH
    persons: 3
    area: 130
    heat_type: radiator
    warm_water_per_day: 66
"#;
    let err = serde_yaml::from_str::<DemandFile>(yaml).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("household name"), "{msg}");
    assert!(msg.contains("Müller, Hans"), "{msg}");
}
