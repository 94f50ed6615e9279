use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn reading_parses_text_and_numbers() {
    assert!(close(Reading::from(" 12.5 ").value(), 12.5));
    assert!(close(Reading::Number(3.0).value(), 3.0));
}

#[test]
fn unparsable_reading_is_zero() {
    assert!(close(Reading::from("lots").value(), 0.0));
    assert!(close(Reading::default().value(), 0.0));
    assert!(close(Reading::from("NaN").value(), 0.0));
    assert!(close(Reading::from("inf").value(), 0.0));
}

#[test]
fn empty_input_estimates_zero() {
    let out = estimate(&EstimatorInput::default());
    assert!(close(out.total, 0.0));
}

#[test]
fn transportation_formula() {
    let input = EstimatorInput {
        transportation: TransportationInput {
            distance: "100".into(),
            fuel_consumption: "10".into(),
            trips: "20".into(),
            ..TransportationInput::default()
        },
        ..EstimatorInput::default()
    };
    // 100 * 10 * 20 * 2.3 / 1000
    assert!(close(estimate(&input).transportation, 46.0));
}

#[test]
fn energy_formula_applies_renewable_share() {
    let input = EstimatorInput {
        energy: EnergyInput {
            electricity: "100".into(),
            gas: "10".into(),
            heating: "4".into(),
            renewable: "25".into(),
        },
        ..EstimatorInput::default()
    };
    // (50 + 20 + 10) * 0.75
    assert!(close(estimate(&input).energy, 60.0));
}

#[test]
fn waste_ignores_recyclable() {
    let input = EstimatorInput {
        waste: WasteInput {
            general: "10".into(),
            recyclable: "1000".into(),
            organic: "5".into(),
            ..WasteInput::default()
        },
        ..EstimatorInput::default()
    };
    assert!(close(estimate(&input).waste, 11.0));
}

#[test]
fn total_sums_categories() {
    let input = EstimatorInput {
        operations: OperationsInput { employees: "4".into(), business_travel: "10".into(), facilities: "9".into() },
        waste: WasteInput { general: "2".into(), ..WasteInput::default() },
        ..EstimatorInput::default()
    };
    let out = estimate(&input);
    assert!(close(out.operations, 13.0));
    assert!(close(out.total, 14.0));
}

#[test]
fn deserializes_mixed_json_with_defaults() {
    let input: EstimatorInput = serde_json::from_value(serde_json::json!({
        "transportation": { "distance": 50, "fuelConsumption": "8", "trips": "bad" },
        "operations": { "businessTravel": 100 }
    }))
    .unwrap();
    assert_eq!(input.transportation.fuel_type, "diesel");
    assert_eq!(input.waste.disposal, "landfill");
    let out = estimate(&input);
    assert!(close(out.transportation, 0.0));
    assert!(close(out.operations, 30.0));
}

#[test]
fn form_fields_map_onto_categories() {
    let form = EstimatorForm {
        distance: "100".into(),
        fuel_consumption: "10".into(),
        trips: "20".into(),
        electricity: "100".into(),
        renewable: "50".into(),
        organic: "5".into(),
        employees: "2".into(),
        ..EstimatorForm::default()
    };
    let input = EstimatorInput::from(form);
    assert_eq!(input.transportation.fuel_type, "diesel");
    assert_eq!(input.waste.disposal, "landfill");

    let out = estimate(&input);
    assert!(close(out.transportation, 46.0));
    assert!(close(out.energy, 25.0));
    assert!(close(out.waste, 6.0));
    assert!(close(out.operations, 5.0));
}
