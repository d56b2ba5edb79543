//! Boost ladder behaviour through the series API

use enginechart_core::boost::{BoostCoefficients, BoostConfig, BoostError};
use enginechart_core::definition::DefinitionError;
use enginechart_core::series::{SampleSeries, SeriesEvent};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

const BOOSTED: &str = r#"
RPMTorque=(1000, -10, 100)
RPMTorque=(3000, -15, 120)
RPMTorque=(5000, -20, 90)
EngineBoostRange=(0, 1, 5)
EngineBoostSetting=2
BoostTorque=0.05
BoostPower=0.03
BoostEffects=(0.1, 0.02, 0.01)
FuelConsumption=0.004
"#;

#[test]
fn test_ladder_lookup_literal_bound() {
    let mut boost = BoostConfig::new(0, 2, 3, 0, BoostCoefficients::default());
    boost.set_actual_boost(2).unwrap();
    assert_eq!(boost.index, 1);
    assert_eq!(boost.actual_boost(), 2);

    assert_eq!(
        boost.set_actual_boost(3),
        Err(BoostError::InvalidSetting { value: 3 })
    );
    assert_eq!(boost.index, 1, "failed lookup must not change the index");
}

#[test]
fn test_file_boost_configuration_is_adopted() {
    let mut series = SampleSeries::new();
    series.load_str(BOOSTED, None).unwrap();

    let boost = series.boost();
    assert!(boost.is_configured());
    assert_eq!(boost.actual_boost(), 2);
    assert_eq!(boost.max_boost(), 5.0);
    assert_eq!(boost.max_boost_setting(), 4);
    assert_eq!(series.context().fuel_consumption, 0.004);
}

#[test]
fn test_changing_boost_recomputes_derived_values() {
    let mut series = SampleSeries::new();
    series.load_str(BOOSTED, None).unwrap();
    let before = series.max_power().map(|s| s.power_kw(series.context())).unwrap();

    series.set_actual_boost(4).unwrap();
    assert_eq!(series.boost().index, 4);
    let after = series.max_power().map(|s| s.power_kw(series.context())).unwrap();
    assert!(after > before);

    // 5000 rpm row, boost 4
    let torque = 90.0 * (1.0 + 4.0 * 0.05);
    let omega = (5000.0 + 1.0 + 4.0 * 0.1) * (PI * 2.0) / 60.0;
    let expected = torque * omega / 1000.0 * (1.0 + 4.0 * 0.03);
    assert!((after - expected).abs() < 1e-9);
}

#[test]
fn test_invalid_setting_keeps_state_and_emits_nothing() {
    let mut series = SampleSeries::new();
    series.load_str(BOOSTED, None).unwrap();

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    series.subscribe(move |e| sink.borrow_mut().push(e));

    let ranges = series.ranges();
    assert!(series.set_actual_boost(7).is_err());
    assert_eq!(series.boost().index, 2);
    assert_eq!(series.ranges(), ranges);
    assert!(events.borrow().is_empty());

    series.set_boost_index(0).unwrap();
    assert_eq!(*events.borrow(), vec![SeriesEvent::BoostChanged]);
}

#[test]
fn test_unchanged_coefficients_emit_nothing() {
    let mut series = SampleSeries::new();
    series.load_str(BOOSTED, None).unwrap();

    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    series.subscribe(move |_| *sink.borrow_mut() += 1);

    let same = series.boost().coefficients;
    series.set_boost_coefficients(same);
    series.set_boost_min(0);
    assert_eq!(*count.borrow(), 0);

    series.set_boost_coefficients(BoostCoefficients {
        torque: 0.0,
        ..same
    });
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_out_of_range_ladder_rejects_load() {
    let mut series = SampleSeries::new();
    series.load_str(BOOSTED, None).unwrap();

    let err = series
        .load_str(
            r#"
RPMTorque=(1000, 0, 100)
EngineBoostRange=(2000000000, 2000000000, 5)
EngineBoostSetting=1
BoostTorque=0.05
BoostPower=0.03
BoostEffects=(0.1, 0.02, 0.01)
"#,
            None,
        )
        .unwrap_err();

    assert!(matches!(err, DefinitionError::InvalidValue { .. }));
    assert!(series.is_empty());
    assert_eq!(*series.boost(), BoostConfig::neutral());
}

#[test]
fn test_neutral_when_keys_incomplete() {
    let mut series = SampleSeries::new();
    series.load_str(BOOSTED, None).unwrap();
    assert!(series.boost().is_configured());

    series
        .load_str("RPMTorque=(1000, 0, 100)\nEngineBoostRange=(0, 1, 5)\n", None)
        .unwrap();
    assert_eq!(*series.boost(), BoostConfig::neutral());
}
