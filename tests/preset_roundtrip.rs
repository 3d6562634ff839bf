mod common;

use hydra_gate::domain::{
    AMBIENT_B_NOISE_RANGE, ParameterSet, RABI_POWER_RANGE, TraceId, XY_CROSSTALK_RANGE,
};
use hydra_gate::error::ErrorKind;
use hydra_gate::io::{BuiltinPreset, deserialize, read_preset_file, serialize, write_preset_file};
use hydra_gate::math::FrequencyGrid;
use hydra_gate::traces::TraceManager;

#[test]
fn random_parameter_sets_round_trip_exactly() {
    let mut rng = common::rng(42);
    for _ in 0..500 {
        let p = common::random_params(&mut rng);
        let json = serialize(&p).unwrap();
        assert_eq!(deserialize(&json).unwrap(), p);
    }
}

#[test]
fn range_ends_round_trip() {
    let mut p = ParameterSet::default();
    p.ambient_b_noise_psd = AMBIENT_B_NOISE_RANGE.min;
    p.rabi_power = RABI_POWER_RANGE.max;
    p.xy_crosstalk = XY_CROSSTALK_RANGE.min;
    p.mean_phonon_number = -10;
    p.amplitude_noise_strength = -11;
    assert_eq!(deserialize(&serialize(&p).unwrap()).unwrap(), p);
}

#[test]
fn base_schema_without_extensions_loads() {
    let json = r#"{
        "slider": { "dzB": 150, "Om": 60, "nuSE": -6.5, "SBa": -23.3, "SV": -15.0,
                    "nuXY": 3.7, "chi": -9.9, "SA": -2.2, "nbar": 0.5, "symfluc": 42 },
        "architecture": 1, "vnoise": 1, "vib_mode": 1,
        "toggles": { "amp_noise": true, "ccw_noise": false, "sym_fluc": true }
    }"#;
    let p = deserialize(json).unwrap();
    assert_eq!(p.gradient, 150);
    assert_eq!(p.electric_noise_psd, -65);
    assert_eq!(p.ambient_b_noise_psd, -233);
    assert_eq!(p.xy_crosstalk, 37);
    assert_eq!(p.ccw_asymmetry_noise, -99);
    assert_eq!(p.mean_phonon_number, 5);
    assert!(p.toggles.amplitude_noise && p.toggles.symmetric_fluctuation);
}

#[test]
fn out_of_range_preset_is_rejected() {
    let json = BuiltinPreset::Chip.json().replace("\"SV\": -20.0", "\"SV\": -10.0");
    let err = deserialize(&json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn trace_serialize_matches_editor() {
    let mut mgr = TraceManager::new(FrequencyGrid::default(), BuiltinPreset::Macro.load().unwrap()).unwrap();
    let json = mgr.serialize(TraceId::ALL[0]).unwrap();
    assert_eq!(deserialize(&json).unwrap(), *mgr.editor());

    mgr.select_trace(TraceId::ALL[1]).unwrap();
    mgr.load_preset(BuiltinPreset::Chip.json()).unwrap();
    let first = deserialize(&mgr.serialize(TraceId::ALL[0]).unwrap()).unwrap();
    assert_eq!(first, BuiltinPreset::Macro.load().unwrap());
}

#[test]
fn preset_file_round_trip() {
    let path = std::env::temp_dir().join(format!("hydra_preset_{}.json", std::process::id()));
    let p = BuiltinPreset::Macro.load().unwrap();
    write_preset_file(&path, &p).unwrap();
    assert_eq!(read_preset_file(&path).unwrap(), p);
    let _ = std::fs::remove_file(&path);
}
