//! Preset JSON (de)serialization.
//!
//! The preset schema mirrors what the front-end saves:
//!
//! ```text
//! {
//!   "slider": { "dzB": int, "Om": int, "nuSE": float, "SBa": float, "SV": float,
//!               "nuXY": float, "chi": float, "SA": float, "nbar": float, "symfluc": int },
//!   "architecture": 0|1, "vnoise": 0|1, "vib_mode": 0|1,
//!   "toggles": { "amp_noise": bool, "ccw_noise": bool, "sym_fluc": bool }
//! }
//! ```
//!
//! Decimal slider fields are the raw slider value divided by ten (`nuSE = -7.0`
//! is raw `-70`, i.e. a linear density of `1e-7`). Optional extension fields
//! (`toggles.off_res`, `toggles.pulse_shaping`, `optimize`, `fix_nu`) make the
//! round trip exact; documents without them load with their defaults.

use std::fs::File;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    Architecture, NoiseToggles, OptimizeMode, ParameterSet, VNoiseCorrelation, VibrationalMode,
};
use crate::error::AppError;

const CHIP_PRESET_JSON: &str = include_str!("../../presets/chip_preset.json");
const MACRO_PRESET_JSON: &str = include_str!("../../presets/macro_preset.json");

/// Presets shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinPreset {
    Chip,
    Macro,
}

impl BuiltinPreset {
    pub fn json(self) -> &'static str {
        match self {
            BuiltinPreset::Chip => CHIP_PRESET_JSON,
            BuiltinPreset::Macro => MACRO_PRESET_JSON,
        }
    }

    pub fn load(self) -> Result<ParameterSet, AppError> {
        deserialize(self.json())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
struct SliderValues {
    dzB: i64,
    Om: i64,
    nuSE: f64,
    SBa: f64,
    SV: f64,
    nuXY: f64,
    chi: f64,
    SA: f64,
    nbar: f64,
    symfluc: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PresetToggles {
    amp_noise: bool,
    ccw_noise: bool,
    sym_fluc: bool,
    #[serde(default)]
    off_res: bool,
    #[serde(default)]
    pulse_shaping: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PresetDocument {
    slider: SliderValues,
    architecture: i64,
    vnoise: i64,
    vib_mode: i64,
    toggles: PresetToggles,
    #[serde(default = "default_optimize")]
    optimize: bool,
    #[serde(default = "default_fix_nu")]
    fix_nu: i64,
}

fn default_optimize() -> bool {
    true
}

fn default_fix_nu() -> i64 {
    300
}

/// Serialize a parameter set to preset JSON.
pub fn serialize(params: &ParameterSet) -> Result<String, AppError> {
    let doc = PresetDocument {
        slider: SliderValues {
            dzB: params.gradient as i64,
            Om: params.rabi_power as i64,
            nuSE: from_raw_tenths(params.electric_noise_psd),
            SBa: from_raw_tenths(params.ambient_b_noise_psd),
            SV: from_raw_tenths(params.voltage_noise_psd),
            nuXY: from_raw_tenths(params.xy_crosstalk),
            chi: from_raw_tenths(params.ccw_asymmetry_noise),
            SA: from_raw_tenths(params.amplitude_noise_strength),
            nbar: from_raw_tenths(params.mean_phonon_number),
            symfluc: params.symmetric_freq_fluctuation as i64,
        },
        architecture: params.architecture.index() as i64,
        vnoise: params.vnoise_correlation.index() as i64,
        vib_mode: params.vibrational_mode.index() as i64,
        toggles: PresetToggles {
            amp_noise: params.toggles.amplitude_noise,
            ccw_noise: params.toggles.ccw_noise,
            sym_fluc: params.toggles.symmetric_fluctuation,
            off_res: params.toggles.off_resonant,
            pulse_shaping: params.toggles.pulse_shaping,
        },
        optimize: params.optimize == OptimizeMode::Search,
        fix_nu: params.fixed_frequency as i64,
    };

    serde_json::to_string_pretty(&doc)
        .map_err(|e| AppError::computation(format!("Failed to encode preset JSON: {e}")))
}

/// Parse and validate preset JSON.
///
/// Missing fields, malformed JSON, unknown enum indices and out-of-range values
/// are all configuration errors; nothing is clamped.
pub fn deserialize(json: &str) -> Result<ParameterSet, AppError> {
    let doc: PresetDocument = serde_json::from_str(json)
        .map_err(|e| AppError::configuration(format!("Invalid preset JSON: {e}")))?;

    let s = &doc.slider;
    let params = ParameterSet {
        gradient: to_raw_int("dzB", s.dzB)?,
        rabi_power: to_raw_int("Om", s.Om)?,
        electric_noise_psd: to_raw_tenths("nuSE", s.nuSE)?,
        ambient_b_noise_psd: to_raw_tenths("SBa", s.SBa)?,
        voltage_noise_psd: to_raw_tenths("SV", s.SV)?,
        xy_crosstalk: to_raw_tenths("nuXY", s.nuXY)?,
        amplitude_noise_strength: to_raw_tenths("SA", s.SA)?,
        ccw_asymmetry_noise: to_raw_tenths("chi", s.chi)?,
        mean_phonon_number: to_raw_tenths("nbar", s.nbar)?,
        symmetric_freq_fluctuation: to_raw_int("symfluc", s.symfluc)?,
        fixed_frequency: to_raw_int("fix_nu", doc.fix_nu)?,
        architecture: Architecture::from_index(doc.architecture)?,
        vibrational_mode: VibrationalMode::from_index(doc.vib_mode)?,
        vnoise_correlation: VNoiseCorrelation::from_index(doc.vnoise)?,
        toggles: NoiseToggles {
            amplitude_noise: doc.toggles.amp_noise,
            ccw_noise: doc.toggles.ccw_noise,
            symmetric_fluctuation: doc.toggles.sym_fluc,
            off_resonant: doc.toggles.off_res,
            pulse_shaping: doc.toggles.pulse_shaping,
        },
        optimize: if doc.optimize {
            OptimizeMode::Search
        } else {
            OptimizeMode::Fixed
        },
    };

    params.validate()?;
    debug!(?params, "preset decoded");
    Ok(params)
}

/// Read and validate a preset file.
pub fn read_preset_file(path: &Path) -> Result<ParameterSet, AppError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| AppError::file_io(format!("Failed to read preset '{}': {e}", path.display())))?;
    let params = deserialize(&json)?;
    info!(path = %path.display(), "loaded preset");
    Ok(params)
}

/// Write a parameter set as a preset file.
pub fn write_preset_file(path: &Path, params: &ParameterSet) -> Result<(), AppError> {
    let json = serialize(params)?;
    let mut file = File::create(path)
        .map_err(|e| AppError::file_io(format!("Failed to create preset '{}': {e}", path.display())))?;
    std::io::Write::write_all(&mut file, json.as_bytes())
        .map_err(|e| AppError::file_io(format!("Failed to write preset '{}': {e}", path.display())))?;
    info!(path = %path.display(), "saved preset");
    Ok(())
}

/// Slack for float noise such as `-21.1 * 10.0`.
const TENTHS_TOLERANCE: f64 = 1e-6;

fn from_raw_tenths(raw: i32) -> f64 {
    raw as f64 / 10.0
}

fn to_raw_tenths(field: &str, value: f64) -> Result<i32, AppError> {
    let scaled = value * 10.0;
    if !scaled.is_finite() || scaled.abs() > i32::MAX as f64 {
        return Err(AppError::configuration(format!(
            "Preset field '{field}' has an unusable value {value}."
        )));
    }
    let raw = scaled.round();
    if (scaled - raw).abs() > TENTHS_TOLERANCE {
        return Err(AppError::configuration(format!(
            "Preset field '{field}' must be a whole number of tenths, got {value}."
        )));
    }
    Ok(raw as i32)
}

fn to_raw_int(field: &str, value: i64) -> Result<i32, AppError> {
    i32::try_from(value).map_err(|_| {
        AppError::configuration(format!("Preset field '{field}' is out of range: {value}."))
    })
}
