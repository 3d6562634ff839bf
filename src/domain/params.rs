//! Raw-unit parameter set and its declared ranges.
//!
//! Every value is stored the way the front-end sliders hold it (integers).
//! Physical quantities are recovered only through [`ParameterSet::physical`]:
//!
//! - decade-encoded noise densities: `linear = 10^(raw / 10)`
//! - Rabi power and fixed frequency: kHz, multiplied by `2π·1e3`
//! - xy crosstalk: tenths of MHz, multiplied by `2π·1e5`

use serde::{Deserialize, Serialize};

use crate::domain::{Architecture, OptimizeMode, VNoiseCorrelation, VibrationalMode};
use crate::error::AppError;
use crate::models::constants::{KHZ, MHZ};

/// Inclusive range of a raw slider value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRange {
    pub name: &'static str,
    pub min: i32,
    pub max: i32,
}

impl RawRange {
    pub const fn new(name: &'static str, min: i32, max: i32) -> Self {
        Self { name, min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn check(&self, value: i32) -> Result<(), AppError> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(AppError::configuration(format!(
                "{} = {value} is outside the declared range [{}, {}].",
                self.name, self.min, self.max
            )))
        }
    }
}

pub const GRADIENT_RANGE: RawRange = RawRange::new("gradient", 25, 200);
pub const RABI_POWER_RANGE: RawRange = RawRange::new("rabi_power", 25, 150);
pub const ELECTRIC_NOISE_RANGE: RawRange = RawRange::new("electric_noise_psd", -80, -40);
pub const AMBIENT_B_NOISE_RANGE: RawRange = RawRange::new("ambient_b_noise_psd", -260, -200);
pub const VOLTAGE_NOISE_RANGE: RawRange = RawRange::new("voltage_noise_psd", -200, -120);
pub const XY_CROSSTALK_RANGE: RawRange = RawRange::new("xy_crosstalk", 10, 50);
pub const FIXED_FREQUENCY_RANGE: RawRange = RawRange::new("fixed_frequency", 100, 500);
pub const AMPLITUDE_NOISE_RANGE: RawRange = RawRange::new("amplitude_noise_strength", -40, -10);
pub const CCW_ASYMMETRY_RANGE: RawRange = RawRange::new("ccw_asymmetry_noise", -180, -60);
pub const MEAN_PHONON_RANGE: RawRange = RawRange::new("mean_phonon_number", -10, 10);
pub const SYMMETRIC_FLUCTUATION_RANGE: RawRange = RawRange::new("symmetric_freq_fluctuation", 0, 100);

/// Optional noise channels. Disabled channels contribute an all-zero curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoiseToggles {
    pub amplitude_noise: bool,
    pub ccw_noise: bool,
    pub symmetric_fluctuation: bool,
    pub off_resonant: bool,
    /// Only meaningful while `off_resonant` is set.
    pub pulse_shaping: bool,
}

/// Physical and operational inputs for one evaluation, in raw slider units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Magnetic gradient (T/m).
    pub gradient: i32,
    /// Rabi power (kHz).
    pub rabi_power: i32,
    /// Decade-encoded `ν·S_E` (V²/m²).
    pub electric_noise_psd: i32,
    /// Decade-encoded ambient magnetic-field noise PSD (T²/Hz).
    pub ambient_b_noise_psd: i32,
    /// Decade-encoded electrode voltage-noise PSD (V²/Hz).
    pub voltage_noise_psd: i32,
    /// Nearest spectator transition detuning (tenths of MHz).
    pub xy_crosstalk: i32,
    /// Decade-encoded relative Rabi amplitude noise.
    pub amplitude_noise_strength: i32,
    /// Decade-encoded counter-rotating asymmetry noise density.
    pub ccw_asymmetry_noise: i32,
    /// Decade-encoded mean phonon number.
    pub mean_phonon_number: i32,
    /// Symmetric trap-frequency fluctuation (Hz).
    pub symmetric_freq_fluctuation: i32,
    /// Target frequency for `OptimizeMode::Fixed` (kHz).
    pub fixed_frequency: i32,
    pub architecture: Architecture,
    pub vibrational_mode: VibrationalMode,
    pub vnoise_correlation: VNoiseCorrelation,
    pub toggles: NoiseToggles,
    pub optimize: OptimizeMode,
}

impl Default for ParameterSet {
    /// The built-in chip preset.
    fn default() -> Self {
        Self {
            gradient: 100,
            rabi_power: 100,
            electric_noise_psd: -70,
            ambient_b_noise_psd: -211,
            voltage_noise_psd: -200,
            xy_crosstalk: 25,
            amplitude_noise_strength: -30,
            ccw_asymmetry_noise: -120,
            mean_phonon_number: 0,
            symmetric_freq_fluctuation: 10,
            fixed_frequency: 300,
            architecture: Architecture::Chip,
            vibrational_mode: VibrationalMode::AxialCom,
            vnoise_correlation: VNoiseCorrelation::Correlated,
            toggles: NoiseToggles::default(),
            optimize: OptimizeMode::Search,
        }
    }
}

/// Linear SI values consumed by the channel formulas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalInputs {
    /// T/m
    pub gradient: f64,
    /// rad/s
    pub rabi_power: f64,
    /// `ν·S_E`, V²/m²
    pub electric_noise: f64,
    /// T²/Hz
    pub ambient_b_noise: f64,
    /// V²/Hz
    pub voltage_noise: f64,
    /// rad/s
    pub xy_crosstalk: f64,
    pub amplitude_noise: f64,
    pub ccw_asymmetry: f64,
    pub mean_phonon_number: f64,
    /// Hz
    pub symmetric_fluctuation: f64,
    /// rad/s
    pub fixed_frequency: f64,
}

/// Decode a decade-encoded raw value.
pub fn decade_to_linear(raw: i32) -> f64 {
    10f64.powf(raw as f64 / 10.0)
}

impl ParameterSet {
    /// Check every raw value against its declared range.
    pub fn validate(&self) -> Result<(), AppError> {
        GRADIENT_RANGE.check(self.gradient)?;
        RABI_POWER_RANGE.check(self.rabi_power)?;
        ELECTRIC_NOISE_RANGE.check(self.electric_noise_psd)?;
        AMBIENT_B_NOISE_RANGE.check(self.ambient_b_noise_psd)?;
        VOLTAGE_NOISE_RANGE.check(self.voltage_noise_psd)?;
        XY_CROSSTALK_RANGE.check(self.xy_crosstalk)?;
        FIXED_FREQUENCY_RANGE.check(self.fixed_frequency)?;
        AMPLITUDE_NOISE_RANGE.check(self.amplitude_noise_strength)?;
        CCW_ASYMMETRY_RANGE.check(self.ccw_asymmetry_noise)?;
        MEAN_PHONON_RANGE.check(self.mean_phonon_number)?;
        SYMMETRIC_FLUCTUATION_RANGE.check(self.symmetric_freq_fluctuation)?;
        Ok(())
    }

    pub fn physical(&self) -> PhysicalInputs {
        PhysicalInputs {
            gradient: self.gradient as f64,
            rabi_power: self.rabi_power as f64 * KHZ,
            electric_noise: decade_to_linear(self.electric_noise_psd),
            ambient_b_noise: decade_to_linear(self.ambient_b_noise_psd),
            voltage_noise: decade_to_linear(self.voltage_noise_psd),
            xy_crosstalk: self.xy_crosstalk as f64 / 10.0 * MHZ,
            amplitude_noise: decade_to_linear(self.amplitude_noise_strength),
            ccw_asymmetry: decade_to_linear(self.ccw_asymmetry_noise),
            mean_phonon_number: decade_to_linear(self.mean_phonon_number),
            symmetric_fluctuation: self.symmetric_freq_fluctuation as f64,
            fixed_frequency: self.fixed_frequency as f64 * KHZ,
        }
    }
}
