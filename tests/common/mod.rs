#![allow(dead_code)]

use hydra_gate::domain::{
    AMBIENT_B_NOISE_RANGE, AMPLITUDE_NOISE_RANGE, Architecture, CCW_ASYMMETRY_RANGE,
    ELECTRIC_NOISE_RANGE, FIXED_FREQUENCY_RANGE, GRADIENT_RANGE, MEAN_PHONON_RANGE, NoiseToggles,
    OptimizeMode, ParameterSet, RABI_POWER_RANGE, RawRange, SYMMETRIC_FLUCTUATION_RANGE,
    VNoiseCorrelation, VOLTAGE_NOISE_RANGE, VibrationalMode, XY_CROSSTALK_RANGE,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn pick(rng: &mut StdRng, range: RawRange) -> i32 {
    rng.gen_range(range.min..=range.max)
}

/// A uniformly drawn parameter set inside every declared range.
pub fn random_params(rng: &mut StdRng) -> ParameterSet {
    ParameterSet {
        gradient: pick(rng, GRADIENT_RANGE),
        rabi_power: pick(rng, RABI_POWER_RANGE),
        electric_noise_psd: pick(rng, ELECTRIC_NOISE_RANGE),
        ambient_b_noise_psd: pick(rng, AMBIENT_B_NOISE_RANGE),
        voltage_noise_psd: pick(rng, VOLTAGE_NOISE_RANGE),
        xy_crosstalk: pick(rng, XY_CROSSTALK_RANGE),
        amplitude_noise_strength: pick(rng, AMPLITUDE_NOISE_RANGE),
        ccw_asymmetry_noise: pick(rng, CCW_ASYMMETRY_RANGE),
        mean_phonon_number: pick(rng, MEAN_PHONON_RANGE),
        symmetric_freq_fluctuation: pick(rng, SYMMETRIC_FLUCTUATION_RANGE),
        fixed_frequency: pick(rng, FIXED_FREQUENCY_RANGE),
        architecture: if rng.gen_bool(0.5) { Architecture::Chip } else { Architecture::Macro },
        vibrational_mode: if rng.gen_bool(0.5) {
            VibrationalMode::AxialCom
        } else {
            VibrationalMode::AxialStretch
        },
        vnoise_correlation: if rng.gen_bool(0.5) {
            VNoiseCorrelation::Correlated
        } else {
            VNoiseCorrelation::Uncorrelated
        },
        toggles: NoiseToggles {
            amplitude_noise: rng.gen_bool(0.5),
            ccw_noise: rng.gen_bool(0.5),
            symmetric_fluctuation: rng.gen_bool(0.5),
            off_resonant: rng.gen_bool(0.5),
            pulse_shaping: rng.gen_bool(0.5),
        },
        optimize: if rng.gen_bool(0.5) { OptimizeMode::Search } else { OptimizeMode::Fixed },
    }
}
