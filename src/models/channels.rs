//! Closed-form noise-channel contributions.
//!
//! All frequency arguments are angular (rad/s). `com` is the COM frequency of
//! the two-ion chain; `gate` is the frequency of the mode the gate runs on
//! (`com` itself, or `sqrt(3)·com` for the stretch mode). Every function is a
//! small pure function returning a non-negative value for physical inputs.

use std::f64::consts::PI;

use crate::domain::{Architecture, PhysicalInputs, VNoiseCorrelation};
use crate::models::constants::{
    DIST_ELECTRODE, ELEMENTARY_CHARGE, EPSILON_0, G_FACTOR_CHIP, G_FACTOR_MACRO, HBAR, ION_MASS,
    MU_B, PULSE_RAMP_TIME,
};

/// Ground-state extent `sqrt(ħ / 2mω)` (m).
pub fn ground_state_extent(omega: f64) -> f64 {
    (HBAR / (2.0 * ION_MASS * omega)).sqrt()
}

/// Qubit-frequency slope along the trap axis, `μ_B·∂B/ħ` (rad/s per m).
pub fn gradient_coupling(gradient: f64) -> f64 {
    MU_B * gradient / HBAR
}

/// Effective Lamb–Dicke parameter of the magnetic gradient.
pub fn effective_lamb_dicke(omega: f64, gradient: f64) -> f64 {
    gradient_coupling(gradient) * ground_state_extent(omega) / omega
}

/// Equilibrium spacing of a two-ion crystal (m).
pub fn ion_spacing(com: f64) -> f64 {
    let e2 = ELEMENTARY_CHARGE * ELEMENTARY_CHARGE;
    (e2 / (2.0 * PI * EPSILON_0 * ION_MASS * com * com)).cbrt()
}

/// Duration of a single-loop two-qubit gate on a mode at `gate` (s).
pub fn compute_gate_time(gate: f64, gradient: f64, rabi_power: f64) -> f64 {
    PI / (effective_lamb_dicke(gate, gradient) * rabi_power)
}

/// COM heating rate (quanta/s) for a frequency-scaled field-noise density `ν·S_E`.
pub fn rate_com(com: f64, electric_noise: f64) -> f64 {
    let e2 = ELEMENTARY_CHARGE * ELEMENTARY_CHARGE;
    e2 * electric_noise / (4.0 * ION_MASS * HBAR * com * com)
}

/// Stretch-mode heating rate (quanta/s).
///
/// Only field gradients across the crystal excite the stretch mode, so the
/// uniform-field rate at `stretch` is suppressed by `(Δz / d)²`.
pub fn rate_stretch(com: f64, stretch: f64, electrode_distance: f64, electric_noise: f64) -> f64 {
    let e2 = ELEMENTARY_CHARGE * ELEMENTARY_CHARGE;
    let field_psd = electric_noise / stretch;
    let suppression = (ion_spacing(com) / electrode_distance).powi(2);
    e2 * field_psd * suppression / (4.0 * ION_MASS * HBAR * stretch)
}

/// Architecture g-factor, or zero when voltage noise is uncorrelated.
pub fn g_factor(architecture: Architecture, correlation: VNoiseCorrelation) -> f64 {
    match correlation {
        VNoiseCorrelation::Uncorrelated => 0.0,
        VNoiseCorrelation::Correlated => match architecture {
            Architecture::Chip => G_FACTOR_CHIP,
            Architecture::Macro => G_FACTOR_MACRO,
        },
    }
}

/// Heating infidelity for a given heating rate and gate time.
pub fn heating_error(heating_rate: f64, gate_time: f64) -> f64 {
    heating_rate * gate_time
}

/// Dephasing infidelity from ambient field noise and electrode voltage noise.
pub fn decoherence_error(gate: f64, gate_time: f64, inputs: &PhysicalInputs, g_factor: f64) -> f64 {
    let ambient_rate = (MU_B / HBAR).powi(2) * inputs.ambient_b_noise / 2.0;

    // Voltage noise displaces the ion by e·δV·g / (m ω² d) inside the gradient.
    let displacement_per_volt =
        g_factor * ELEMENTARY_CHARGE / (ION_MASS * gate * gate * DIST_ELECTRODE);
    let voltage_rate =
        (gradient_coupling(inputs.gradient) * displacement_per_volt).powi(2) * inputs.voltage_noise / 2.0;

    gate_time * (ambient_rate + voltage_rate)
}

/// Cross-Kerr dephasing of the stretch mode by thermal COM occupation.
pub fn kerr_error(com: f64, gate: f64, gate_time: f64, mean_phonon_number: f64) -> f64 {
    let ratio = ground_state_extent(com) / ion_spacing(com);
    let chi = gate * ratio * ratio;
    let spread = (mean_phonon_number * (mean_phonon_number + 1.0)).sqrt();
    (chi * spread * gate_time).powi(2) / 4.0
}

/// Off-resonant excitation of the carrier and of the nearest spectator transition.
pub fn off_resonant_error(gate: f64, inputs: &PhysicalInputs, pulse_shaping: bool) -> f64 {
    let suppression = |detuning: f64| {
        if pulse_shaping {
            (-detuning * PULSE_RAMP_TIME).exp()
        } else {
            1.0
        }
    };
    let eta = effective_lamb_dicke(gate, inputs.gradient);
    let carrier = (eta * inputs.rabi_power / gate).powi(2) * suppression(gate);
    let spectator = (inputs.rabi_power / inputs.xy_crosstalk).powi(2) * suppression(inputs.xy_crosstalk);
    carrier + spectator
}

/// Rabi amplitude noise: flat in trap frequency.
pub fn amplitude_error(amplitude_noise: f64) -> f64 {
    (PI * amplitude_noise / 2.0).powi(2)
}

/// Counter-rotating asymmetry noise accumulated over the gate.
pub fn asymmetry_error(gate: f64, gate_time: f64, ccw_asymmetry: f64) -> f64 {
    ccw_asymmetry * gate * gate_time / 2.0
}

/// Loop-closure error from a symmetric trap-frequency fluctuation `δν` (Hz).
pub fn symmetric_fluctuation_error(gate_time: f64, fluctuation_hz: f64, mean_phonon_number: f64) -> f64 {
    let phase = 2.0 * PI * fluctuation_hz * gate_time;
    (2.0 * mean_phonon_number + 1.0) * phase * phase / 4.0
}
