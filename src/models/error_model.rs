//! Per-channel infidelity over a frequency grid.
//!
//! `evaluate` is pure: it validates the parameter set, samples every channel in
//! `Channel::ALL` on the grid and sums them into the total curve. Disabled
//! channels are emitted as zero curves so downstream consumers can index
//! channels positionally.

use crate::domain::{
    Channel, ChannelCurve, ErrorBreakdown, ParameterSet, PhysicalInputs, VibrationalMode,
};
use crate::error::AppError;
use crate::math::FrequencyGrid;
use crate::models::channels::{
    amplitude_error, asymmetry_error, compute_gate_time, decoherence_error, g_factor, heating_error,
    kerr_error, off_resonant_error, rate_com, rate_stretch, symmetric_fluctuation_error,
};
use crate::models::constants::DIST_ELECTRODE;

/// Heating rate of the gate mode at COM frequency `com` (quanta/s).
pub fn mode_heating_rate(mode: VibrationalMode, com: f64, electric_noise: f64) -> f64 {
    match mode {
        VibrationalMode::AxialCom => rate_com(com, electric_noise),
        VibrationalMode::AxialStretch => {
            rate_stretch(com, mode.gate_frequency(com), DIST_ELECTRODE, electric_noise)
        }
    }
}

/// Gate time on the gate mode at COM frequency `com` (s).
pub fn mode_gate_time(mode: VibrationalMode, com: f64, inputs: &PhysicalInputs) -> f64 {
    compute_gate_time(mode.gate_frequency(com), inputs.gradient, inputs.rabi_power)
}

/// Evaluate every noise channel on `grid`.
pub fn evaluate(grid: &FrequencyGrid, params: &ParameterSet) -> Result<ErrorBreakdown, AppError> {
    params.validate()?;

    let inputs = params.physical();
    let mode = params.vibrational_mode;
    let toggles = params.toggles;
    let g = g_factor(params.architecture, params.vnoise_correlation);
    let n = grid.len();

    let mut curves: Vec<Vec<f64>> = Channel::ALL.iter().map(|_| Vec::with_capacity(n)).collect();

    for &com in grid.values() {
        let gate = mode.gate_frequency(com);
        let t_gate = mode_gate_time(mode, com, &inputs);
        let rate = mode_heating_rate(mode, com, inputs.electric_noise);

        for (slot, channel) in curves.iter_mut().zip(Channel::ALL) {
            let value = match channel {
                Channel::Heating => heating_error(rate, t_gate),
                Channel::Decoherence => decoherence_error(gate, t_gate, &inputs, g),
                Channel::Kerr => match mode {
                    VibrationalMode::AxialStretch => {
                        kerr_error(com, gate, t_gate, inputs.mean_phonon_number)
                    }
                    VibrationalMode::AxialCom => 0.0,
                },
                Channel::OffResonant if toggles.off_resonant => {
                    off_resonant_error(gate, &inputs, toggles.pulse_shaping)
                }
                Channel::Amplitude if toggles.amplitude_noise => {
                    amplitude_error(inputs.amplitude_noise)
                }
                Channel::Asymmetry if toggles.ccw_noise => {
                    asymmetry_error(gate, t_gate, inputs.ccw_asymmetry)
                }
                Channel::SymmetricFluctuation if toggles.symmetric_fluctuation => {
                    symmetric_fluctuation_error(
                        t_gate,
                        inputs.symmetric_fluctuation,
                        inputs.mean_phonon_number,
                    )
                }
                Channel::OffResonant
                | Channel::Amplitude
                | Channel::Asymmetry
                | Channel::SymmetricFluctuation => 0.0,
            };
            slot.push(value);
        }
    }

    let mut total = vec![0.0; n];
    for curve in &curves {
        for (acc, v) in total.iter_mut().zip(curve) {
            *acc += v;
        }
    }

    if let Some(i) = total.iter().position(|v| !v.is_finite() || *v < 0.0) {
        return Err(AppError::computation(format!(
            "Error model produced an invalid total infidelity {} at grid index {i}.",
            total[i]
        )));
    }

    let channels = Channel::ALL
        .into_iter()
        .zip(curves)
        .map(|(channel, values)| ChannelCurve { channel, values })
        .collect();

    Ok(ErrorBreakdown {
        frequencies: grid.values().to_vec(),
        channels,
        total,
    })
}
