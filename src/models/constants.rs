//! Physical constants and unit factors.

use std::f64::consts::PI;

/// 2π·1 kHz in rad/s.
pub const KHZ: f64 = 2.0 * PI * 1e3;
/// 2π·1 MHz in rad/s.
pub const MHZ: f64 = 2.0 * PI * 1e6;

/// Reduced Planck constant (J·s).
pub const HBAR: f64 = 1.054_571_817e-34;
/// Bohr magneton (J/T).
pub const MU_B: f64 = 9.274_010_078_3e-24;
/// Elementary charge (C).
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Vacuum permittivity (F/m).
pub const EPSILON_0: f64 = 8.854_187_812_8e-12;
/// Atomic mass unit (kg).
pub const AMU: f64 = 1.660_539_066_60e-27;
/// Mass of one ¹⁷¹Yb⁺ ion (kg).
pub const ION_MASS: f64 = 171.0 * AMU;

/// Ion–electrode distance of the modeled device (m).
pub const DIST_ELECTRODE: f64 = 150e-6;

/// Voltage-noise g-factor of a surface-electrode chip trap.
pub const G_FACTOR_CHIP: f64 = 0.2;
/// Voltage-noise g-factor of a macroscopic trap.
pub const G_FACTOR_MACRO: f64 = 0.08;

/// Ramp time constant of shaped pulses (s).
pub const PULSE_RAMP_TIME: f64 = 10e-6;
