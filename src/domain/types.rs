//! Shared domain types.
//!
//! Enums carry both a serde name (for logs/exports) and the integer index used
//! by the preset schema, so the JSON layer never has to guess.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Number of independently configurable traces.
pub const TRACE_COUNT: usize = 4;

/// Trap architecture. Selects the voltage-noise g-factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    Chip,
    Macro,
}

impl Architecture {
    pub fn from_index(index: i64) -> Result<Self, AppError> {
        match index {
            0 => Ok(Architecture::Chip),
            1 => Ok(Architecture::Macro),
            other => Err(AppError::configuration(format!(
                "Invalid architecture index {other} (expected 0=chip or 1=macro)."
            ))),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Architecture::Chip => 0,
            Architecture::Macro => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Architecture::Chip => "chip",
            Architecture::Macro => "macro",
        }
    }
}

/// Whether voltage noise is modeled as correlated across the relevant electrodes.
///
/// `Uncorrelated` forces the g-factor to zero regardless of architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VNoiseCorrelation {
    Correlated,
    Uncorrelated,
}

impl VNoiseCorrelation {
    /// Index 0 is correlated; every other index reads as uncorrelated.
    pub fn from_index(index: i64) -> Result<Self, AppError> {
        match index {
            0 => Ok(VNoiseCorrelation::Correlated),
            _ => Ok(VNoiseCorrelation::Uncorrelated),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            VNoiseCorrelation::Correlated => 0,
            VNoiseCorrelation::Uncorrelated => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            VNoiseCorrelation::Correlated => "correlated",
            VNoiseCorrelation::Uncorrelated => "uncorrelated",
        }
    }
}

/// Vibrational mode used for the gate.
///
/// The stretch mode of a two-ion chain sits at `sqrt(3)` times the COM frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VibrationalMode {
    #[value(name = "com")]
    AxialCom,
    #[value(name = "stretch")]
    AxialStretch,
}

impl VibrationalMode {
    pub fn from_index(index: i64) -> Result<Self, AppError> {
        match index {
            0 => Ok(VibrationalMode::AxialCom),
            1 => Ok(VibrationalMode::AxialStretch),
            other => Err(AppError::configuration(format!(
                "Invalid vib_mode index {other} (expected 0=axial COM or 1=axial stretch)."
            ))),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            VibrationalMode::AxialCom => 0,
            VibrationalMode::AxialStretch => 1,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            VibrationalMode::AxialCom => "axial COM",
            VibrationalMode::AxialStretch => "axial stretch",
        }
    }

    /// Angular frequency of the gate mode for a given COM frequency.
    pub fn gate_frequency(self, com_frequency: f64) -> f64 {
        match self {
            VibrationalMode::AxialCom => com_frequency,
            VibrationalMode::AxialStretch => com_frequency * 3f64.sqrt(),
        }
    }
}

/// How the operating frequency is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeMode {
    /// Grid search for the minimum total infidelity.
    Search,
    /// Interpolate the total infidelity at `ParameterSet::fixed_frequency`.
    Fixed,
}

/// Independent noise channels, in the order they appear in an `ErrorBreakdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Heating,
    Decoherence,
    Kerr,
    OffResonant,
    Amplitude,
    Asymmetry,
    SymmetricFluctuation,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::Heating,
        Channel::Decoherence,
        Channel::Kerr,
        Channel::OffResonant,
        Channel::Amplitude,
        Channel::Asymmetry,
        Channel::SymmetricFluctuation,
    ];

    /// Short column label for tables and CSV headers.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Heating => "heating",
            Channel::Decoherence => "decoherence",
            Channel::Kerr => "kerr",
            Channel::OffResonant => "off_resonant",
            Channel::Amplitude => "amplitude",
            Channel::Asymmetry => "asymmetry",
            Channel::SymmetricFluctuation => "sym_fluctuation",
        }
    }

    /// Plot marker for per-channel curves.
    pub fn marker(self) -> char {
        match self {
            Channel::Heating => 'h',
            Channel::Decoherence => 'd',
            Channel::Kerr => 'k',
            Channel::OffResonant => 'o',
            Channel::Amplitude => 'a',
            Channel::Asymmetry => 'c',
            Channel::SymmetricFluctuation => 's',
        }
    }
}

/// One noise channel sampled on the evaluation grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelCurve {
    pub channel: Channel,
    pub values: Vec<f64>,
}

/// Output of one `ErrorModel` evaluation.
///
/// Every channel in `Channel::ALL` is present, in that order, even when the
/// channel is disabled (then its curve is all zeros). `total` is the pointwise
/// sum of all channel curves.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBreakdown {
    /// Angular frequencies (rad/s) of the grid the curves are sampled on.
    pub frequencies: Vec<f64>,
    pub channels: Vec<ChannelCurve>,
    pub total: Vec<f64>,
}

impl ErrorBreakdown {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Curve of a single channel.
    pub fn channel(&self, channel: Channel) -> &[f64] {
        self.channels
            .iter()
            .find(|c| c.channel == channel)
            .map(|c| c.values.as_slice())
            .unwrap_or(&[])
    }

    /// Channel curves with at least one positive sample, in `Channel::ALL` order.
    pub fn active_channels(&self) -> impl Iterator<Item = &ChannelCurve> {
        self.channels.iter().filter(|c| c.values.iter().any(|&v| v > 0.0))
    }
}

/// Derived operating point of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// COM angular frequency (rad/s).
    pub frequency: f64,
    pub infidelity: f64,
    /// Gate duration (s) on the gate mode.
    pub gate_time: f64,
    /// Heating rate (quanta/s) of the gate mode.
    pub heating_rate: f64,
}

impl OperatingPoint {
    pub fn fidelity(&self) -> f64 {
        1.0 - self.infidelity
    }
}

/// Identifier of one of the `TRACE_COUNT` trace slots (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TraceId(u8);

impl TraceId {
    pub const ALL: [TraceId; TRACE_COUNT] = [TraceId(0), TraceId(1), TraceId(2), TraceId(3)];

    pub fn new(index: usize) -> Result<Self, AppError> {
        if index >= TRACE_COUNT {
            return Err(AppError::configuration(format!(
                "Invalid trace id {index} (expected 0..{}).",
                TRACE_COUNT - 1
            )));
        }
        Ok(TraceId(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trace {}", self.0 + 1)
    }
}

/// Display/update flags of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceFlags {
    /// Update suppressed: the trace keeps its last computed result.
    pub frozen: bool,
    /// Display suppressed: consumers render a placeholder.
    pub hidden: bool,
}
