//! Command-line parsing for the `hydra` gate-infidelity explorer.
//!
//! Argument parsing stays here; merging arguments into a `ParameterSet` and
//! dispatch live in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Architecture, VNoiseCorrelation, VibrationalMode};
use crate::io::BuiltinPreset;
use crate::math::{DEFAULT_GRID_POINTS, DEFAULT_NU_MAX_KHZ, DEFAULT_NU_MIN_KHZ};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "hydra",
    version,
    about = "Trapped-ion two-qubit gate infidelity vs trap frequency"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one parameter set: operating point, channel table, plot.
    Eval(EvalArgs),
    /// Load up to four presets into the trace slots and compare them.
    Compare(CompareArgs),
    /// Optimum frequency and infidelity across a range of gradients.
    Scan(ScanArgs),
    /// Print, save or validate a preset.
    Preset(PresetArgs),
    /// Launch the interactive TUI (default when no subcommand is given).
    Tui(TuiArgs),
}

/// Frequency grid options.
#[derive(Debug, Args, Clone)]
pub struct GridArgs {
    /// Number of grid points.
    #[arg(long, env = "HYDRA_GRID_POINTS", default_value_t = DEFAULT_GRID_POINTS)]
    pub points: usize,

    /// Lowest COM frequency (kHz).
    #[arg(long, env = "HYDRA_NU_MIN_KHZ", default_value_t = DEFAULT_NU_MIN_KHZ)]
    pub nu_min: f64,

    /// Highest COM frequency (kHz).
    #[arg(long, env = "HYDRA_NU_MAX_KHZ", default_value_t = DEFAULT_NU_MAX_KHZ)]
    pub nu_max: f64,
}

/// Parameter sources and overrides. Numeric overrides are raw slider units.
#[derive(Debug, Args, Clone, Default)]
pub struct ParamArgs {
    /// Built-in preset used as the starting point.
    #[arg(long, value_enum, conflicts_with = "preset_file")]
    pub preset: Option<BuiltinPreset>,

    /// Preset JSON file used as the starting point.
    #[arg(long = "preset-file", value_name = "JSON")]
    pub preset_file: Option<PathBuf>,

    /// Magnetic gradient (T/m, 25..200).
    #[arg(long)]
    pub gradient: Option<i32>,

    /// Rabi power (kHz, 25..150).
    #[arg(long)]
    pub power: Option<i32>,

    /// Electric-field noise exponent nu*S_E (-80..-40).
    #[arg(long, allow_negative_numbers = true)]
    pub enoise: Option<i32>,

    /// Ambient magnetic noise exponent (-260..-200).
    #[arg(long, allow_negative_numbers = true)]
    pub bnoise: Option<i32>,

    /// Electrode voltage noise exponent (-200..-120).
    #[arg(long, allow_negative_numbers = true)]
    pub vnoise_psd: Option<i32>,

    /// Spectator detuning (tenths of MHz, 10..50).
    #[arg(long)]
    pub xy: Option<i32>,

    /// Amplitude noise exponent (-40..-10).
    #[arg(long, allow_negative_numbers = true)]
    pub amp_strength: Option<i32>,

    /// Counter-rotating asymmetry exponent (-180..-60).
    #[arg(long, allow_negative_numbers = true)]
    pub ccw_strength: Option<i32>,

    /// Mean phonon number exponent (-10..10).
    #[arg(long, allow_negative_numbers = true)]
    pub nbar: Option<i32>,

    /// Symmetric frequency fluctuation (Hz, 0..100).
    #[arg(long)]
    pub symfluc: Option<i32>,

    #[arg(long, value_enum)]
    pub arch: Option<Architecture>,

    #[arg(long, value_enum)]
    pub mode: Option<VibrationalMode>,

    #[arg(long, value_enum)]
    pub vnoise: Option<VNoiseCorrelation>,

    /// Include amplitude noise (`--amp-noise false` turns it off).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub amp_noise: Option<bool>,

    /// Include counter-rotating asymmetry noise (`--ccw-noise false` turns it off).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub ccw_noise: Option<bool>,

    /// Include symmetric frequency fluctuation (`--sym-fluc false` turns it off).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub sym_fluc: Option<bool>,

    /// Include off-resonant coupling (`--off-res false` turns it off).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub off_res: Option<bool>,

    /// Apply pulse shaping to the off-resonant channel (`--pulse-shaping false` turns it off).
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub pulse_shaping: Option<bool>,

    /// Evaluate at a fixed COM frequency (kHz, 100..500) instead of searching.
    #[arg(long, value_name = "KHZ")]
    pub fixed: Option<i32>,

    /// Search the grid for the minimum even if the preset is in fixed mode.
    #[arg(long, conflicts_with = "fixed")]
    pub search: bool,
}

/// Plot options shared by `eval` and `compare`.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot only trace totals, without the current trace's channel curves.
    #[arg(long)]
    pub totals_only: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub plot: PlotArgs,

    /// Export the per-channel breakdown to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Presets to load into traces 1..4: `chip`, `macro`, or a JSON file path.
    #[arg(required = true, num_args = 1..=4)]
    pub sources: Vec<String>,

    /// Hide a trace (1-based) in the plot. Repeatable.
    #[arg(long, value_name = "N")]
    pub hide: Vec<usize>,

    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub plot: PlotArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    /// First gradient (T/m).
    #[arg(long, default_value_t = 25)]
    pub from: i32,

    /// Last gradient (T/m).
    #[arg(long, default_value_t = 200)]
    pub to: i32,

    /// Gradient step (T/m).
    #[arg(long, default_value_t = 25)]
    pub step: i32,
}

#[derive(Debug, Args, Clone)]
pub struct PresetArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Write the resolved parameters to a preset file.
    #[arg(long, value_name = "JSON", conflicts_with = "check")]
    pub save: Option<PathBuf>,

    /// Validate a preset file and print its parameters.
    #[arg(long, value_name = "JSON")]
    pub check: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub grid: GridArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    /// Default path for `s`/`l` (save/load preset) in the TUI.
    #[arg(long, value_name = "JSON", default_value = "hydra_preset.json")]
    pub preset_path: PathBuf,
}
