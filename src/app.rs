//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the tracing subscriber
//! - parses CLI arguments and merges them into a `ParameterSet`
//! - runs the shared pipeline
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{
    Cli, Command, CompareArgs, EvalArgs, GridArgs, ParamArgs, PresetArgs, ScanArgs,
};
use crate::domain::{OptimizeMode, ParameterSet};
use crate::error::AppError;
use crate::io::{BuiltinPreset, read_preset_file};
use crate::math::FrequencyGrid;

pub mod pipeline;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "HYDRA_LOG";

/// Entry point for the `hydra` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();

    // `hydra` and `hydra --gradient 50` behave like `hydra tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    let default_filter = match cli.command {
        Command::Tui(_) => "off",
        _ => "warn",
    };
    init_logging(default_filter);

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Compare(args) => handle_compare(args),
        Command::Scan(args) => handle_scan(args),
        Command::Preset(args) => handle_preset(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn init_logging(default_directive: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let grid = grid_from_args(&args.grid)?;
    let params = params_from_args(&args.params)?;
    let manager = crate::traces::TraceManager::new(grid, params)?;
    let id = manager.current();
    let Some(trace) = manager.current_trace() else {
        return Err(AppError::computation("Current trace was not initialized."));
    };

    let summary = pipeline::summarize(trace)?;
    println!(
        "{}",
        crate::report::format_trace_report(id, &trace.params, &trace.point, &summary.contributions, summary.refined)
    );

    if !args.plot.no_plot {
        let channels = !args.plot.totals_only;
        println!(
            "{}",
            crate::plot::render_trace_plot(&manager, channels, args.plot.width, args.plot.height)
        );
    }

    if let Some(path) = &args.export {
        crate::io::write_breakdown_csv(path, &trace.breakdown)?;
        info!(path = %path.display(), "breakdown exported");
    }
    Ok(())
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let grid = grid_from_args(&args.grid)?;
    let sets = args
        .sources
        .iter()
        .map(|s| pipeline::resolve_source(s))
        .collect::<Result<Vec<_>, _>>()?;
    let manager = pipeline::load_traces(grid, sets, &args.hide)?;

    for id in crate::domain::TraceId::ALL {
        let Some(trace) = manager.trace(id) else {
            continue;
        };
        let summary = pipeline::summarize(trace)?;
        println!(
            "{}",
            crate::report::format_trace_report(id, &trace.params, &trace.point, &summary.contributions, summary.refined)
        );
    }

    if !args.plot.no_plot {
        let channels = !args.plot.totals_only;
        println!(
            "{}",
            crate::plot::render_trace_plot(&manager, channels, args.plot.width, args.plot.height)
        );
    }
    Ok(())
}

fn handle_scan(args: ScanArgs) -> Result<(), AppError> {
    let grid = grid_from_args(&args.grid)?;
    let params = params_from_args(&args.params)?;
    let rows = crate::optimize::scan_gradients(&grid, &params, args.from, args.to, args.step)?;

    println!("{}", crate::report::format_parameters(&params));
    println!("{}", crate::report::format_scan(&rows));

    let best = rows
        .iter()
        .min_by(|a, b| a.point.infidelity.total_cmp(&b.point.infidelity));
    if let Some(best) = best {
        println!(
            "Best gradient: {} T/m ({:.3} % fidelity)",
            best.gradient,
            best.point.fidelity() * 100.0
        );
    }
    Ok(())
}

fn handle_preset(args: PresetArgs) -> Result<(), AppError> {
    if let Some(path) = &args.check {
        let params = read_preset_file(path)?;
        print!("{}", crate::report::format_parameters(&params));
        println!("Preset '{}' is valid.", path.display());
        return Ok(());
    }

    let params = params_from_args(&args.params)?;
    match &args.save {
        Some(path) => {
            crate::io::write_preset_file(path, &params)?;
            println!("Saved preset to '{}'.", path.display());
        }
        None => println!("{}", crate::io::serialize(&params)?),
    }
    Ok(())
}

pub fn grid_from_args(args: &GridArgs) -> Result<FrequencyGrid, AppError> {
    pipeline::build_grid(args.points, args.nu_min, args.nu_max)
}

/// Merge preset source, raw overrides and toggles into a validated set.
pub fn params_from_args(args: &ParamArgs) -> Result<ParameterSet, AppError> {
    let mut p = match &args.preset_file {
        Some(path) => read_preset_file(path)?,
        None => args.preset.unwrap_or(BuiltinPreset::Chip).load()?,
    };

    let overrides = [
        (&mut p.gradient, args.gradient),
        (&mut p.rabi_power, args.power),
        (&mut p.electric_noise_psd, args.enoise),
        (&mut p.ambient_b_noise_psd, args.bnoise),
        (&mut p.voltage_noise_psd, args.vnoise_psd),
        (&mut p.xy_crosstalk, args.xy),
        (&mut p.amplitude_noise_strength, args.amp_strength),
        (&mut p.ccw_asymmetry_noise, args.ccw_strength),
        (&mut p.mean_phonon_number, args.nbar),
        (&mut p.symmetric_freq_fluctuation, args.symfluc),
    ];
    for (field, value) in overrides {
        if let Some(v) = value {
            *field = v;
        }
    }

    if let Some(arch) = args.arch {
        p.architecture = arch;
    }
    if let Some(mode) = args.mode {
        p.vibrational_mode = mode;
    }
    if let Some(vnoise) = args.vnoise {
        p.vnoise_correlation = vnoise;
    }

    let toggles = [
        (&mut p.toggles.amplitude_noise, args.amp_noise),
        (&mut p.toggles.ccw_noise, args.ccw_noise),
        (&mut p.toggles.symmetric_fluctuation, args.sym_fluc),
        (&mut p.toggles.off_resonant, args.off_res),
        (&mut p.toggles.pulse_shaping, args.pulse_shaping),
    ];
    for (toggle, value) in toggles {
        if let Some(v) = value {
            *toggle = v;
        }
    }

    if let Some(khz) = args.fixed {
        p.fixed_frequency = khz;
        p.optimize = OptimizeMode::Fixed;
    } else if args.search {
        p.optimize = OptimizeMode::Search;
    }

    p.validate()?;
    Ok(p)
}

/// Rewrite argv so `hydra` defaults to `hydra tui`.
///
/// Rules:
/// - `hydra`                       -> `hydra tui`
/// - `hydra --gradient 50 ...`     -> `hydra tui --gradient 50 ...`
/// - `hydra --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "eval" | "compare" | "scan" | "preset" | "tui");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Architecture, VibrationalMode};

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(argv(&["hydra"])), argv(&["hydra", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["hydra", "--gradient", "50"])),
            argv(&["hydra", "tui", "--gradient", "50"])
        );
        assert_eq!(rewrite_args(argv(&["hydra", "eval"])), argv(&["hydra", "eval"]));
        assert_eq!(rewrite_args(argv(&["hydra", "--help"])), argv(&["hydra", "--help"]));
    }

    #[test]
    fn overrides_apply_on_top_of_preset() {
        let args = ParamArgs {
            preset: Some(BuiltinPreset::Macro),
            gradient: Some(120),
            mode: Some(VibrationalMode::AxialStretch),
            amp_noise: Some(true),
            fixed: Some(250),
            ..Default::default()
        };
        let p = params_from_args(&args).unwrap();
        assert_eq!(p.architecture, Architecture::Macro);
        assert_eq!(p.gradient, 120);
        assert_eq!(p.vibrational_mode, VibrationalMode::AxialStretch);
        assert!(p.toggles.amplitude_noise);
        assert_eq!(p.optimize, OptimizeMode::Fixed);
        assert_eq!(p.fixed_frequency, 250);
    }

    #[test]
    fn out_of_range_override_is_rejected() {
        let args = ParamArgs {
            power: Some(500),
            ..Default::default()
        };
        assert!(params_from_args(&args).is_err());
    }

    #[test]
    fn preset_toggles_and_fixed_mode_can_be_switched_off() {
        let mut stored = ParameterSet::default();
        stored.toggles.amplitude_noise = true;
        stored.toggles.off_resonant = true;
        stored.optimize = OptimizeMode::Fixed;
        let path = std::env::temp_dir().join(format!("hydra_app_override_{}.json", std::process::id()));
        crate::io::write_preset_file(&path, &stored).unwrap();

        let args = ParamArgs {
            preset_file: Some(path.clone()),
            amp_noise: Some(false),
            search: true,
            ..Default::default()
        };
        let p = params_from_args(&args).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!p.toggles.amplitude_noise);
        assert!(p.toggles.off_resonant);
        assert_eq!(p.optimize, OptimizeMode::Search);
    }
}
