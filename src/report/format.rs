//! Formatted terminal output.
//!
//! Formatting lives here so the model and optimizer stay free of presentation
//! concerns and output changes stay localized.

use crate::domain::{Channel, OperatingPoint, OptimizeMode, ParameterSet, TraceId};
use crate::models::constants::KHZ;
use crate::optimize::ScanPoint;

/// Operating-point table: fidelity, frequency, gate time, heating rate.
pub fn format_operating_point(point: &OperatingPoint) -> String {
    let mut out = String::new();
    out.push_str(&format!("Fidelity     : {:.3} %\n", point.fidelity() * 100.0));
    out.push_str(&format!("Frequency    : {:.1} kHz\n", point.frequency / KHZ));
    out.push_str(&format!("Gate time    : {:.3} ms\n", point.gate_time * 1e3));
    out.push_str(&format!("Heating rate : {:.3} quanta/s\n", point.heating_rate));
    out
}

/// One-line summary of the parameter set (raw slider units).
pub fn format_parameters(params: &ParameterSet) -> String {
    format!(
        "{} | {} | vnoise {} | dzB={} Om={} nuSE={} SBa={} SV={} nuXY={} | {}\n",
        params.architecture.display_name(),
        params.vibrational_mode.display_name(),
        params.vnoise_correlation.display_name(),
        params.gradient,
        params.rabi_power,
        params.electric_noise_psd,
        params.ambient_b_noise_psd,
        params.voltage_noise_psd,
        params.xy_crosstalk,
        match params.optimize {
            OptimizeMode::Search => "search".to_string(),
            OptimizeMode::Fixed => format!("fixed @ {} kHz", params.fixed_frequency),
        }
    )
}

/// Channel contribution table at the operating frequency.
pub fn format_contributions(parts: &[(Channel, f64)], total: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<16} {:>12} {:>8}\n", "channel", "infidelity", "share"));
    out.push_str(&format!("{:-<16} {:-<12} {:-<8}\n", "", "", ""));
    for (channel, value) in parts {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        out.push_str(&format!("{:<16} {:>12.3e} {:>7.1}%\n", channel.label(), value, share));
    }
    out
}

/// Sub-grid optimum line, if a refinement exists.
pub fn format_refined(refined: Option<(f64, f64)>) -> String {
    match refined {
        Some((f, e)) => format!("Refined min  : {:.2} kHz (infidelity {:.4e})\n", f / KHZ, e),
        None => "Refined min  : n/a (minimum at grid edge)\n".to_string(),
    }
}

/// Full per-trace block used by `eval` and `compare`.
pub fn format_trace_report(
    id: TraceId,
    params: &ParameterSet,
    point: &OperatingPoint,
    parts: &[(Channel, f64)],
    refined: Option<(f64, f64)>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== hydra - {id} ===\n"));
    out.push_str(&format_parameters(params));
    out.push('\n');
    out.push_str(&format_operating_point(point));
    out.push_str(&format_refined(refined));
    out.push('\n');
    out.push_str(&format_contributions(parts, point.infidelity));
    out
}

/// Gradient scan table.
pub fn format_scan(rows: &[ScanPoint]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>8} {:>12} {:>12} {:>10}\n", "dzB", "freq_khz", "infidelity", "fidelity"));
    out.push_str(&format!("{:->8} {:->12} {:->12} {:->10}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:>8} {:>12.1} {:>12.4e} {:>9.3}%\n",
            r.gradient,
            r.point.frequency / KHZ,
            r.point.infidelity,
            r.point.fidelity() * 100.0
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> OperatingPoint {
        OperatingPoint {
            frequency: 250.0 * KHZ,
            infidelity: 1.0e-3,
            gate_time: 2.5e-4,
            heating_rate: 12.3456,
        }
    }

    #[test]
    fn operating_point_table_uses_display_units() {
        let s = format_operating_point(&point());
        assert!(s.contains("Fidelity     : 99.900 %"));
        assert!(s.contains("Frequency    : 250.0 kHz"));
        assert!(s.contains("Gate time    : 0.250 ms"));
        assert!(s.contains("Heating rate : 12.346 quanta/s"));
    }

    #[test]
    fn contribution_shares_are_percentages() {
        let parts = [(Channel::Heating, 2.5e-4), (Channel::Decoherence, 7.5e-4)];
        let s = format_contributions(&parts, 1.0e-3);
        assert!(s.contains("25.0%"));
        assert!(s.contains("75.0%"));
    }

    #[test]
    fn refined_line_handles_missing_refinement() {
        assert!(format_refined(None).contains("n/a"));
        assert!(format_refined(Some((300.0 * KHZ, 1e-3))).contains("300.00 kHz"));
    }
}
