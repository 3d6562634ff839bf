//! Export an error breakdown to CSV.
//!
//! One row per grid point: COM frequency in kHz, every channel in
//! `Channel::ALL` order, then the total.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Channel, ErrorBreakdown};
use crate::error::AppError;
use crate::models::constants::KHZ;

/// Render a breakdown as CSV text.
pub fn breakdown_csv(breakdown: &ErrorBreakdown) -> String {
    let mut out = String::from("frequency_khz");
    for channel in Channel::ALL {
        out.push(',');
        out.push_str(channel.label());
    }
    out.push_str(",total\n");

    for (i, freq) in breakdown.frequencies.iter().enumerate() {
        out.push_str(&format!("{:.4}", freq / KHZ));
        for channel in Channel::ALL {
            let v = breakdown.channel(channel).get(i).copied().unwrap_or(0.0);
            out.push_str(&format!(",{v:.6e}"));
        }
        out.push_str(&format!(",{:.6e}\n", breakdown.total[i]));
    }
    out
}

/// Write a breakdown to a CSV file.
pub fn write_breakdown_csv(path: &Path, breakdown: &ErrorBreakdown) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::file_io(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    file.write_all(breakdown_csv(breakdown).as_bytes())
        .map_err(|e| AppError::file_io(format!("Failed to write export CSV '{}': {e}", path.display())))?;
    Ok(())
}
