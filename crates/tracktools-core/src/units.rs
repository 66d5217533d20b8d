//! Board unit conversion utilities
//!
//! Board coordinates are signed integers in nanometres. Text entry accepts
//! Metric (mm) or Imperial (inch) values, including fractional inches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board coordinate / length in internal units (nanometres)
pub type Coord = i64;

/// Internal units per millimetre
pub const IU_PER_MM: f64 = 1_000_000.0;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Convert millimetres to board units, rounding to the nearest unit
pub fn from_mm(mm: f64) -> Coord {
    (mm * IU_PER_MM).round() as Coord
}

/// Convert board units to millimetres
pub fn to_mm(value: Coord) -> f64 {
    value as f64 / IU_PER_MM
}

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a board length for display
///
/// * `value` - Length in board units
/// * `system` - Target measurement system
pub fn format_length(value: Coord, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.4}", to_mm(value)),
        MeasurementSystem::Imperial => format!("{:.4}", to_mm(value) / MM_PER_INCH),
    }
}

/// Parse a length string to millimetres
///
/// Empty input is rejected: a blank field is not a number.
///
/// * `input` - String to parse
/// * `system` - Assumed measurement system
pub fn parse_length_mm(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty value".to_string());
    }

    let value = match system {
        MeasurementSystem::Metric => input.parse::<f64>().map_err(|e| e.to_string())?,
        MeasurementSystem::Imperial => parse_inches(input)? * MM_PER_INCH,
    };

    if !value.is_finite() {
        return Err(format!("Value is not finite: {}", input));
    }
    Ok(value)
}

/// Parse a length string to board units
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<Coord, String> {
    parse_length_mm(input, system).map(from_mm)
}

fn parse_inches(input: &str) -> Result<f64, String> {
    if !input.contains('/') {
        return input.parse::<f64>().map_err(|e| e.to_string());
    }

    let mut total_inches = 0.0;
    for part in input.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err("Invalid fraction format".to_string());
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| "Invalid numerator")?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| "Invalid denominator")?;
            if den == 0.0 {
                return Err("Division by zero".to_string());
            }
            total_inches += num / den;
        } else {
            total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
        }
    }
    Ok(total_inches)
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
