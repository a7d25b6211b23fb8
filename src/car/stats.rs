//! Read-only snapshot of what the dashboard shows.

use crate::core::Gear;
use serde::Serialize;
use std::fmt;

/// Engine, gear, ratio and speed at one instant.
///
/// The `Display` form is the text block printed after every command:
///
/// ```text
/// Engine: 550
/// Transmission: N
/// Ratio: 0.00
/// Speed: 0.00
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub rpm: f64,
    pub gear: Gear,
    pub ratio: f64,
    pub speed: f64,
}

impl Stats {
    /// The snapshot as a single-line JSON object, for log shippers and tooling.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine: {:.0}", self.rpm)?;
        writeln!(f, "Transmission: {}", self.gear)?;
        writeln!(f, "Ratio: {:.2}", self.ratio)?;
        writeln!(f, "Speed: {:.2}", self.speed)
    }
}
