//! Configuration errors and violations.

use thiserror::Error;

/// A single rule broken by a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{gears} gears do not match {ratios} ratios")]
    GearRatioMismatch { gears: usize, ratios: usize },

    #[error("gear {gear} is listed more than once")]
    DuplicateGear { gear: String },

    #[error("gear table has no {gear} gear")]
    MissingGear { gear: String },

    #[error("final drive must be positive (got {final_drive})")]
    NonPositiveFinalDrive { final_drive: f64 },

    #[error("idle RPM must not be negative (got {idle})")]
    NegativeIdle { idle: f64 },

    #[error("rpm_idle ({idle}) < redline ({redline}) < rpm_max ({max}) does not hold")]
    RpmLimitsOutOfOrder { idle: f64, redline: f64, max: f64 },

    #[error("acceleration step must be positive (got {step})")]
    NonPositiveStep { step: f64 },

    #[error("shift thresholds must satisfy lower ({lower}) < upper ({upper})")]
    ThresholdsOutOfOrder { lower: f64, upper: f64 },

    #[error("tire diameter must be positive (got {diameter_mm} mm)")]
    NonPositiveTireDiameter { diameter_mm: f64 },
}

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("unknown preset '{0}' (expected 'generic' or 'sport')")]
    UnknownPreset(String),

    /// Every violated rule, not just the first.
    #[error("invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

impl ConfigError {
    /// Violations carried by an `Invalid` error; empty for other kinds.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid(violations) => violations,
            _ => &[],
        }
    }
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
