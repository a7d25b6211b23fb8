//! Errors raised by powertrain commands.

use thiserror::Error;

/// How the caller is expected to treat a [`PowertrainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The command had no effect; retry once the precondition holds.
    Precondition,
    /// The command took effect but the engine is in a dangerous range.
    Warning,
    /// The engine is permanently unusable.
    Terminal,
}

/// Errors that can occur while commanding the engine, transmission or car.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PowertrainError {
    #[error("You must connect the transmission")]
    NoTransmissionConnected,

    #[error("You destroyed the engine!")]
    EngineDestroyed,

    #[error("The engine is off!")]
    EngineOff,

    #[error("You are redlining the engine! ({rpm:.0} rpm)")]
    EngineRedline { rpm: f64 },

    #[error("You must disengage the clutch!")]
    ClutchEngaged,

    #[error("There is no gear {gear}!")]
    GearNotFound { gear: String },

    #[error("You must press the brake!")]
    BrakeNotDepressed,
}

impl PowertrainError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::EngineRedline { .. } => ErrorClass::Warning,
            Self::EngineDestroyed => ErrorClass::Terminal,
            Self::NoTransmissionConnected
            | Self::EngineOff
            | Self::ClutchEngaged
            | Self::GearNotFound { .. }
            | Self::BrakeNotDepressed => ErrorClass::Precondition,
        }
    }

    pub fn is_redline(&self) -> bool {
        matches!(self, Self::EngineRedline { .. })
    }

    pub(crate) fn gear_not_found(gear: impl Into<String>) -> Self {
        Self::GearNotFound { gear: gear.into() }
    }
}
