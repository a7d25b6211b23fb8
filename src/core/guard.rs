//! Pre- and postcondition guards for engine commands.
//!
//! Every engine command runs an ordered guard set before its effect and
//! classifies the resulting RPM afterwards. `start` uses its own guard set
//! instead of asking which command is running.

use super::state::EngineLifecycle;
use crate::error::PowertrainError;

/// A precondition checked before an engine command takes effect.
///
/// # Example
///
/// ```rust
/// use powertrain::core::{EngineLifecycle, Guard};
/// use powertrain::PowertrainError;
///
/// assert!(Guard::Running.check(true, EngineLifecycle::Running).is_ok());
/// assert_eq!(
///     Guard::Running.check(true, EngineLifecycle::Off),
///     Err(PowertrainError::EngineOff)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// A transmission has been connected to the engine.
    TransmissionConnected,
    /// The engine has not been destroyed.
    NotDestroyed,
    /// The engine is running.
    Running,
}

/// Guards for every command except `start`, in evaluation order.
pub const COMMAND_GUARDS: &[Guard] = &[
    Guard::TransmissionConnected,
    Guard::NotDestroyed,
    Guard::Running,
];

/// Guards for `start`: same order, without the running check.
pub const START_GUARDS: &[Guard] = &[Guard::TransmissionConnected, Guard::NotDestroyed];

impl Guard {
    pub fn check(&self, connected: bool, lifecycle: EngineLifecycle) -> Result<(), PowertrainError> {
        match self {
            Guard::TransmissionConnected if !connected => {
                Err(PowertrainError::NoTransmissionConnected)
            }
            Guard::NotDestroyed if lifecycle.is_destroyed() => {
                Err(PowertrainError::EngineDestroyed)
            }
            Guard::Running if !lifecycle.is_running() => Err(PowertrainError::EngineOff),
            _ => Ok(()),
        }
    }
}

/// Run `guards` in order, stopping at the first failure.
pub fn check_all(
    guards: &[Guard],
    connected: bool,
    lifecycle: EngineLifecycle,
) -> Result<(), PowertrainError> {
    guards
        .iter()
        .try_for_each(|guard| guard.check(connected, lifecycle))
}

/// Where an RPM value sits relative to the engine limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpmZone {
    Normal,
    /// At or above the redline, below the maximum.
    Redline,
    /// At or above the maximum.
    Destroyed,
}

impl RpmZone {
    /// The maximum is checked before the redline.
    pub fn classify(rpm: f64, redline: f64, rpm_max: f64) -> Self {
        if rpm >= rpm_max {
            RpmZone::Destroyed
        } else if rpm >= redline {
            RpmZone::Redline
        } else {
            RpmZone::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_is_checked_first() {
        let result = check_all(COMMAND_GUARDS, false, EngineLifecycle::Destroyed);
        assert_eq!(result, Err(PowertrainError::NoTransmissionConnected));
    }

    #[test]
    fn destroyed_is_checked_before_running() {
        let result = check_all(COMMAND_GUARDS, true, EngineLifecycle::Destroyed);
        assert_eq!(result, Err(PowertrainError::EngineDestroyed));
    }

    #[test]
    fn start_guards_skip_running_check() {
        assert!(check_all(START_GUARDS, true, EngineLifecycle::Off).is_ok());
        assert_eq!(
            check_all(COMMAND_GUARDS, true, EngineLifecycle::Off),
            Err(PowertrainError::EngineOff)
        );
    }

    #[test]
    fn start_guards_still_reject_destroyed() {
        assert_eq!(
            check_all(START_GUARDS, true, EngineLifecycle::Destroyed),
            Err(PowertrainError::EngineDestroyed)
        );
    }

    #[test]
    fn zones_are_classified_against_limits() {
        assert_eq!(RpmZone::classify(4000.0, 4870.0, 5500.0), RpmZone::Normal);
        assert_eq!(RpmZone::classify(4870.0, 4870.0, 5500.0), RpmZone::Redline);
        assert_eq!(RpmZone::classify(5499.0, 4870.0, 5500.0), RpmZone::Redline);
        assert_eq!(RpmZone::classify(5500.0, 4870.0, 5500.0), RpmZone::Destroyed);
    }
}
