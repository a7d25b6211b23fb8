//! Engine state: RPM, lifecycle and the command protocol.
//!
//! Every command runs the same three steps:
//!
//! 1. preconditions, in order: transmission connected, not destroyed,
//!    running (the last one is skipped by `start`);
//! 2. the command's own effect on RPM and lifecycle;
//! 3. postconditions: RPM at or above `rpm_max` destroys the engine for
//!    good, RPM at or above the redline reports [`EngineRedline`] but keeps
//!    the new RPM and the engine running.
//!
//! [`EngineRedline`]: PowertrainError::EngineRedline

use crate::config::{rules, ConfigError, EngineConfig};
use crate::core::{
    check_all, EngineLifecycle, Guard, RpmZone, State, StateHistory, StateTransition,
    COMMAND_GUARDS, START_GUARDS,
};
use crate::error::PowertrainError;
use crate::transmission::TransmissionState;
use tracing::{debug, error, info};

/// An engine and its lifecycle.
///
/// # Example
///
/// ```rust
/// use powertrain::{EngineConfig, EngineState, PowertrainError, TransmissionConfig, TransmissionState};
///
/// let mut engine = EngineState::new(EngineConfig::generic())?;
/// assert_eq!(engine.start(), Err(PowertrainError::NoTransmissionConnected));
///
/// let transmission = TransmissionState::from_config(&TransmissionConfig::generic())?;
/// engine.connect_transmission(&transmission);
/// engine.start()?;
/// assert_eq!(engine.rpm(), 550.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct EngineState {
    config: EngineConfig,
    rpm: f64,
    lifecycle: EngineLifecycle,
    connected: bool,
    history: StateHistory<EngineLifecycle>,
}

impl EngineState {
    /// A stopped engine with no transmission connected.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        rules::into_result(rules::engine(&config))?;

        Ok(Self {
            config,
            rpm: 0.0,
            lifecycle: EngineLifecycle::Off,
            connected: false,
            history: StateHistory::new(),
        })
    }

    /// Second phase of construction: the engine drives `transmission` from now on.
    pub fn connect_transmission(&mut self, transmission: &TransmissionState) {
        debug!(gear = %transmission.gear(), "engine connected to transmission");
        self.connected = true;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    pub fn lifecycle(&self) -> EngineLifecycle {
        self.lifecycle
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.is_destroyed()
    }

    pub fn redline(&self) -> f64 {
        self.config.redline()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lifecycle changes since construction.
    pub fn history(&self) -> &StateHistory<EngineLifecycle> {
        &self.history
    }

    pub fn start(&mut self) -> Result<(), PowertrainError> {
        self.command(START_GUARDS, |engine| {
            engine.rpm = engine.config.rpm_idle;
            engine.transition(EngineLifecycle::Running);
        })
    }

    pub fn stop(&mut self) -> Result<(), PowertrainError> {
        self.command(COMMAND_GUARDS, |engine| {
            engine.rpm = 0.0;
            engine.transition(EngineLifecycle::Off);
        })
    }

    pub fn increase(&mut self) -> Result<(), PowertrainError> {
        self.command(COMMAND_GUARDS, |engine| {
            engine.rpm += engine.config.acceleration_step;
        })
    }

    /// Never takes RPM below zero.
    pub fn decrease(&mut self) -> Result<(), PowertrainError> {
        self.command(COMMAND_GUARDS, |engine| {
            engine.rpm = (engine.rpm - engine.config.acceleration_step).max(0.0);
        })
    }

    /// Match RPM to the road once the clutch bites again.
    pub(crate) fn resync(&mut self, ratio: f64, car_speed: f64) -> Result<(), PowertrainError> {
        self.command(COMMAND_GUARDS, |engine| {
            engine.rpm = ratio * car_speed;
        })
    }

    /// Whether a command other than `start` would pass its preconditions.
    pub fn ready(&self) -> Result<(), PowertrainError> {
        check_all(COMMAND_GUARDS, self.connected, self.lifecycle)
    }

    fn command<F>(&mut self, guards: &[Guard], effect: F) -> Result<(), PowertrainError>
    where
        F: FnOnce(&mut Self),
    {
        check_all(guards, self.connected, self.lifecycle)?;
        effect(self);
        self.check_limits()
    }

    fn check_limits(&mut self) -> Result<(), PowertrainError> {
        match RpmZone::classify(self.rpm, self.redline(), self.config.rpm_max) {
            RpmZone::Normal => Ok(()),
            RpmZone::Redline => {
                debug!(rpm = self.rpm, redline = self.redline(), "engine above redline");
                Err(PowertrainError::EngineRedline { rpm: self.rpm })
            }
            RpmZone::Destroyed => {
                self.transition(EngineLifecycle::Destroyed);
                error!(rpm = self.rpm, rpm_max = self.config.rpm_max, "engine destroyed");
                Err(PowertrainError::EngineDestroyed)
            }
        }
    }

    fn transition(&mut self, to: EngineLifecycle) {
        if self.lifecycle == to {
            return;
        }
        info!(from = self.lifecycle.name(), to = to.name(), rpm = self.rpm, "engine lifecycle");
        self.history = self
            .history
            .record(StateTransition::now(self.lifecycle, to).at_rpm(self.rpm));
        self.lifecycle = to;
    }
}
