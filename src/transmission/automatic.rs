//! Automatic shifting on top of a [`TransmissionState`].
//!
//! Two RPM thresholds form a hysteresis band: below the lower one the
//! controller steps one table position down, above the upper one it steps
//! one position up, and in between it leaves the gear alone. Each shift is
//! the same clutch-in, shift, clutch-out sequence a driver would perform.

use super::TransmissionState;
use crate::config::{rules, ConfigError, ShiftThresholds, TireGeometry};
use crate::core::Gear;
use crate::engine::EngineState;
use crate::error::PowertrainError;
use tracing::info;

/// Which way an automatic shift went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Down,
    Up,
}

#[derive(Debug, Clone)]
pub struct AutomaticShiftController {
    transmission: TransmissionState,
    thresholds: ShiftThresholds,
}

impl AutomaticShiftController {
    pub fn new(
        transmission: TransmissionState,
        thresholds: ShiftThresholds,
    ) -> Result<Self, ConfigError> {
        rules::into_result(rules::thresholds(&thresholds))?;
        Ok(Self {
            transmission,
            thresholds,
        })
    }

    pub fn transmission(&self) -> &TransmissionState {
        &self.transmission
    }

    /// Direct access for the driver's own clutch commands.
    pub fn transmission_mut(&mut self) -> &mut TransmissionState {
        &mut self.transmission
    }

    pub fn thresholds(&self) -> &ShiftThresholds {
        &self.thresholds
    }

    /// Shift one gear down or up if the engine RPM left the hysteresis band.
    ///
    /// Returns the direction of the shift, or `None` when RPM is inside the
    /// band. Stepping past either end of the gear table fails with
    /// `GearNotFound` before the clutch is touched.
    pub fn auto_shift(
        &mut self,
        engine: &mut EngineState,
        tire: &TireGeometry,
    ) -> Result<Option<ShiftDirection>, PowertrainError> {
        engine.ready()?;

        let rpm = engine.rpm();
        let direction = if rpm < self.thresholds.lower_rpm {
            ShiftDirection::Down
        } else if rpm > self.thresholds.upper_rpm {
            ShiftDirection::Up
        } else {
            return Ok(None);
        };

        let target = self.neighbour(direction)?;
        info!(
            from = %self.transmission.gear(),
            to = %target,
            rpm,
            ?direction,
            "automatic shift"
        );
        self.shift_sequence(target.as_str(), engine, tire)?;
        Ok(Some(direction))
    }

    /// Driver-requested shift. The brake must be held; the controller
    /// works the clutch itself. Nothing moves unless the engine could accept
    /// the resync, so a refused shift leaves gear and clutch as they were.
    pub fn shift_to(
        &mut self,
        gear: &str,
        brake_pressed: bool,
        engine: &mut EngineState,
        tire: &TireGeometry,
    ) -> Result<(), PowertrainError> {
        if !brake_pressed {
            return Err(PowertrainError::BrakeNotDepressed);
        }
        if !self.transmission.table().contains(gear) {
            return Err(PowertrainError::gear_not_found(gear));
        }
        engine.ready()?;
        self.shift_sequence(gear, engine, tire)
    }

    fn neighbour(&self, direction: ShiftDirection) -> Result<Gear, PowertrainError> {
        let current = self.transmission.gear();
        let table = self.transmission.table();
        let neighbour = match direction {
            ShiftDirection::Down => table.previous_of(current.as_str()),
            ShiftDirection::Up => table.next_of(current.as_str()),
        };
        neighbour.cloned().ok_or_else(|| {
            let side = match direction {
                ShiftDirection::Down => "below",
                ShiftDirection::Up => "above",
            };
            PowertrainError::gear_not_found(format!("{side} {current}"))
        })
    }

    fn shift_sequence(
        &mut self,
        gear: &str,
        engine: &mut EngineState,
        tire: &TireGeometry,
    ) -> Result<(), PowertrainError> {
        self.transmission.clutch_in();
        self.transmission.shift_to(gear)?;
        self.transmission.clutch_out(engine, tire)
    }
}
