//! Transmission state: selected gear and clutch engagement.
//!
//! The gear can only change while the clutch is disengaged. Engaging the
//! clutch resynchronizes the engine RPM with the road; the engine is handed
//! in by the caller for that one call and never stored.

mod automatic;

pub use automatic::{AutomaticShiftController, ShiftDirection};

use crate::config::{ConfigError, TireGeometry, TransmissionConfig};
use crate::core::{Gear, StateHistory, StateTransition};
use crate::engine::EngineState;
use crate::error::PowertrainError;
use crate::gear_table::GearTable;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TransmissionState {
    table: GearTable,
    /// Index into `table`; always valid.
    gear: usize,
    clutch_engaged: bool,
    history: StateHistory<Gear>,
}

impl TransmissionState {
    /// Starts in the table's neutral gear with the clutch engaged.
    pub fn new(table: GearTable) -> Self {
        let gear = table.position(table.neutral().as_str()).unwrap_or(0);
        Self {
            table,
            gear,
            clutch_engaged: true,
            history: StateHistory::new(),
        }
    }

    pub fn from_config(config: &TransmissionConfig) -> Result<Self, ConfigError> {
        GearTable::from_config(config).map(Self::new)
    }

    pub fn gear(&self) -> &Gear {
        &self.table.gears()[self.gear]
    }

    pub fn table(&self) -> &GearTable {
        &self.table
    }

    pub fn is_clutch_engaged(&self) -> bool {
        self.clutch_engaged
    }

    /// Gear changes since construction.
    pub fn history(&self) -> &StateHistory<Gear> {
        &self.history
    }

    /// Ratio of the current gear multiplied by the final drive.
    pub fn ratio(&self) -> f64 {
        self.table.ratio_of(self.gear().as_str()).unwrap_or_default() * self.table.final_drive()
    }

    pub fn clutch_in(&mut self) {
        self.clutch_engaged = false;
    }

    /// Engage the clutch, resyncing `engine` from the current road speed.
    ///
    /// If the engine refuses the resync, or is destroyed by it, the clutch
    /// stays disengaged. A redline warning is different: the new
    /// RPM has already been applied, so the clutch does engage and the
    /// warning is passed on. Callers that treat every `Err` as "clutch still
    /// in" must check [`PowertrainError::is_redline`].
    pub fn clutch_out(
        &mut self,
        engine: &mut EngineState,
        tire: &TireGeometry,
    ) -> Result<(), PowertrainError> {
        let ratio = self.ratio();
        let speed = tire.road_speed(ratio, engine.rpm());

        let result = match engine.resync(ratio, speed) {
            Err(err) if !err.is_redline() => return Err(err),
            result => result,
        };
        self.clutch_engaged = true;
        debug!(rpm = engine.rpm(), ratio, speed, "clutch engaged");
        result
    }

    pub fn shift_to(&mut self, gear: &str) -> Result<(), PowertrainError> {
        if self.clutch_engaged {
            return Err(PowertrainError::ClutchEngaged);
        }
        let index = self
            .table
            .position(gear)
            .ok_or_else(|| PowertrainError::gear_not_found(gear))?;

        if index != self.gear {
            let from = self.gear().clone();
            self.gear = index;
            self.history = self
                .history
                .record(StateTransition::now(from, self.gear().clone()));
        }
        debug!(gear, ratio = self.ratio(), "shifted");
        Ok(())
    }
}
