//! Builder for assembling a car from configuration.

use super::{Car, Transmission};
use crate::config::{
    ConfigError, EngineConfig, PowertrainConfig, Preset, ShiftThresholds, TireGeometry,
    TransmissionConfig,
};
use crate::engine::EngineState;
use crate::transmission::{AutomaticShiftController, TransmissionState};
use tracing::info;

/// Builder for constructing a [`Car`] with a fluent API.
///
/// Starts from the generic preset with an automatic transmission.
///
/// # Example
///
/// ```rust
/// use powertrain::{CarBuilder, Preset};
///
/// let car = CarBuilder::new().preset(Preset::Sport).manual().build()?;
/// assert!(!car.transmission().is_automatic());
/// # Ok::<(), powertrain::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CarBuilder {
    config: PowertrainConfig,
}

impl CarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: PowertrainConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a preset's engine and transmission, keeping the current
    /// transmission kind and tire.
    pub fn preset(mut self, preset: Preset) -> Self {
        let base = PowertrainConfig::preset(preset);
        self.config.engine = base.engine;
        self.config.transmission = base.transmission;
        self
    }

    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.config.engine = engine;
        self
    }

    pub fn transmission(mut self, transmission: TransmissionConfig) -> Self {
        self.config.transmission = transmission;
        self
    }

    /// Fit an automatic shift controller with these thresholds.
    pub fn automatic(mut self, thresholds: ShiftThresholds) -> Self {
        self.config.automatic = Some(thresholds);
        self
    }

    pub fn manual(mut self) -> Self {
        self.config.automatic = None;
        self
    }

    pub fn tire(mut self, tire: TireGeometry) -> Self {
        self.config.tire = tire;
        self
    }

    /// Validate the configuration, then build engine, transmission and the
    /// connection between them, in that order.
    pub fn build(self) -> Result<Car, ConfigError> {
        let config = self.config;
        config.validate()?;

        let mut engine = EngineState::new(config.engine.clone())?;
        let transmission = TransmissionState::from_config(&config.transmission)?;
        engine.connect_transmission(&transmission);

        let transmission = match config.automatic {
            Some(thresholds) => Transmission::Automatic(AutomaticShiftController::new(
                transmission,
                thresholds,
            )?),
            None => Transmission::Manual(transmission),
        };

        info!(
            kind = ?config.kind(),
            gears = config.transmission.gears.len(),
            rpm_max = config.engine.rpm_max,
            "car assembled"
        );
        Ok(Car {
            engine,
            transmission,
            tire: config.tire,
            brake_pressed: false,
        })
    }
}
