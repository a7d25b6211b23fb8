//! The car: one engine, one transmission and the driver's commands.
//!
//! The car owns both halves of the powertrain. Whenever the transmission
//! needs the engine (clutch engagement, automatic shifts) the car lends it
//! for the duration of that call.

mod builder;
mod stats;

pub use builder::CarBuilder;
pub use stats::Stats;

use crate::config::{ConfigError, PowertrainConfig, TireGeometry};
use crate::engine::EngineState;
use crate::error::PowertrainError;
use crate::transmission::{AutomaticShiftController, TransmissionState};
use tracing::{debug, warn};

/// The transmission fitted to a car.
#[derive(Debug, Clone)]
pub enum Transmission {
    Manual(TransmissionState),
    Automatic(AutomaticShiftController),
}

impl Transmission {
    pub fn state(&self) -> &TransmissionState {
        match self {
            Transmission::Manual(state) => state,
            Transmission::Automatic(controller) => controller.transmission(),
        }
    }

    fn state_mut(&mut self) -> &mut TransmissionState {
        match self {
            Transmission::Manual(state) => state,
            Transmission::Automatic(controller) => controller.transmission_mut(),
        }
    }

    /// The shift controller, if this transmission has one.
    pub fn automatic(&self) -> Option<&AutomaticShiftController> {
        match self {
            Transmission::Automatic(controller) => Some(controller),
            Transmission::Manual(_) => None,
        }
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic().is_some()
    }
}

/// A car driven one command at a time.
///
/// # Example
///
/// ```rust
/// use powertrain::{Car, PowertrainError};
///
/// let mut car = Car::builder().manual().build()?;
/// car.start()?;
/// assert_eq!(car.shift("1"), Err(PowertrainError::ClutchEngaged));
///
/// car.clutch_in();
/// car.shift("1")?;
/// car.clutch_out()?;
/// assert_eq!(car.stats().gear, "1");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Car {
    engine: EngineState,
    transmission: Transmission,
    tire: TireGeometry,
    brake_pressed: bool,
}

impl Car {
    pub fn builder() -> CarBuilder {
        CarBuilder::new()
    }

    pub fn new(config: PowertrainConfig) -> Result<Self, ConfigError> {
        CarBuilder::new().config(config).build()
    }

    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    pub fn transmission(&self) -> &Transmission {
        &self.transmission
    }

    pub fn tire(&self) -> &TireGeometry {
        &self.tire
    }

    pub fn brake_pressed(&self) -> bool {
        self.brake_pressed
    }

    /// Road speed derived from the current ratio and RPM.
    pub fn speed(&self) -> f64 {
        self.tire
            .road_speed(self.transmission.state().ratio(), self.engine.rpm())
    }

    pub fn stats(&self) -> Stats {
        let transmission = self.transmission.state();
        Stats {
            rpm: self.engine.rpm(),
            gear: transmission.gear().clone(),
            ratio: transmission.ratio(),
            speed: self.speed(),
        }
    }

    pub fn start(&mut self) -> Result<(), PowertrainError> {
        let result = self.engine.start();
        self.report("start", result)
    }

    pub fn stop(&mut self) -> Result<(), PowertrainError> {
        let result = self.engine.stop();
        self.report("stop", result)
    }

    pub fn press_brake(&mut self) {
        self.brake_pressed = true;
        debug!("brake pressed");
    }

    pub fn release_brake(&mut self) {
        self.brake_pressed = false;
        debug!("brake released");
    }

    /// Raise RPM by one step, then let an automatic transmission react to
    /// the new RPM. If the RPM change itself fails nothing shifts.
    pub fn accelerate(&mut self) -> Result<(), PowertrainError> {
        let result = self.engine.increase().and_then(|()| self.auto_shift());
        self.report("accelerate", result)
    }

    /// Lower RPM by one step, then let an automatic transmission react.
    pub fn decelerate(&mut self) -> Result<(), PowertrainError> {
        let result = self.engine.decrease().and_then(|()| self.auto_shift());
        self.report("decelerate", result)
    }

    pub fn clutch_in(&mut self) {
        self.transmission.state_mut().clutch_in();
        debug!("clutch disengaged");
    }

    pub fn clutch_out(&mut self) -> Result<(), PowertrainError> {
        let result = self
            .transmission
            .state_mut()
            .clutch_out(&mut self.engine, &self.tire);
        self.report("clutch_out", result)
    }

    /// Manual shift. Automatic transmissions also want the brake held.
    pub fn shift(&mut self, gear: &str) -> Result<(), PowertrainError> {
        let result = match &mut self.transmission {
            Transmission::Manual(state) => state.shift_to(gear),
            Transmission::Automatic(controller) => {
                controller.shift_to(gear, self.brake_pressed, &mut self.engine, &self.tire)
            }
        };
        self.report("shift", result)
    }

    fn auto_shift(&mut self) -> Result<(), PowertrainError> {
        if let Transmission::Automatic(controller) = &mut self.transmission {
            controller.auto_shift(&mut self.engine, &self.tire)?;
        }
        Ok(())
    }

    /// Log the outcome and the dashboard, then hand the result back untouched.
    fn report(
        &self,
        command: &'static str,
        result: Result<(), PowertrainError>,
    ) -> Result<(), PowertrainError> {
        match &result {
            Err(err) if err.is_redline() => warn!(command, "WARNING: The engine is in redline!"),
            Err(err) => debug!(command, %err, "command failed"),
            Ok(()) => {}
        }
        let stats = self.stats();
        debug!(
            command,
            rpm = stats.rpm,
            gear = %stats.gear,
            ratio = stats.ratio,
            speed = stats.speed,
            "stats"
        );
        result
    }
}
