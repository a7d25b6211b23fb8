//! Powertrain: an engine/transmission state machine
//!
//! An engine produces RPM, a transmission turns RPM into road speed through
//! a gear ratio, and a car ties the two together behind driver commands.
//! Every command either succeeds or returns a [`PowertrainError`] saying
//! exactly which precondition failed or which limit was crossed.
//!
//! # Core Concepts
//!
//! - **Engine**: RPM plus an `Off ⇄ Running → Destroyed` lifecycle, guarded
//!   by a fixed precondition protocol
//! - **Transmission**: a gear table, the selected gear and the clutch; the
//!   gear only changes with the clutch disengaged
//! - **Automatic shifting**: an RPM hysteresis band that works the clutch
//!   and gear on its own
//! - **Car**: owns both halves, derives road speed and resyncs the engine
//!   when the clutch engages
//!
//! # Example
//!
//! ```rust
//! use powertrain::{Car, PowertrainError};
//!
//! let mut car = Car::builder().manual().build()?;
//! car.start()?;
//! car.clutch_in();
//! car.shift("1")?;
//! car.clutch_out()?;
//!
//! let outcome = loop {
//!     if let Err(err) = car.accelerate() {
//!         break err;
//!     }
//! };
//! assert!(matches!(outcome, PowertrainError::EngineRedline { .. }));
//! assert!(car.engine().is_running());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod car;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod gear_table;
pub mod transmission;

// Re-export commonly used types
pub use car::{Car, CarBuilder, Stats, Transmission};
pub use config::{
    ConfigError, ConfigViolation, EngineConfig, PowertrainConfig, Preset, ShiftThresholds,
    TireGeometry, TransmissionConfig, TransmissionKind,
};
pub use engine::EngineState;
pub use error::{ErrorClass, PowertrainError};
pub use gear_table::GearTable;
pub use transmission::{AutomaticShiftController, ShiftDirection, TransmissionState};
