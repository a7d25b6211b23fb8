//! State trait and the concrete states tracked by the powertrain.
//!
//! The engine lifecycle and the selected gear are the two discrete states
//! of the system; RPM and clutch engagement are plain fields around them.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for discrete powertrain states.
///
/// All methods are pure. States are small values that can be cloned into
/// a [`StateHistory`](super::StateHistory) and compared for transition logic.
///
/// # Example
///
/// ```rust
/// use powertrain::core::{EngineLifecycle, State};
///
/// assert_eq!(EngineLifecycle::Running.name(), "Running");
/// assert!(EngineLifecycle::Destroyed.is_final());
/// assert!(!EngineLifecycle::Off.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// No transition leaves a final state. Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Lifecycle of an engine.
///
/// `Off ⇄ Running → Destroyed`. `Destroyed` is the only terminal state of
/// the whole powertrain.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum EngineLifecycle {
    #[default]
    Off,
    Running,
    Destroyed,
}

impl EngineLifecycle {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

impl State for EngineLifecycle {
    fn name(&self) -> &str {
        match self {
            Self::Off => "Off",
            Self::Running => "Running",
            Self::Destroyed => "Destroyed",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Destroyed)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

/// A gear label such as `"R"`, `"N"` or `"3"`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gear(String);

impl Gear {
    pub fn new(label: impl Into<String>) -> Self {
        Gear(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl State for Gear {
    fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Gear {
    fn from(label: &str) -> Self {
        Gear::new(label)
    }
}

impl PartialEq<str> for Gear {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Gear {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_names() {
        assert_eq!(EngineLifecycle::Off.name(), "Off");
        assert_eq!(EngineLifecycle::Running.name(), "Running");
        assert_eq!(EngineLifecycle::Destroyed.name(), "Destroyed");
    }

    #[test]
    fn only_destroyed_is_terminal() {
        assert!(!EngineLifecycle::Off.is_final());
        assert!(!EngineLifecycle::Running.is_final());
        assert!(EngineLifecycle::Destroyed.is_final());
        assert!(EngineLifecycle::Destroyed.is_error());
    }

    #[test]
    fn default_lifecycle_is_off() {
        let state = EngineLifecycle::default();
        assert!(!state.is_running());
        assert!(!state.is_destroyed());
    }

    #[test]
    fn gear_compares_with_labels() {
        let gear = Gear::new("2");
        assert_eq!(gear, "2");
        assert_eq!(gear.name(), "2");
        assert_eq!(gear.to_string(), "2");
        assert_ne!(gear, Gear::from("3"));
    }

    #[test]
    fn gear_serializes_as_plain_label() {
        let json = serde_json::to_string(&Gear::new("R")).unwrap();
        assert_eq!(json, "\"R\"");
        let back: Gear = serde_json::from_str(&json).unwrap();
        assert_eq!(back, "R");
    }
}
