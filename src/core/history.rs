//! Transition history tracking.
//!
//! Engines record lifecycle changes and transmissions record gear changes,
//! each stamped with the wall-clock time. Engine records also carry the RPM.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use powertrain::core::{EngineLifecycle, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: EngineLifecycle::Off,
///     to: EngineLifecycle::Running,
///     timestamp: Utc::now(),
///     rpm: Some(550.0),
/// };
/// assert_eq!(transition.rpm, Some(550.0));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Engine RPM right after the transition, when the recorder knows it
    pub rpm: Option<f64>,
}

impl<S: State> StateTransition<S> {
    /// Transition stamped with the current time.
    pub fn now(from: S, to: S) -> Self {
        Self {
            from,
            to,
            timestamp: Utc::now(),
            rpm: None,
        }
    }

    pub fn at_rpm(mut self, rpm: f64) -> Self {
        self.rpm = Some(rpm);
        self
    }
}

/// Ordered history of state transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition added.
///
/// # Example
///
/// ```rust
/// use powertrain::core::{EngineLifecycle, StateHistory, StateTransition};
///
/// let history = StateHistory::new()
///     .record(StateTransition::now(EngineLifecycle::Off, EngineLifecycle::Running))
///     .record(StateTransition::now(EngineLifecycle::Running, EngineLifecycle::Off));
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Off -> Running -> Off
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all transitions in order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineLifecycle, Gear};

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<EngineLifecycle> = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();

        let new_history = history.record(StateTransition::now(
            EngineLifecycle::Off,
            EngineLifecycle::Running,
        ));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(
                StateTransition::now(EngineLifecycle::Off, EngineLifecycle::Running).at_rpm(550.0),
            )
            .record(
                StateTransition::now(EngineLifecycle::Running, EngineLifecycle::Destroyed)
                    .at_rpm(5718.0),
            );

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &EngineLifecycle::Off);
        assert_eq!(path[1], &EngineLifecycle::Running);
        assert_eq!(path[2], &EngineLifecycle::Destroyed);
        assert_eq!(history.last().and_then(|t| t.rpm), Some(5718.0));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history =
            StateHistory::new().record(StateTransition::now(Gear::new("N"), Gear::new("1")));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history =
            StateHistory::new().record(StateTransition::now(Gear::new("N"), Gear::new("1")));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<Gear> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.transitions().len(), 1);
        assert_eq!(deserialized.transitions()[0].to, "1");
    }
}
