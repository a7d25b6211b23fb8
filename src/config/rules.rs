//! Validation rules for powertrain configuration.
//!
//! Rules return `Validation` so that a bad configuration reports every
//! broken rule at once instead of stopping at the first.

use super::error::{ConfigError, ConfigViolation};
use super::{EngineConfig, PowertrainConfig, ShiftThresholds, TireGeometry, TransmissionConfig};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Outcome of a set of configuration rules.
pub type RuleCheck = Validation<(), NonEmptyVec<ConfigViolation>>;

fn rule(holds: bool, violation: impl FnOnce() -> ConfigViolation) -> RuleCheck {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn combine(checks: Vec<RuleCheck>) -> RuleCheck {
    Validation::all_vec(checks).map(|_| ())
}

/// Gear labels and ratios: aligned, unique, with neutral and reverse present.
pub fn gear_table(
    gears: &[String],
    ratios: &[f64],
    final_drive: f64,
    neutral: &str,
    reverse: &str,
) -> RuleCheck {
    let mut checks = vec![rule(gears.len() == ratios.len(), || {
        ConfigViolation::GearRatioMismatch {
            gears: gears.len(),
            ratios: ratios.len(),
        }
    })];

    let mut seen = HashSet::new();
    for gear in gears {
        if !seen.insert(gear.as_str()) {
            checks.push(Validation::fail(ConfigViolation::DuplicateGear {
                gear: gear.clone(),
            }));
        }
    }

    for required in [reverse, neutral] {
        checks.push(rule(seen.contains(required), || {
            ConfigViolation::MissingGear {
                gear: required.to_string(),
            }
        }));
    }

    checks.push(rule(final_drive > 0.0, || {
        ConfigViolation::NonPositiveFinalDrive { final_drive }
    }));

    combine(checks)
}

pub fn transmission(config: &TransmissionConfig) -> RuleCheck {
    gear_table(
        &config.gears,
        &config.ratios,
        config.final_drive,
        &config.neutral,
        &config.reverse,
    )
}

pub fn engine(config: &EngineConfig) -> RuleCheck {
    let redline = config.redline();
    combine(vec![
        rule(config.rpm_idle >= 0.0, || ConfigViolation::NegativeIdle {
            idle: config.rpm_idle,
        }),
        rule(
            config.rpm_idle < redline && redline < config.rpm_max,
            || ConfigViolation::RpmLimitsOutOfOrder {
                idle: config.rpm_idle,
                redline,
                max: config.rpm_max,
            },
        ),
        rule(config.acceleration_step > 0.0, || {
            ConfigViolation::NonPositiveStep {
                step: config.acceleration_step,
            }
        }),
    ])
}

pub fn thresholds(config: &ShiftThresholds) -> RuleCheck {
    rule(config.lower_rpm < config.upper_rpm, || {
        ConfigViolation::ThresholdsOutOfOrder {
            lower: config.lower_rpm,
            upper: config.upper_rpm,
        }
    })
}

pub fn tire(config: &TireGeometry) -> RuleCheck {
    rule(config.diameter_mm > 0.0, || {
        ConfigViolation::NonPositiveTireDiameter {
            diameter_mm: config.diameter_mm,
        }
    })
}

pub fn powertrain(config: &PowertrainConfig) -> RuleCheck {
    let mut checks = vec![
        engine(&config.engine),
        transmission(&config.transmission),
        tire(&config.tire),
    ];
    if let Some(automatic) = &config.automatic {
        checks.push(thresholds(automatic));
    }
    combine(checks)
}

/// Collapse a rule check into a `Result` carrying every violation.
pub fn into_result(check: RuleCheck) -> Result<(), ConfigError> {
    match check {
        Validation::Success(_) => Ok(()),
        Validation::Failure(violations) => {
            Err(ConfigError::Invalid(violations.iter().cloned().collect()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(gears: &[&str]) -> Vec<String> {
        gears.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn generic_presets_pass() {
        assert!(powertrain(&PowertrainConfig::default()).is_success());
        assert!(engine(&EngineConfig::sport()).is_success());
        assert!(transmission(&TransmissionConfig::sport()).is_success());
    }

    #[test]
    fn length_mismatch_is_reported() {
        let result = into_result(gear_table(
            &labels(&["R", "N", "1"]),
            &[-3.0, 0.0],
            0.09,
            "N",
            "R",
        ));

        let err = result.unwrap_err();
        assert_eq!(
            err.violations(),
            &[ConfigViolation::GearRatioMismatch { gears: 3, ratios: 2 }]
        );
    }

    #[test]
    fn gear_rules_accumulate_all_violations() {
        let result = into_result(gear_table(
            &labels(&["1", "1", "2"]),
            &[0.5, 0.6],
            0.0,
            "N",
            "R",
        ));

        let err = result.unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 5);
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::GearRatioMismatch { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::DuplicateGear { gear } if gear == "1")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::MissingGear { gear } if gear == "N")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::MissingGear { gear } if gear == "R")));
        assert!(violations
            .iter()
            .any(|v| matches!(v, ConfigViolation::NonPositiveFinalDrive { .. })));
    }

    #[test]
    fn engine_limits_must_be_ordered() {
        let config = EngineConfig {
            rpm_max: 5500.0,
            rpm_idle: 5000.0,
            acceleration_step: 0.0,
            redline_margin: 630.0,
        };

        let err = into_result(engine(&config)).unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(matches!(
            err.violations()[0],
            ConfigViolation::RpmLimitsOutOfOrder { redline, .. } if redline == 4870.0
        ));
    }

    #[test]
    fn negative_idle_is_rejected() {
        let config = EngineConfig {
            rpm_idle: -100.0,
            ..EngineConfig::generic()
        };

        let err = into_result(engine(&config)).unwrap_err();
        assert_eq!(
            err.violations(),
            &[ConfigViolation::NegativeIdle { idle: -100.0 }]
        );
    }

    #[test]
    fn negative_margin_puts_redline_above_max() {
        let config = EngineConfig {
            redline_margin: -10.0,
            ..EngineConfig::generic()
        };
        assert!(engine(&config).is_failure());
    }

    #[test]
    fn thresholds_must_be_ordered() {
        let inverted = ShiftThresholds {
            lower_rpm: 3200.0,
            upper_rpm: 750.0,
        };
        assert!(thresholds(&inverted).is_failure());
        assert!(thresholds(&ShiftThresholds::default()).is_success());
    }

    #[test]
    fn manual_config_skips_threshold_rules() {
        let config = PowertrainConfig {
            automatic: None,
            ..PowertrainConfig::default()
        };
        assert!(powertrain(&config).is_success());
    }
}
