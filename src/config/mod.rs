//! Powertrain configuration: presets, TOML loading and validation.
//!
//! Engine and transmission constants are plain data. Named presets
//! reproduce the stock engines and gearboxes; a TOML file can pick a preset
//! and replace whole sections of it.
//!
//! ```toml
//! preset = "sport"
//! kind = "manual"
//!
//! [tire]
//! diameter_mm = 680.0
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

mod error;
pub mod rules;

pub use error::{ConfigError, ConfigViolation};

/// Engine limits and response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rpm_max: f64,
    pub rpm_idle: f64,
    /// RPM added or removed by one accelerate/decelerate command.
    pub acceleration_step: f64,
    /// Distance between the redline and `rpm_max`.
    pub redline_margin: f64,
}

impl EngineConfig {
    pub fn generic() -> Self {
        Self {
            rpm_max: 5500.0,
            rpm_idle: 550.0,
            acceleration_step: 272.0,
            redline_margin: 630.0,
        }
    }

    pub fn sport() -> Self {
        Self {
            rpm_max: 7800.0,
            rpm_idle: 625.0,
            acceleration_step: 345.0,
            redline_margin: 900.0,
        }
    }

    pub fn redline(&self) -> f64 {
        self.rpm_max - self.redline_margin
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::generic()
    }
}

/// Gear labels, their ratios and the final drive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionConfig {
    pub gears: Vec<String>,
    pub ratios: Vec<f64>,
    pub final_drive: f64,
    /// Label of the neutral gear; transmissions start here.
    pub neutral: String,
    pub reverse: String,
}

impl TransmissionConfig {
    pub fn generic() -> Self {
        Self {
            gears: labels(&["R", "N", "1", "2", "3"]),
            ratios: vec![-3.0, 0.0, 0.22, 0.45, 0.89],
            final_drive: 1.0 / 11.0,
            neutral: "N".to_string(),
            reverse: "R".to_string(),
        }
    }

    pub fn sport() -> Self {
        Self {
            gears: labels(&["R", "N", "1", "2", "3", "4", "5"]),
            ratios: vec![-3.0, 0.0, 0.25, 0.45, 0.55, 0.85, 1.0],
            final_drive: 1.0 / 9.75,
            ..Self::generic()
        }
    }
}

impl Default for TransmissionConfig {
    fn default() -> Self {
        Self::generic()
    }
}

fn labels(gears: &[&str]) -> Vec<String> {
    gears.iter().map(|g| g.to_string()).collect()
}

/// RPM bounds of the automatic shift controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftThresholds {
    /// Below this the controller shifts down.
    pub lower_rpm: f64,
    /// Above this the controller shifts up.
    pub upper_rpm: f64,
}

impl Default for ShiftThresholds {
    fn default() -> Self {
        Self {
            lower_rpm: 750.0,
            upper_rpm: 3200.0,
        }
    }
}

/// Wheel geometry used to turn ratio and RPM into road speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TireGeometry {
    pub diameter_mm: f64,
}

impl TireGeometry {
    /// `π × diameter`, scaled so that `ratio × rpm × factor` is road speed.
    pub fn circumference_factor(&self) -> f64 {
        std::f64::consts::PI * self.diameter_mm / 1_000_000.0
    }

    pub fn road_speed(&self, ratio: f64, rpm: f64) -> f64 {
        ratio * rpm * self.circumference_factor()
    }
}

impl Default for TireGeometry {
    /// 225/70R16.
    fn default() -> Self {
        Self { diameter_mm: 721.4 }
    }
}

/// Named engine + transmission combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Generic,
    Sport,
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Preset::Generic),
            "sport" => Ok(Preset::Sport),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Generic => f.write_str("generic"),
            Preset::Sport => f.write_str("sport"),
        }
    }
}

/// Whether the car gets an automatic shift controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransmissionKind {
    Manual,
    Automatic,
}

/// Everything needed to build a [`Car`](crate::Car).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowertrainConfig {
    pub engine: EngineConfig,
    pub transmission: TransmissionConfig,
    /// `None` builds a manual car.
    pub automatic: Option<ShiftThresholds>,
    pub tire: TireGeometry,
}

impl Default for PowertrainConfig {
    fn default() -> Self {
        Self::preset(Preset::Generic)
    }
}

/// On-disk layout. Sections that are present replace the preset's section
/// wholesale; fields missing inside a section take the generic defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    preset: Preset,
    kind: Option<TransmissionKind>,
    engine: Option<EngineConfig>,
    transmission: Option<TransmissionConfig>,
    automatic: Option<ShiftThresholds>,
    tire: Option<TireGeometry>,
}

impl PowertrainConfig {
    /// Preset configuration with an automatic transmission.
    pub fn preset(preset: Preset) -> Self {
        let (engine, transmission) = match preset {
            Preset::Generic => (EngineConfig::generic(), TransmissionConfig::generic()),
            Preset::Sport => (EngineConfig::sport(), TransmissionConfig::sport()),
        };
        Self {
            engine,
            transmission,
            automatic: Some(ShiftThresholds::default()),
            tire: TireGeometry::default(),
        }
    }

    pub fn kind(&self) -> TransmissionKind {
        match self.automatic {
            Some(_) => TransmissionKind::Automatic,
            None => TransmissionKind::Manual,
        }
    }

    /// Check every rule and report all violations together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        rules::into_result(rules::powertrain(self))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let base = Self::preset(file.preset);
        let automatic = match file.kind {
            Some(TransmissionKind::Manual) => None,
            Some(TransmissionKind::Automatic) => Some(file.automatic.unwrap_or_default()),
            None => file.automatic.or(base.automatic),
        };

        let config = Self {
            engine: file.engine.unwrap_or(base.engine),
            transmission: file.transmission.unwrap_or(base.transmission),
            automatic,
            tire: file.tire.unwrap_or(base.tire),
        };
        config.validate()?;

        tracing::debug!(
            preset = %file.preset,
            kind = ?config.kind(),
            "loaded powertrain configuration"
        );
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn generic_engine_matches_stock_values() {
        let engine = EngineConfig::generic();
        assert_eq!(engine.redline(), 4870.0);
        assert_eq!(EngineConfig::sport().redline(), 6900.0);
    }

    #[test]
    fn default_config_is_automatic() {
        let config = PowertrainConfig::default();
        assert_eq!(config.kind(), TransmissionKind::Automatic);
        assert_eq!(config.transmission.neutral, "N");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn preset_parses_case_insensitively() {
        assert_eq!("Sport".parse::<Preset>().unwrap(), Preset::Sport);
        assert_eq!("generic".parse::<Preset>().unwrap(), Preset::Generic);
        assert!(matches!(
            "rally".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(name)) if name == "rally"
        ));
    }

    #[test]
    fn tire_factor_uses_diameter() {
        let tire = TireGeometry { diameter_mm: 1_000_000.0 };
        assert!((tire.circumference_factor() - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(tire.road_speed(0.0, 3000.0), 0.0);
    }

    #[test]
    fn empty_toml_yields_generic_preset() {
        let config = PowertrainConfig::from_toml_str("").unwrap();
        assert_eq!(config, PowertrainConfig::default());
    }

    #[test]
    fn toml_selects_preset_and_kind() {
        let config = PowertrainConfig::from_toml_str(
            r#"
            preset = "sport"
            kind = "manual"
            "#,
        )
        .unwrap();

        assert_eq!(config.engine, EngineConfig::sport());
        assert_eq!(config.transmission.gears.len(), 7);
        assert_eq!(config.kind(), TransmissionKind::Manual);
    }

    #[test]
    fn toml_sections_replace_preset_sections() {
        let config = PowertrainConfig::from_toml_str(
            r#"
            [engine]
            rpm_max = 6000.0
            redline_margin = 500.0

            [automatic]
            lower_rpm = 900.0
            upper_rpm = 2800.0
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.rpm_max, 6000.0);
        assert_eq!(config.engine.rpm_idle, 550.0);
        assert_eq!(config.engine.redline(), 5500.0);
        assert_eq!(
            config.automatic,
            Some(ShiftThresholds {
                lower_rpm: 900.0,
                upper_rpm: 2800.0
            })
        );
    }

    #[test]
    fn toml_reports_every_violation() {
        let err = PowertrainConfig::from_toml_str(
            r#"
            [transmission]
            gears = ["R", "N", "1"]
            ratios = [-3.0, 0.0]

            [automatic]
            lower_rpm = 4000.0
            upper_rpm = 1000.0
            "#,
        )
        .unwrap_err();

        assert_eq!(err.violations().len(), 2);
        assert!(err.to_string().starts_with("invalid configuration:"));
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let result = PowertrainConfig::from_toml_str("turbo = true");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "preset = \"sport\"").unwrap();

        let config = PowertrainConfig::load(file.path()).unwrap();
        assert_eq!(config.engine, EngineConfig::sport());
    }

    #[test]
    fn load_reports_missing_file() {
        let result = PowertrainConfig::load(Path::new("/nonexistent/powertrain.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
