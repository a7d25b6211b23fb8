//! Gear labels, ratios and the final drive.

use crate::config::{rules, ConfigError, TransmissionConfig};
use crate::core::Gear;

/// Ordered gear labels with index-aligned ratios.
///
/// Construction checks the table; lookups never fail for gears that came
/// out of the table itself.
///
/// # Example
///
/// ```rust
/// use powertrain::GearTable;
///
/// let table = GearTable::new(["R", "N", "1", "2", "3"], vec![-0.33, 0.0, 0.54, 0.69, 0.83], 0.09)?;
/// assert_eq!(table.len(), 5);
/// assert_eq!(table.ratio_of("2"), Some(0.69));
/// assert_eq!(table.next_of("3"), None);
/// # Ok::<(), powertrain::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GearTable {
    gears: Vec<Gear>,
    ratios: Vec<f64>,
    final_drive: f64,
    neutral: Gear,
}

impl GearTable {
    /// Table whose neutral and reverse gears are labelled `"N"` and `"R"`.
    pub fn new<I, L>(gears: I, ratios: Vec<f64>, final_drive: f64) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::from_config(&TransmissionConfig {
            gears: gears.into_iter().map(Into::into).collect(),
            ratios,
            final_drive,
            ..TransmissionConfig::generic()
        })
    }

    pub fn from_config(config: &TransmissionConfig) -> Result<Self, ConfigError> {
        rules::into_result(rules::transmission(config))?;

        Ok(Self {
            gears: config.gears.iter().map(|g| Gear::new(g.as_str())).collect(),
            ratios: config.ratios.clone(),
            final_drive: config.final_drive,
            neutral: Gear::new(config.neutral.as_str()),
        })
    }

    pub fn gears(&self) -> &[Gear] {
        &self.gears
    }

    pub fn len(&self) -> usize {
        self.gears.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gears.is_empty()
    }

    pub fn final_drive(&self) -> f64 {
        self.final_drive
    }

    pub fn neutral(&self) -> &Gear {
        &self.neutral
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.gears.iter().position(|g| g == label)
    }

    /// Ratio of a single gear, before the final drive.
    pub fn ratio_of(&self, label: &str) -> Option<f64> {
        self.position(label).map(|i| self.ratios[i])
    }

    /// Gear one position before `label`; `None` at the first entry.
    pub fn previous_of(&self, label: &str) -> Option<&Gear> {
        let index = self.position(label)?;
        index.checked_sub(1).and_then(|i| self.gears.get(i))
    }

    /// Gear one position after `label`; `None` at the last entry.
    pub fn next_of(&self, label: &str) -> Option<&Gear> {
        let index = self.position(label)?;
        self.gears.get(index + 1)
    }
}
