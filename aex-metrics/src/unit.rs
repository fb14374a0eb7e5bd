use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The unit family a metric column is expressed in.
///
/// Variant order matches the lexical order of the labels, so a sorted set of
/// units enumerates "% of total" before "USD m".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Unit {
    /// Share of the reporter's total exports, in percent.
    #[default]
    #[serde(rename = "% of total")]
    ShareOfTotal,
    /// Absolute value in millions of US dollars.
    #[serde(rename = "USD m")]
    UsdMillions,
}

impl Unit {
    pub const ALL: [Unit; 2] = [Unit::ShareOfTotal, Unit::UsdMillions];

    /// The label used in source column headers.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::ShareOfTotal => "% of total",
            Unit::UsdMillions => "USD m",
        }
    }

    pub fn from_label(label: &str) -> Option<Unit> {
        Unit::ALL.into_iter().find(|unit| unit.label() == label.trim())
    }

    /// Absolute currency values span orders of magnitude and are ranked on a
    /// log scale; shares are ranked as-is.
    pub fn is_log_compressed(&self) -> bool {
        matches!(self, Unit::UsdMillions)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Unit::from_label(s) {
            Some(unit) => Ok(unit),
            None => anyhow::bail!(
                "unknown unit {:?}, expected one of: {}",
                s,
                Unit::ALL.map(|u| u.label()).join(", ")
            ),
        }
    }
}
