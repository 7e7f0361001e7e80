//! Display gate: wall-clock time-of-day visibility window

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use storegraph_common::{Result, StoregraphError};
use storegraph_config::GateConfig;
use tracing::debug;

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq)]
pub struct GateDecision {
    pub visible: bool,
    /// Fixed human-readable message when the chart is hidden
    pub message: Option<String>,
}

/// Decides whether a scenario's chart may be shown right now.
///
/// The window is [start, end) in the configured timezone; a window whose
/// start is after its end wraps past midnight. `force_visible` makes the
/// gate permanently open.
#[derive(Debug, Clone)]
pub struct DisplayGate {
    start: NaiveTime,
    end: NaiveTime,
    timezone: Tz,
    force_visible: bool,
}

impl DisplayGate {
    pub fn from_config(config: &GateConfig) -> Result<Self> {
        let start = NaiveTime::parse_from_str(&config.start, "%H:%M").map_err(|e| {
            StoregraphError::config_with_source(
                format!("invalid gate start '{}'", config.start),
                e,
            )
        })?;
        let end = NaiveTime::parse_from_str(&config.end, "%H:%M").map_err(|e| {
            StoregraphError::config_with_source(format!("invalid gate end '{}'", config.end), e)
        })?;
        let timezone: Tz = config.timezone.parse().map_err(|e| {
            StoregraphError::config(format!("invalid timezone '{}': {}", config.timezone, e))
        })?;

        Ok(Self {
            start,
            end,
            timezone,
            force_visible: config.force_visible,
        })
    }

    /// Gate check against the current wall clock
    pub fn decide_now(&self) -> GateDecision {
        self.decide(Utc::now())
    }

    /// Gate check against an explicit instant
    pub fn decide(&self, now: DateTime<Utc>) -> GateDecision {
        if self.force_visible {
            return GateDecision {
                visible: true,
                message: None,
            };
        }

        let local = now.with_timezone(&self.timezone).time();
        let open = if self.start <= self.end {
            local >= self.start && local < self.end
        } else {
            local >= self.start || local < self.end
        };

        debug!(%local, open, "Evaluated display gate");

        if open {
            GateDecision {
                visible: true,
                message: None,
            }
        } else {
            GateDecision {
                visible: false,
                message: Some(format!(
                    "Chart not available. Dashboard accessible only between {} and {} ({}).",
                    self.start.format("%H:%M"),
                    self.end.format("%H:%M"),
                    self.timezone
                )),
            }
        }
    }
}
