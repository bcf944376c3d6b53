use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::settings::errors::InvalidTimeOfDay;

/// A wall-clock time with minute precision and no date attached.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Result<Self, InvalidTimeOfDay> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or(InvalidTimeOfDay { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn from_naive(time: NaiveTime) -> Self {
        // drop seconds so equality matches what is displayed and persisted
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .map(Self::from_naive)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = chrono::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

fn default_start_time() -> TimeOfDay {
    TimeOfDay::new(22, 0).unwrap_or_default()
}

fn default_end_time() -> TimeOfDay {
    TimeOfDay::new(6, 0).unwrap_or_default()
}

/// Schedule for starting the sleep timer automatically during a daily window.
///
/// The window may wrap past midnight (22:00 - 06:00 is the default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSleepTimer {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_start_time")]
    pub start_time: TimeOfDay,
    #[serde(default = "default_end_time")]
    pub end_time: TimeOfDay,
}

impl Default for AutoSleepTimer {
    fn default() -> Self {
        Self {
            enabled: false,
            start_time: default_start_time(),
            end_time: default_end_time(),
        }
    }
}

impl AutoSleepTimer {
    pub fn with_enabled(self, enabled: bool) -> Self {
        Self { enabled, ..self }
    }

    pub fn with_start_time(self, start_time: TimeOfDay) -> Self {
        Self { start_time, ..self }
    }

    pub fn with_end_time(self, end_time: TimeOfDay) -> Self {
        Self { end_time, ..self }
    }

    /// Whether `time` falls inside `[start, end)`. An equal start and end is an empty window.
    pub fn contains(&self, time: TimeOfDay) -> bool {
        let (start, end) = (self.start_time, self.end_time);
        if start <= end {
            start <= time && time < end
        } else {
            time >= start || time < end
        }
    }

    pub fn should_start_at(&self, time: TimeOfDay) -> bool {
        self.enabled && self.contains(time)
    }
}
