use std::{ops::RangeInclusive, sync::Arc};

use crate::settings::{
    grid::GridMode,
    store::{Pref, PreferenceStore},
    time::AutoSleepTimer,
};

pub const DARK_THEME: &str = "darkTheme";
pub const GRID_MODE: &str = "gridView";
pub const SEEK_TIME: &str = "SEEK_TIME";
pub const AUTO_REWIND_AMOUNT: &str = "AUTO_REWIND";
pub const SLEEP_TIME: &str = "SLEEP_TIME";
pub const AUTO_SLEEP_TIMER: &str = "AUTO_SLEEP_TIMER";

pub const DEFAULT_SLEEP_TIME: i32 = 20;

/// Seconds offered by the seek time dialog.
pub const SEEK_TIME_RANGE: RangeInclusive<i32> = 3..=60;
/// Seconds offered by the auto rewind dialog.
pub const AUTO_REWIND_RANGE: RangeInclusive<i32> = 0..=20;

/// One step inside `range`; values stored outside of it are pulled back in.
pub fn step_within(current: i32, delta: i32, range: &RangeInclusive<i32>) -> i32 {
    current
        .saturating_add(delta)
        .clamp(*range.start(), *range.end())
}

/// Every persisted preference the settings and sleep timer screens work with.
#[derive(Debug)]
pub struct Preferences {
    pub dark_theme: Pref<bool>,
    pub grid_mode: Pref<GridMode>,
    /// Seconds skipped by the seek buttons.
    pub seek_time: Pref<i32>,
    /// Seconds rewound when playback resumes.
    pub auto_rewind_amount: Pref<i32>,
    /// Minutes of the custom sleep timer entry.
    pub sleep_time: Pref<i32>,
    pub auto_sleep_timer: Pref<AutoSleepTimer>,
}

impl Preferences {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self {
            dark_theme: Pref::new(store.clone(), DARK_THEME, false),
            grid_mode: Pref::new(store.clone(), GRID_MODE, GridMode::default()),
            seek_time: Pref::new(store.clone(), SEEK_TIME, 0),
            auto_rewind_amount: Pref::new(store.clone(), AUTO_REWIND_AMOUNT, 0),
            sleep_time: Pref::new(store.clone(), SLEEP_TIME, DEFAULT_SLEEP_TIME),
            auto_sleep_timer: Pref::new(store, AUTO_SLEEP_TIMER, AutoSleepTimer::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_stay_inside_the_range() {
        assert_eq!(step_within(10, 1, &SEEK_TIME_RANGE), 11);
        assert_eq!(step_within(60, 1, &SEEK_TIME_RANGE), 60);
        assert_eq!(step_within(0, 1, &SEEK_TIME_RANGE), 3);
        assert_eq!(step_within(0, -1, &AUTO_REWIND_RANGE), 0);
        assert_eq!(step_within(-5, 1, &AUTO_REWIND_RANGE), 0);
    }
}
