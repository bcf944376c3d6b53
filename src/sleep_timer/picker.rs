use crate::settings::time::TimeOfDay;

/// Which bound of the auto sleep timer window a picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePickerTarget {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePickerResult {
    pub target: TimePickerTarget,
    pub hour: u32,
    pub minute: u32,
}

/// 24-hour time picker. Holds only the value being edited; nothing is stored until the
/// caller acts on [`TimePicker::confirm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePicker {
    target: TimePickerTarget,
    hour: u32,
    minute: u32,
}

impl TimePicker {
    pub fn new(target: TimePickerTarget, initial: TimeOfDay) -> Self {
        Self {
            target,
            hour: initial.hour(),
            minute: initial.minute(),
        }
    }

    pub fn target(&self) -> TimePickerTarget {
        self.target
    }

    pub fn is_24_hour(&self) -> bool {
        true
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Hours wrap around midnight; minutes wrap within the hour.
    pub fn step_hour(&mut self, delta: i32) {
        self.hour = (self.hour as i32 + delta).rem_euclid(24) as u32;
    }

    pub fn step_minute(&mut self, delta: i32) {
        self.minute = (self.minute as i32 + delta).rem_euclid(60) as u32;
    }

    pub fn label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    pub fn confirm(self) -> TimePickerResult {
        TimePickerResult {
            target: self.target,
            hour: self.hour,
            minute: self.minute,
        }
    }
}
