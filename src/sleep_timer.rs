pub mod editor;
pub mod picker;
pub mod timer;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    settings::{controller::SettingsController, errors::SettingsError, time::AutoSleepTimer},
    sleep_timer::{
        editor::{EditorState, SleepTimerCommit, SleepTimerEditor},
        picker::{TimePicker, TimePickerTarget},
        timer::{SleepTimer, SleepTimerError},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepTimerViewState {
    pub custom_sleep_time: i32,
    pub auto_sleep_timer: AutoSleepTimer,
}

impl SleepTimerViewState {
    /// The start and end rows are only shown while the schedule is enabled.
    pub fn auto_sleep_timer_expanded(&self) -> bool {
        self.auto_sleep_timer.enabled
    }
}

/// The sleep timer sheet: presets, the custom entry and the auto sleep timer schedule.
pub struct SleepTimerSheet {
    controller: Arc<SettingsController>,
    timer: Arc<SleepTimer>,
    editor: SleepTimerEditor,
    picker: Option<TimePicker>,
}

impl SleepTimerSheet {
    pub fn new(controller: Arc<SettingsController>, timer: Arc<SleepTimer>) -> Self {
        let custom = controller.preferences().sleep_time.get();

        Self {
            controller,
            timer,
            editor: SleepTimerEditor::new(custom),
            picker: None,
        }
    }

    pub fn view_state(&self) -> SleepTimerViewState {
        SleepTimerViewState {
            custom_sleep_time: self.editor.custom_minutes(),
            auto_sleep_timer: self.controller.preferences().auto_sleep_timer.get(),
        }
    }

    /// The sheet closes once a duration has been committed.
    pub fn is_open(&self) -> bool {
        !matches!(self.editor.state(), EditorState::Committed(_))
    }

    pub fn increment(&mut self) {
        self.editor.increment();
    }

    pub fn decrement(&mut self) {
        self.editor.decrement();
    }

    pub fn select_preset(
        &mut self,
        minutes: i32,
    ) -> Result<Option<SleepTimerCommit>, SleepTimerError> {
        if self.editor.is_committed() {
            return Ok(None);
        }

        self.timer.start(minutes)?;
        Ok(self.editor.select_preset(minutes))
    }

    /// Start the custom duration and remember it for next time.
    ///
    /// The timer runs even if the value can't be remembered.
    pub fn accept_custom(&mut self) -> Result<Option<SleepTimerCommit>, SleepTimerError> {
        if self.editor.is_committed() {
            return Ok(None);
        }

        let minutes = self.editor.custom_minutes();
        self.timer.start(minutes)?;
        if let Err(error) = self.controller.set_sleep_time(minutes) {
            warn!(?error, minutes, "couldn't remember custom sleep time");
        }
        Ok(self.editor.commit_custom())
    }

    /// Flip the schedule switch. Only the enabled flag changes.
    pub fn toggle_auto_sleep_timer(&self) -> Result<(), SettingsError> {
        self.controller.toggle_auto_sleep_timer()
    }

    pub fn time_picker(&self) -> Option<&TimePicker> {
        self.picker.as_ref()
    }

    pub fn time_picker_mut(&mut self) -> Option<&mut TimePicker> {
        self.picker.as_mut()
    }

    /// Open the picker for one bound, seeded with the stored time.
    pub fn open_time_picker(&mut self, target: TimePickerTarget) {
        let schedule = self.controller.preferences().auto_sleep_timer.get();
        let initial = match target {
            TimePickerTarget::Start => schedule.start_time,
            TimePickerTarget::End => schedule.end_time,
        };

        debug!(?target, %initial, "opening time picker");
        self.picker = Some(TimePicker::new(target, initial));
    }

    pub fn confirm_time_picker(&mut self) -> Result<(), SettingsError> {
        let Some(picker) = self.picker.take() else {
            return Ok(());
        };

        let result = picker.confirm();
        match result.target {
            TimePickerTarget::Start => self
                .controller
                .set_auto_sleep_timer_start(result.hour, result.minute),
            TimePickerTarget::End => self
                .controller
                .set_auto_sleep_timer_end(result.hour, result.minute),
        }
    }

    pub fn cancel_time_picker(&mut self) {
        self.picker = None;
    }
}

#[cfg(test)]
mod tests {
    use tokio::runtime::Handle;

    use super::*;
    use crate::{
        settings::{
            testing::{
                Harness, harness, harness_with_broken_store, settle, wait_for_writer_to_stop,
            },
            time::TimeOfDay,
        },
        sleep_timer::editor::CommitSource,
    };

    fn sheet(h: &Harness) -> (SleepTimerSheet, Arc<SleepTimer>) {
        let timer = Arc::new(SleepTimer::new(Handle::current(), || {}));
        (SleepTimerSheet::new(h.controller.clone(), timer.clone()), timer)
    }

    #[tokio::test]
    async fn custom_entry_starts_at_stored_value() {
        let h = harness(false);
        let (sheet, _) = sheet(&h);

        let state = sheet.view_state();
        assert_eq!(state.custom_sleep_time, 20);
        assert!(!state.auto_sleep_timer_expanded());
        assert!(sheet.is_open());
    }

    #[tokio::test]
    async fn preset_starts_timer_and_closes_without_saving() {
        let h = harness(false);
        let (mut sheet, timer) = sheet(&h);
        sheet.increment();

        let commit = sheet.select_preset(60).unwrap().unwrap();
        assert_eq!(commit.minutes, 60);
        assert_eq!(commit.source, CommitSource::Preset);
        assert!(timer.is_running());
        assert!(!sheet.is_open());
        assert_eq!(sheet.view_state().custom_sleep_time, 21);
        assert_eq!(h.controller.preferences().sleep_time.get(), 20);
    }

    #[tokio::test]
    async fn custom_commit_is_remembered() {
        let h = harness(false);
        let (mut sheet, timer) = sheet(&h);
        sheet.increment();
        sheet.increment();
        sheet.decrement();

        let commit = sheet.accept_custom().unwrap().unwrap();
        assert_eq!(commit.minutes, 21);
        assert!(timer.is_running());
        settle(&h.controller.preferences().sleep_time, |m| *m == 21).await;
    }

    #[tokio::test]
    async fn zero_minutes_keeps_sheet_open() {
        let h = harness(false);
        let (mut sheet, timer) = sheet(&h);
        for _ in 0..20 {
            sheet.decrement();
        }

        assert_eq!(
            sheet.accept_custom(),
            Err(SleepTimerError::InvalidDuration(0))
        );
        assert!(sheet.is_open());
        assert!(!timer.is_running());
    }

    #[tokio::test]
    async fn custom_commit_survives_an_unwritable_store() {
        let h = harness_with_broken_store();
        wait_for_writer_to_stop(&h.controller).await;
        let (mut sheet, timer) = sheet(&h);

        let commit = sheet.accept_custom().unwrap().unwrap();
        assert_eq!(commit.minutes, 20);
        assert_eq!(commit.source, CommitSource::Custom);
        assert!(timer.is_running());
        assert!(!sheet.is_open());
        assert_eq!(sheet.accept_custom(), Ok(None));
    }

    #[tokio::test]
    async fn switch_expands_schedule_rows() {
        let h = harness(false);
        let (sheet, _) = sheet(&h);

        sheet.toggle_auto_sleep_timer().unwrap();
        settle(&h.controller.preferences().auto_sleep_timer, |t| t.enabled).await;

        let state = sheet.view_state();
        assert!(state.auto_sleep_timer_expanded());
        assert_eq!(state.auto_sleep_timer.start_time, TimeOfDay::new(22, 0).unwrap());
    }

    #[tokio::test]
    async fn picker_confirms_into_the_right_bound() {
        let h = harness(false);
        let (mut sheet, _) = sheet(&h);

        sheet.open_time_picker(TimePickerTarget::End);
        let picker = sheet.time_picker_mut().unwrap();
        assert_eq!((picker.hour(), picker.minute()), (6, 0));
        picker.step_hour(1);
        picker.step_minute(15);
        sheet.confirm_time_picker().unwrap();
        assert!(sheet.time_picker().is_none());

        let expected = TimeOfDay::new(7, 15).unwrap();
        let prefs = h.controller.preferences();
        settle(&prefs.auto_sleep_timer, |t| t.end_time == expected).await;
        assert_eq!(
            prefs.auto_sleep_timer.get().start_time,
            TimeOfDay::new(22, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn cancelled_picker_changes_nothing() {
        let h = harness(false);
        let (mut sheet, _) = sheet(&h);
        let before = h.controller.preferences().auto_sleep_timer.get();

        sheet.open_time_picker(TimePickerTarget::Start);
        if let Some(picker) = sheet.time_picker_mut() {
            picker.step_hour(-3);
        }
        sheet.cancel_time_picker();

        assert!(sheet.time_picker().is_none());
        assert_eq!(sheet.confirm_time_picker(), Ok(()));
        assert_eq!(h.controller.preferences().auto_sleep_timer.get(), before);
    }
}
