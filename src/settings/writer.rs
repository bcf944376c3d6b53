use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, error, info};

use crate::settings::{
    errors::{SettingsError, StoreError},
    grid::GridDefault,
    preferences::{AUTO_REWIND_RANGE, Preferences, SEEK_TIME_RANGE, step_within},
    time::TimeOfDay,
};

/// One write against one preference slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceCommand {
    ToggleDarkTheme,
    ToggleGrid,
    SetSeekTime(i32),
    /// Relative change, clamped to [`SEEK_TIME_RANGE`].
    StepSeekTime(i32),
    SetAutoRewindAmount(i32),
    /// Relative change, clamped to [`AUTO_REWIND_RANGE`].
    StepAutoRewindAmount(i32),
    SetSleepTime(i32),
    SetAutoSleepTimerEnabled(bool),
    ToggleAutoSleepTimer,
    SetAutoSleepTimerStart(TimeOfDay),
    SetAutoSleepTimerEnd(TimeOfDay),
}

/// Submission side of the preference writer. Submitting never waits for the write.
#[derive(Debug, Clone)]
pub struct PreferenceSender(UnboundedSender<PreferenceCommand>);

impl PreferenceSender {
    pub fn submit(&self, command: PreferenceCommand) -> Result<(), SettingsError> {
        self.0
            .send(command)
            .map_err(|_| SettingsError::StoreUnavailable)
    }
}

/// Applies preference commands one at a time, in the order they were submitted.
pub struct PreferenceWriter {
    prefs: Arc<Preferences>,
    grid_default: Arc<dyn GridDefault>,
    rx: UnboundedReceiver<PreferenceCommand>,
}

impl PreferenceWriter {
    pub fn new(
        prefs: Arc<Preferences>,
        grid_default: Arc<dyn GridDefault>,
    ) -> (Self, PreferenceSender) {
        let (tx, rx) = unbounded_channel();
        let writer = Self {
            prefs,
            grid_default,
            rx,
        };
        (writer, PreferenceSender(tx))
    }

    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            debug!(?command, "applying preference command");

            if let Err(e) = self.apply(command).await {
                // a store that can't be written is not retried; later submissions fail instead
                error!("Preference store failed, no further changes will be saved: {}", e);
                self.rx.close();
                return;
            }
        }

        info!("preference writer stopped");
    }

    async fn apply(&self, command: PreferenceCommand) -> Result<(), StoreError> {
        let prefs = &self.prefs;

        match command {
            PreferenceCommand::ToggleDarkTheme => {
                prefs.dark_theme.update(|dark| !dark).await?;
            }
            PreferenceCommand::ToggleGrid => {
                let default = self.grid_default.as_ref();
                prefs
                    .grid_mode
                    .update(|mode| mode.toggled(default))
                    .await?;
            }
            PreferenceCommand::SetSeekTime(seconds) => {
                prefs.seek_time.update(|_| seconds).await?;
            }
            PreferenceCommand::StepSeekTime(delta) => {
                prefs
                    .seek_time
                    .update(|seconds| step_within(seconds, delta, &SEEK_TIME_RANGE))
                    .await?;
            }
            PreferenceCommand::SetAutoRewindAmount(seconds) => {
                prefs.auto_rewind_amount.update(|_| seconds).await?;
            }
            PreferenceCommand::StepAutoRewindAmount(delta) => {
                prefs
                    .auto_rewind_amount
                    .update(|seconds| step_within(seconds, delta, &AUTO_REWIND_RANGE))
                    .await?;
            }
            PreferenceCommand::SetSleepTime(minutes) => {
                prefs.sleep_time.update(|_| minutes).await?;
            }
            PreferenceCommand::SetAutoSleepTimerEnabled(enabled) => {
                prefs
                    .auto_sleep_timer
                    .update(|timer| timer.with_enabled(enabled))
                    .await?;
            }
            PreferenceCommand::ToggleAutoSleepTimer => {
                prefs
                    .auto_sleep_timer
                    .update(|timer| timer.with_enabled(!timer.enabled))
                    .await?;
            }
            PreferenceCommand::SetAutoSleepTimerStart(time) => {
                prefs
                    .auto_sleep_timer
                    .update(|timer| timer.with_start_time(time))
                    .await?;
            }
            PreferenceCommand::SetAutoSleepTimerEnd(time) => {
                prefs
                    .auto_sleep_timer
                    .update(|timer| timer.with_end_time(time))
                    .await?;
            }
        }

        Ok(())
    }
}
