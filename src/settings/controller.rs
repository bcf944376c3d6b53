use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::{
    navigation::{
        AppInfo, DeviceInfo, Destination, IDEAS_URL, Navigator, SUPPORT_URL, TRANSLATIONS_URL,
        bug_report_url,
    },
    settings::{
        errors::SettingsError,
        grid::{GridDefault, GridMode},
        preferences::Preferences,
        time::{AutoSleepTimer, TimeOfDay},
        writer::{PreferenceCommand, PreferenceSender},
    },
};

/// Desktop platforms always let the user pick the theme.
pub const DARK_THEME_SETTABLE: bool = true;

/// The dialog currently shown over the settings screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    #[default]
    Closed,
    SeekTime,
    AutoRewindAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsViewState {
    pub use_dark_theme: bool,
    pub show_dark_theme_pref: bool,
    pub seek_time_in_seconds: i32,
    pub auto_rewind_in_seconds: i32,
    pub use_grid: bool,
    pub dialog: Dialog,
    pub app_version: String,
    pub auto_sleep_timer: AutoSleepTimer,
}

/// Reads the preferences behind the settings screen and turns user input into writes.
///
/// Every mutation is submitted to the preference writer and returns immediately; the new
/// values show up through [`SettingsController::subscribe`] once they are stored.
pub struct SettingsController {
    prefs: Arc<Preferences>,
    writer: PreferenceSender,
    navigator: Arc<dyn Navigator>,
    grid_default: Arc<dyn GridDefault>,
    app_info: AppInfo,
    device_info: DeviceInfo,
    dialog: watch::Sender<Dialog>,
}

impl SettingsController {
    pub fn new(
        prefs: Arc<Preferences>,
        writer: PreferenceSender,
        navigator: Arc<dyn Navigator>,
        grid_default: Arc<dyn GridDefault>,
        app_info: AppInfo,
        device_info: DeviceInfo,
    ) -> Self {
        let (dialog, _) = watch::channel(Dialog::Closed);

        Self {
            prefs,
            writer,
            navigator,
            grid_default,
            app_info,
            device_info,
            dialog,
        }
    }

    pub fn snapshot(&self) -> SettingsViewState {
        let prefs = &self.prefs;

        SettingsViewState {
            use_dark_theme: prefs.dark_theme.get(),
            show_dark_theme_pref: DARK_THEME_SETTABLE,
            seek_time_in_seconds: prefs.seek_time.get(),
            auto_rewind_in_seconds: prefs.auto_rewind_amount.get(),
            use_grid: self.use_grid(),
            dialog: *self.dialog.borrow(),
            app_version: self.app_info.version_name.clone(),
            auto_sleep_timer: prefs.auto_sleep_timer.get(),
        }
    }

    pub fn subscribe(&self) -> SettingsSubscription {
        SettingsSubscription {
            dark_theme: self.prefs.dark_theme.subscribe(),
            seek_time: self.prefs.seek_time.subscribe(),
            auto_rewind_amount: self.prefs.auto_rewind_amount.subscribe(),
            grid_mode: self.prefs.grid_mode.subscribe(),
            auto_sleep_timer: self.prefs.auto_sleep_timer.subscribe(),
            dialog: self.dialog.subscribe(),
        }
    }

    /// Resolves the stored grid mode against the current device default.
    pub fn use_grid(&self) -> bool {
        self.prefs
            .grid_mode
            .get()
            .resolve(self.grid_default.as_ref())
    }

    pub fn preferences(&self) -> &Arc<Preferences> {
        &self.prefs
    }

    fn submit(&self, command: PreferenceCommand) -> Result<(), SettingsError> {
        debug!(?command, "submitting preference command");
        self.writer.submit(command)
    }

    /// Leave the settings screen. An open dialog does not survive leaving.
    pub fn close(&self) -> Result<(), SettingsError> {
        self.dismiss_dialog()?;
        self.navigator.go_to(Destination::Back);
        Ok(())
    }

    pub fn toggle_dark_theme(&self) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::ToggleDarkTheme)
    }

    pub fn toggle_grid(&self) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::ToggleGrid)
    }

    pub fn set_seek_amount(&self, seconds: i32) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::SetSeekTime(seconds))
    }

    /// Nudge the seek time from whatever is stored when the write is applied.
    pub fn step_seek_amount(&self, delta: i32) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::StepSeekTime(delta))
    }

    pub fn open_seek_amount_dialog(&self) -> Result<(), SettingsError> {
        self.dialog.send_replace(Dialog::SeekTime);
        Ok(())
    }

    pub fn set_auto_rewind_amount(&self, seconds: i32) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::SetAutoRewindAmount(seconds))
    }

    pub fn step_auto_rewind_amount(&self, delta: i32) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::StepAutoRewindAmount(delta))
    }

    pub fn open_auto_rewind_dialog(&self) -> Result<(), SettingsError> {
        self.dialog.send_replace(Dialog::AutoRewindAmount);
        Ok(())
    }

    pub fn dismiss_dialog(&self) -> Result<(), SettingsError> {
        self.dialog.send_replace(Dialog::Closed);
        Ok(())
    }

    pub fn get_support(&self) -> Result<(), SettingsError> {
        self.navigator.go_to(Destination::website(SUPPORT_URL)?);
        Ok(())
    }

    pub fn suggest_idea(&self) -> Result<(), SettingsError> {
        self.navigator.go_to(Destination::website(IDEAS_URL)?);
        Ok(())
    }

    pub fn open_bug_report(&self) -> Result<(), SettingsError> {
        let url = bug_report_url(&self.app_info, &self.device_info)?;
        self.navigator.go_to(Destination::Website(url));
        Ok(())
    }

    pub fn open_translations(&self) -> Result<(), SettingsError> {
        self.dismiss_dialog()?;
        self.navigator.go_to(Destination::website(TRANSLATIONS_URL)?);
        Ok(())
    }

    pub fn set_auto_sleep_timer_enabled(&self, enabled: bool) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::SetAutoSleepTimerEnabled(enabled))
    }

    pub fn toggle_auto_sleep_timer(&self) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::ToggleAutoSleepTimer)
    }

    pub fn set_auto_sleep_timer_start(&self, hour: u32, minute: u32) -> Result<(), SettingsError> {
        let time = TimeOfDay::new(hour, minute)?;
        self.submit(PreferenceCommand::SetAutoSleepTimerStart(time))
    }

    pub fn set_auto_sleep_timer_end(&self, hour: u32, minute: u32) -> Result<(), SettingsError> {
        let time = TimeOfDay::new(hour, minute)?;
        self.submit(PreferenceCommand::SetAutoSleepTimerEnd(time))
    }

    pub fn set_sleep_time(&self, minutes: i32) -> Result<(), SettingsError> {
        self.submit(PreferenceCommand::SetSleepTime(minutes))
    }
}

/// Change notifications for everything [`SettingsController::snapshot`] is built from.
pub struct SettingsSubscription {
    dark_theme: watch::Receiver<bool>,
    seek_time: watch::Receiver<i32>,
    auto_rewind_amount: watch::Receiver<i32>,
    grid_mode: watch::Receiver<GridMode>,
    auto_sleep_timer: watch::Receiver<AutoSleepTimer>,
    dialog: watch::Receiver<Dialog>,
}

impl SettingsSubscription {
    /// Resolves once any of the observed values changes.
    pub async fn changed(&mut self) -> Result<(), SettingsError> {
        let result = tokio::select! {
            biased;
            r = self.dialog.changed() => r,
            r = self.dark_theme.changed() => r,
            r = self.grid_mode.changed() => r,
            r = self.seek_time.changed() => r,
            r = self.auto_rewind_amount.changed() => r,
            r = self.auto_sleep_timer.changed() => r,
        };

        result.map_err(|_| SettingsError::StoreUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::settings::testing::{harness, harness_with_grid, settle};

    #[tokio::test]
    async fn first_read_uses_defaults() {
        let h = harness(false);
        let state = h.controller.snapshot();

        assert!(!state.use_dark_theme);
        assert!(state.show_dark_theme_pref);
        assert_eq!(state.seek_time_in_seconds, 0);
        assert_eq!(state.auto_rewind_in_seconds, 0);
        assert!(state.use_grid);
        assert_eq!(state.dialog, Dialog::Closed);
        assert_eq!(state.app_version, "1.2.3");
        assert_eq!(state.auto_sleep_timer, AutoSleepTimer::default());
    }

    #[tokio::test]
    async fn subscription_fires_on_preference_write() {
        let h = harness(false);
        let mut sub = h.controller.subscribe();

        h.controller.toggle_dark_theme().unwrap();
        sub.changed().await.unwrap();

        assert!(h.controller.snapshot().use_dark_theme);
    }

    #[tokio::test]
    async fn toggle_grid_from_grid_shows_list() {
        let h = harness(true);
        h.controller.toggle_grid().unwrap();
        settle(&h.controller.preferences().grid_mode, |m| *m == GridMode::List).await;

        assert!(!h.controller.snapshot().use_grid);
    }

    #[tokio::test]
    async fn seek_and_rewind_are_stored_as_given() {
        let h = harness(false);
        h.controller.set_seek_amount(-5).unwrap();
        h.controller.set_auto_rewind_amount(12).unwrap();
        settle(&h.controller.preferences().auto_rewind_amount, |s| *s == 12).await;

        let state = h.controller.snapshot();
        assert_eq!(state.seek_time_in_seconds, -5);
        assert_eq!(state.auto_rewind_in_seconds, 12);
    }

    #[tokio::test]
    async fn only_one_dialog_is_open() {
        let h = harness(false);
        let mut sub = h.controller.subscribe();

        h.controller.open_seek_amount_dialog().unwrap();
        sub.changed().await.unwrap();
        assert_eq!(h.controller.snapshot().dialog, Dialog::SeekTime);

        h.controller.open_auto_rewind_dialog().unwrap();
        assert_eq!(h.controller.snapshot().dialog, Dialog::AutoRewindAmount);

        h.controller.dismiss_dialog().unwrap();
        assert_eq!(h.controller.snapshot().dialog, Dialog::Closed);
    }

    #[tokio::test]
    async fn start_time_round_trips_and_keeps_other_fields() {
        let h = harness(false);
        let prefs = h.controller.preferences().clone();
        let before = prefs.auto_sleep_timer.get();

        h.controller.set_auto_sleep_timer_start(23, 45).unwrap();
        let expected = TimeOfDay::new(23, 45).unwrap();
        settle(&prefs.auto_sleep_timer, |t| t.start_time == expected).await;

        let after = h.controller.snapshot().auto_sleep_timer;
        assert_eq!(after.start_time, expected);
        assert_eq!(after.end_time, before.end_time);
        assert_eq!(after.enabled, before.enabled);
    }

    #[tokio::test]
    async fn enabled_flag_round_trips_without_touching_bounds() {
        let h = harness(false);
        let prefs = h.controller.preferences().clone();
        h.controller.set_auto_sleep_timer_end(7, 30).unwrap();
        settle(&prefs.auto_sleep_timer, |t| t.end_time.hour() == 7).await;
        let bounds = prefs.auto_sleep_timer.get();

        h.controller.set_auto_sleep_timer_enabled(true).unwrap();
        settle(&prefs.auto_sleep_timer, |t| t.enabled).await;
        h.controller.set_auto_sleep_timer_enabled(false).unwrap();
        settle(&prefs.auto_sleep_timer, |t| !t.enabled).await;

        let after = prefs.auto_sleep_timer.get();
        assert!(!after.enabled);
        assert_eq!(after.start_time, bounds.start_time);
        assert_eq!(after.end_time, bounds.end_time);
    }

    #[tokio::test]
    async fn invalid_time_is_rejected_and_nothing_is_written() {
        let h = harness(false);
        let prefs = h.controller.preferences().clone();
        let before = prefs.auto_sleep_timer.get();

        assert_eq!(
            h.controller.set_auto_sleep_timer_start(25, 0),
            Err(SettingsError::InvalidTimeOfDay(
                crate::settings::errors::InvalidTimeOfDay {
                    hour: 25,
                    minute: 0
                }
            ))
        );
        assert!(h.controller.set_auto_sleep_timer_end(12, 60).is_err());

        // writes are applied in order, so once this one lands any earlier write would have too
        h.controller.set_seek_amount(1).unwrap();
        settle(&prefs.seek_time, |s| *s == 1).await;

        assert_eq!(prefs.auto_sleep_timer.get(), before);
    }

    #[tokio::test]
    async fn close_dismisses_open_dialog() {
        let mut h = harness(false);

        h.controller.open_seek_amount_dialog().unwrap();
        h.controller.close().unwrap();

        assert_eq!(h.controller.snapshot().dialog, Dialog::Closed);
        assert_eq!(h.navigation.recv().await, Some(Destination::Back));
    }

    #[tokio::test]
    async fn steps_apply_to_the_stored_value() {
        let h = harness(false);
        let prefs = h.controller.preferences().clone();

        h.controller.step_seek_amount(1).unwrap();
        h.controller.step_seek_amount(1).unwrap();
        h.controller.step_auto_rewind_amount(-1).unwrap();
        h.controller.step_auto_rewind_amount(3).unwrap();
        settle(&prefs.auto_rewind_amount, |s| *s == 3).await;

        assert_eq!(prefs.seek_time.get(), 4);
    }

    #[tokio::test]
    async fn double_toggle_of_auto_sleep_timer_is_not_lost() {
        let h = harness(false);
        let prefs = h.controller.preferences().clone();

        h.controller.toggle_auto_sleep_timer().unwrap();
        h.controller.toggle_auto_sleep_timer().unwrap();
        h.controller.set_seek_amount(9).unwrap();
        settle(&prefs.seek_time, |s| *s == 9).await;

        assert!(!prefs.auto_sleep_timer.get().enabled);
    }

    #[tokio::test]
    async fn follow_device_tracks_the_resolver_without_a_write() {
        let wide = Arc::new(AtomicBool::new(true));
        let resolver = wide.clone();
        let h = harness_with_grid(Arc::new(move || resolver.load(Ordering::SeqCst)));
        let prefs = h.controller.preferences().clone();

        prefs
            .grid_mode
            .update(|_| GridMode::FollowDevice)
            .await
            .unwrap();
        assert!(h.controller.use_grid());

        wide.store(false, Ordering::SeqCst);
        assert!(!h.controller.use_grid());
        assert!(!h.controller.snapshot().use_grid);
    }

    #[tokio::test]
    async fn navigation_commands_emit_one_destination_each() {
        let mut h = harness(false);

        h.controller.close().unwrap();
        h.controller.get_support().unwrap();
        h.controller.suggest_idea().unwrap();
        h.controller.open_bug_report().unwrap();
        h.controller.open_seek_amount_dialog().unwrap();
        h.controller.open_translations().unwrap();

        assert_eq!(h.navigation.recv().await, Some(Destination::Back));
        assert_eq!(
            h.navigation.recv().await,
            Some(Destination::website(SUPPORT_URL).unwrap())
        );
        assert_eq!(
            h.navigation.recv().await,
            Some(Destination::website(IDEAS_URL).unwrap())
        );
        match h.navigation.recv().await {
            Some(Destination::Website(url)) => {
                assert!(url.as_str().contains("androidversion=33"));
                assert!(url.as_str().contains("device=Pixel+7"));
            }
            other => panic!("expected bug report url, got {other:?}"),
        }
        assert_eq!(
            h.navigation.recv().await,
            Some(Destination::website(TRANSLATIONS_URL).unwrap())
        );
        assert!(h.navigation.try_recv().is_err());
        assert_eq!(h.controller.snapshot().dialog, Dialog::Closed);
    }
}
