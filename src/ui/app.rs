use std::{fs, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use directories::ProjectDirs;
use gpui::{App, Application};
use gpui_platform::current_platform;
use tokio::sync::mpsc::unbounded_channel;
use tracing::{debug, info, warn};

use crate::{
    navigation::{AppInfo, DeviceInfo},
    settings::{
        controller::SettingsController, grid::WindowGridDefault, setup_preferences,
        time::TimeOfDay,
    },
    sleep_timer::timer::SleepTimer,
    ui::{
        arguments::{Args, Screen},
        global_actions::register_actions,
        models::{Services, build_models},
        settings::open_settings_window,
        sleep_timer::open_sleep_timer_window,
        theme::setup_theme,
    },
};

/// Width a fresh window is laid out with before the first frame reports the real one.
const INITIAL_WINDOW_WIDTH: f32 = 760.0;

pub fn get_data_dir(args: &Args) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &args.data_dir {
        return Ok(dir.clone());
    }

    let dirs = ProjectDirs::from("de", "ph1b", "voice").context("couldn't generate project dirs")?;
    Ok(dirs.data_dir().to_path_buf())
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let data_dir = get_data_dir(&args)?;
    fs::create_dir_all(&data_dir).inspect_err(|error| {
        tracing::error!(
            ?error,
            "couldn't create data directory '{}'",
            data_dir.display(),
        )
    })?;

    let grid_default = WindowGridDefault::new(INITIAL_WINDOW_WIDTH);
    let (prefs, writer) = setup_preferences(&data_dir, Arc::new(grid_default.clone()));

    let sleep_timer = Arc::new(SleepTimer::new(crate::RUNTIME.handle().clone(), || {
        // playback lives outside this app; the expiry is only reported
        info!("sleep timer ran out, pausing playback");
    }));

    let schedule = prefs.auto_sleep_timer.get();
    let now = TimeOfDay::from_naive(chrono::Local::now().time());
    match sleep_timer.start_auto_if_due(&schedule, now, prefs.sleep_time.get()) {
        Ok(true) => info!(%now, "auto sleep timer started"),
        Ok(false) => debug!(%now, "auto sleep timer not due"),
        Err(error) => warn!(?error, "couldn't start auto sleep timer"),
    }

    let (navigation_tx, navigation_rx) = unbounded_channel();
    let controller = Arc::new(SettingsController::new(
        prefs.clone(),
        writer,
        Arc::new(navigation_tx),
        Arc::new(grid_default.clone()),
        AppInfo::current(),
        DeviceInfo::detect(),
    ));

    Application::with_platform(current_platform(false)).run(move |cx: &mut App| {
        register_actions(cx);
        setup_theme(cx, data_dir.join("theme.json"), prefs.dark_theme.get());

        build_models(
            cx,
            Services {
                controller,
                sleep_timer,
                grid_default,
            },
            navigation_rx,
        );

        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                info!("last window closed");
                cx.quit();
            }
        })
        .detach();

        cx.activate(true);

        match args.screen {
            Screen::Settings => open_settings_window(cx),
            Screen::SleepTimer => open_sleep_timer_window(cx),
        }
    });

    Ok(())
}
