use std::sync::Arc;

use gpui::{App, AppContext, Entity, Global};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

use crate::{
    navigation::Destination,
    settings::{
        controller::{SettingsController, SettingsViewState},
        grid::WindowGridDefault,
    },
    sleep_timer::timer::{SleepTimer, SleepTimerState},
    ui::{settings::close_settings_window, theme::apply_theme},
};

/// Long-lived handles shared by every window.
pub struct Services {
    pub controller: Arc<SettingsController>,
    pub sleep_timer: Arc<SleepTimer>,
    pub grid_default: WindowGridDefault,
}

impl Global for Services {}

/// gpui-side mirrors of the preference and timer watches. Views observe these.
pub struct Models {
    pub settings: Entity<SettingsViewState>,
    pub sleep_timer: Entity<SleepTimerState>,
}

impl Global for Models {}

pub fn build_models(cx: &mut App, services: Services, navigation: UnboundedReceiver<Destination>) {
    let settings = cx.new(|_| services.controller.snapshot());
    let sleep_timer = cx.new(|_| services.sleep_timer.state());

    broadcast_settings(cx, services.controller.clone(), settings.clone());
    broadcast_sleep_timer(cx, &services.sleep_timer, sleep_timer.clone());
    handle_navigation(cx, navigation);

    cx.set_global(services);
    cx.set_global(Models {
        settings,
        sleep_timer,
    });
}

fn broadcast_settings(
    cx: &mut App,
    controller: Arc<SettingsController>,
    model: Entity<SettingsViewState>,
) {
    let mut subscription = controller.subscribe();
    let mut dark = controller.snapshot().use_dark_theme;

    cx.spawn(async move |cx| {
        while subscription.changed().await.is_ok() {
            let snapshot = controller.snapshot();

            if snapshot.use_dark_theme != dark {
                dark = snapshot.use_dark_theme;
                let _ = cx.update(|cx| apply_theme(cx, dark));
            }

            let _ = model.update(cx, |state, cx| {
                *state = snapshot;
                cx.notify();
            });
        }

        debug!("preference broadcast ended");
    })
    .detach();
}

fn broadcast_sleep_timer(cx: &mut App, timer: &SleepTimer, model: Entity<SleepTimerState>) {
    let mut state_rx = timer.subscribe();

    cx.spawn(async move |cx| {
        while state_rx.changed().await.is_ok() {
            let state = *state_rx.borrow_and_update();
            let _ = model.update(cx, |m, cx| {
                *m = state;
                cx.notify();
            });
        }
    })
    .detach();
}

fn handle_navigation(cx: &mut App, mut navigation: UnboundedReceiver<Destination>) {
    cx.spawn(async move |cx| {
        while let Some(destination) = navigation.recv().await {
            match destination {
                Destination::Website(url) => {
                    debug!(%url, "opening website");
                    if let Err(error) = open::that(url.as_str()) {
                        warn!(?error, %url, "couldn't open browser");
                    }
                }
                Destination::Back => {
                    let _ = cx.update(close_settings_window);
                }
            }
        }
    })
    .detach();
}
