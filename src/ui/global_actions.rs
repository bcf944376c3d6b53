use gpui::{App, KeyBinding, actions};
use tracing::{debug, info};

use crate::ui::{
    components::menus_builder::{MenuBuilder, MenusBuilder},
    settings::open_settings_window,
    sleep_timer::open_sleep_timer_window,
};

actions!(voice, [Quit, OpenSettings, OpenSleepTimer]);
actions!(voice, [HideSelf, HideOthers, ShowAll]);

pub fn register_actions(cx: &mut App) {
    debug!("registering actions");
    cx.on_action(quit);
    cx.on_action(open_settings);
    cx.on_action(open_sleep_timer);
    cx.on_action(hide_self);
    cx.on_action(hide_others);
    cx.on_action(show_all);

    if cfg!(target_os = "macos") {
        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);
        cx.bind_keys([KeyBinding::new("cmd-h", HideSelf, None)]);
        cx.bind_keys([KeyBinding::new("cmd-alt-h", HideOthers, None)]);
    } else {
        cx.bind_keys([KeyBinding::new("ctrl-q", Quit, None)]);
    }

    cx.bind_keys([KeyBinding::new("secondary-,", OpenSettings, None)]);
    cx.bind_keys([KeyBinding::new("secondary-t", OpenSleepTimer, None)]);

    MenusBuilder::new()
        .add_menu(
            MenuBuilder::new("Voice")
                .item("Settings", OpenSettings)
                .item("Sleep Timer", OpenSleepTimer)
                .separator()
                .item("Quit Voice", Quit),
        )
        .add_menu(
            MenuBuilder::new("Window")
                .macos_only(true)
                .item("Hide Voice", HideSelf)
                .item("Hide Others", HideOthers)
                .item("Show All", ShowAll),
        )
        .set(cx);
}

fn quit(_: &Quit, cx: &mut App) {
    info!("Quitting...");
    cx.quit();
}

fn open_settings(_: &OpenSettings, cx: &mut App) {
    open_settings_window(cx);
}

fn open_sleep_timer(_: &OpenSleepTimer, cx: &mut App) {
    open_sleep_timer_window(cx);
}

fn hide_self(_: &HideSelf, cx: &mut App) {
    cx.hide();
}

fn hide_others(_: &HideOthers, cx: &mut App) {
    cx.hide_other_apps();
}

fn show_all(_: &ShowAll, cx: &mut App) {
    cx.unhide_other_apps();
}
