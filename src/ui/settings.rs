mod interface;
mod playback;
mod sleep_timer;
mod support;

use std::sync::Arc;

use gpui::{
    App, AppContext, Context, Entity, FontWeight, InteractiveElement, IntoElement, ParentElement,
    Render, SharedString, StatefulInteractiveElement, Styled, TitlebarOptions, Window,
    WindowBackgroundAppearance, WindowBounds, WindowKind, WindowOptions, div,
    prelude::FluentBuilder, px,
};
use tracing::{debug, warn};

use crate::{
    settings::{
        controller::{Dialog, SettingsController, SettingsViewState},
        grid::WindowGridDefault,
    },
    ui::{
        components::{
            button::{ButtonIntent, button},
            modal::modal,
            stepper::stepper,
        },
        models::{Models, Services},
        theme::Theme,
        util::log_failure,
    },
};

use self::{
    interface::InterfaceSettings, playback::PlaybackSettings, sleep_timer::SleepTimerSettings,
    support::SupportSettings,
};

pub fn open_settings_window(cx: &mut App) {
    if let Some(existing) = cx
        .windows()
        .into_iter()
        .find_map(|handle| handle.downcast::<SettingsWindow>())
    {
        let _ = existing.update(cx, |_, window, _| window.activate_window());
        return;
    }

    let bounds = WindowBounds::Windowed(gpui::Bounds::centered(
        None,
        gpui::size(px(760.0), px(640.0)),
        cx,
    ));

    let result = cx.open_window(
        WindowOptions {
            window_bounds: Some(bounds),
            window_background: WindowBackgroundAppearance::Opaque,
            window_min_size: Some(gpui::size(px(420.0), px(360.0))),
            titlebar: Some(TitlebarOptions {
                title: Some(SharedString::from("Settings")),
                ..Default::default()
            }),
            app_id: Some("de.ph1b.voice".to_string()),
            kind: WindowKind::Normal,
            ..Default::default()
        },
        |window, cx| {
            window.set_window_title("Settings");
            SettingsWindow::new(cx)
        },
    );

    if let Err(error) = result {
        warn!(?error, "couldn't open settings window");
    }
}

/// Closes the settings window, if there is one.
pub fn close_settings_window(cx: &mut App) {
    for handle in cx.windows() {
        if let Some(settings) = handle.downcast::<SettingsWindow>() {
            debug!("closing settings window");
            let _ = settings.update(cx, |_, window, _| window.remove_window());
        }
    }
}

pub struct SettingsWindow {
    state: Entity<SettingsViewState>,
    controller: Arc<SettingsController>,
    grid_default: WindowGridDefault,
    interface: Entity<InterfaceSettings>,
    playback: Entity<PlaybackSettings>,
    sleep_timer: Entity<SleepTimerSettings>,
    support: Entity<SupportSettings>,
}

impl SettingsWindow {
    fn new(cx: &mut App) -> Entity<Self> {
        let interface = InterfaceSettings::new(cx);
        let playback = PlaybackSettings::new(cx);
        let sleep_timer = SleepTimerSettings::new(cx);
        let support = SupportSettings::new(cx);

        cx.new(|cx| {
            let state = cx.global::<Models>().settings.clone();
            cx.observe(&state, |_, _, cx| cx.notify()).detach();

            // an open dialog does not outlive the window
            cx.on_release(|this: &mut Self, _| {
                log_failure("closing dialog", this.controller.dismiss_dialog());
            })
            .detach();

            let services = cx.global::<Services>();

            Self {
                state,
                controller: services.controller.clone(),
                grid_default: services.grid_default.clone(),
                interface,
                playback,
                sleep_timer,
                support,
            }
        })
    }

    fn amount_dialog(&self, dialog: Dialog, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.state.read(cx);
        let (title, current) = match dialog {
            Dialog::AutoRewindAmount => ("Auto rewind", state.auto_rewind_in_seconds),
            _ => ("Seek time", state.seek_time_in_seconds),
        };

        modal(title)
            .child(
                div().flex().justify_center().child(
                    stepper("amount-stepper", format!("{current} s"))
                        .on_decrement(cx.listener(move |this, _, _, _| {
                            this.step_amount(dialog, -1);
                        }))
                        .on_increment(cx.listener(move |this, _, _, _| {
                            this.step_amount(dialog, 1);
                        })),
                ),
            )
            .action(
                button("amount-dialog-done")
                    .intent(ButtonIntent::Primary)
                    .child("Done")
                    .on_click(cx.listener(|this, _, _, _| {
                        log_failure("closing dialog", this.controller.dismiss_dialog());
                    })),
            )
    }

    fn step_amount(&self, dialog: Dialog, delta: i32) {
        let result = match dialog {
            Dialog::SeekTime => self.controller.step_seek_amount(delta),
            Dialog::AutoRewindAmount => self.controller.step_auto_rewind_amount(delta),
            Dialog::Closed => Ok(()),
        };
        log_failure("changing amount", result);
    }
}

impl Render for SettingsWindow {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        self.grid_default
            .set_width(f32::from(window.bounds().size.width));

        let dialog = self.state.read(cx).dialog;
        let theme = cx.global::<Theme>();
        let (background, text, border) = (theme.background_primary, theme.text, theme.border_color);

        div()
            .relative()
            .size_full()
            .bg(background)
            .text_color(text)
            .child(
                div()
                    .id("settings-scroll")
                    .size_full()
                    .overflow_y_scroll()
                    .flex()
                    .flex_col()
                    .gap(px(24.0))
                    .px(px(24.0))
                    .py(px(20.0))
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .pb(px(12.0))
                            .border_b_1()
                            .border_color(border)
                            .child(
                                div()
                                    .flex_grow()
                                    .text_size(px(22.0))
                                    .font_weight(FontWeight::BOLD)
                                    .child("Settings"),
                            )
                            .child(button("settings-close").child("Close").on_click(
                                cx.listener(|this, _, _, _| {
                                    log_failure("closing settings", this.controller.close());
                                }),
                            )),
                    )
                    .child(self.interface.clone())
                    .child(self.playback.clone())
                    .child(self.sleep_timer.clone())
                    .child(self.support.clone()),
            )
            .when(dialog != Dialog::Closed, |this| {
                this.child(self.amount_dialog(dialog, cx))
            })
    }
}
