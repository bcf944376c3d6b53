use std::sync::Arc;

use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px,
};

use crate::{
    settings::controller::{SettingsController, SettingsViewState},
    ui::{
        components::{
            button::button, checkbox::checkbox, label::label, section_header::section_header,
        },
        models::{Models, Services},
        sleep_timer::open_sleep_timer_window,
        theme::Theme,
        util::log_failure,
    },
};

pub struct SleepTimerSettings {
    state: Entity<SettingsViewState>,
    controller: Arc<SettingsController>,
}

impl SleepTimerSettings {
    pub fn new(cx: &mut App) -> Entity<Self> {
        cx.new(|cx| {
            let state = cx.global::<Models>().settings.clone();
            cx.observe(&state, |_, _, cx| cx.notify()).detach();

            Self {
                state,
                controller: cx.global::<Services>().controller.clone(),
            }
        })
    }
}

impl Render for SleepTimerSettings {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let schedule = self.state.read(cx).auto_sleep_timer;
        let secondary = cx.global::<Theme>().text_secondary;

        div()
            .flex()
            .flex_col()
            .gap(px(12.0))
            .child(
                section_header("Sleep timer")
                    .subtitle("Pauses playback after a while.")
                    .child(
                        button("sleep-timer-open")
                            .child("Sleep timer…")
                            .on_click(|_, _, cx| open_sleep_timer_window(cx)),
                    ),
            )
            .child(
                label("sleep-timer-auto", "Automatic sleep timer")
                    .subtext("Starts the sleep timer when playing inside the chosen hours.")
                    .w_full()
                    .on_click(cx.listener(|this, _, _, _| {
                        log_failure(
                            "toggling auto sleep timer",
                            this.controller.toggle_auto_sleep_timer(),
                        );
                    }))
                    .child(checkbox("sleep-timer-auto-check", schedule.enabled)),
            )
            .when(schedule.enabled, |this| {
                this.child(
                    div()
                        .pl(px(12.0))
                        .text_sm()
                        .text_color(secondary)
                        .child(format!(
                            "Active from {} to {}",
                            schedule.start_time, schedule.end_time
                        )),
                )
            })
    }
}
