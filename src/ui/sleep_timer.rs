use std::{sync::Arc, time::Duration};

use gpui::{
    App, AppContext, Context, Entity, FontWeight, InteractiveElement, IntoElement, ParentElement,
    Render, SharedString, StatefulInteractiveElement, Styled, Task, TitlebarOptions, Window,
    WindowBackgroundAppearance, WindowBounds, WindowKind, WindowOptions, div,
    prelude::FluentBuilder, px,
};
use tracing::{info, warn};

use crate::{
    sleep_timer::{
        SleepTimerSheet,
        editor::{SLEEP_TIME_PRESETS, SleepTimerCommit},
        picker::TimePickerTarget,
        timer::{SleepTimer, SleepTimerError, SleepTimerState},
    },
    ui::{
        components::{
            button::{ButtonIntent, button},
            checkbox::checkbox,
            label::label,
            section_header::section_header,
            stepper::stepper,
        },
        models::{Models, Services},
        theme::Theme,
        time_picker::{PickerStep, apply_step, time_picker_dialog},
        util::{format_remaining, log_failure},
    },
};

pub fn open_sleep_timer_window(cx: &mut App) {
    if let Some(existing) = cx
        .windows()
        .into_iter()
        .find_map(|handle| handle.downcast::<SleepTimerWindow>())
    {
        let _ = existing.update(cx, |_, window, _| window.activate_window());
        return;
    }

    let bounds = WindowBounds::Windowed(gpui::Bounds::centered(
        None,
        gpui::size(px(460.0), px(560.0)),
        cx,
    ));

    let result = cx.open_window(
        WindowOptions {
            window_bounds: Some(bounds),
            window_background: WindowBackgroundAppearance::Opaque,
            window_min_size: Some(gpui::size(px(380.0), px(420.0))),
            titlebar: Some(TitlebarOptions {
                title: Some(SharedString::from("Sleep timer")),
                ..Default::default()
            }),
            app_id: Some("de.ph1b.voice".to_string()),
            kind: WindowKind::Normal,
            ..Default::default()
        },
        |window, cx| {
            window.set_window_title("Sleep timer");
            SleepTimerWindow::new(cx)
        },
    );

    if let Err(error) = result {
        warn!(?error, "couldn't open sleep timer window");
    }
}

pub struct SleepTimerWindow {
    sheet: SleepTimerSheet,
    timer: Arc<SleepTimer>,
    timer_state: Entity<SleepTimerState>,
    error: Option<SharedString>,
    _ticker: Task<()>,
}

impl SleepTimerWindow {
    fn new(cx: &mut App) -> Entity<Self> {
        cx.new(|cx: &mut Context<Self>| {
            let models = cx.global::<Models>();
            let settings = models.settings.clone();
            let timer_state = models.sleep_timer.clone();
            cx.observe(&settings, |_, _, cx| cx.notify()).detach();
            cx.observe(&timer_state, |_, _, cx| cx.notify()).detach();

            let services = cx.global::<Services>();
            let timer = services.sleep_timer.clone();
            let sheet = SleepTimerSheet::new(services.controller.clone(), timer.clone());

            // redraw the countdown once a second while it runs
            let ticker = cx.spawn(async move |this, cx| {
                loop {
                    cx.background_executor()
                        .timer(Duration::from_secs(1))
                        .await;

                    let result = this.update(cx, |this, cx| {
                        if this.timer.is_running() {
                            cx.notify();
                        }
                    });
                    if result.is_err() {
                        break;
                    }
                }
            });

            Self {
                sheet,
                timer,
                timer_state,
                error: None,
                _ticker: ticker,
            }
        })
    }

    fn finish(
        &mut self,
        result: Result<Option<SleepTimerCommit>, SleepTimerError>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        match result {
            Ok(Some(commit)) => {
                info!(minutes = commit.minutes, source = ?commit.source, "sleep timer chosen");
                if !self.sheet.is_open() {
                    window.remove_window();
                }
            }
            Ok(None) => {}
            Err(error) => {
                warn!(?error, "couldn't start sleep timer");
                self.error = Some(error.to_string().into());
                cx.notify();
            }
        }
    }

    fn render_running(&self, cx: &mut Context<Self>) -> Option<impl IntoElement + use<>> {
        if !matches!(self.timer_state.read(cx), SleepTimerState::Running { .. }) {
            return None;
        }

        let remaining = self.timer.remaining()?.as_secs();

        Some(
            label("sleep-timer-running", format!("Stops in {}", format_remaining(remaining)))
                .w_full()
                .child(button("sleep-timer-cancel").child("Cancel").on_click(
                    cx.listener(|this, _, _, cx| {
                        this.timer.cancel();
                        cx.notify();
                    }),
                )),
        )
    }

    fn render_presets(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let mut row = div().flex().flex_wrap().gap(px(8.0));

        for minutes in SLEEP_TIME_PRESETS {
            row = row.child(
                button(SharedString::from(format!("sleep-timer-preset-{minutes}")))
                    .child(format!("{minutes} min"))
                    .on_click(cx.listener(move |this, _, window, cx| {
                        let result = this.sheet.select_preset(minutes);
                        this.finish(result, window, cx);
                    })),
            );
        }

        row
    }

    fn render_schedule(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let state = self.sheet.view_state();
        let schedule = state.auto_sleep_timer;
        let secondary = cx.global::<Theme>().text_secondary;

        div()
            .flex()
            .flex_col()
            .gap(px(8.0))
            .child(
                label("sleep-timer-auto", "Automatic sleep timer")
                    .subtext("Starts by itself when playing between the times below.")
                    .w_full()
                    .on_click(cx.listener(|this, _, _, _| {
                        log_failure(
                            "toggling auto sleep timer",
                            this.sheet.toggle_auto_sleep_timer(),
                        );
                    }))
                    .child(checkbox("sleep-timer-auto-check", schedule.enabled)),
            )
            .when(state.auto_sleep_timer_expanded(), |this| {
                this.child(
                    label("sleep-timer-start", "Start")
                        .w_full()
                        .on_click(cx.listener(|this, _, _, cx| {
                            this.sheet.open_time_picker(TimePickerTarget::Start);
                            cx.notify();
                        }))
                        .child(
                            div()
                                .text_color(secondary)
                                .child(schedule.start_time.to_string()),
                        ),
                )
                .child(
                    label("sleep-timer-end", "End")
                        .w_full()
                        .on_click(cx.listener(|this, _, _, cx| {
                            this.sheet.open_time_picker(TimePickerTarget::End);
                            cx.notify();
                        }))
                        .child(
                            div()
                                .text_color(secondary)
                                .child(schedule.end_time.to_string()),
                        ),
                )
            })
    }
}

impl Render for SleepTimerWindow {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let custom = self.sheet.view_state().custom_sleep_time;
        let picker = self.sheet.time_picker().copied();
        let running = self.render_running(cx);
        let presets = self.render_presets(cx);
        let schedule = self.render_schedule(cx);
        let theme = cx.global::<Theme>();
        let (background, text, error_color) =
            (theme.background_primary, theme.text, theme.text_error);

        div()
            .relative()
            .size_full()
            .bg(background)
            .text_color(text)
            .child(
                div()
                    .id("sleep-timer-scroll")
                    .size_full()
                    .overflow_y_scroll()
                    .flex()
                    .flex_col()
                    .gap(px(18.0))
                    .px(px(20.0))
                    .py(px(18.0))
                    .child(
                        div()
                            .text_size(px(20.0))
                            .font_weight(FontWeight::BOLD)
                            .child("Sleep timer"),
                    )
                    .children(running)
                    .when_some(self.error.clone(), |this, error| {
                        this.child(div().text_sm().text_color(error_color).child(error))
                    })
                    .child(presets)
                    .child(
                        label("sleep-timer-custom", "Custom")
                            .w_full()
                            .child(
                                stepper("sleep-timer-custom-stepper", format!("{custom} min"))
                                    .on_decrement(cx.listener(|this, _, _, cx| {
                                        this.sheet.decrement();
                                        this.error = None;
                                        cx.notify();
                                    }))
                                    .on_increment(cx.listener(|this, _, _, cx| {
                                        this.sheet.increment();
                                        this.error = None;
                                        cx.notify();
                                    })),
                            )
                            .child(
                                button("sleep-timer-custom-start")
                                    .intent(ButtonIntent::Primary)
                                    .child("Start")
                                    .on_click(cx.listener(|this, _, window, cx| {
                                        let result = this.sheet.accept_custom();
                                        this.finish(result, window, cx);
                                    })),
                            ),
                    )
                    .child(section_header("Schedule"))
                    .child(schedule),
            )
            .when_some(picker, |this, picker| {
                this.child(
                    time_picker_dialog(&picker)
                        .on_step(cx.listener(|this, step: &PickerStep, _, cx| {
                            if let Some(picker) = this.sheet.time_picker_mut() {
                                apply_step(picker, *step);
                                cx.notify();
                            }
                        }))
                        .on_cancel(cx.listener(|this, _, _, cx| {
                            this.sheet.cancel_time_picker();
                            cx.notify();
                        }))
                        .on_confirm(cx.listener(|this, _, _, cx| {
                            log_failure("saving time", this.sheet.confirm_time_picker());
                            cx.notify();
                        })),
                )
            })
    }
}
