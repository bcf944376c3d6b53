use std::sync::Arc;

use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div, px,
};

use crate::{
    settings::controller::{SettingsController, SettingsViewState},
    ui::{
        components::{label::label, section_header::section_header},
        models::{Models, Services},
        theme::Theme,
        util::log_failure,
    },
};

pub struct PlaybackSettings {
    state: Entity<SettingsViewState>,
    controller: Arc<SettingsController>,
}

impl PlaybackSettings {
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

fn seconds(value: i32) -> String {
    if value == 1 {
        "1 second".to_string()
    } else {
        format!("{value} seconds")
    }
}

impl Render for PlaybackSettings {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.state.read(cx);
        let seek = seconds(state.seek_time_in_seconds);
        let rewind = seconds(state.auto_rewind_in_seconds);
        let secondary = cx.global::<Theme>().text_secondary;

        div()
            .flex()
            .flex_col()
            .gap(px(12.0))
            .child(section_header("Playback"))
            .child(
                label("playback-seek-time", "Skip amount")
                    .subtext("How far the skip buttons jump.")
                    .w_full()
                    .on_click(cx.listener(|this, _, _, _| {
                        log_failure(
                            "opening seek time dialog",
                            this.controller.open_seek_amount_dialog(),
                        );
                    }))
                    .child(div().text_sm().text_color(secondary).child(seek)),
            )
            .child(
                label("playback-auto-rewind", "Auto rewind")
                    .subtext("Rewinds a little when playback resumes after a pause.")
                    .w_full()
                    .on_click(cx.listener(|this, _, _, _| {
                        log_failure(
                            "opening auto rewind dialog",
                            this.controller.open_auto_rewind_dialog(),
                        );
                    }))
                    .child(div().text_sm().text_color(secondary).child(rewind)),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::seconds;

    #[test]
    fn pluralises_seconds() {
        assert_eq!(seconds(1), "1 second");
        assert_eq!(seconds(0), "0 seconds");
        assert_eq!(seconds(20), "20 seconds");
    }
}
