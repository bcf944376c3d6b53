use std::sync::Arc;

use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div,
    prelude::FluentBuilder, px,
};

use crate::{
    settings::controller::{SettingsController, SettingsViewState},
    ui::{
        components::{checkbox::checkbox, label::label, section_header::section_header},
        models::{Models, Services},
        util::log_failure,
    },
};

pub struct InterfaceSettings {
    state: Entity<SettingsViewState>,
    controller: Arc<SettingsController>,
}

impl InterfaceSettings {
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

impl Render for InterfaceSettings {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let state = self.state.read(cx);
        let (show_dark_theme, dark_theme) = (state.show_dark_theme_pref, state.use_dark_theme);
        // follows the window width live when the mode is FollowDevice
        let grid = self.controller.use_grid();

        div()
            .flex()
            .flex_col()
            .gap(px(12.0))
            .child(section_header("Interface"))
            .when(show_dark_theme, |this| {
                this.child(
                    label("interface-dark-theme", "Dark theme")
                        .w_full()
                        .on_click(cx.listener(|this, _, _, _| {
                            log_failure("toggling dark theme", this.controller.toggle_dark_theme());
                        }))
                        .child(checkbox("interface-dark-theme-check", dark_theme)),
                )
            })
            .child(
                label("interface-grid", "Show library as grid")
                    .subtext("Books are shown as covers instead of a list.")
                    .w_full()
                    .on_click(cx.listener(|this, _, _, _| {
                        log_failure("toggling grid", this.controller.toggle_grid());
                    }))
                    .child(checkbox("interface-grid-check", grid)),
            )
    }
}
