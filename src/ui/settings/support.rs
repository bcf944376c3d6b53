use std::sync::Arc;

use gpui::{
    App, AppContext, Context, Entity, IntoElement, ParentElement, Render, SharedString,
    StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::{
    settings::{
        controller::{SettingsController, SettingsViewState},
        errors::SettingsError,
    },
    ui::{
        components::{button::button, label::label, section_header::section_header},
        models::{Models, Services},
        theme::Theme,
        util::log_failure,
    },
};

type Link = fn(&SettingsController) -> Result<(), SettingsError>;

const LINKS: [(&str, &str, &str, Link); 4] = [
    (
        "support-help",
        "Get help",
        "Ask a question in the discussions.",
        SettingsController::get_support,
    ),
    (
        "support-idea",
        "Suggest an idea",
        "Share what would make the app better.",
        SettingsController::suggest_idea,
    ),
    (
        "support-bug",
        "Report a bug",
        "Opens a bug report with your version and system filled in.",
        SettingsController::open_bug_report,
    ),
    (
        "support-translations",
        "Help translate",
        "Translate the app into your language.",
        SettingsController::open_translations,
    ),
];

pub struct SupportSettings {
    state: Entity<SettingsViewState>,
    controller: Arc<SettingsController>,
}

impl SupportSettings {
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

impl Render for SupportSettings {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let version = format!("Version {}", self.state.read(cx).app_version);
        let secondary = cx.global::<Theme>().text_secondary;

        let mut section = div()
            .flex()
            .flex_col()
            .gap(px(12.0))
            .child(section_header("Support"));

        for (id, title, subtext, open) in LINKS {
            section = section.child(
                label(id, title).subtext(subtext).w_full().child(
                    button(SharedString::from(format!("{id}-open")))
                        .child("Open")
                        .on_click(cx.listener(move |this, _, _, _| {
                            log_failure(title, open(&this.controller));
                        })),
                ),
            );
        }

        section.child(div().text_xs().text_color(secondary).child(version))
    }
}
