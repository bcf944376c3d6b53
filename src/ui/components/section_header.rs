use gpui::{
    AnyElement, App, FontWeight, IntoElement, ParentElement, RenderOnce, SharedString, Styled,
    Window, div, prelude::FluentBuilder, px,
};
use smallvec::SmallVec;

use crate::ui::theme::Theme;

/// Heading that opens a group of settings rows. Children are trailing actions on the title line.
#[derive(IntoElement)]
pub struct SectionHeader {
    title: SharedString,
    subtitle: Option<SharedString>,
    actions: SmallVec<[AnyElement; 1]>,
}

impl SectionHeader {
    pub fn subtitle(mut self, subtitle: impl Into<SharedString>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

impl ParentElement for SectionHeader {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.actions.extend(elements);
    }
}

impl RenderOnce for SectionHeader {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let has_actions = !self.actions.is_empty();

        let heading = div()
            .flex()
            .flex_col()
            .min_w_0()
            .child(
                div()
                    .text_color(theme.text_link)
                    .text_sm()
                    .font_weight(FontWeight::BOLD)
                    .child(self.title),
            )
            .when_some(self.subtitle, |this, subtitle| {
                this.child(
                    div()
                        .text_color(theme.text_secondary)
                        .text_xs()
                        .child(subtitle),
                )
            });

        div()
            .mt(px(8.0))
            .pb(px(4.0))
            .border_b_1()
            .border_color(theme.border_color)
            .flex()
            .items_end()
            .justify_between()
            .gap(px(8.0))
            .child(heading)
            .when(has_actions, |this| {
                this.child(
                    div()
                        .flex()
                        .flex_shrink_0()
                        .items_center()
                        .gap(px(6.0))
                        .children(self.actions),
                )
            })
    }
}

pub fn section_header(title: impl Into<SharedString>) -> SectionHeader {
    SectionHeader {
        title: title.into(),
        subtitle: None,
        actions: SmallVec::new(),
    }
}
