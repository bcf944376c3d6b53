use gpui::{
    AnyElement, App, Div, FontWeight, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StyleRefinement, Styled, Window, div, px,
};
use smallvec::SmallVec;

use crate::ui::theme::Theme;

/// Dialog drawn over the whole window. Input behind it is blocked.
#[derive(IntoElement)]
pub struct Modal {
    title: SharedString,
    actions: SmallVec<[AnyElement; 2]>,
    div: Div,
}

impl Modal {
    /// Buttons shown right-aligned below the content.
    pub fn action(mut self, action: impl IntoElement) -> Self {
        self.actions.push(action.into_any_element());
        self
    }
}

impl Styled for Modal {
    fn style(&mut self) -> &mut StyleRefinement {
        self.div.style()
    }
}

impl ParentElement for Modal {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.div.extend(elements);
    }
}

impl RenderOnce for Modal {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .id("modal-backdrop")
            .occlude()
            .absolute()
            .top_0()
            .left_0()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(theme.modal_overlay_bg)
            .child(
                div()
                    .id("modal")
                    .occlude()
                    .min_w(px(280.0))
                    .flex()
                    .flex_col()
                    .gap(px(14.0))
                    .p(px(18.0))
                    .rounded(px(6.0))
                    .border_1()
                    .border_color(theme.elevated_border_color)
                    .bg(theme.elevated_background)
                    .text_color(theme.text)
                    .child(
                        div()
                            .text_size(px(16.0))
                            .font_weight(FontWeight::BOLD)
                            .child(self.title),
                    )
                    .child(self.div)
                    .child(
                        div()
                            .flex()
                            .justify_end()
                            .gap(px(8.0))
                            .children(self.actions),
                    ),
            )
    }
}

pub fn modal(title: impl Into<SharedString>) -> Modal {
    Modal {
        title: title.into(),
        actions: SmallVec::new(),
        div: div(),
    }
}
