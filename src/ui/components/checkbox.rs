use gpui::{
    App, ElementId, FontWeight, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    StatefulInteractiveElement, Styled, Window, div, prelude::FluentBuilder, px, rems,
};

use crate::ui::theme::Theme;

#[derive(IntoElement)]
pub struct Checkbox {
    id: ElementId,
    checked: bool,
}

impl RenderOnce for Checkbox {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .id(self.id)
            .rounded(px(4.0))
            .flex()
            .flex_shrink_0()
            .w(px(20.0))
            .h(px(20.0))
            .items_center()
            .justify_center()
            .line_height(rems(1.25))
            .border_1()
            .text_sm()
            .font_weight(FontWeight::BOLD)
            .cursor_pointer()
            .when_else(
                self.checked,
                |this| {
                    this.border_color(theme.checkbox_checked_border)
                        .bg(theme.checkbox_checked_bg)
                        .text_color(theme.checkbox_checked)
                        .hover(|this| this.bg(theme.checkbox_checked_bg_hover))
                        .active(|this| this.bg(theme.checkbox_checked_bg_active))
                        .child("✓")
                },
                |this| {
                    this.border_color(theme.checkbox_border)
                        .bg(theme.checkbox_background)
                        .hover(|this| this.bg(theme.checkbox_background_hover))
                        .active(|this| this.bg(theme.checkbox_background_active))
                },
            )
    }
}

/// Checkbox display element.
///
/// This checkbox element **does not support click handlers.** The click handler belongs on the
/// label that owns the checkbox, so the whole row toggles.
pub fn checkbox(id: impl Into<ElementId>, checked: bool) -> Checkbox {
    Checkbox {
        id: id.into(),
        checked,
    }
}
