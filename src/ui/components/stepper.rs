use gpui::{
    App, ClickEvent, ElementId, FontWeight, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};

use crate::ui::theme::Theme;

type ClickEvHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App)>;

/// `-  value  +` control. The value itself is owned by the caller.
#[derive(IntoElement)]
pub struct Stepper {
    id: ElementId,
    value: SharedString,
    on_decrement: ClickEvHandler,
    on_increment: ClickEvHandler,
}

impl Stepper {
    pub fn on_decrement(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_decrement = Box::new(handler);
        self
    }

    pub fn on_increment(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_increment = Box::new(handler);
        self
    }
}

fn step_button(
    id: impl Into<ElementId>,
    glyph: &'static str,
    theme: &Theme,
) -> gpui::Stateful<gpui::Div> {
    div()
        .id(id)
        .flex()
        .items_center()
        .justify_center()
        .size(px(28.0))
        .rounded_sm()
        .border_1()
        .border_color(theme.button_secondary_border)
        .bg(theme.button_secondary)
        .text_color(theme.button_secondary_text)
        .cursor_pointer()
        .hover(|style| style.bg(theme.nav_button_hover))
        .active(|style| style.bg(theme.nav_button_active))
        .child(glyph)
}

impl RenderOnce for Stepper {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let id: SharedString = self.id.to_string().into();

        div()
            .id(self.id)
            .flex()
            .items_center()
            .gap(px(8.0))
            .child(
                step_button(SharedString::from(format!("{id}-decrement")), "−", theme)
                    .on_click(self.on_decrement),
            )
            .child(
                div()
                    .min_w(px(56.0))
                    .flex()
                    .justify_center()
                    .font_weight(FontWeight::MEDIUM)
                    .child(self.value),
            )
            .child(
                step_button(SharedString::from(format!("{id}-increment")), "+", theme)
                    .on_click(self.on_increment),
            )
    }
}

pub fn stepper(id: impl Into<ElementId>, value: impl Into<SharedString>) -> Stepper {
    Stepper {
        id: id.into(),
        value: value.into(),
        on_decrement: Box::new(|_, _, _| {}),
        on_increment: Box::new(|_, _, _| {}),
    }
}
