use gpui::{
    AnyElement, App, Div, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    Stateful, StatefulInteractiveElement, StyleRefinement, Styled, Window, div, px,
};

use crate::ui::theme::Theme;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIntent {
    Primary,
    #[default]
    Secondary,
}

#[derive(IntoElement)]
pub struct Button {
    div: Stateful<Div>,
    intent: ButtonIntent,
}

impl StatefulInteractiveElement for Button {}

impl InteractiveElement for Button {
    fn interactivity(&mut self) -> &mut gpui::Interactivity {
        self.div.interactivity()
    }
}

impl Styled for Button {
    fn style(&mut self) -> &mut StyleRefinement {
        self.div.style()
    }
}

impl ParentElement for Button {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.div.extend(elements);
    }
}

impl Button {
    pub fn intent(mut self, intent: ButtonIntent) -> Self {
        self.intent = intent;
        self
    }
}

impl RenderOnce for Button {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let (bg, border, hover, active, text) = match self.intent {
            ButtonIntent::Primary => (
                theme.button_primary,
                theme.button_primary_border,
                theme.button_primary_hover,
                theme.button_primary_active,
                theme.button_primary_text,
            ),
            ButtonIntent::Secondary => (
                theme.button_secondary,
                theme.button_secondary_border,
                theme.button_secondary_hover,
                theme.button_secondary_active,
                theme.button_secondary_text,
            ),
        };

        self.div
            .flex()
            .flex_shrink_0()
            .items_center()
            .justify_center()
            .px(px(10.0))
            .py(px(4.0))
            .rounded(px(4.0))
            .border_1()
            .text_sm()
            .bg(bg)
            .border_color(border)
            .text_color(text)
            .cursor_pointer()
            .hover(|style| style.bg(hover))
            .active(|style| style.bg(active))
    }
}

pub fn button(id: impl Into<ElementId>) -> Button {
    Button {
        div: div().id(id),
        intent: ButtonIntent::default(),
    }
}
