use gpui::{
    AnyElement, App, ClickEvent, Div, ElementId, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, SharedString, StatefulInteractiveElement, StyleRefinement, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use smallvec::SmallVec;

use crate::ui::theme::Theme;

type ClickEvHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App)>;

/// A settings row: text with optional subtext, and trailing controls as children.
#[derive(IntoElement)]
pub struct Label {
    id: ElementId,
    text: SharedString,
    subtext: Option<SharedString>,
    on_click: Option<ClickEvHandler>,
    children: SmallVec<[AnyElement; 2]>,
    div: Div,
}

impl Label {
    pub fn subtext(mut self, subtext: impl Into<SharedString>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn on_click(
        mut self,
        on_click: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }
}

impl Styled for Label {
    fn style(&mut self) -> &mut StyleRefinement {
        self.div.style()
    }
}

impl ParentElement for Label {
    fn extend(&mut self, elements: impl IntoIterator<Item = AnyElement>) {
        self.children.extend(elements);
    }
}

impl RenderOnce for Label {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let clickable = self.on_click.is_some();

        self.div
            .id(self.id)
            .flex()
            .items_center()
            .gap(px(12.0))
            .px(px(10.0))
            .py(px(8.0))
            .rounded(px(4.0))
            .overflow_hidden()
            .text_sm()
            .when(clickable, |this| {
                this.cursor_pointer()
                    .hover(|this| this.bg(theme.menu_item_hover))
                    .active(|this| this.bg(theme.menu_item_active))
            })
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_grow()
                    .gap(px(2.0))
                    .overflow_hidden()
                    .child(div().text_color(theme.text).child(self.text))
                    .when_some(self.subtext, |this, subtext| {
                        this.child(div().text_color(theme.text_secondary).child(subtext))
                    }),
            )
            .child(
                div()
                    .flex()
                    .flex_shrink_0()
                    .items_center()
                    .gap(px(6.0))
                    .children(self.children),
            )
            .when_some(self.on_click, |this, on_click| this.on_click(on_click))
    }
}

pub fn label(id: impl Into<ElementId>, text: impl Into<SharedString>) -> Label {
    Label {
        id: id.into(),
        text: text.into(),
        subtext: None,
        children: SmallVec::new(),
        on_click: None,
        div: div(),
    }
}
