use std::rc::Rc;

use gpui::{
    App, ClickEvent, IntoElement, ParentElement, RenderOnce, StatefulInteractiveElement, Styled,
    Window, div, px,
};

use crate::{
    sleep_timer::picker::{TimePicker, TimePickerTarget},
    ui::{
        components::{
            button::{ButtonIntent, button},
            modal::modal,
            stepper::stepper,
        },
        theme::Theme,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStep {
    Hour(i32),
    Minute(i32),
}

type StepHandler = dyn Fn(&PickerStep, &mut Window, &mut App);
type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App)>;

/// Modal for one bound of the auto sleep timer, always in 24-hour form.
#[derive(IntoElement)]
pub struct TimePickerDialog {
    picker: TimePicker,
    on_step: Rc<StepHandler>,
    on_cancel: ClickHandler,
    on_confirm: ClickHandler,
}

impl TimePickerDialog {
    pub fn on_step(
        mut self,
        handler: impl Fn(&PickerStep, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_step = Rc::new(handler);
        self
    }

    pub fn on_cancel(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_cancel = Box::new(handler);
        self
    }

    pub fn on_confirm(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_confirm = Box::new(handler);
        self
    }
}

fn step_handler(
    on_step: &Rc<StepHandler>,
    step: PickerStep,
) -> impl Fn(&ClickEvent, &mut Window, &mut App) + 'static {
    let on_step = on_step.clone();
    move |_, window, cx| on_step(&step, window, cx)
}

impl RenderOnce for TimePickerDialog {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let secondary = cx.global::<Theme>().text_secondary;
        let title = match self.picker.target() {
            TimePickerTarget::Start => "Start time",
            TimePickerTarget::End => "End time",
        };
        let format = if self.picker.is_24_hour() {
            "24-hour clock"
        } else {
            "12-hour clock"
        };

        modal(title)
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap(px(10.0))
                    .child(
                        div()
                            .text_size(px(28.0))
                            .child(self.picker.label()),
                    )
                    .child(
                        div()
                            .flex()
                            .gap(px(16.0))
                            .child(
                                stepper("picker-hour", format!("{:02} h", self.picker.hour()))
                                    .on_decrement(step_handler(&self.on_step, PickerStep::Hour(-1)))
                                    .on_increment(step_handler(&self.on_step, PickerStep::Hour(1))),
                            )
                            .child(
                                stepper("picker-minute", format!("{:02} min", self.picker.minute()))
                                    .on_decrement(step_handler(
                                        &self.on_step,
                                        PickerStep::Minute(-1),
                                    ))
                                    .on_increment(step_handler(
                                        &self.on_step,
                                        PickerStep::Minute(1),
                                    )),
                            ),
                    )
                    .child(div().text_xs().text_color(secondary).child(format)),
            )
            .action(
                button("picker-cancel")
                    .child("Cancel")
                    .on_click(self.on_cancel),
            )
            .action(
                button("picker-confirm")
                    .intent(ButtonIntent::Primary)
                    .child("Set")
                    .on_click(self.on_confirm),
            )
    }
}

pub fn time_picker_dialog(picker: &TimePicker) -> TimePickerDialog {
    TimePickerDialog {
        picker: *picker,
        on_step: Rc::new(|_, _, _| {}),
        on_cancel: Box::new(|_, _, _| {}),
        on_confirm: Box::new(|_, _, _| {}),
    }
}

/// Applies one stepper press to the picker.
pub fn apply_step(picker: &mut TimePicker, step: PickerStep) {
    match step {
        PickerStep::Hour(delta) => picker.step_hour(delta),
        PickerStep::Minute(delta) => picker.step_minute(delta),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::time::TimeOfDay;

    #[test]
    fn steps_reach_the_picker() {
        let mut picker = TimePicker::new(TimePickerTarget::Start, TimeOfDay::new(23, 59).unwrap());
        apply_step(&mut picker, PickerStep::Hour(1));
        apply_step(&mut picker, PickerStep::Minute(1));
        assert_eq!((picker.hour(), picker.minute()), (0, 0));

        apply_step(&mut picker, PickerStep::Minute(-1));
        assert_eq!(picker.label(), "00:59");
    }
}
