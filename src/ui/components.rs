pub mod button;
pub mod checkbox;
pub mod label;
pub mod menus_builder;
pub mod modal;
pub mod section_header;
pub mod stepper;
