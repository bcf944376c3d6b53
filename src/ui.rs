pub mod app;
pub mod arguments;
pub mod components;
pub mod global_actions;
pub mod models;
pub mod settings;
pub mod sleep_timer;
pub mod theme;
pub mod time_picker;
pub mod util;
