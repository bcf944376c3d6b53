use std::{fs::File, io::BufReader, path::PathBuf};

use gpui::{App, Global, Rgba, rgb, rgba};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    pub background_primary: Rgba,

    pub border_color: Rgba,

    pub text: Rgba,
    pub text_secondary: Rgba,
    pub text_link: Rgba,
    pub text_error: Rgba,

    pub nav_button_hover: Rgba,
    pub nav_button_active: Rgba,

    pub button_primary: Rgba,
    pub button_primary_border: Rgba,
    pub button_primary_hover: Rgba,
    pub button_primary_active: Rgba,
    pub button_primary_text: Rgba,

    pub button_secondary: Rgba,
    pub button_secondary_border: Rgba,
    pub button_secondary_hover: Rgba,
    pub button_secondary_active: Rgba,
    pub button_secondary_text: Rgba,

    pub elevated_background: Rgba,
    pub elevated_border_color: Rgba,

    pub menu_item_hover: Rgba,
    pub menu_item_active: Rgba,

    pub modal_overlay_bg: Rgba,

    pub checkbox_background: Rgba,
    pub checkbox_background_hover: Rgba,
    pub checkbox_background_active: Rgba,
    pub checkbox_border: Rgba,
    pub checkbox_checked: Rgba,
    pub checkbox_checked_bg: Rgba,
    pub checkbox_checked_bg_hover: Rgba,
    pub checkbox_checked_bg_active: Rgba,
    pub checkbox_checked_border: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background_primary: rgb(0x0D0E12),

            border_color: rgb(0x202233),

            text: rgb(0xE8E9F2),
            text_secondary: rgb(0xA0A1AD),
            text_link: rgb(0x5279D4),
            text_error: rgb(0xE5707A),

            nav_button_hover: rgb(0x1A1C28),
            nav_button_active: rgb(0x151620),

            button_primary: rgb(0x5774E7),
            button_primary_border: rgb(0x6D85E4),
            button_primary_hover: rgb(0x6D92FF),
            button_primary_active: rgb(0x495F9F),
            button_primary_text: rgb(0xE0E7F7),

            button_secondary: rgb(0x373B4E),
            button_secondary_border: rgb(0x4F5267),
            button_secondary_hover: rgb(0x494E67),
            button_secondary_active: rgb(0x262636),
            button_secondary_text: rgb(0xDDDEEC),

            elevated_background: rgb(0x161820),
            elevated_border_color: rgb(0x23253B),

            menu_item_hover: rgb(0x1F2334),
            menu_item_active: rgb(0x0E0F15),

            modal_overlay_bg: rgba(0x00000055),

            checkbox_background: rgb(0x373B4E),
            checkbox_background_hover: rgb(0x494E67),
            checkbox_background_active: rgb(0x262636),
            checkbox_border: rgb(0x4F5267),
            checkbox_checked: rgb(0xC7C7D8),
            checkbox_checked_bg: rgb(0x618EE6),
            checkbox_checked_bg_hover: rgb(0x6080F9),
            checkbox_checked_bg_active: rgb(0x495D9F),
            checkbox_checked_border: rgb(0x7592E7),
        }
    }

    pub fn light() -> Self {
        Self {
            background_primary: rgb(0xF6F6FA),

            border_color: rgb(0xD5D7E2),

            text: rgb(0x15161C),
            text_secondary: rgb(0x5C5E6C),
            text_link: rgb(0x3556B8),
            text_error: rgb(0xB8303C),

            nav_button_hover: rgb(0xE2E4EE),
            nav_button_active: rgb(0xD7DAE6),

            button_primary: rgb(0x4F6BE0),
            button_primary_border: rgb(0x4360D4),
            button_primary_hover: rgb(0x6480EE),
            button_primary_active: rgb(0x3F56B5),
            button_primary_text: rgb(0xFFFFFF),

            button_secondary: rgb(0xE3E5EE),
            button_secondary_border: rgb(0xCDD0DD),
            button_secondary_hover: rgb(0xD8DBE7),
            button_secondary_active: rgb(0xC9CCDA),
            button_secondary_text: rgb(0x20222C),

            elevated_background: rgb(0xFFFFFF),
            elevated_border_color: rgb(0xD5D7E2),

            menu_item_hover: rgb(0xE6E8F1),
            menu_item_active: rgb(0xD9DCE8),

            modal_overlay_bg: rgba(0x0000002A),

            checkbox_background: rgb(0xFFFFFF),
            checkbox_background_hover: rgb(0xEDEFF6),
            checkbox_background_active: rgb(0xDADDE9),
            checkbox_border: rgb(0xB9BCCB),
            checkbox_checked: rgb(0xFFFFFF),
            checkbox_checked_bg: rgb(0x4F6BE0),
            checkbox_checked_bg_hover: rgb(0x6480EE),
            checkbox_checked_bg_active: rgb(0x3F56B5),
            checkbox_checked_border: rgb(0x4360D4),
        }
    }
}

impl Global for Theme {}

/// Location of the optional `theme.json` that overrides the dark palette.
pub struct ThemeSource(pub PathBuf);

impl Global for ThemeSource {}

pub fn create_theme(path: &PathBuf, dark: bool) -> Theme {
    if !dark {
        return Theme::light();
    }

    if let Ok(file) = File::open(path) {
        let reader = BufReader::new(file);

        if let Ok(theme) = serde_json::from_reader(reader) {
            theme
        } else {
            warn!("Theme file exists but it could not be loaded, using default");
            Theme::dark()
        }
    } else {
        Theme::dark()
    }
}

pub fn setup_theme(cx: &mut App, path: PathBuf, dark: bool) {
    cx.set_global(create_theme(&path, dark));
    cx.set_global(ThemeSource(path));
}

/// Swap palettes after the dark theme preference changed.
pub fn apply_theme(cx: &mut App, dark: bool) {
    let path = cx.global::<ThemeSource>().0.clone();
    debug!(dark, "applying theme");
    cx.set_global(create_theme(&path, dark));
    cx.refresh_windows();
}

#[cfg(test)]
mod tests {
    use gpui::rgb;

    use super::*;

    #[test]
    fn override_only_applies_to_dark_palette() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, r##"{ "text": "#ff0000" }"##).unwrap();

        let dark = create_theme(&path, true);
        assert_eq!(dark.text, rgb(0xFF0000));
        assert_eq!(dark.background_primary, Theme::dark().background_primary);

        let light = create_theme(&path, false);
        assert_eq!(light.text, Theme::light().text);
    }

    #[test]
    fn broken_file_falls_back_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, "not json").unwrap();

        assert_eq!(create_theme(&path, true).text, Theme::dark().text);
        assert_eq!(
            create_theme(&dir.path().join("missing.json"), true).text,
            Theme::dark().text
        );
    }
}
