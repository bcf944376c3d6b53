use gpui::{Action, App, Menu, MenuItem, SharedString};

/// Application menu bar, assembled one top-level menu at a time.
#[derive(Default)]
pub struct MenusBuilder {
    menus: Vec<Menu>,
}

impl MenusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_menu(mut self, builder: MenuBuilder) -> Self {
        if let Some(menu) = builder.build() {
            self.menus.push(menu);
        }
        self
    }

    pub fn set(self, cx: &mut App) {
        cx.set_menus(self.menus);
    }
}

pub struct MenuBuilder {
    name: SharedString,
    items: Vec<MenuItem>,
    macos_only: bool,
}

impl MenuBuilder {
    pub fn new(name: impl Into<SharedString>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            macos_only: false,
        }
    }

    /// Menus that only make sense in the macOS menu bar (Window, Services).
    pub fn macos_only(mut self, macos_only: bool) -> Self {
        self.macos_only = macos_only;
        self
    }

    pub fn item(mut self, name: impl Into<SharedString>, action: impl Action) -> Self {
        self.items.push(MenuItem::action(name, action));
        self
    }

    pub fn separator(mut self) -> Self {
        self.items.push(MenuItem::separator());
        self
    }

    fn build(self) -> Option<Menu> {
        if self.macos_only && !cfg!(target_os = "macos") {
            return None;
        }

        Some(Menu {
            name: self.name,
            items: self.items,
        })
    }
}
