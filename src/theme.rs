//! Light/dark theme resolution.

pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class for the toggle: a sun offers the way back to light.
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn particle_color(self) -> &'static str {
        match self {
            Self::Light => "#667eea",
            Self::Dark => "#ffffff",
        }
    }
}

/// Where the explicit choice lives. The browser uses `localStorage`.
pub trait PreferenceStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str);
}

/// Tracks the active theme. Every change is persisted; the initial
/// resolution is not a change and leaves the store untouched.
pub struct ThemeController<S> {
    store: S,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Stored preference first, then the OS preference.
    pub fn resolve(store: S, system_prefers_dark: bool) -> Self {
        let current = store
            .load()
            .as_deref()
            .and_then(Theme::from_str)
            .unwrap_or_else(|| Theme::from_system(system_prefers_dark));

        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn has_stored_preference(&self) -> bool {
        self.store.load().as_deref().and_then(Theme::from_str).is_some()
    }

    /// An explicit user choice: flips and persists.
    pub fn toggle(&mut self) -> Theme {
        self.set(self.current.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Theme {
        self.current = theme;
        self.store.save(theme.as_str());
        theme
    }

    /// Follows an OS change unless a preference is already stored. Returns
    /// the new theme when it changed; the change is stored like any other.
    pub fn system_changed(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.has_stored_preference() {
            return None;
        }

        let next = Theme::from_system(prefers_dark);
        if next == self.current {
            return None;
        }
        Some(self.set(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore(Rc<RefCell<Option<String>>>);

    impl PreferenceStore for MemoryStore {
        fn load(&self) -> Option<String> {
            self.0.borrow().clone()
        }

        fn save(&mut self, value: &str) {
            *self.0.borrow_mut() = Some(value.to_string());
        }
    }

    fn store_with(value: Option<&str>) -> MemoryStore {
        MemoryStore(Rc::new(RefCell::new(value.map(str::to_string))))
    }

    #[test]
    fn stored_preference_wins_over_system() {
        let controller = ThemeController::resolve(store_with(Some("light")), true);
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn falls_back_to_system_then_light() {
        assert_eq!(
            ThemeController::resolve(store_with(None), true).current(),
            Theme::Dark
        );
        assert_eq!(
            ThemeController::resolve(store_with(None), false).current(),
            Theme::Light
        );
    }

    #[test]
    fn garbage_in_storage_is_treated_as_absent() {
        let controller = ThemeController::resolve(store_with(Some("sepia")), true);
        assert_eq!(controller.current(), Theme::Dark);
        assert!(!controller.has_stored_preference());
    }

    #[test]
    fn every_toggle_persists_exactly_one_theme() {
        let store = store_with(None);
        let mut controller = ThemeController::resolve(store.clone(), false);

        for _ in 0..5 {
            let theme = controller.toggle();
            assert_eq!(store.load().as_deref(), Some(theme.as_str()));
            assert_eq!(controller.current(), theme);
        }
        assert_eq!(controller.current(), Theme::Dark);
    }

    #[test]
    fn resolution_alone_does_not_persist() {
        let store = store_with(None);
        let _controller = ThemeController::resolve(store.clone(), true);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn system_change_is_persisted() {
        let store = store_with(None);
        let mut controller = ThemeController::resolve(store.clone(), true);

        assert_eq!(controller.system_changed(false), Some(Theme::Light));
        assert_eq!(store.load().as_deref(), Some("light"));
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn system_change_is_ignored_once_a_preference_is_stored() {
        let store = store_with(None);
        let mut controller = ThemeController::resolve(store.clone(), false);

        assert_eq!(controller.system_changed(false), None);
        assert_eq!(store.load(), None);

        controller.toggle();
        assert_eq!(controller.system_changed(false), None);
        assert_eq!(controller.current(), Theme::Dark);
        assert_eq!(store.load().as_deref(), Some("dark"));
    }

    #[test]
    fn icon_shows_sun_in_dark_mode() {
        assert_eq!(Theme::Dark.icon_class(), "fas fa-sun");
        assert_eq!(Theme::Light.icon_class(), "fas fa-moon");
        assert_eq!(Theme::Light.toggle_label(), "Switch to dark theme");
    }
}
