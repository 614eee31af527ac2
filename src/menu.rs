#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

/// What the caller should do after a menu event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEffect {
    None,
    Opened,
    Closed,
    /// Closed from the keyboard; focus goes back to the trigger.
    ClosedAndRefocus,
}

impl MenuState {
    /// Starts from whatever the markup currently shows.
    pub fn with_open(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn toggle(&mut self) -> MenuEffect {
        self.open = !self.open;
        if self.open {
            MenuEffect::Opened
        } else {
            MenuEffect::Closed
        }
    }

    pub fn close(&mut self) -> MenuEffect {
        if !self.open {
            return MenuEffect::None;
        }
        self.open = false;
        MenuEffect::Closed
    }

    pub fn click_outside(&mut self) -> MenuEffect {
        self.close()
    }

    pub fn key(&mut self, key: &str) -> MenuEffect {
        if key != "Escape" || !self.open {
            return MenuEffect::None;
        }
        self.open = false;
        MenuEffect::ClosedAndRefocus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports_aria_state() {
        let mut menu = MenuState::default();
        assert_eq!(menu.aria_expanded(), "false");

        assert_eq!(menu.toggle(), MenuEffect::Opened);
        assert_eq!(menu.aria_expanded(), "true");

        assert_eq!(menu.toggle(), MenuEffect::Closed);
        assert_eq!(menu.aria_expanded(), "false");
    }

    #[test]
    fn outside_click_closes_only_an_open_menu() {
        let mut menu = MenuState::default();
        assert_eq!(menu.click_outside(), MenuEffect::None);

        menu.toggle();
        assert_eq!(menu.click_outside(), MenuEffect::Closed);
        assert!(!menu.is_open());
    }

    #[test]
    fn state_can_start_open() {
        let mut menu = MenuState::with_open(true);
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.close(), MenuEffect::Closed);
    }

    #[test]
    fn escape_closes_and_requests_refocus() {
        let mut menu = MenuState::default();
        assert_eq!(menu.key("Escape"), MenuEffect::None);

        menu.toggle();
        assert_eq!(menu.key("Enter"), MenuEffect::None);
        assert_eq!(menu.key("Escape"), MenuEffect::ClosedAndRefocus);
        assert!(!menu.is_open());
    }
}
