/// Inputs that can open or close the mobile navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Toggle,
    Escape,
    LinkActivated,
    DeviceClassChanged { is_mobile: bool },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }

    /// Apply `event`; returns the new open state if it changed.
    pub fn handle(&mut self, event: MenuEvent) -> Option<bool> {
        let next = match event {
            MenuEvent::Toggle => !self.open,
            MenuEvent::Escape | MenuEvent::LinkActivated => false,
            MenuEvent::DeviceClassChanged { is_mobile } => self.open && is_mobile,
        };
        if next == self.open {
            return None;
        }
        self.open = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{MenuEvent, MobileMenu};

    #[test]
    fn toggle_flips_and_escape_closes() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.handle(MenuEvent::Toggle), Some(true));
        assert_eq!(menu.aria_expanded(), "true");
        assert_eq!(menu.handle(MenuEvent::Escape), Some(false));
        assert_eq!(menu.handle(MenuEvent::Escape), None);
    }

    #[test]
    fn closes_on_link_and_on_leaving_mobile() {
        let mut menu = MobileMenu::new();
        menu.handle(MenuEvent::Toggle);
        assert_eq!(menu.handle(MenuEvent::LinkActivated), Some(false));

        menu.handle(MenuEvent::Toggle);
        assert_eq!(menu.handle(MenuEvent::DeviceClassChanged { is_mobile: true }), None);
        assert_eq!(
            menu.handle(MenuEvent::DeviceClassChanged { is_mobile: false }),
            Some(false)
        );
        assert!(!menu.is_open());
    }
}
