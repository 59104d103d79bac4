//! Presentation state shared across screens

/// Top-level screens, switched with the number keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Overview,
    Settings,
    Devices,
}

impl Screen {
    pub fn all() -> Vec<Screen> {
        vec![Screen::Overview, Screen::Settings, Screen::Devices]
    }

    pub fn name(&self) -> &str {
        match self {
            Screen::Overview => "Overview",
            Screen::Settings => "Settings",
            Screen::Devices => "Devices",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Overview => 0,
            Screen::Settings => 1,
            Screen::Devices => 2,
        }
    }

    /// Panels on this screen, in focus order
    pub fn panels(&self) -> &'static [Panel] {
        match self {
            Screen::Overview => &[Panel::RecentItems, Panel::Showcase],
            Screen::Settings => &[Panel::Account, Panel::Locations],
            Screen::Devices => &[Panel::Devices],
        }
    }

    /// Resolve a link target such as `settings/locations`
    pub fn from_route(route: &str) -> Option<(Screen, Panel)> {
        match route.trim_start_matches('/') {
            "overview" | "overview/recents" => Some((Screen::Overview, Panel::RecentItems)),
            "overview/videos" => Some((Screen::Overview, Panel::Showcase)),
            "settings" | "settings/account" => Some((Screen::Settings, Panel::Account)),
            "settings/locations" => Some((Screen::Settings, Panel::Locations)),
            "devices" => Some((Screen::Devices, Panel::Devices)),
            _ => None,
        }
    }
}

/// A focusable panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    RecentItems,
    Showcase,
    Account,
    Locations,
    Devices,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(
            Screen::from_route("/settings/locations"),
            Some((Screen::Settings, Panel::Locations))
        );
        assert_eq!(
            Screen::from_route("overview/videos"),
            Some((Screen::Overview, Panel::Showcase))
        );
        assert_eq!(Screen::from_route("explorer"), None);
    }

    #[test]
    fn test_panels_belong_to_screen() {
        for (i, screen) in Screen::all().into_iter().enumerate() {
            assert_eq!(screen.index(), i);
            assert!(!screen.panels().is_empty());
        }
        assert_eq!(Screen::Devices.panels(), &[Panel::Devices]);
        assert_eq!(
            Screen::from_route("devices"),
            Some((Screen::Devices, Panel::Devices))
        );
    }
}
