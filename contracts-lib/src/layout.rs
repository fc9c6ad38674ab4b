//! Shell layout state

/// Sidebar and mobile-menu state of the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub sidebar_expanded: bool,
    pub mobile_menu_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            sidebar_expanded: true,
            mobile_menu_open: false,
        }
    }
}

/// Layout interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ToggleSidebar,
    ExpandSidebar,
    CollapseSidebar,
    OpenMobileMenu,
    CloseMobileMenu,
    ToggleMobileMenu,
}

impl UiState {
    /// Returns the state after `action`.
    pub fn reduce(self, action: UiAction) -> Self {
        match action {
            UiAction::ToggleSidebar => Self {
                sidebar_expanded: !self.sidebar_expanded,
                ..self
            },
            UiAction::ExpandSidebar => Self {
                sidebar_expanded: true,
                ..self
            },
            UiAction::CollapseSidebar => Self {
                sidebar_expanded: false,
                ..self
            },
            UiAction::OpenMobileMenu => Self {
                mobile_menu_open: true,
                ..self
            },
            UiAction::CloseMobileMenu => Self {
                mobile_menu_open: false,
                ..self
            },
            UiAction::ToggleMobileMenu => Self {
                mobile_menu_open: !self.mobile_menu_open,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = UiState::default();
        assert!(state.sidebar_expanded);
        assert!(!state.mobile_menu_open);
    }

    #[test]
    fn test_actions_touch_one_flag() {
        let state = UiState::default().reduce(UiAction::ToggleSidebar);
        assert_eq!(state, UiState { sidebar_expanded: false, mobile_menu_open: false });

        let state = state.reduce(UiAction::ToggleMobileMenu);
        assert!(state.mobile_menu_open);
        assert!(!state.sidebar_expanded);

        let state = state
            .reduce(UiAction::ExpandSidebar)
            .reduce(UiAction::CloseMobileMenu);
        assert_eq!(state, UiState::default());
    }

    #[test]
    fn test_idempotent_actions() {
        let state = UiState::default()
            .reduce(UiAction::CollapseSidebar)
            .reduce(UiAction::CollapseSidebar)
            .reduce(UiAction::OpenMobileMenu)
            .reduce(UiAction::OpenMobileMenu);
        assert!(!state.sidebar_expanded);
        assert!(state.mobile_menu_open);
    }
}
