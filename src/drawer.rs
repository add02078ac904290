//! Open/closed state of the mobile navigation drawer.
//!
//! The drawer is the only owner of this flag; the DOM layer renders the
//! [`DrawerView`] returned by each transition and nothing else reads it.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

impl DrawerState {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawerEvent {
    HamburgerClick,
    OverlayClick,
    NavLinkClick,
    EscapeKey,
    AnchorNavigation,
}

/// Presentation derived from a [`DrawerState`]: `active` classes on the
/// trigger, panel and overlay, the body scroll lock and `aria-expanded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawerView {
    pub active: bool,
    pub scroll_locked: bool,
    pub aria_expanded: bool,
}

impl DrawerView {
    pub fn aria_expanded_value(self) -> &'static str {
        if self.aria_expanded {
            "true"
        } else {
            "false"
        }
    }

    pub fn body_overflow(self) -> &'static str {
        if self.scroll_locked {
            "hidden"
        } else {
            ""
        }
    }
}

impl From<DrawerState> for DrawerView {
    fn from(state: DrawerState) -> Self {
        let open = state.is_open();
        Self {
            active: open,
            scroll_locked: open,
            aria_expanded: open,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Drawer {
    state: DrawerState,
}

impl Drawer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn toggle(&mut self) -> DrawerView {
        self.state = match self.state {
            DrawerState::Closed => DrawerState::Open,
            DrawerState::Open => DrawerState::Closed,
        };
        self.state.into()
    }

    /// Returns `None` when the drawer was already closed.
    pub fn close(&mut self) -> Option<DrawerView> {
        if !self.state.is_open() {
            return None;
        }
        self.state = DrawerState::Closed;
        Some(self.state.into())
    }

    /// Feeds one input event and returns the view to render, if anything changed.
    pub fn handle(&mut self, event: DrawerEvent) -> Option<DrawerView> {
        match event {
            DrawerEvent::HamburgerClick => Some(self.toggle()),
            DrawerEvent::OverlayClick
            | DrawerEvent::NavLinkClick
            | DrawerEvent::EscapeKey
            | DrawerEvent::AnchorNavigation => self.close(),
        }
    }
}
