//! Independent tab groups, each a button row plus its pane collection.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// Indices of the button and pane that are active after a switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabSelection {
    pub button: usize,
    pub pane: usize,
}

/// Scroll offsets captured before a switch and restored on the next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSnapshot {
    pub window_y: f64,
    pub row_scroll_left: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabGroup {
    // `data-tab` target of each button, in row order.
    buttons: Vec<Option<String>>,
    // Pane ids in document order.
    panes: Vec<String>,
    active_button: Option<usize>,
    active_pane: Option<usize>,
}

impl TabGroup {
    /// The first button and first pane start active.
    pub fn new(buttons: Vec<Option<String>>, panes: Vec<String>) -> Self {
        let active_button = (!buttons.is_empty()).then_some(0);
        let active_pane = active_button.and((!panes.is_empty()).then_some(0));
        Self {
            buttons,
            panes,
            active_button,
            active_pane,
        }
    }

    pub fn active_button(&self) -> Option<usize> {
        self.active_button
    }

    pub fn active_pane(&self) -> Option<usize> {
        self.active_pane
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_pane
            .and_then(|index| self.panes.get(index))
            .map(String::as_str)
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Activates the button at `index` and the pane it targets. Unknown
    /// buttons and targets with no pane in this group leave state unchanged.
    pub fn select_button(&mut self, index: usize) -> Option<TabSelection> {
        let target = self.buttons.get(index)?.as_deref()?;
        let pane = self.panes.iter().position(|id| id == target)?;
        self.active_button = Some(index);
        self.active_pane = Some(pane);
        Some(TabSelection {
            button: index,
            pane,
        })
    }

    pub fn select(&mut self, tab_id: &str) -> Option<TabSelection> {
        let button = self
            .buttons
            .iter()
            .position(|target| target.as_deref() == Some(tab_id))?;
        self.select_button(button)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TabSet {
    groups: Vec<TabGroup>,
}

impl TabSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, group: TabGroup) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    pub fn group(&self, id: GroupId) -> Option<&TabGroup> {
        self.groups.get(id.0)
    }

    pub fn select(&mut self, group: GroupId, tab_id: &str) -> Option<TabSelection> {
        self.groups.get_mut(group.0)?.select(tab_id)
    }

    pub fn select_button(&mut self, group: GroupId, index: usize) -> Option<TabSelection> {
        self.groups.get_mut(group.0)?.select_button(index)
    }
}
