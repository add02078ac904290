use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use super::dom;
use super::drawer::DrawerController;
use crate::tabs::{GroupId, ScrollSnapshot, TabGroup, TabSelection, TabSet};

struct GroupElements {
    row: Element,
    buttons: Vec<Element>,
    panes: Vec<Element>,
}

/// All `.tabs` rows on the page and the panes beside them.
pub struct TabsController {
    window: Window,
    tabs: RefCell<TabSet>,
    groups: Vec<GroupElements>,
    drawer: Rc<DrawerController>,
    restore: RefCell<Option<AnimationFrame>>,
}

impl TabsController {
    pub fn new(window: Window, document: &Document, drawer: Rc<DrawerController>) -> Self {
        let mut tabs = TabSet::new();
        let mut groups = Vec::new();

        for row in dom::query_all(document, ".tabs") {
            let buttons = dom::query_all_in(&row, ".tab-button");
            let panes = row
                .next_element_sibling()
                .map(|container| dom::query_all_in(&container, ".tab-pane"))
                .unwrap_or_default();

            tabs.push(TabGroup::new(
                buttons.iter().map(|button| button.get_attribute("data-tab")).collect(),
                panes
                    .iter()
                    .map(|pane| pane.get_attribute("id").unwrap_or_default())
                    .collect(),
            ));
            groups.push(GroupElements { row, buttons, panes });
        }

        Self {
            window,
            tabs: RefCell::new(tabs),
            groups,
            drawer,
            restore: RefCell::new(None),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Clears inline display overrides and renders each group's initial pair.
    pub fn initialize(&self) {
        let tabs = self.tabs.borrow();
        for (index, elements) in self.groups.iter().enumerate() {
            for pane in &elements.panes {
                if let Some(pane) = dom::as_html(pane) {
                    dom::clear_style(&pane, "display");
                }
            }
            let Some(group) = tabs.group(GroupId(index)) else {
                continue;
            };
            if let Some(button) = group.active_button() {
                self.render(elements, button, group.active_pane());
            }
        }
    }

    pub fn select(&self, group: GroupId, tab_id: &str) -> Option<TabSelection> {
        let selection = self.tabs.borrow_mut().select(group, tab_id)?;
        self.switch(group, selection);
        Some(selection)
    }

    fn select_button(&self, group: GroupId, index: usize) -> Option<TabSelection> {
        let selection = self.tabs.borrow_mut().select_button(group, index)?;
        self.switch(group, selection);
        Some(selection)
    }

    fn switch(&self, group: GroupId, selection: TabSelection) {
        let Some(elements) = self.groups.get(group.0) else {
            return;
        };

        let snapshot = ScrollSnapshot {
            window_y: dom::scroll_y(&self.window),
            row_scroll_left: f64::from(elements.row.scroll_left()),
        };

        if let Some(button) = elements.buttons.get(selection.button).and_then(dom::as_html) {
            let _ = button.blur();
        }

        self.drawer.close();
        self.render(elements, selection.button, Some(selection.pane));
        self.restore_after_layout(elements.row.clone(), snapshot);
    }

    fn render(&self, elements: &GroupElements, button: usize, pane: Option<usize>) {
        for (index, element) in elements.buttons.iter().enumerate() {
            dom::set_class(element, "active", index == button);
        }
        for (index, element) in elements.panes.iter().enumerate() {
            dom::set_class(element, "active", Some(index) == pane);
            if let Some(element) = dom::as_html(element) {
                dom::clear_style(&element, "display");
            }
        }
    }

    fn restore_after_layout(&self, row: Element, snapshot: ScrollSnapshot) {
        let window = self.window.clone();
        let handle = request_animation_frame(move |_| {
            let options = ScrollToOptions::new();
            options.set_top(snapshot.window_y);
            options.set_behavior(ScrollBehavior::Auto);
            window.scroll_to_with_scroll_to_options(&options);
            row.set_scroll_left(snapshot.row_scroll_left as i32);
        });
        // A newer switch supersedes any restore still waiting for its frame.
        *self.restore.borrow_mut() = Some(handle);
    }
}

pub fn setup(controller: &Rc<TabsController>) {
    controller.initialize();

    for (group_index, elements) in controller.groups.iter().enumerate() {
        for (button_index, button) in elements.buttons.iter().enumerate() {
            let tabs = Rc::clone(controller);
            EventListener::new_with_options(
                button,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    tabs.select_button(GroupId(group_index), button_index);
                },
            )
            .forget();
        }
    }
}
