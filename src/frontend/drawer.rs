use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

use super::dom;
use crate::drawer::{Drawer, DrawerEvent, DrawerView};

/// Renders [`Drawer`] onto the hamburger, the drawer panel, the overlay and
/// the body scroll lock.
pub struct DrawerController {
    drawer: RefCell<Drawer>,
    hamburger: Option<Element>,
    panel: Option<Element>,
    overlay: Option<Element>,
    body: Option<HtmlElement>,
}

impl DrawerController {
    pub fn from_document(document: &Document) -> Self {
        Self {
            drawer: RefCell::new(Drawer::new()),
            hamburger: dom::query(document, ".hamburger"),
            panel: dom::query(document, ".mobile-nav"),
            overlay: dom::query(document, ".menu-overlay"),
            body: document.body(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.drawer.borrow().is_open()
    }

    pub fn handle(&self, event: DrawerEvent) {
        let view = self.drawer.borrow_mut().handle(event);
        if let Some(view) = view {
            self.render(view);
        }
    }

    pub fn close(&self) {
        self.handle(DrawerEvent::AnchorNavigation);
    }

    fn render(&self, view: DrawerView) {
        for element in [&self.hamburger, &self.panel, &self.overlay]
            .into_iter()
            .flatten()
        {
            dom::set_class(element, "active", view.active);
        }

        if let Some(body) = &self.body {
            if view.scroll_locked {
                dom::set_style(body, "overflow", view.body_overflow());
            } else {
                dom::clear_style(body, "overflow");
            }
        }

        if let Some(hamburger) = &self.hamburger {
            let _ = hamburger.set_attribute("aria-expanded", view.aria_expanded_value());
        }
    }
}

pub fn setup(document: &Document, controller: &Rc<DrawerController>) {
    match &controller.hamburger {
        Some(hamburger) => {
            let _ = hamburger.set_attribute("aria-label", "Toggle navigation menu");
            let _ = hamburger.set_attribute("aria-expanded", "false");
            let _ = hamburger.set_attribute("aria-controls", "mobile-nav");

            let drawer = Rc::clone(controller);
            EventListener::new(hamburger, "click", move |event| {
                event.stop_propagation();
                drawer.handle(DrawerEvent::HamburgerClick);
            })
            .forget();
        }
        None => console::debug!("hamburger not found; mobile drawer disabled"),
    }

    let mut links = dom::query_all(document, ".nav-link");
    if let Some(panel) = &controller.panel {
        links.extend(dom::query_all_in(panel, "a"));
    }
    for link in links {
        let drawer = Rc::clone(controller);
        EventListener::new(&link, "click", move |_| {
            drawer.handle(DrawerEvent::NavLinkClick);
        })
        .forget();
    }

    if let Some(overlay) = &controller.overlay {
        let drawer = Rc::clone(controller);
        EventListener::new(overlay, "click", move |_| {
            drawer.handle(DrawerEvent::OverlayClick);
        })
        .forget();
    }

    let drawer = Rc::clone(controller);
    EventListener::new(document, "keydown", move |event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|event| event.key() == "Escape");
        if is_escape {
            drawer.handle(DrawerEvent::EscapeKey);
        }
    })
    .forget();
}
