use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, PopStateEvent, ScrollBehavior, ScrollToOptions,
    VisibilityState, Window,
};

use super::dom;
use super::drawer::DrawerController;
use crate::config::UiConfig;
use crate::viewport::{
    anchor_action, should_fade_in, AnchorAction, SectionBounds, SectionMap, ViewportSample,
    ViewportSync, ViewportUpdate,
};

const FADE_IN_SELECTOR: &str = ".section, .project, .about-content, .experience-content";

pub struct ViewportController {
    window: Window,
    sync: RefCell<ViewportSync>,
    drawer: Rc<DrawerController>,
    header: Option<HtmlElement>,
    header_height: f64,
    sections: Vec<HtmlElement>,
    nav_items: Vec<Element>,
    reveal: Vec<Element>,
    root: Option<Element>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl ViewportController {
    pub fn new(
        window: Window,
        document: &Document,
        config: UiConfig,
        drawer: Rc<DrawerController>,
    ) -> Self {
        let header = dom::query(document, "#header")
            .or_else(|| dom::query(document, ".header"))
            .and_then(|header| dom::as_html(&header));
        let header_height = header
            .as_ref()
            .map(|header| f64::from(header.offset_height()))
            .unwrap_or(0.0);

        Self {
            window,
            sync: RefCell::new(ViewportSync::new(config)),
            drawer,
            header,
            header_height,
            sections: dom::query_all(document, "section[id]")
                .iter()
                .filter_map(dom::as_html)
                .collect(),
            nav_items: dom::query_all(document, ".nav-item"),
            reveal: dom::query_all(document, FADE_IN_SELECTOR),
            root: document.document_element(),
            frame: RefCell::new(None),
        }
    }

    /// Queues one recompute on the next frame; repeat calls before it runs
    /// are absorbed.
    pub fn schedule(self: &Rc<Self>) {
        if !self.sync.borrow_mut().request_frame() {
            return;
        }
        let controller = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            controller.frame.borrow_mut().take();
            controller.refresh();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    /// Measures the page and applies the derived state immediately.
    pub fn refresh(&self) {
        let sample = self.sample();
        let update = self
            .sync
            .borrow_mut()
            .recompute(&sample, self.drawer.is_open());
        self.apply(&update);
        self.reveal_visible();
    }

    fn sample(&self) -> ViewportSample {
        let sections = SectionMap::from_document_order(self.sections.iter().filter_map(|section| {
            Some(SectionBounds {
                id: section.get_attribute("id")?,
                top: f64::from(section.offset_top()),
                height: f64::from(section.client_height()),
            })
        }));

        ViewportSample {
            scroll_y: dom::scroll_y(&self.window),
            header_height: self.header_height,
            sections,
            nav_hrefs: self
                .nav_items
                .iter()
                .map(|item| dom::query_in(item, "a").and_then(|link| link.get_attribute("href")))
                .collect(),
        }
    }

    fn apply(&self, update: &ViewportUpdate) {
        if let Some(flags) = &update.nav_active {
            for (item, active) in self.nav_items.iter().zip(flags) {
                let (Some(active), Some(link)) = (active, dom::query_in(item, "a")) else {
                    continue;
                };
                dom::set_class(item, "active", *active);
                dom::set_class(&link, "active", *active);
            }
        }

        if let Some(header) = &self.header {
            dom::set_class(header, "scrolled", update.header.scrolled);
            dom::set_class(header, "hide", update.header.hidden);
            dom::set_style(header, "transform", &update.header.transform(self.header_height));
        }
    }

    /// Adds `fade-in` to tracked elements that have entered the viewport.
    pub fn reveal_visible(&self) {
        let viewport_height = dom::inner_height(&self.window);
        let offset = self.sync.borrow().config().fade_in_offset_px;
        for element in &self.reveal {
            let top = element.get_bounding_client_rect().top();
            if should_fade_in(top, viewport_height, offset) {
                dom::set_class(element, "fade-in", true);
            }
        }
    }

    pub fn sync_mobile_view(&self) {
        let mobile = self
            .sync
            .borrow()
            .config()
            .is_mobile_width(dom::inner_width(&self.window));
        if let Some(root) = &self.root {
            dom::set_class(root, "mobile-view", mobile);
        }
    }

    /// Closes the drawer and smooth-scrolls `selector` under the header.
    pub fn scroll_to(&self, document: &Document, selector: &str) {
        self.drawer.close();

        let Some(target) = dom::query(document, selector) else {
            return;
        };
        let element_top = target.get_bounding_client_rect().top();
        let page_offset = self.window.page_y_offset().unwrap_or(0.0);

        let options = ScrollToOptions::new();
        options.set_top(element_top + page_offset - self.header_height);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

pub fn setup(document: &Document, controller: &Rc<ViewportController>) {
    let window = controller.window.clone();

    {
        let controller = Rc::clone(controller);
        EventListener::new(&window, "scroll", move |_| controller.schedule()).forget();
    }

    {
        // Every event: the class must track the final width of a resize burst.
        let controller = Rc::clone(controller);
        EventListener::new(&window, "resize", move |_| {
            controller.sync_mobile_view();
            controller.schedule();
        })
        .forget();
    }

    {
        let controller = Rc::clone(controller);
        let doc = document.clone();
        EventListener::new(document, "visibilitychange", move |_| {
            if doc.visibility_state() == VisibilityState::Visible {
                controller.refresh();
            }
        })
        .forget();
    }

    {
        let controller = Rc::clone(controller);
        EventListener::new(&window, "load", move |_| controller.refresh()).forget();
    }

    for anchor in dom::query_all(document, "a[href^=\"#\"]") {
        let controller = Rc::clone(controller);
        let doc = document.clone();
        let link = anchor.clone();
        EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                // Read at click time; project cards may have repointed the link.
                let href = link.get_attribute("href");
                match anchor_action(href.as_deref()) {
                    AnchorAction::Follow => {}
                    AnchorAction::Suppress => event.prevent_default(),
                    AnchorAction::ScrollTo(selector) => {
                        event.prevent_default();
                        if dom::query(&doc, selector).is_some() {
                            controller.scroll_to(&doc, selector);
                        }
                    }
                }
            },
        )
        .forget();
    }

    {
        let controller = Rc::clone(controller);
        let doc = document.clone();
        EventListener::new(&window, "popstate", move |event| {
            let Some(event) = event.dyn_ref::<PopStateEvent>() else {
                return;
            };
            let state = event.state();
            if state.is_null() || state.is_undefined() {
                return;
            }
            let target = Reflect::get(&state, &JsValue::from_str("target"))
                .ok()
                .and_then(|value| value.as_string());
            if let Some(target) = target {
                controller.scroll_to(&doc, &target);
            }
        })
        .forget();
    }

    controller.sync_mobile_view();
    controller.refresh();
}
