//! Browser wiring: finds the page's marker elements, feeds the state
//! modules and renders what they return.

pub mod cards;
pub mod cursor;
pub mod dom;
pub mod drawer;
pub mod tabs;
pub mod theme;
pub mod viewport;

use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use js_sys::{Function, Reflect, JSON};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, DocumentReadyState, Window};

use crate::config::{ScrollAnimationConfig, UiConfig};
use drawer::DrawerController;
use tabs::TabsController;
use viewport::ViewportController;

/// Handles to the long-lived controllers created at startup.
pub struct Page {
    pub drawer: Rc<DrawerController>,
    pub viewport: Rc<ViewportController>,
    pub tabs: Rc<TabsController>,
    pub follower: Option<cursor::FollowerLoop>,
}

pub fn read_config(document: &Document) -> UiConfig {
    match document.document_element() {
        Some(root) => UiConfig::from_attributes(|name| root.get_attribute(name)),
        None => UiConfig::default(),
    }
}

/// Invokes `AOS.init(config)` when the animation library is loaded.
pub fn init_scroll_animations(window: &Window, config: &ScrollAnimationConfig) -> bool {
    let Ok(library) = Reflect::get(window, &JsValue::from_str("AOS")) else {
        return false;
    };
    if library.is_null() || library.is_undefined() {
        return false;
    }
    let Some(init) = Reflect::get(&library, &JsValue::from_str("init"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return false;
    };

    let options = serde_json::to_string(config)
        .ok()
        .and_then(|json| JSON::parse(&json).ok());
    let Some(options) = options else {
        return false;
    };

    match init.call1(&library, &options) {
        Ok(_) => true,
        Err(_) => {
            console::warn!("scroll animation library failed to initialize");
            false
        }
    }
}

/// Sets up every enhancement on an already-parsed document.
pub fn mount(window: Window, document: &Document) -> Page {
    let config = read_config(document);

    theme::setup(document);

    let drawer = Rc::new(DrawerController::from_document(document));
    drawer::setup(document, &drawer);

    let viewport = Rc::new(ViewportController::new(
        window.clone(),
        document,
        config.clone(),
        Rc::clone(&drawer),
    ));
    viewport::setup(document, &viewport);

    init_scroll_animations(&window, &config.scroll_animation);

    let tabs = Rc::new(TabsController::new(
        window.clone(),
        document,
        Rc::clone(&drawer),
    ));
    tabs::setup(&tabs);

    cards::setup_project_cards(&window, document);
    viewport.reveal_visible();
    cards::setup_mobile_social_links(document);

    let follower = cursor::start(document, &config);

    Page {
        drawer,
        viewport,
        tabs,
        follower,
    }
}

pub fn run() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == DocumentReadyState::Loading {
        let doc = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            mount(window, &doc);
        })
        .forget();
    } else {
        mount(window, &document);
    }
}
