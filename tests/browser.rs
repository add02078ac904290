#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Array, Function, Object, Reflect};
use portfolio_ui::config::ScrollAnimationConfig;
use portfolio_ui::frontend::drawer::{self, DrawerController};
use portfolio_ui::frontend::tabs::{self, TabsController};
use portfolio_ui::frontend::viewport::{self, ViewportController};
use portfolio_ui::frontend::{cards, cursor, init_scroll_animations, mount, read_config, theme};
use portfolio_ui::tabs::GroupId;
use portfolio_ui::theme::Theme;
use portfolio_ui::throttle::throttle;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{
    window, Document, Event, HtmlElement, KeyboardEvent, KeyboardEventInit, PopStateEvent,
    PopStateEventInit, Window,
};

wasm_bindgen_test_configure!(run_in_browser);

fn win() -> Window {
    window().expect("window available")
}

fn fixture(markup: &str) -> Document {
    let document = win().document().expect("document available");
    document
        .body()
        .expect("body available")
        .set_inner_html(markup);
    document
}

fn html(document: &Document, selector: &str) -> HtmlElement {
    document
        .query_selector(selector)
        .expect("valid selector")
        .expect("element present")
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn has_class(document: &Document, selector: &str, class: &str) -> bool {
    html(document, selector).class_list().contains(class)
}

fn key_event(key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    init.set_cancelable(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keyboard event")
}

fn click_event() -> Event {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict("click", &init).expect("click event")
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let _ = win().request_animation_frame(&resolve);
    });
    let _ = JsFuture::from(promise).await;
}

async fn settle() {
    for _ in 0..3 {
        next_frame().await;
    }
}

/// Replaces `window.open` with a recorder and returns the list it fills.
fn record_window_open() -> Array {
    let opened = Array::new();
    Reflect::set(&win(), &JsValue::from_str("__opened"), &opened).expect("set recorder");
    let recorder = Function::new_with_args(
        "url, target, features",
        "window.__opened.push(url); return null;",
    );
    Reflect::set(&win(), &JsValue::from_str("open"), &recorder).expect("override open");
    opened
}

#[wasm_bindgen_test]
fn drawer_opens_locks_scroll_and_closes_on_escape() {
    let document = fixture(
        r##"<button class="hamburger"></button>
           <nav class="mobile-nav" id="mobile-nav"><a class="nav-link" href="#about">About</a></nav>
           <div class="menu-overlay"></div>"##,
    );
    let controller = Rc::new(DrawerController::from_document(&document));
    drawer::setup(&document, &controller);

    let hamburger = html(&document, ".hamburger");
    assert_eq!(hamburger.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert_eq!(hamburger.get_attribute("aria-controls").as_deref(), Some("mobile-nav"));

    hamburger.click();
    assert!(controller.is_open());
    assert!(has_class(&document, ".mobile-nav", "active"));
    assert!(has_class(&document, ".menu-overlay", "active"));
    assert_eq!(hamburger.get_attribute("aria-expanded").as_deref(), Some("true"));
    let body = document.body().expect("body");
    assert_eq!(body.style().get_property_value("overflow").as_deref(), Ok("hidden"));

    document
        .dispatch_event(&key_event("Escape"))
        .expect("dispatch escape");
    assert!(!controller.is_open());
    assert!(!has_class(&document, ".hamburger", "active"));
    assert_eq!(body.style().get_property_value("overflow").as_deref(), Ok(""));
}

#[wasm_bindgen_test]
fn drawer_closes_from_overlay_and_drawer_links() {
    let document = fixture(
        r##"<button class="hamburger"></button>
           <nav class="mobile-nav"><a href="#projects">Projects</a></nav>
           <div class="menu-overlay"></div>"##,
    );
    let controller = Rc::new(DrawerController::from_document(&document));
    drawer::setup(&document, &controller);

    html(&document, ".hamburger").click();
    html(&document, ".menu-overlay").click();
    assert!(!controller.is_open());

    html(&document, ".hamburger").click();
    html(&document, ".mobile-nav a").click();
    assert!(!controller.is_open());
}

#[wasm_bindgen_test]
fn missing_drawer_elements_degrade_silently() {
    let document = fixture("<main></main>");
    let controller = Rc::new(DrawerController::from_document(&document));
    drawer::setup(&document, &controller);
    controller.close();
    assert!(!controller.is_open());
}

const TAB_MARKUP: &str = r#"
    <style>.tab-pane { display: none; } .tab-pane.active { display: block; }</style>
    <div class="tabs">
        <button class="tab-button" data-tab="t1">One</button>
        <button class="tab-button" data-tab="t2">Two</button>
    </div>
    <div class="tab-content">
        <div class="tab-pane" id="t1" style="display: none; height: 120px">first</div>
        <div class="tab-pane" id="t2" style="height: 900px">second</div>
    </div>
    <div style="height: 4000px"></div>
"#;

#[wasm_bindgen_test]
fn tabs_start_on_first_pair_without_inline_display() {
    let document = fixture(TAB_MARKUP);
    let controller = Rc::new(TabsController::new(
        win(),
        &document,
        Rc::new(DrawerController::from_document(&document)),
    ));
    tabs::setup(&controller);

    assert_eq!(controller.group_count(), 1);
    assert!(has_class(&document, "[data-tab='t1']", "active"));
    assert!(has_class(&document, "#t1", "active"));
    assert!(!has_class(&document, "#t2", "active"));
    assert_eq!(html(&document, "#t1").style().get_property_value("display").as_deref(), Ok(""));
}

#[wasm_bindgen_test]
fn selecting_a_tab_activates_exactly_one_pair() {
    let document = fixture(TAB_MARKUP);
    let controller = Rc::new(TabsController::new(
        win(),
        &document,
        Rc::new(DrawerController::from_document(&document)),
    ));
    tabs::setup(&controller);

    assert!(controller.select(GroupId(0), "t2").is_some());
    assert_eq!(document.query_selector_all(".tab-button.active").map(|l| l.length()), Ok(1));
    assert_eq!(document.query_selector_all(".tab-pane.active").map(|l| l.length()), Ok(1));
    assert!(has_class(&document, "#t2", "active"));
    assert!(has_class(&document, "[data-tab='t2']", "active"));

    assert!(controller.select(GroupId(0), "missing").is_none());
    assert!(has_class(&document, "#t2", "active"));
}

#[wasm_bindgen_test(async)]
async fn switching_tabs_keeps_the_window_scroll_offset() {
    let document = fixture(TAB_MARKUP);
    let controller = Rc::new(TabsController::new(
        win(),
        &document,
        Rc::new(DrawerController::from_document(&document)),
    ));
    tabs::setup(&controller);

    win().scroll_to_with_x_and_y(0.0, 600.0);
    next_frame().await;
    let before = win().scroll_y().expect("scroll offset");

    html(&document, "[data-tab='t2']").click();
    next_frame().await;
    next_frame().await;

    assert_eq!(win().scroll_y().expect("scroll offset"), before);
    win().scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
fn project_card_opens_its_repository_but_not_for_nested_links() {
    let document = fixture(
        r##"<article class="project" data-repo="https://x/y">
               <h3 class="project-title">Anything</h3>
               <a class="inner" href="#nested">docs</a>
               <span class="blurb">blurb</span>
           </article>"##,
    );
    let opened = record_window_open();
    assert_eq!(cards::setup_project_cards(&win(), &document), 1);

    let card = html(&document, ".project");
    assert_eq!(card.get_attribute("role").as_deref(), Some("link"));
    assert_eq!(card.get_attribute("tabindex").as_deref(), Some("0"));

    html(&document, ".blurb").click();
    card.dispatch_event(&key_event("Enter")).expect("enter");
    card.dispatch_event(&key_event(" ")).expect("space");
    assert_eq!(opened.length(), 3);
    for url in opened.iter() {
        assert_eq!(url.as_string().as_deref(), Some("https://x/y"));
    }

    html(&document, ".inner").click();
    assert_eq!(opened.length(), 3, "nested anchors keep their own behaviour");
}

#[wasm_bindgen_test]
fn project_title_lookup_rewrites_image_link() {
    let document = fixture(
        r#"<article class="project">
               <div class="project-image"><a href="/placeholder"><img alt=""></a></div>
               <h3 class="project-title"> Network Monitoring Tool </h3>
           </article>
           <article class="project"><h3 class="project-title">Unlisted</h3></article>"#,
    );
    assert_eq!(cards::setup_project_cards(&win(), &document), 1);

    let link = html(&document, ".project-image a");
    assert_eq!(
        link.get_attribute("href").as_deref(),
        Some("https://github.com/username/network-monitoring-tool")
    );
    assert_eq!(link.get_attribute("rel").as_deref(), Some("noopener noreferrer"));
    assert_eq!(
        link.get_attribute("aria-label").as_deref(),
        Some("Network Monitoring Tool repository on GitHub")
    );
}

#[wasm_bindgen_test]
fn apply_theme_sets_root_attribute_and_icon() {
    let document = fixture(r#"<button class="theme-toggle"><i class="fas fa-sun"></i></button>"#);

    theme::apply_theme(Theme::Dark);

    let root = document.document_element().expect("root");
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(html(&document, ".theme-toggle i").class_name(), "fas fa-moon");
    assert_eq!(
        html(&document, ".theme-toggle").get_attribute("aria-label").as_deref(),
        Some("Switch to light theme")
    );

    theme::apply_theme(Theme::Light);
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));
}

#[wasm_bindgen_test]
fn follower_hover_toggles_class_and_cancels() {
    let document = fixture(
        r#"<div class="ghost-cursor"></div><button class="cta">Go</button>"#,
    );
    let config = read_config(&document);
    let follower = cursor::start(&document, &config).expect("marker present");

    let button = html(&document, ".cta");
    button
        .dispatch_event(&Event::new("mouseenter").expect("event"))
        .expect("dispatch");
    assert!(has_class(&document, ".ghost-cursor", "ghost-hover"));

    button
        .dispatch_event(&Event::new("mouseleave").expect("event"))
        .expect("dispatch");
    assert!(!has_class(&document, ".ghost-cursor", "ghost-hover"));

    assert!(follower.is_running());
    follower.cancel();
    assert!(!follower.is_running());
}

#[wasm_bindgen_test]
fn follower_is_disabled_without_a_marker() {
    let document = fixture("<main></main>");
    assert!(cursor::start(&document, &read_config(&document)).is_none());
}

#[wasm_bindgen_test]
fn scroll_animation_library_receives_fixed_config() {
    let captured = Array::new();
    let library = Object::new();
    let init = Function::new_with_args("options", "this.captured.push(options);");
    Reflect::set(&library, &JsValue::from_str("captured"), &captured).expect("set captured");
    Reflect::set(&library, &JsValue::from_str("init"), &init).expect("set init");
    Reflect::set(&win(), &JsValue::from_str("AOS"), &library).expect("install library");

    assert!(init_scroll_animations(&win(), &ScrollAnimationConfig::default()));

    let options = captured.get(0);
    let get = |key: &str| Reflect::get(&options, &JsValue::from_str(key)).expect("field");
    assert_eq!(get("duration").as_f64(), Some(800.0));
    assert_eq!(get("easing").as_string().as_deref(), Some("ease-in-out"));
    assert_eq!(get("once").as_bool(), Some(true));
    assert_eq!(get("mirror").as_bool(), Some(false));

    Reflect::delete_property(&win(), &JsValue::from_str("AOS")).expect("remove library");
    assert!(!init_scroll_animations(&win(), &ScrollAnimationConfig::default()));
}

#[wasm_bindgen_test]
fn throttled_callback_runs_once_per_window() {
    let hits = Rc::new(Cell::new(0));
    let mut throttled = {
        let hits = Rc::clone(&hits);
        throttle(move || hits.set(hits.get() + 1), 10_000.0)
    };
    throttled();
    throttled();
    throttled();
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test(async)]
async fn theme_toggle_twice_restores_and_persists_original() {
    let storage = win()
        .local_storage()
        .expect("storage access")
        .expect("local storage");
    storage.set_item("theme", "light").expect("seed theme");
    let document = fixture(r#"<button class="theme-toggle"><i class="fas fa-sun"></i></button>"#);
    theme::setup(&document);
    let root = document.document_element().expect("root");
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));

    let toggle = html(&document, ".theme-toggle");
    toggle.click();
    assert_eq!(storage.get_item("theme").expect("read"), Some("dark".to_string()));
    settle().await;
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("dark"));
    assert_eq!(toggle.get_attribute("aria-pressed").as_deref(), Some("true"));

    toggle.click();
    assert_eq!(storage.get_item("theme").expect("read"), Some("light".to_string()));
    settle().await;
    assert_eq!(root.get_attribute("data-theme").as_deref(), Some("light"));
    assert_eq!(html(&document, ".theme-toggle i").class_name(), "fas fa-sun");
    assert_eq!(toggle.get_attribute("aria-pressed").as_deref(), Some("false"));
}

const SECTIONED_MARKUP: &str = r##"
    <header class="header" style="height: 60px; margin: 0"></header>
    <button class="hamburger"></button>
    <nav class="mobile-nav"></nav>
    <div class="menu-overlay"></div>
    <ul>
        <li class="nav-item"><a href="#home">Home</a></li>
        <li class="nav-item"><a href="#work">Work</a></li>
    </ul>
    <a class="jump" href="#work">Work</a>
    <a class="top" href="#">Top</a>
    <section id="home" class="section" style="height: 1000px; margin: 0"></section>
    <section id="work" class="section" style="height: 1000px; margin: 0"></section>
    <div style="height: 4000px"></div>
"##;

fn sectioned_page() -> (Document, Rc<DrawerController>, Rc<ViewportController>) {
    win().scroll_to_with_x_and_y(0.0, 0.0);
    let document = fixture(SECTIONED_MARKUP);
    let drawer = Rc::new(DrawerController::from_document(&document));
    drawer::setup(&document, &drawer);
    let controller = Rc::new(ViewportController::new(
        win(),
        &document,
        read_config(&document),
        Rc::clone(&drawer),
    ));
    viewport::setup(&document, &controller);
    (document, drawer, controller)
}

#[wasm_bindgen_test(async)]
async fn scrolling_highlights_the_section_and_hides_the_header() {
    let (document, _drawer, _controller) = sectioned_page();
    assert!(has_class(&document, ".nav-item:nth-child(1)", "active"));
    assert!(has_class(&document, "#home", "fade-in"));

    win().scroll_to_with_x_and_y(0.0, 1100.0);
    settle().await;

    assert!(has_class(&document, ".nav-item:nth-child(2)", "active"));
    assert!(has_class(&document, ".nav-item:nth-child(2) a", "active"));
    assert!(!has_class(&document, ".nav-item:nth-child(1)", "active"));
    assert!(has_class(&document, "#work", "fade-in"));

    let header = html(&document, ".header");
    assert!(header.class_list().contains("scrolled"));
    assert!(header.class_list().contains("hide"));
    assert_eq!(
        header.style().get_property_value("transform").as_deref(),
        Ok("translateY(-60px)")
    );

    win().scroll_to_with_x_and_y(0.0, 1050.0);
    settle().await;
    assert!(header.class_list().contains("scrolled"));
    assert!(!header.class_list().contains("hide"));
    assert_ne!(
        header.style().get_property_value("transform").as_deref(),
        Ok("translateY(-60px)")
    );

    win().scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
fn in_page_links_close_the_drawer_and_bare_hash_is_swallowed() {
    let (document, drawer, _controller) = sectioned_page();
    html(&document, ".hamburger").click();
    assert!(drawer.is_open());

    html(&document, ".jump").click();
    assert!(!drawer.is_open());

    let top = html(&document, ".top");
    assert!(!top.dispatch_event(&click_event()).expect("dispatch"));
    win().scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
fn history_navigation_scrolls_to_the_stored_target() {
    let (document, drawer, _controller) = sectioned_page();
    html(&document, ".hamburger").click();

    let state = Object::new();
    Reflect::set(&state, &JsValue::from_str("target"), &JsValue::from_str("#work"))
        .expect("set target");
    let init = PopStateEventInit::new();
    init.set_state(&state);
    let event = PopStateEvent::new_with_event_init_dict("popstate", &init).expect("popstate");
    win().dispatch_event(&event).expect("dispatch");

    assert!(!drawer.is_open());
    win().scroll_to_with_x_and_y(0.0, 0.0);
}

#[wasm_bindgen_test]
fn becoming_visible_recomputes_nav_state() {
    let (document, _drawer, _controller) = sectioned_page();
    let home = html(&document, ".nav-item:nth-child(1)");
    home.class_list().remove_1("active").expect("clear");

    document
        .dispatch_event(&Event::new("visibilitychange").expect("event"))
        .expect("dispatch");
    assert!(home.class_list().contains("active"));
}

#[wasm_bindgen_test]
fn mobile_view_tracks_every_resize_in_a_burst() {
    let (document, _drawer, _controller) = sectioned_page();
    let root = document.document_element().expect("root");
    let width = win()
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .expect("inner width");
    let expected = read_config(&document).is_mobile_width(width);
    assert_eq!(root.class_list().contains("mobile-view"), expected);

    for _ in 0..4 {
        root.class_list()
            .toggle_with_force("mobile-view", !expected)
            .expect("desync");
        win()
            .dispatch_event(&Event::new("resize").expect("event"))
            .expect("dispatch");
        assert_eq!(root.class_list().contains("mobile-view"), expected);
    }
}

#[wasm_bindgen_test]
fn rewritten_image_link_keeps_its_default_action_after_mount() {
    win().scroll_to_with_x_and_y(0.0, 0.0);
    let document = fixture(
        r##"<section id="projects" class="section">
               <article class="project">
                   <div class="project-image"><a href="#"><img alt=""></a></div>
                   <h3 class="project-title">Network Monitoring Tool</h3>
               </article>
           </section>"##,
    );
    let opened = record_window_open();
    let page = mount(win(), &document);

    // Observe the outcome after the page's own listeners, then stop the
    // navigation so the test page stays put.
    let prevented = Rc::new(Cell::new(None));
    let body = document.body().expect("body");
    let _observer = {
        let prevented = Rc::clone(&prevented);
        EventListener::new_with_options(
            &body,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                prevented.set(Some(event.default_prevented()));
                event.prevent_default();
            },
        )
    };

    let link = html(&document, ".project-image a");
    assert_eq!(
        link.get_attribute("href").as_deref(),
        Some("https://github.com/username/network-monitoring-tool")
    );
    link.dispatch_event(&click_event()).expect("dispatch");

    assert_eq!(prevented.get(), Some(false));
    assert_eq!(opened.length(), 0, "the link navigates, the card does not open a tab");

    if let Some(follower) = page.follower {
        follower.cancel();
    }
}
