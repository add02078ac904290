use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Window};

use super::dom;
use crate::projects::{image_link_label, is_activation_key, resolve_card_url, OPEN_FEATURES, OPEN_TARGET};

fn open_in_new_tab(window: &Window, url: &str) {
    let _ = window.open_with_url_and_target_and_features(url, OPEN_TARGET, OPEN_FEATURES);
}

/// Turns every `.project` card with a known repository into a link. Returns
/// how many cards were wired.
pub fn setup_project_cards(window: &Window, document: &Document) -> usize {
    let mut wired = 0;
    for card in dom::query_all(document, ".project") {
        let title = dom::query_in(&card, ".project-title")
            .and_then(|title| title.text_content())
            .map(|title| title.trim().to_string())
            .unwrap_or_default();
        let data_repo = card.get_attribute("data-repo");
        let Some(url) = resolve_card_url(data_repo.as_deref(), &title) else {
            continue;
        };

        wire_card(window, &card, Rc::from(url.as_str()));
        rewrite_image_link(&card, &url, &title);
        wired += 1;
    }
    wired
}

fn wire_card(window: &Window, card: &Element, url: Rc<str>) {
    let _ = card.set_attribute("role", "link");
    let _ = card.set_attribute("tabindex", "0");

    {
        let window = window.clone();
        let url = Rc::clone(&url);
        EventListener::new(card, "click", move |event| {
            if dom::target_within(event.target(), "a") {
                return;
            }
            open_in_new_tab(&window, &url);
        })
        .forget();
    }

    let window = window.clone();
    EventListener::new_with_options(
        card,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if is_activation_key(&event.key()) {
                event.prevent_default();
                open_in_new_tab(&window, &url);
            }
        },
    )
    .forget();
}

fn rewrite_image_link(card: &Element, url: &str, title: &str) {
    let Some(link) = dom::query_in(card, ".project-image a") else {
        return;
    };
    let _ = link.set_attribute("href", url);
    let _ = link.set_attribute("target", "_blank");
    let _ = link.set_attribute("rel", "noopener noreferrer");
    let _ = link.set_attribute("aria-label", &image_link_label(title));
}

pub fn setup_mobile_social_links(document: &Document) {
    for link in dom::query_all(document, ".mobile-social-links a") {
        let _ = link.set_attribute("target", "_blank");
        let _ = link.set_attribute("rel", "noopener noreferrer");

        let Some(link) = dom::as_html(&link) else {
            continue;
        };
        dom::set_style(&link, "pointer-events", "auto");

        let pressed = link.clone();
        EventListener::new(&link, "touchstart", move |_| {
            dom::set_style(&pressed, "transform", "scale(0.95)");
        })
        .forget();
        let released = link.clone();
        EventListener::new(&link, "touchend", move |_| {
            dom::set_style(&released, "transform", "scale(1)");
        })
        .forget();
    }
}
