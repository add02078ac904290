use std::cell::Cell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Document, Element, Storage};

use super::dom;
use crate::theme::{load_theme, save_theme, PreferenceStore, StoreError, Theme, THEME_ATTRIBUTE};

/// `localStorage`, when the browser lets us have it.
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn local() -> Self {
        Self {
            storage: window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|_| StoreError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|_| StoreError::Write(key.to_string()))
    }
}

fn system_prefers_dark() -> bool {
    window()
        .map(|w| dom::media_matches(&w, "(prefers-color-scheme: dark)"))
        .unwrap_or(false)
}

fn prefers_reduced_motion() -> bool {
    window()
        .map(|w| dom::media_matches(&w, "(prefers-reduced-motion: reduce)"))
        .unwrap_or(false)
}

/// Sets the root theme attribute and syncs the toggle's icon and labels.
pub fn apply_theme(theme: Theme) {
    let Some(document) = dom::document() else {
        return;
    };

    if let Some(root) = document.document_element() {
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }

    if let Some(toggle) = dom::query(&document, ".theme-toggle") {
        sync_toggle(&toggle, theme);
    }
}

fn sync_toggle(toggle: &Element, theme: Theme) {
    let _ = toggle.set_attribute("aria-label", theme.toggle_label());
    let _ = toggle.set_attribute("aria-pressed", if theme.is_dark() { "true" } else { "false" });
    if let Some(icon) = dom::query_in(toggle, "i") {
        icon.set_class_name(theme.icon_class());
    }
}

/// `document.startViewTransition`, when the browser has it and motion is
/// welcome.
fn view_transition(document: &JsValue) -> Option<Function> {
    if prefers_reduced_motion() {
        return None;
    }
    Reflect::get(document, &JsValue::from_str("startViewTransition"))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn switch_theme(theme: Theme) {
    let document: Option<JsValue> = dom::document().map(Into::into);
    let started = document.as_ref().is_some_and(|document| {
        view_transition(document).is_some_and(|start| {
            let update = Closure::once_into_js(move || apply_theme(theme));
            start.call1(document, &update).is_ok()
        })
    });
    if !started {
        apply_theme(theme);
    }
}

/// Applies the resolved theme and wires `.theme-toggle`.
pub fn setup(document: &Document) {
    let store = BrowserStore::local();
    let current = Rc::new(Cell::new(load_theme(&store, system_prefers_dark())));
    apply_theme(current.get());

    let Some(toggle) = dom::query(document, ".theme-toggle") else {
        console::debug!("theme toggle not found; theme switching disabled");
        return;
    };

    EventListener::new(&toggle, "click", move |_| {
        let next = current.get().toggled();
        current.set(next);
        if let Err(err) = save_theme(&store, next) {
            console::warn!("theme not persisted", err.to_string());
        }
        switch_theme(next);
    })
    .forget();
}
