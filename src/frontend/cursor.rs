use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use super::dom;
use crate::config::UiConfig;
use crate::follower::{Follower, HOVER_CLASS, INTERACTIVE_SELECTOR};

struct FollowerInner {
    marker: HtmlElement,
    follower: RefCell<Follower>,
    frame: RefCell<Option<AnimationFrame>>,
    cancelled: Cell<bool>,
}

impl FollowerInner {
    fn tick(self: &Rc<Self>) {
        if self.cancelled.get() {
            return;
        }

        let frame = self.follower.borrow_mut().step();
        dom::set_style(&self.marker, "left", &frame.left_px());
        dom::set_style(&self.marker, "top", &frame.top_px());
        dom::set_style(&self.marker, "transform", &frame.transform());

        let inner = Rc::clone(self);
        let handle = request_animation_frame(move |_| inner.tick());
        *self.frame.borrow_mut() = Some(handle);
    }

    fn set_hovering(&self, hovering: bool) {
        let transform = {
            let mut follower = self.follower.borrow_mut();
            follower.set_hovering(hovering);
            follower.hover_transform()
        };
        dom::set_class(&self.marker, HOVER_CLASS, hovering);
        dom::set_style(&self.marker, "transform", &transform);
    }
}

/// Handle to the running follower loop. The loop lives for the page unless
/// [`FollowerLoop::cancel`] is called.
#[derive(Clone)]
pub struct FollowerLoop {
    inner: Rc<FollowerInner>,
}

impl FollowerLoop {
    pub fn cancel(&self) {
        self.inner.cancelled.set(true);
        self.inner.frame.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        !self.inner.cancelled.get()
    }
}

/// Starts the follower when a `.ghost-cursor` marker exists.
pub fn start(document: &Document, config: &UiConfig) -> Option<FollowerLoop> {
    let Some(marker) = dom::query(document, ".ghost-cursor").and_then(|el| dom::as_html(&el))
    else {
        console::debug!("ghost cursor not found; follower disabled");
        return None;
    };

    let inner = Rc::new(FollowerInner {
        marker,
        follower: RefCell::new(Follower::new(config)),
        frame: RefCell::new(None),
        cancelled: Cell::new(false),
    });

    {
        let inner = Rc::clone(&inner);
        EventListener::new(document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                inner
                    .follower
                    .borrow_mut()
                    .set_pointer(f64::from(event.client_x()), f64::from(event.client_y()));
            }
        })
        .forget();
    }

    for element in dom::query_all(document, INTERACTIVE_SELECTOR) {
        let enter = Rc::clone(&inner);
        EventListener::new(&element, "mouseenter", move |_| enter.set_hovering(true)).forget();
        let leave = Rc::clone(&inner);
        EventListener::new(&element, "mouseleave", move |_| leave.set_hovering(false)).forget();
    }

    let starter = Rc::clone(&inner);
    let handle = request_animation_frame(move |_| starter.tick());
    *inner.frame.borrow_mut() = Some(handle);

    Some(FollowerLoop { inner })
}
