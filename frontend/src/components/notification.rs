use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use shared::notification::{NotificationCenter, NotificationEvent, Notifier, Severity, ToastTimer};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::services::dom::query;

/// Drives the `#notification` element from a [`NotificationCenter`].
///
/// Cheap to clone; every clone talks to the same toast. Timers are plain
/// sleeping futures: the center ignores any that were superseded, so none
/// of them needs cancelling.
#[derive(Clone)]
pub struct Toasts {
    center: Rc<RefCell<NotificationCenter>>,
    element: Option<HtmlElement>,
    ttl_ms: u32,
}

impl Toasts {
    pub fn new(element: Option<HtmlElement>, ttl_ms: u32) -> Self {
        Self {
            center: Rc::new(RefCell::new(NotificationCenter::new())),
            element,
            ttl_ms,
        }
    }

    /// Wires the close button
    pub fn attach(&self, close_button: Option<&HtmlElement>) {
        if let Some(button) = close_button {
            let toasts = self.clone();
            EventListener::new(button, "click", move |_| toasts.hide()).forget();
        }
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity) {
        self.display(NotificationEvent::new(message, severity).with_ttl(self.ttl_ms));
    }

    pub fn hide(&self) {
        let timer = self.center.borrow_mut().hide();
        self.render();
        if let Some(timer) = timer {
            self.schedule(timer);
        }
    }

    fn display(&self, event: NotificationEvent) {
        if self.element.is_none() {
            return;
        }
        let timer = self.center.borrow_mut().show(event);
        self.render();
        self.schedule(timer);
    }

    fn schedule(&self, timer: ToastTimer) {
        let toasts = self.clone();
        spawn_local(async move {
            TimeoutFuture::new(timer.delay_ms).await;
            let next = toasts.center.borrow_mut().on_timer(timer);
            toasts.render();
            if let Some(next) = next {
                toasts.schedule(next);
            }
        });
    }

    fn render(&self) {
        let Some(element) = &self.element else {
            return;
        };
        let view = self.center.borrow().view();
        if let Some(icon) = query::<HtmlElement>(element, ".notification__icon") {
            icon.set_text_content(Some(view.icon));
        }
        if let Some(message) = query::<HtmlElement>(element, ".notification__message") {
            message.set_text_content(Some(&view.message));
        }
        element.set_class_name(&view.class_name);
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, event: NotificationEvent) {
        self.display(event);
    }
}
