use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use shared::navigation::{ModalState, MODAL_FADE_IN_MS};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::services::dom::{set_class, set_style};

/// The "Email Setup Guide" dialog
#[derive(Clone)]
pub struct SetupModal {
    state: Rc<Cell<ModalState>>,
    modal: Option<HtmlElement>,
    body: Option<HtmlElement>,
}

impl SetupModal {
    pub fn new(modal: Option<HtmlElement>, body: Option<HtmlElement>) -> Self {
        Self {
            state: Rc::new(Cell::new(ModalState::Closed)),
            modal,
            body,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state.get()
    }

    pub fn open(&self) {
        let Some(modal) = self.modal.clone() else {
            return;
        };
        self.set(ModalState::Open);
        let state = Rc::clone(&self.state);
        spawn_local(async move {
            TimeoutFuture::new(MODAL_FADE_IN_MS).await;
            // Closed again before the fade started
            if state.get().is_open() {
                set_style(&modal, "opacity", "1");
            }
        });
    }

    pub fn close(&self) {
        if let Some(modal) = &self.modal {
            set_style(modal, "opacity", "");
        }
        self.set(ModalState::Closed);
    }

    fn set(&self, state: ModalState) {
        let Some(modal) = &self.modal else {
            return;
        };
        self.state.set(state);
        set_class(modal, "hidden", !state.is_open());
        if let Some(body) = &self.body {
            set_style(body, "overflow", state.body_overflow());
        }
    }

    /// Opener button, close button and overlay
    pub fn attach(
        &self,
        opener: Option<&HtmlElement>,
        close_button: Option<&HtmlElement>,
        overlay: Option<&HtmlElement>,
    ) {
        if let Some(opener) = opener {
            let this = self.clone();
            EventListener::new_with_options(
                opener,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    this.open();
                },
            )
            .forget();
        }
        for target in [close_button, overlay].into_iter().flatten() {
            let this = self.clone();
            EventListener::new(target, "click", move |_| this.close()).forget();
        }
    }
}
