use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use shared::keyboard::{roving_focus, GroupAxis, KonamiDetector, ESCAPE};
use shared::SiteConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, KeyboardEvent};

use super::contact_form::DomContactForm;
use super::easter_egg;
use super::navigation::MobileMenu;
use super::notification::Toasts;
use super::setup_modal::SetupModal;

/// Everything the document-level `keydown` handler acts on
pub struct KeyboardShortcuts {
    pub menu: MobileMenu,
    pub modal: SetupModal,
    pub filter_buttons: Vec<HtmlElement>,
    pub method_inputs: Vec<HtmlInputElement>,
    pub contact_form: Option<DomContactForm>,
    pub config: Rc<SiteConfig>,
    pub body: Option<HtmlElement>,
    pub toasts: Toasts,
}

impl KeyboardShortcuts {
    pub fn attach(self, document: &Document) {
        let konami = RefCell::new(KonamiDetector::new());
        let focus_source = document.clone();

        EventListener::new_with_options(
            document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();

                if key == ESCAPE {
                    if self.menu.state().is_open() {
                        self.menu.close();
                    }
                    if self.modal.state().is_open() {
                        self.modal.close();
                    }
                }

                if let Some(active) = focus_source.active_element() {
                    self.move_focus(event, &key, &active);
                }

                if konami.borrow_mut().push(&event.code()) {
                    easter_egg::celebrate(self.body.as_ref(), &self.toasts);
                }
            },
        )
        .forget();
    }

    fn move_focus(&self, event: &KeyboardEvent, key: &str, active: &Element) {
        if let Some(current) = index_of(&self.filter_buttons, active) {
            let len = self.filter_buttons.len();
            if let Some(next) = roving_focus(current, len, key, GroupAxis::Horizontal) {
                event.prevent_default();
                let _ = self.filter_buttons[next].focus();
            }
        }

        if let Some(current) = index_of(&self.method_inputs, active) {
            let len = self.method_inputs.len();
            if let Some(next) = roving_focus(current, len, key, GroupAxis::Vertical) {
                event.prevent_default();
                let input = &self.method_inputs[next];
                let _ = input.focus();
                input.set_checked(true);
                if let Some(form) = &self.contact_form {
                    form.update_form_action(&self.config);
                }
            }
        }
    }
}

fn index_of<T: AsRef<Element>>(group: &[T], active: &Element) -> Option<usize> {
    group.iter().position(|member| member.as_ref() == active)
}
