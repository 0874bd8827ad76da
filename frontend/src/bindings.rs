use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::services::dom::{by_id, query_all};

pub const METHOD_INPUT_NAME: &str = "email-method";

/// Every element the behavior layer touches, resolved once at startup and
/// handed to the components. Missing elements stay `None` (or empty) and the
/// component that needs them does nothing.
#[derive(Clone)]
pub struct ViewBindings {
    pub document: Document,
    pub root: Option<HtmlElement>,
    pub body: Option<HtmlElement>,

    pub header: Option<HtmlElement>,
    pub nav_toggle: Option<HtmlElement>,
    pub nav_menu: Option<HtmlElement>,
    pub nav_links: Vec<HtmlElement>,
    pub theme_toggle: Option<HtmlElement>,
    pub back_to_top: Option<HtmlElement>,

    /// `.section, .hero`, used for active link tracking
    pub tracked_sections: Vec<HtmlElement>,
    /// `.section`, revealed on scroll
    pub reveal_sections: Vec<HtmlElement>,
    pub hero_title: Option<HtmlElement>,
    pub stat_numbers: Vec<HtmlElement>,

    pub filter_buttons: Vec<HtmlElement>,
    pub project_cards: Vec<HtmlElement>,
    pub skill_tags: Vec<HtmlElement>,

    pub contact_form: Option<HtmlFormElement>,
    pub submit_button: Option<HtmlButtonElement>,
    pub method_inputs: Vec<HtmlInputElement>,

    pub setup_modal: Option<HtmlElement>,
    pub modal_overlay: Option<HtmlElement>,
    pub modal_close: Option<HtmlElement>,
    pub setup_guide_button: Option<HtmlElement>,

    pub notification: Option<HtmlElement>,
    pub notification_close: Option<HtmlElement>,
}

impl ViewBindings {
    pub fn from_document(document: &Document) -> Self {
        Self {
            document: document.clone(),
            root: document
                .document_element()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok()),
            body: document.body(),

            header: by_id(document, "header"),
            nav_toggle: by_id(document, "nav-toggle"),
            nav_menu: by_id(document, "nav-menu"),
            nav_links: query_all(document, ".nav__link"),
            theme_toggle: by_id(document, "theme-toggle"),
            back_to_top: by_id(document, "back-to-top"),

            tracked_sections: query_all(document, ".section, .hero"),
            reveal_sections: query_all(document, ".section"),
            hero_title: query_all(document, ".hero__title").into_iter().next(),
            stat_numbers: query_all(document, ".stat__number"),

            filter_buttons: query_all(document, ".filter__btn"),
            project_cards: query_all(document, ".project__card"),
            skill_tags: query_all(document, ".skill__tag"),

            contact_form: by_id(document, "contact-form"),
            submit_button: by_id(document, "submit-btn"),
            method_inputs: query_all(document, &format!("input[name=\"{METHOD_INPUT_NAME}\"]")),

            setup_modal: by_id(document, "setup-modal"),
            modal_overlay: by_id(document, "modal-overlay"),
            modal_close: by_id(document, "modal-close"),
            setup_guide_button: by_id(document, "setup-guide-btn"),

            notification: by_id(document, "notification"),
            notification_close: by_id(document, "notification-close"),
        }
    }
}
