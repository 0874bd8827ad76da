use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use shared::submission::{
    validate_and_render, ContactFormView, ContactPipeline, FormAction, SubmissionMethod,
    SubmissionOutcome, SubmitButtonState,
};
use shared::validation::{FieldErrorDisplay, FieldName};
use shared::SiteConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement,
};

use super::notification::Toasts;
use crate::bindings::METHOD_INPUT_NAME;
use crate::services::dom::{by_id, query, query_all, set_class, set_style};
use crate::services::form_relay::FormRelayClient;
use crate::services::logging::Logger;

/// The contact form in the live document
#[derive(Clone)]
pub struct DomContactForm {
    document: Document,
    form: HtmlFormElement,
    submit_button: Option<HtmlButtonElement>,
}

impl DomContactForm {
    pub fn new(document: Document, form: HtmlFormElement, submit_button: Option<HtmlButtonElement>) -> Self {
        Self {
            document,
            form,
            submit_button,
        }
    }

    fn control(&self, field: FieldName) -> Option<HtmlElement> {
        by_id(&self.document, field.as_str())
    }

    /// Value of the checked method radio, if any
    pub fn selected_method(&self) -> Option<String> {
        let selector = format!("input[name=\"{METHOD_INPUT_NAME}\"]:checked");
        query::<HtmlInputElement>(&self.form, &selector).map(|input| input.value())
    }

    /// Points `action`/`method` at the provider behind the checked radio
    pub fn update_form_action(&self, config: &SiteConfig) {
        let Some(selected) = self.selected_method() else {
            return;
        };
        let _ = self.form.remove_attribute("action");
        let _ = self.form.remove_attribute("method");
        match selected.parse::<SubmissionMethod>() {
            Ok(method) => {
                let target = FormAction::for_method(method, config);
                self.form.set_action(&target.action);
                self.form.set_method(target.method);
            }
            Err(e) => Logger::warn_with_component("ContactForm", &e.to_string()),
        }
    }
}

impl ContactFormView for DomContactForm {
    fn field_value(&self, field: FieldName) -> Option<String> {
        let control = self.control(field)?;
        if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        control
            .dyn_ref::<HtmlTextAreaElement>()
            .map(HtmlTextAreaElement::value)
    }

    fn render_field_error(&mut self, field: FieldName, display: &FieldErrorDisplay) {
        if let Some(error) = by_id::<HtmlElement>(&self.document, &field.error_element_id()) {
            error.set_text_content(Some(&display.text));
            set_style(&error, "display", display.display);
        }
        if let Some(control) = self.control(field) {
            set_style(&control, "border-color", display.border_color);
        }
    }

    fn render_submit_button(&mut self, state: SubmitButtonState) {
        let Some(button) = &self.submit_button else {
            return;
        };
        if let Some(label) = query::<HtmlElement>(button, ".btn-text") {
            label.set_text_content(Some(state.label()));
        }
        if let Some(spinner) = query::<HtmlElement>(button, ".btn-spinner") {
            set_class(&spinner, "hidden", state.spinner_hidden());
        }
        button.set_disabled(state.disabled());
    }

    fn entries(&self) -> Vec<(String, String)> {
        let Ok(form_data) = FormData::new_with_form(&self.form) else {
            return Vec::new();
        };
        let Ok(Some(iter)) = js_sys::try_iter(&form_data) else {
            return Vec::new();
        };
        iter.filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = entry.dyn_into::<js_sys::Array>().ok()?;
                // File entries have no string value and are skipped
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn reset(&mut self) {
        self.form.reset();
    }
}

/// Checks the default method's radio when none is checked. The check is also
/// made the radio's default so a form reset keeps a method selected.
fn select_default_method(method_inputs: &[HtmlInputElement]) {
    if method_inputs.iter().any(HtmlInputElement::checked) {
        return;
    }
    let default = SubmissionMethod::default();
    if let Some(input) = method_inputs.iter().find(|input| input.value() == default.as_str()) {
        input.set_default_checked(true);
        input.set_checked(true);
    }
}

/// Wires real-time validation, the method radios and the submit handler
pub fn attach(
    view: DomContactForm,
    method_inputs: &[HtmlInputElement],
    config: Rc<SiteConfig>,
    toasts: Toasts,
) {
    for control in query_all::<HtmlElement>(&view.document, "#contact-form .form-control") {
        let Some(field) = control
            .get_attribute("name")
            .and_then(|name| name.parse::<FieldName>().ok())
        else {
            continue;
        };

        let mut on_blur = view.clone();
        EventListener::new(&control, "blur", move |_| {
            let _ = validate_and_render(&mut on_blur, field);
        })
        .forget();

        let mut on_input = view.clone();
        EventListener::new(&control, "input", move |_| {
            on_input.render_field_error(field, &FieldErrorDisplay::cleared());
        })
        .forget();
    }

    select_default_method(method_inputs);
    for input in method_inputs {
        let view = view.clone();
        let config = Rc::clone(&config);
        EventListener::new(input, "change", move |_| view.update_form_action(&config)).forget();
    }
    view.update_form_action(&config);

    let form = view.form.clone();
    EventListener::new_with_options(
        &form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            let mut view = view.clone();
            let mut toasts = toasts.clone();
            let config = Rc::clone(&config);
            spawn_local(async move {
                let selected = view.selected_method();
                let mut pipeline = ContactPipeline::new(&config);
                let outcome = pipeline
                    .submit(selected.as_deref(), &mut view, &mut toasts, &FormRelayClient)
                    .await;
                if let SubmissionOutcome::Failed(error) = outcome {
                    Logger::error_with_component("ContactForm", &format!("Form submission error: {error}"));
                }
            });
        },
    )
    .forget();
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use shared::submission::validate_form;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const FORM_HTML: &str = r#"
        <input class="form-control" id="name" name="name" value="Al">
        <div id="name-error"></div>
        <input class="form-control" id="email" name="email" value="not-an-email">
        <div id="email-error"></div>
        <input class="form-control" id="subject" name="subject" value="Hello there">
        <div id="subject-error"></div>
        <textarea class="form-control" id="message" name="message">Short</textarea>
        <div id="message-error"></div>
        <input type="hidden" name="botcheck" value="">
        <input type="radio" name="email-method" value="web3forms" checked>
        <button id="submit-btn"><span class="btn-text">Send Message</span><span class="btn-spinner hidden"></span></button>
    "#;

    fn mount_with(html: &str) -> DomContactForm {
        let document = web_sys::window().and_then(|w| w.document()).expect("document");
        let form = document
            .create_element("form")
            .expect("form")
            .dyn_into::<HtmlFormElement>()
            .expect("form element");
        form.set_id("contact-form");
        form.set_inner_html(html);
        document.body().expect("body").append_child(&form).expect("append");
        let button = query::<HtmlButtonElement>(&form, "#submit-btn");
        DomContactForm::new(document, form, button)
    }

    fn mount() -> DomContactForm {
        mount_with(FORM_HTML)
    }

    fn method_inputs(view: &DomContactForm) -> Vec<HtmlInputElement> {
        query_all(&view.document, &format!("input[name=\"{METHOD_INPUT_NAME}\"]"))
    }

    #[wasm_bindgen_test]
    fn test_dom_form_renders_errors_and_button_state() {
        let mut view = mount();

        assert_eq!(view.field_value(FieldName::Message).as_deref(), Some("Short"));
        assert!(validate_form(&mut view).is_err());

        let email_error = by_id::<HtmlElement>(&view.document, "email-error").unwrap();
        assert_eq!(email_error.text_content().unwrap(), "Please enter a valid email address");
        assert_eq!(email_error.style().get_property_value("display").unwrap(), "block");

        view.render_submit_button(SubmitButtonState::Busy);
        let button = view.submit_button.clone().unwrap();
        assert!(button.disabled());
        assert_eq!(query::<HtmlElement>(&button, ".btn-text").unwrap().text_content().unwrap(), "Sending...");

        assert_eq!(view.selected_method().as_deref(), Some("web3forms"));
        let entries = view.entries();
        assert!(entries.iter().any(|(name, value)| name == "subject" && value == "Hello there"));

        view.form.remove();
    }

    #[wasm_bindgen_test]
    fn test_input_event_clears_field_error() {
        let mut view = mount();
        attach(
            view.clone(),
            &method_inputs(&view),
            Rc::new(SiteConfig::default()),
            Toasts::new(None, 6000),
        );
        assert!(validate_form(&mut view).is_err());

        let email_error = by_id::<HtmlElement>(&view.document, "email-error").unwrap();
        assert_eq!(email_error.style().get_property_value("display").unwrap(), "block");

        let email = by_id::<HtmlElement>(&view.document, "email").unwrap();
        let input = web_sys::Event::new("input").unwrap();
        email.dispatch_event(&input).unwrap();

        assert_eq!(email_error.text_content().unwrap(), "");
        assert_eq!(email_error.style().get_property_value("display").unwrap(), "none");
        assert_eq!(email.style().get_property_value("border-color").unwrap(), "");

        view.form.remove();
    }

    #[wasm_bindgen_test]
    fn test_default_method_survives_reset() {
        let mut view = mount_with(&FORM_HTML.replace(" checked>", ">"));
        let inputs = method_inputs(&view);
        assert_eq!(view.selected_method(), None);

        select_default_method(&inputs);
        assert_eq!(view.selected_method().as_deref(), Some("web3forms"));

        view.reset();
        assert_eq!(view.selected_method().as_deref(), Some("web3forms"));

        view.form.remove();
    }
}
