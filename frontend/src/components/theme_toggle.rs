use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use shared::theme::{ThemePreference, ThemeStore, THEME_TRANSITION, THEME_TRANSITION_MS};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::services::dom::{query, set_style};
use crate::services::logging::Logger;
use crate::services::storage::LocalPreferenceStore;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone)]
pub struct ThemeToggle {
    store: Rc<RefCell<ThemeStore<LocalPreferenceStore>>>,
    root: Option<HtmlElement>,
    button: Option<HtmlElement>,
    attribute: String,
}

impl ThemeToggle {
    pub fn new(
        root: Option<HtmlElement>,
        button: Option<HtmlElement>,
        storage_key: &str,
        attribute: &str,
    ) -> Self {
        let store = ThemeStore::load(LocalPreferenceStore::new(), storage_key, prefers_dark());
        Self {
            store: Rc::new(RefCell::new(store)),
            root,
            button,
            attribute: attribute.to_string(),
        }
    }

    pub fn current(&self) -> ThemePreference {
        self.store.borrow().current()
    }

    /// Applies the stored theme and wires the toggle button
    pub fn attach(&self) {
        self.apply(self.current());
        if let Some(button) = &self.button {
            let toggle = self.clone();
            EventListener::new(button, "click", move |_| toggle.toggle()).forget();
        }
    }

    pub fn toggle(&self) {
        let theme = self.store.borrow_mut().toggle();
        Logger::debug_with_component("ThemeToggle", &format!("switched to {theme}"));
        self.apply(theme);

        if let Some(root) = self.root.clone() {
            set_style(&root, "transition", THEME_TRANSITION);
            spawn_local(async move {
                TimeoutFuture::new(THEME_TRANSITION_MS).await;
                set_style(&root, "transition", "");
            });
        }
    }

    fn apply(&self, theme: ThemePreference) {
        if let Some(root) = &self.root {
            let _ = root.set_attribute(&self.attribute, theme.as_str());
        }
        if let Some(icon) = self
            .button
            .as_ref()
            .and_then(|button| query::<HtmlElement>(button, ".theme-toggle__icon"))
        {
            icon.set_text_content(Some(theme.toggle_icon()));
        }
    }
}

fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const STORAGE_KEY: &str = "theme-toggle-test";
    const ATTRIBUTE: &str = "data-color-scheme";

    fn element(html: &str) -> HtmlElement {
        let document = web_sys::window().and_then(|w| w.document()).expect("document");
        let wrapper = document.create_element("div").expect("div");
        wrapper.set_inner_html(html);
        wrapper
            .first_element_child()
            .expect("child")
            .dyn_into::<HtmlElement>()
            .expect("html element")
    }

    #[wasm_bindgen_test]
    fn test_toggle_twice_restores_root_attribute_and_icon() {
        let root = element("<div></div>");
        let button = element(r#"<button><span class="theme-toggle__icon"></span></button>"#);
        let icon = query::<HtmlElement>(&button, ".theme-toggle__icon").unwrap();

        let theme = ThemeToggle::new(Some(root.clone()), Some(button), STORAGE_KEY, ATTRIBUTE);
        theme.attach();
        let initial = theme.current();
        assert_eq!(root.get_attribute(ATTRIBUTE).as_deref(), Some(initial.as_str()));
        assert_eq!(icon.text_content().unwrap(), initial.toggle_icon());

        theme.toggle();
        assert_eq!(root.get_attribute(ATTRIBUTE).as_deref(), Some(initial.toggled().as_str()));
        assert_eq!(icon.text_content().unwrap(), initial.toggled().toggle_icon());

        theme.toggle();
        assert_eq!(root.get_attribute(ATTRIBUTE).as_deref(), Some(initial.as_str()));
        assert_eq!(icon.text_content().unwrap(), initial.toggle_icon());

        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
