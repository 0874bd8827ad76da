//! Thin helpers over `web-sys`. Failures on individual style or class writes
//! are ignored: a missing or odd element must never take the page down.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn query<T: JsCast>(parent: &Element, selector: &str) -> Option<T> {
    parent.query_selector(selector).ok().flatten()?.dyn_into::<T>().ok()
}

pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let style = element.style();
    let _ = if value.is_empty() {
        style.remove_property(property).map(|_| ())
    } else {
        style.set_property(property, value)
    };
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let classes = element.class_list();
    let _ = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

pub fn text(element: &Element) -> String {
    element.text_content().unwrap_or_default()
}

pub fn smooth_scroll_to(top: f64) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

pub fn scroll_y() -> f64 {
    web_sys::window()
        .and_then(|window| window.scroll_y().ok())
        .unwrap_or_default()
}

pub fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Wraps `f` so that bursts of calls collapse into one call `wait_ms` after
/// the last of them.
pub fn debounce(wait_ms: u32, f: impl Fn() + 'static) -> impl Fn() {
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::default();
    let f = Rc::new(f);
    move || {
        let f = Rc::clone(&f);
        // Replacing the handle drops, and so cancels, the previous timeout
        let previous = pending.borrow_mut().replace(Timeout::new(wait_ms, move || f()));
        drop(previous);
    }
}
