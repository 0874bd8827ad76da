use gloo::timers::future::TimeoutFuture;
use shared::keyboard::{KONAMI_MESSAGE, RAINBOW_ANIMATION, RAINBOW_DURATION_MS, RAINBOW_KEYFRAMES};
use shared::notification::Severity;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use super::notification::Toasts;
use crate::services::dom::set_style;
use crate::services::logging::Logger;

/// Adds the `rainbow` keyframes to the document head
pub fn install_keyframes(document: &Document) {
    let Some(head) = document.head() else {
        return;
    };
    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(_) => {
            Logger::warn_with_component("EasterEgg", "could not create style element");
            return;
        }
    };
    style.set_text_content(Some(RAINBOW_KEYFRAMES));
    let _ = head.append_child(&style);
}

/// Celebrates a completed Konami code
pub fn celebrate(body: Option<&HtmlElement>, toasts: &Toasts) {
    toasts.show(KONAMI_MESSAGE, Severity::Success);
    let Some(body) = body.cloned() else {
        return;
    };
    set_style(&body, "animation", RAINBOW_ANIMATION);
    spawn_local(async move {
        TimeoutFuture::new(RAINBOW_DURATION_MS).await;
        set_style(&body, "animation", "");
    });
}
