use gloo::timers::future::TimeoutFuture;
use shared::animation::{
    CounterAnimation, TypingAnimation, TypingFrame, COUNTER_FRAME_MS, COUNTER_THRESHOLD,
    REVEAL_HIDDEN_OPACITY, REVEAL_HIDDEN_TRANSFORM, REVEAL_ROOT_MARGIN, REVEAL_SHOWN_OPACITY,
    REVEAL_SHOWN_TRANSFORM, REVEAL_THRESHOLD, REVEAL_TRANSITION, TYPING_CURSOR,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::services::dom::{js_error, set_style, text};
use crate::services::logging::Logger;

/// Builds an observer that calls `on_visible` for each target entering the
/// viewport. Returning `true` stops observing that target.
fn visibility_observer(
    threshold: f64,
    root_margin: &str,
    mut on_visible: impl FnMut(HtmlElement) -> bool + 'static,
) -> Option<IntersectionObserver> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let Ok(element) = target.clone().dyn_into::<HtmlElement>() else {
                    continue;
                };
                if on_visible(element) {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);

    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
        Ok(observer) => {
            // The observer lives as long as the page
            callback.forget();
            Some(observer)
        }
        Err(e) => {
            Logger::warn_with_component("Animations", &format!("IntersectionObserver unavailable: {}", js_error(&e)));
            None
        }
    }
}

/// Fades sections in the first time they scroll into view
pub fn reveal_sections(sections: &[HtmlElement]) {
    let Some(observer) = visibility_observer(REVEAL_THRESHOLD, REVEAL_ROOT_MARGIN, |section| {
        set_style(&section, "opacity", REVEAL_SHOWN_OPACITY);
        set_style(&section, "transform", REVEAL_SHOWN_TRANSFORM);
        false
    }) else {
        return;
    };

    for section in sections {
        set_style(section, "opacity", REVEAL_HIDDEN_OPACITY);
        set_style(section, "transform", REVEAL_HIDDEN_TRANSFORM);
        set_style(section, "transition", REVEAL_TRANSITION);
        observer.observe(section);
    }
}

/// Counts each stat up once, when it first becomes half visible
pub fn count_up_stats(stats: &[HtmlElement]) {
    let Some(observer) = visibility_observer(COUNTER_THRESHOLD, "0px", |stat| {
        if let Some(counter) = CounterAnimation::from_label(&text(&stat)) {
            spawn_local(run_counter(stat, counter));
        }
        true
    }) else {
        return;
    };

    for stat in stats {
        observer.observe(stat);
    }
}

async fn run_counter(stat: HtmlElement, mut counter: CounterAnimation) {
    while !counter.is_finished() {
        TimeoutFuture::new(COUNTER_FRAME_MS).await;
        stat.set_text_content(Some(&counter.step()));
    }
}

/// Retypes the hero title one character at a time
pub fn type_hero_title(title: Option<HtmlElement>) {
    let Some(title) = title else {
        return;
    };
    let mut typing = TypingAnimation::new(&text(&title));
    let first = typing.initial();
    render_typing(&title, &first);

    spawn_local(async move {
        let mut delay = first.next_delay_ms;
        while let Some(ms) = delay {
            TimeoutFuture::new(ms).await;
            let frame = typing.step();
            render_typing(&title, &frame);
            delay = frame.next_delay_ms;
        }
    });
}

fn render_typing(title: &HtmlElement, frame: &TypingFrame) {
    title.set_text_content(Some(&frame.text));
    let cursor = if frame.cursor_visible { TYPING_CURSOR } else { "none" };
    set_style(title, "border-right", cursor);
}
