use gloo::events::EventListener;
use shared::notification::Severity;
use web_sys::HtmlElement;

use super::notification::Toasts;
use crate::services::dom::{query, set_style, text};

/// Delay after startup before cards and tags get their handlers
pub const FEATURES_DELAY_MS: u32 = 500;

const SKILL_HOVER_TRANSFORM: &str = "translateY(-2px) scale(1.05)";
const SKILL_REST_TRANSFORM: &str = "translateY(0) scale(1)";

pub fn card_click_message(title: &str) -> String {
    format!("Clicked on: {title}. More details coming soon!")
}

/// Project cards announce themselves; skill tags lift on hover
pub fn attach(cards: &[HtmlElement], skill_tags: &[HtmlElement], toasts: &Toasts) {
    for card in cards {
        let toasts = toasts.clone();
        let title_source = card.clone();
        EventListener::new(card, "click", move |_| {
            let Some(title) = query::<HtmlElement>(&title_source, ".project__title") else {
                return;
            };
            let title = text(&title);
            if !title.is_empty() {
                toasts.show(card_click_message(&title), Severity::Info);
            }
        })
        .forget();
    }

    for tag in skill_tags {
        let hovered = tag.clone();
        EventListener::new(tag, "mouseenter", move |_| {
            set_style(&hovered, "transform", SKILL_HOVER_TRANSFORM);
        })
        .forget();

        let left = tag.clone();
        EventListener::new(tag, "mouseleave", move |_| {
            set_style(&left, "transform", SKILL_REST_TRANSFORM);
        })
        .forget();
    }
}
