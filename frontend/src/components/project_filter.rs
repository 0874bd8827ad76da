use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use shared::filter::{CardStep, FilterTicket, ProjectFilter, ALL_FILTER, FILTERED_OUT_CLASS};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::services::dom::{set_class, set_style, text};
use crate::services::logging::Logger;

const FILTER_ATTRIBUTE: &str = "data-filter";
const CATEGORY_ATTRIBUTE: &str = "data-category";

/// Filter buttons over the project cards
#[derive(Clone)]
pub struct ProjectGrid {
    filter: Rc<RefCell<ProjectFilter>>,
    buttons: Rc<Vec<HtmlElement>>,
    cards: Rc<Vec<HtmlElement>>,
}

impl ProjectGrid {
    pub fn new(buttons: Vec<HtmlElement>, cards: Vec<HtmlElement>) -> Self {
        Self {
            filter: Rc::new(RefCell::new(ProjectFilter::new())),
            buttons: Rc::new(buttons),
            cards: Rc::new(cards),
        }
    }

    pub fn attach(&self) {
        for button in self.buttons.iter() {
            let this = self.clone();
            let clicked = button.clone();
            EventListener::new(button, "click", move |_| this.select(&clicked)).forget();
        }
    }

    fn select(&self, button: &HtmlElement) {
        for other in self.buttons.iter() {
            set_class(other, "active", false);
        }
        set_class(button, "active", true);

        let requested = button
            .get_attribute(FILTER_ATTRIBUTE)
            .unwrap_or_else(|| ALL_FILTER.to_string());
        Logger::debug_with_component("ProjectFilter", &format!("filtering projects by '{requested}'"));
        self.apply(requested);
    }

    fn apply(&self, requested: String) {
        let ticket = self.filter.borrow_mut().select(requested);

        let categories: Vec<Option<String>> = self
            .cards
            .iter()
            .map(|card| card.get_attribute(CATEGORY_ATTRIBUTE))
            .collect();
        let texts: Vec<String> = self.cards.iter().map(|card| text(card)).collect();
        let plan = self.filter.borrow().plan(
            categories
                .iter()
                .map(Option::as_deref)
                .zip(texts.iter().map(String::as_str)),
        );

        for (card, transition) in self.cards.iter().zip(plan) {
            for &step in transition.immediate() {
                apply_step(card, step);
            }
            let (delay_ms, step) = transition.delayed();
            self.schedule(ticket, card.clone(), delay_ms, step);
        }
    }

    fn schedule(&self, ticket: FilterTicket, card: HtmlElement, delay_ms: u32, step: CardStep) {
        let filter = Rc::clone(&self.filter);
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            // A newer click owns the cards now
            if filter.borrow().is_current(ticket) {
                apply_step(&card, step);
            }
        });
    }
}

fn apply_step(card: &HtmlElement, step: CardStep) {
    match step {
        CardStep::Reset => {
            set_class(card, FILTERED_OUT_CLASS, false);
            for property in ["display", "opacity", "transform"] {
                set_style(card, property, "");
            }
        }
        CardStep::Display => set_style(card, "display", "block"),
        CardStep::FadeIn => {
            set_style(card, "opacity", "1");
            set_style(card, "transform", "scale(1)");
        }
        CardStep::MarkFilteredOut => set_class(card, FILTERED_OUT_CLASS, true),
        CardStep::RemoveFromLayout => set_style(card, "display", "none"),
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn has_class(element: &HtmlElement, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn element(tag: &str) -> HtmlElement {
        web_sys::window()
            .and_then(|window| window.document())
            .expect("document")
            .create_element(tag)
            .expect("element")
            .dyn_into::<HtmlElement>()
            .expect("html element")
    }

    fn card(category: &str, title: &str) -> HtmlElement {
        let card = element("div");
        card.set_attribute(CATEGORY_ATTRIBUTE, category).unwrap();
        card.set_text_content(Some(title));
        card
    }

    #[wasm_bindgen_test]
    fn test_filter_click_marks_non_matching_cards() {
        let all = element("button");
        all.set_attribute(FILTER_ATTRIBUTE, "all").unwrap();
        let ml = element("button");
        ml.set_attribute(FILTER_ATTRIBUTE, "ml").unwrap();

        let cards = vec![card("ml python", "Image classifier"), card("web", "Portfolio site")];
        let grid = ProjectGrid::new(vec![all.clone(), ml.clone()], cards.clone());
        grid.select(&ml);

        assert!(has_class(&ml, "active"));
        assert!(!has_class(&all, "active"));
        assert_eq!(cards[0].style().get_property_value("display").unwrap(), "block");
        assert!(!has_class(&cards[0], FILTERED_OUT_CLASS));
        assert!(has_class(&cards[1], FILTERED_OUT_CLASS));

        grid.select(&all);
        assert!(!has_class(&cards[1], FILTERED_OUT_CLASS));
        assert_eq!(cards[1].style().get_property_value("display").unwrap(), "block");
    }
}
