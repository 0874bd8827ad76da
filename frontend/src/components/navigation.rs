use std::cell::Cell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::future::TimeoutFuture;
use shared::navigation::{
    is_active_link, link_target, scroll_target, MenuState, ResizeEffects, ScrollView,
    SectionBounds, ACTIVE_LINK_REFRESH_MS, RESIZE_DEBOUNCE_MS, SCROLL_DEBOUNCE_MS,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement, Node};

use super::setup_modal::SetupModal;
use super::theme_toggle::ThemeToggle;
use crate::services::dom::{debounce, scroll_y, set_class, set_style, smooth_scroll_to};

/// The hamburger menu shown on narrow screens
#[derive(Clone)]
pub struct MobileMenu {
    state: Rc<Cell<MenuState>>,
    toggle: Option<HtmlElement>,
    menu: Option<HtmlElement>,
}

impl MobileMenu {
    pub fn new(toggle: Option<HtmlElement>, menu: Option<HtmlElement>) -> Self {
        Self {
            state: Rc::new(Cell::new(MenuState::Closed)),
            toggle,
            menu,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    pub fn toggle(&self) {
        self.set(self.state().toggled());
    }

    pub fn close(&self) {
        self.set(MenuState::Closed);
    }

    fn set(&self, state: MenuState) {
        // Both elements are needed for the menu to exist at all
        let (Some(toggle), Some(menu)) = (&self.toggle, &self.menu) else {
            return;
        };
        self.state.set(state);
        set_class(toggle, "active", state.classes_applied());
        set_class(menu, "show", state.classes_applied());
    }

    /// Toggle button, plus closing on any click outside menu and toggle
    pub fn attach(&self, document: &Document) {
        let (Some(toggle), Some(menu)) = (self.toggle.clone(), self.menu.clone()) else {
            return;
        };

        let this = self.clone();
        EventListener::new(&toggle, "click", move |_| this.toggle()).forget();

        let this = self.clone();
        EventListener::new(document, "click", move |event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            if !menu.contains(Some(&target)) && !toggle.contains(Some(&target)) {
                this.close();
            }
        })
        .forget();
    }
}

/// Header styling, active link highlighting and the back-to-top button, all
/// derived from the scroll offset
#[derive(Clone)]
pub struct ScrollTracker {
    header: Option<HtmlElement>,
    nav_links: Vec<HtmlElement>,
    sections: Vec<HtmlElement>,
    back_to_top: Option<HtmlElement>,
    theme: ThemeToggle,
}

impl ScrollTracker {
    pub fn new(
        header: Option<HtmlElement>,
        nav_links: Vec<HtmlElement>,
        sections: Vec<HtmlElement>,
        back_to_top: Option<HtmlElement>,
        theme: ThemeToggle,
    ) -> Self {
        Self {
            header,
            nav_links,
            sections,
            back_to_top,
            theme,
        }
    }

    fn section_bounds(&self) -> Vec<SectionBounds> {
        self.sections
            .iter()
            .map(|section| {
                SectionBounds::new(
                    section.id(),
                    f64::from(section.offset_top()),
                    f64::from(section.offset_height()),
                )
            })
            .collect()
    }

    fn view(&self) -> ScrollView {
        ScrollView::derive(scroll_y(), self.theme.current(), &self.section_bounds())
    }

    pub fn update(&self) {
        let view = self.view();
        if let Some(header) = &self.header {
            set_style(header, "background", view.header_background);
            set_style(header, "box-shadow", view.header_shadow);
        }
        if let Some(button) = &self.back_to_top {
            set_class(button, "show", view.back_to_top_visible);
        }
        self.highlight(view.active_section.as_deref());
    }

    pub fn update_active_link(&self) {
        self.highlight(self.view().active_section.as_deref());
    }

    fn highlight(&self, active: Option<&str>) {
        for link in &self.nav_links {
            let href = link.get_attribute("href");
            set_class(link, "active", is_active_link(href.as_deref(), active));
        }
    }

    pub fn attach(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let this = self.clone();
        let on_scroll = debounce(SCROLL_DEBOUNCE_MS, move || this.update());
        EventListener::new(&window, "scroll", move |_| on_scroll()).forget();

        if let Some(button) = &self.back_to_top {
            EventListener::new(button, "click", |_| smooth_scroll_to(0.0)).forget();
        }
    }
}

/// In-page navigation links
pub fn attach_nav_links(
    document: &Document,
    links: &[HtmlElement],
    header: Option<HtmlElement>,
    menu: MobileMenu,
    tracker: ScrollTracker,
) {
    for link in links {
        let document = document.clone();
        let header = header.clone();
        let menu = menu.clone();
        let tracker = tracker.clone();
        let href_source = link.clone();

        EventListener::new_with_options(
            link,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                menu.close();

                let href = href_source.get_attribute("href");
                let Some(selector) = link_target(href.as_deref()) else {
                    return;
                };
                let Some(target) = document
                    .query_selector(selector)
                    .ok()
                    .flatten()
                    .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };

                let header_height = header.as_ref().map(|h| f64::from(h.offset_height()));
                smooth_scroll_to(scroll_target(f64::from(target.offset_top()), header_height));

                let tracker = tracker.clone();
                spawn_local(async move {
                    TimeoutFuture::new(ACTIVE_LINK_REFRESH_MS).await;
                    tracker.update_active_link();
                });
            },
        )
        .forget();
    }
}

/// Closes the menu on wide screens and the modal on very narrow ones
pub fn attach_resize(menu: MobileMenu, modal: SetupModal) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_resize = debounce(RESIZE_DEBOUNCE_MS, move || {
        let Some(width) = web_sys::window()
            .and_then(|window| window.inner_width().ok())
            .and_then(|width| width.as_f64())
        else {
            return;
        };
        let effects = ResizeEffects::for_width(width, menu.state(), modal.state());
        if effects.close_menu {
            menu.close();
        }
        if effects.close_modal {
            modal.close();
        }
    });
    EventListener::new(&window, "resize", move |_| on_resize()).forget();
}
