mod bindings;
mod components;
mod services;

use std::rc::Rc;

use anyhow::{anyhow, Context};
use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use shared::notification::Severity;
use shared::SiteConfig;
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use bindings::ViewBindings;
use components::contact_form::{self, DomContactForm};
use components::keyboard::KeyboardShortcuts;
use components::navigation::{self, MobileMenu, ScrollTracker};
use components::notification::Toasts;
use components::project_filter::ProjectGrid;
use components::setup_modal::SetupModal;
use components::theme_toggle::ThemeToggle;
use components::{animations, easter_egg, portfolio};
use services::dom::set_style;
use services::logging::{self, Logger};

/// Wires every behavior onto the page
struct App {
    config: Rc<SiteConfig>,
    view: ViewBindings,
}

impl App {
    fn mount(document: &Document) -> anyhow::Result<Self> {
        let config = services::config::load(document);
        logging::init(&config.log_filter);

        let app = Self {
            config: Rc::new(config),
            view: ViewBindings::from_document(document),
        };
        app.wire()?;
        Ok(app)
    }

    fn wire(&self) -> anyhow::Result<()> {
        let view = &self.view;
        let config = &self.config;

        let toasts = Toasts::new(view.notification.clone(), config.toast_ttl_ms);
        toasts.attach(view.notification_close.as_ref());

        let theme = ThemeToggle::new(
            view.root.clone(),
            view.theme_toggle.clone(),
            &config.theme_storage_key,
            &config.theme_attribute,
        );
        theme.attach();

        let menu = MobileMenu::new(view.nav_toggle.clone(), view.nav_menu.clone());
        menu.attach(&view.document);

        let tracker = ScrollTracker::new(
            view.header.clone(),
            view.nav_links.clone(),
            view.tracked_sections.clone(),
            view.back_to_top.clone(),
            theme.clone(),
        );
        tracker.attach();
        navigation::attach_nav_links(
            &view.document,
            &view.nav_links,
            view.header.clone(),
            menu.clone(),
            tracker,
        );

        let modal = SetupModal::new(view.setup_modal.clone(), view.body.clone());
        modal.attach(
            view.setup_guide_button.as_ref(),
            view.modal_close.as_ref(),
            view.modal_overlay.as_ref(),
        );
        navigation::attach_resize(menu.clone(), modal.clone());

        ProjectGrid::new(view.filter_buttons.clone(), view.project_cards.clone()).attach();

        let form = view.contact_form.clone().map(|form| {
            DomContactForm::new(view.document.clone(), form, view.submit_button.clone())
        });
        if let Some(form) = &form {
            contact_form::attach(form.clone(), &view.method_inputs, Rc::clone(config), toasts.clone());
        }

        KeyboardShortcuts {
            menu,
            modal,
            filter_buttons: view.filter_buttons.clone(),
            method_inputs: view.method_inputs.clone(),
            contact_form: form,
            config: Rc::clone(config),
            body: view.body.clone(),
            toasts: toasts.clone(),
        }
        .attach(&view.document);

        animations::reveal_sections(&view.reveal_sections);
        animations::count_up_stats(&view.stat_numbers);
        animations::type_hero_title(view.hero_title.clone());
        easter_egg::install_keyframes(&view.document);

        let (cards, tags, card_toasts) = (view.project_cards.clone(), view.skill_tags.clone(), toasts.clone());
        spawn_local(async move {
            TimeoutFuture::new(portfolio::FEATURES_DELAY_MS).await;
            portfolio::attach(&cards, &tags, &card_toasts);
        });

        if let Some(root) = &view.root {
            set_style(root, "scroll-behavior", "smooth");
        }

        self.schedule_welcome(toasts)?;
        self.log_local_status()?;
        Ok(())
    }

    /// Greets the visitor a little after the page has finished loading
    fn schedule_welcome(&self, toasts: Toasts) -> anyhow::Result<()> {
        let Some(message) = self.config.welcome_message.clone() else {
            return Ok(());
        };
        let delay_ms = self.config.welcome_delay_ms;
        let greet = move || {
            let toasts = toasts.clone();
            let message = message.clone();
            spawn_local(async move {
                TimeoutFuture::new(delay_ms).await;
                toasts.show(message, Severity::Info);
            });
        };

        if self.view.document.ready_state() == "complete" {
            greet();
        } else {
            let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
            EventListener::once(&window, "load", move |_| greet()).forget();
        }
        Ok(())
    }

    fn log_local_status(&self) -> anyhow::Result<()> {
        let hostname = web_sys::window()
            .ok_or_else(|| anyhow!("no window"))?
            .location()
            .hostname()
            .map_err(|e| anyhow!(services::dom::js_error(&e)))
            .context("Failed to read page hostname")?;
        if services::config::is_local_host(&hostname) {
            services::config::log_status(&self.config);
        }
        Ok(())
    }
}

fn start() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        gloo::console::error!("No document to attach to");
        return;
    };
    match App::mount(&document) {
        Ok(app) => Logger::info_with_component(
            "App",
            &format!(
                "Portfolio behaviors attached ({} sections, {} projects)",
                app.view.tracked_sections.len(),
                app.view.project_cards.len()
            ),
        ),
        Err(e) => Logger::error_with_component("App", &format!("Failed to start: {e:#}")),
    }
}

fn main() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}
