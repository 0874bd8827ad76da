pub mod animations;
pub mod contact_form;
pub mod easter_egg;
pub mod keyboard;
pub mod navigation;
pub mod notification;
pub mod portfolio;
pub mod project_filter;
pub mod setup_modal;
pub mod theme_toggle;
