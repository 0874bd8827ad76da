//! Header, mobile menu, section tracking and the setup modal.
//!
//! Each piece is an explicit state plus a projection onto the classes and
//! styles the page uses; the frontend only applies what these return.

use crate::theme::ThemePreference;

/// Used when the header element is missing
pub const DEFAULT_HEADER_HEIGHT: f64 = 80.0;
/// Gap kept between the header and a scrolled-to section
pub const SCROLL_GAP: f64 = 10.0;
/// Past this offset the header gets its shadow
pub const HEADER_SHADOW_OFFSET: f64 = 100.0;
/// Above this offset `home` is always the active section
pub const HOME_OFFSET: f64 = 100.0;
/// Look-ahead added to the scroll position when probing sections
pub const SECTION_PROBE_OFFSET: f64 = 150.0;
/// Past this offset the back-to-top button is shown
pub const BACK_TO_TOP_OFFSET: f64 = 500.0;
/// Wider than this the mobile menu makes no sense
pub const DESKTOP_MIN_WIDTH: f64 = 768.0;
/// Narrower than this the setup modal is closed
pub const MODAL_MIN_WIDTH: f64 = 480.0;

pub const SCROLL_DEBOUNCE_MS: u32 = 10;
pub const RESIZE_DEBOUNCE_MS: u32 = 100;
/// Delay before re-deriving the active link after a nav click
pub const ACTIVE_LINK_REFRESH_MS: u32 = 100;

pub const HOME_SECTION: &str = "home";
pub const HEADER_SHADOW: &str = "0 1px 3px rgba(0, 0, 0, 0.04), 0 1px 2px rgba(0, 0, 0, 0.02)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    /// Whether the toggle carries `active` and the menu carries `show`
    pub fn classes_applied(self) -> bool {
        self.is_open()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl ModalState {
    pub fn is_open(self) -> bool {
        self == ModalState::Open
    }

    /// `overflow` on the body: scrolling is locked while the modal is open
    pub fn body_overflow(self) -> &'static str {
        match self {
            ModalState::Open => "hidden",
            ModalState::Closed => "",
        }
    }
}

/// Delay before an opened modal fades in
pub const MODAL_FADE_IN_MS: u32 = 10;

/// Vertical extent of a page section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Section to highlight for a scroll offset. Later sections in document order
/// win when several enclose the probe; near the top `home` always wins.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<String> {
    if scroll_y < HOME_OFFSET {
        return Some(HOME_SECTION.to_string());
    }
    let probe = scroll_y + SECTION_PROBE_OFFSET;
    sections
        .iter()
        .rev()
        .find(|section| section.contains(probe))
        .map(|section| section.id.clone())
}

/// Whether a nav link with this `href` is the active one
pub fn is_active_link(href: Option<&str>, active: Option<&str>) -> bool {
    match (href.and_then(|h| h.strip_prefix('#')), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

/// Styles and classes derived from the current scroll offset
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollView {
    pub header_background: &'static str,
    pub header_shadow: &'static str,
    pub back_to_top_visible: bool,
    pub active_section: Option<String>,
}

impl ScrollView {
    pub fn derive(scroll_y: f64, theme: ThemePreference, sections: &[SectionBounds]) -> Self {
        Self {
            header_background: theme.header_background(),
            header_shadow: if scroll_y > HEADER_SHADOW_OFFSET {
                HEADER_SHADOW
            } else {
                "none"
            },
            back_to_top_visible: scroll_y > BACK_TO_TOP_OFFSET,
            active_section: active_section(scroll_y, sections),
        }
    }
}

/// Scroll offset that puts a section just below the fixed header
pub fn scroll_target(section_top: f64, header_height: Option<f64>) -> f64 {
    let header = header_height.unwrap_or(DEFAULT_HEADER_HEIGHT);
    (section_top - header - SCROLL_GAP).max(0.0)
}

/// Resolves a nav link `href` to the element it points at. Empty and bare `#` go nowhere.
pub fn link_target(href: Option<&str>) -> Option<&str> {
    match href {
        None | Some("") | Some("#") => None,
        Some(target) => Some(target),
    }
}

/// What a resize should close
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEffects {
    pub close_menu: bool,
    pub close_modal: bool,
}

impl ResizeEffects {
    pub fn for_width(width: f64, menu: MenuState, modal: ModalState) -> Self {
        Self {
            close_menu: width > DESKTOP_MIN_WIDTH && menu.is_open(),
            close_modal: width < MODAL_MIN_WIDTH && modal.is_open(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 700.0),
            SectionBounds::new("about", 700.0, 600.0),
            SectionBounds::new("projects", 1300.0, 900.0),
            SectionBounds::new("contact", 2200.0, 500.0),
        ]
    }

    #[test]
    fn test_top_of_page_is_home() {
        assert_eq!(active_section(0.0, &page()).as_deref(), Some("home"));
        assert_eq!(active_section(99.0, &[]).as_deref(), Some("home"));
    }

    #[test]
    fn test_probe_picks_enclosing_section() {
        // 600 + 150 lands inside "about"
        assert_eq!(active_section(600.0, &page()).as_deref(), Some("about"));
        assert_eq!(active_section(1200.0, &page()).as_deref(), Some("projects"));
        assert_eq!(active_section(5000.0, &page()), None);
    }

    #[test]
    fn test_nested_sections_prefer_later_one() {
        let sections = vec![
            SectionBounds::new("projects", 1000.0, 1000.0),
            SectionBounds::new("featured", 1200.0, 200.0),
        ];
        assert_eq!(active_section(1100.0, &sections).as_deref(), Some("featured"));
    }

    #[test]
    fn test_active_link_matching() {
        assert!(is_active_link(Some("#about"), Some("about")));
        assert!(!is_active_link(Some("about"), Some("about")));
        assert!(!is_active_link(Some("#about"), None));
        assert!(!is_active_link(None, Some("about")));
    }

    #[test]
    fn test_scroll_view_thresholds() {
        let calm = ScrollView::derive(50.0, ThemePreference::Light, &page());
        assert_eq!(calm.header_shadow, "none");
        assert!(!calm.back_to_top_visible);
        assert_eq!(calm.header_background, "rgba(252, 252, 249, 0.95)");

        let deep = ScrollView::derive(800.0, ThemePreference::Dark, &page());
        assert_eq!(deep.header_shadow, HEADER_SHADOW);
        assert!(deep.back_to_top_visible);
        assert_eq!(deep.header_background, "rgba(31, 33, 33, 0.95)");
        assert_eq!(deep.active_section.as_deref(), Some("about"));
    }

    #[test]
    fn test_scroll_target() {
        assert_eq!(scroll_target(700.0, Some(64.0)), 626.0);
        assert_eq!(scroll_target(700.0, None), 610.0);
        assert_eq!(scroll_target(20.0, Some(64.0)), 0.0);
    }

    #[test]
    fn test_link_target() {
        assert_eq!(link_target(Some("#contact")), Some("#contact"));
        assert_eq!(link_target(Some("#")), None);
        assert_eq!(link_target(Some("")), None);
        assert_eq!(link_target(None), None);
    }

    #[test]
    fn test_menu_and_modal_state() {
        assert!(MenuState::Closed.toggled().is_open());
        assert!(!MenuState::Open.toggled().classes_applied());
        assert_eq!(ModalState::Open.body_overflow(), "hidden");
        assert_eq!(ModalState::Closed.body_overflow(), "");
    }

    #[test]
    fn test_resize_effects() {
        let wide = ResizeEffects::for_width(1024.0, MenuState::Open, ModalState::Open);
        assert_eq!(wide, ResizeEffects { close_menu: true, close_modal: false });

        let tiny = ResizeEffects::for_width(400.0, MenuState::Open, ModalState::Open);
        assert_eq!(tiny, ResizeEffects { close_menu: false, close_modal: true });

        let idle = ResizeEffects::for_width(1024.0, MenuState::Closed, ModalState::Closed);
        assert_eq!(idle, ResizeEffects::default());
    }
}
