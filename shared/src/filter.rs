//! Project card filtering.
//!
//! A filter click produces one [`CardTransition`] per card. Each transition is
//! a two-step style change (immediate, then delayed) so the CSS transition has
//! something to animate. Pending delayed steps carry the generation of the
//! click that scheduled them and are dropped once a newer click happened.

pub const ALL_FILTER: &str = "all";
/// Delay before a shown card fades in
pub const FADE_IN_DELAY_MS: u32 = 50;
/// Delay before a filtered-out card is removed from layout
pub const HIDE_DELAY_MS: u32 = 300;
pub const FILTERED_OUT_CLASS: &str = "filtered-out";

/// Whether a card belongs to the requested category. Matching is a
/// case-insensitive substring test on the category attribute, then on the
/// card's visible text.
pub fn card_matches(filter: &str, category: Option<&str>, text: &str) -> bool {
    if filter == ALL_FILTER {
        return true;
    }
    let needle = filter.to_lowercase();
    category.unwrap_or_default().to_lowercase().contains(&needle)
        || text.to_lowercase().contains(&needle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTransition {
    Show,
    Hide,
}

/// A single style step for a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStep {
    /// Clear leftovers of an earlier filter: class, display, opacity, transform
    Reset,
    /// `display: block`
    Display,
    /// `opacity: 1; transform: scale(1)`
    FadeIn,
    /// add `filtered-out`
    MarkFilteredOut,
    /// `display: none`
    RemoveFromLayout,
}

impl CardTransition {
    pub fn for_card(filter: &str, category: Option<&str>, text: &str) -> Self {
        if card_matches(filter, category, text) {
            CardTransition::Show
        } else {
            CardTransition::Hide
        }
    }

    /// Steps to apply right away
    pub fn immediate(self) -> &'static [CardStep] {
        match self {
            CardTransition::Show => &[CardStep::Reset, CardStep::Display],
            CardTransition::Hide => &[CardStep::Reset, CardStep::MarkFilteredOut],
        }
    }

    /// The step to apply after a delay, with that delay
    pub fn delayed(self) -> (u32, CardStep) {
        match self {
            CardTransition::Show => (FADE_IN_DELAY_MS, CardStep::FadeIn),
            CardTransition::Hide => (HIDE_DELAY_MS, CardStep::RemoveFromLayout),
        }
    }
}

/// Tracks which filter click is current
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    active: Option<String>,
    generation: u64,
}

/// Handle for the delayed steps of one filter click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterTicket(u64);

impl ProjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Records a new filter and returns the ticket its delayed steps must present
    pub fn select(&mut self, filter: impl Into<String>) -> FilterTicket {
        self.active = Some(filter.into());
        self.generation += 1;
        FilterTicket(self.generation)
    }

    /// True while no newer filter has been selected
    pub fn is_current(&self, ticket: FilterTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Transition for each card given as `(category, text)`
    pub fn plan<'a, I>(&self, cards: I) -> Vec<CardTransition>
    where
        I: IntoIterator<Item = (Option<&'a str>, &'a str)>,
    {
        let filter = self.active.as_deref().unwrap_or(ALL_FILTER);
        cards
            .into_iter()
            .map(|(category, text)| CardTransition::for_card(filter, category, text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards() -> Vec<(Option<&'static str>, &'static str)> {
        vec![
            (Some("web rust"), "Portfolio site in Rust"),
            (Some("ml"), "Image classifier"),
            (None, "A Web scraper"),
            (Some("Data"), "Dashboards"),
        ]
    }

    #[test]
    fn test_all_shows_every_card() {
        let mut filter = ProjectFilter::new();
        filter.select("all");
        assert!(filter.plan(cards()).iter().all(|t| *t == CardTransition::Show));
    }

    #[test]
    fn test_no_selection_behaves_like_all() {
        let filter = ProjectFilter::new();
        assert!(filter.plan(cards()).iter().all(|t| *t == CardTransition::Show));
    }

    #[test]
    fn test_category_then_text_match_case_insensitive() {
        let mut filter = ProjectFilter::new();
        filter.select("WEB");
        assert_eq!(
            filter.plan(cards()),
            vec![
                CardTransition::Show,
                CardTransition::Hide,
                CardTransition::Show,
                CardTransition::Hide,
            ]
        );

        filter.select("data");
        assert_eq!(filter.plan(cards())[3], CardTransition::Show);
    }

    #[test]
    fn test_two_step_transitions() {
        assert_eq!(CardTransition::Show.immediate(), &[CardStep::Reset, CardStep::Display]);
        assert_eq!(CardTransition::Show.delayed(), (50, CardStep::FadeIn));
        assert_eq!(
            CardTransition::Hide.immediate(),
            &[CardStep::Reset, CardStep::MarkFilteredOut]
        );
        assert_eq!(CardTransition::Hide.delayed(), (300, CardStep::RemoveFromLayout));
    }

    #[test]
    fn test_newer_selection_supersedes_pending_steps() {
        let mut filter = ProjectFilter::new();
        let first = filter.select("ml");
        assert!(filter.is_current(first));
        let second = filter.select("all");
        assert!(!filter.is_current(first));
        assert!(filter.is_current(second));
        assert_eq!(filter.active(), Some("all"));
    }
}
