//! Keyboard handling: arrow-key focus movement inside button/radio groups
//! and the Konami code easter egg.

use std::collections::VecDeque;

pub const ESCAPE: &str = "Escape";

/// How a group lays out its members, which decides the arrow keys it reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAxis {
    /// ArrowLeft / ArrowRight (filter buttons)
    Horizontal,
    /// ArrowUp / ArrowDown (submission method radios)
    Vertical,
}

/// Index that should receive focus after `key`, or `None` if the key does not
/// move focus. Movement stops at both ends.
pub fn roving_focus(current: usize, len: usize, key: &str, axis: GroupAxis) -> Option<usize> {
    let forward = match (axis, key) {
        (GroupAxis::Horizontal, "ArrowRight") | (GroupAxis::Vertical, "ArrowDown") => true,
        (GroupAxis::Horizontal, "ArrowLeft") | (GroupAxis::Vertical, "ArrowUp") => false,
        _ => return None,
    };
    if forward {
        (current + 1 < len).then_some(current + 1)
    } else {
        current.checked_sub(1)
    }
}

pub const KONAMI_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "KeyB",
    "KeyA",
];

/// Length of the body animation played when the code is entered
pub const RAINBOW_DURATION_MS: u32 = 2000;
pub const RAINBOW_ANIMATION: &str = "rainbow 2s linear";
pub const RAINBOW_KEYFRAMES: &str = r#"
    @keyframes rainbow {
        0% { filter: hue-rotate(0deg); }
        25% { filter: hue-rotate(90deg); }
        50% { filter: hue-rotate(180deg); }
        75% { filter: hue-rotate(270deg); }
        100% { filter: hue-rotate(360deg); }
    }
"#;
pub const KONAMI_MESSAGE: &str = "🎉 Konami Code activated! You found the easter egg!";

/// Watches the last ten key codes for the Konami sequence
#[derive(Debug, Clone, Default)]
pub struct KonamiDetector {
    recent: VecDeque<String>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one `KeyboardEvent.code`; true when it completes the sequence
    pub fn push(&mut self, code: &str) -> bool {
        self.recent.push_back(code.to_string());
        if self.recent.len() > KONAMI_SEQUENCE.len() {
            self.recent.pop_front();
        }
        let matched = self.recent.len() == KONAMI_SEQUENCE.len()
            && self.recent.iter().zip(KONAMI_SEQUENCE).all(|(a, b)| a == b);
        if matched {
            self.recent.clear();
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_focus_moves_and_stops_at_edges() {
        assert_eq!(roving_focus(0, 4, "ArrowRight", GroupAxis::Horizontal), Some(1));
        assert_eq!(roving_focus(3, 4, "ArrowRight", GroupAxis::Horizontal), None);
        assert_eq!(roving_focus(2, 4, "ArrowLeft", GroupAxis::Horizontal), Some(1));
        assert_eq!(roving_focus(0, 4, "ArrowLeft", GroupAxis::Horizontal), None);
        assert_eq!(roving_focus(1, 4, "ArrowDown", GroupAxis::Horizontal), None);
    }

    #[test]
    fn test_vertical_focus() {
        assert_eq!(roving_focus(0, 2, "ArrowDown", GroupAxis::Vertical), Some(1));
        assert_eq!(roving_focus(1, 2, "ArrowUp", GroupAxis::Vertical), Some(0));
        assert_eq!(roving_focus(0, 1, "ArrowDown", GroupAxis::Vertical), None);
        assert_eq!(roving_focus(0, 2, "ArrowRight", GroupAxis::Vertical), None);
    }

    #[test]
    fn test_konami_sequence() {
        let mut detector = KonamiDetector::new();
        let (last, head) = KONAMI_SEQUENCE.split_last().unwrap();
        for code in head {
            assert!(!detector.push(code));
        }
        assert!(detector.push(last));
        // buffer is cleared after a match
        assert!(!detector.push("KeyA"));
    }

    #[test]
    fn test_konami_with_noise_before() {
        let mut detector = KonamiDetector::new();
        detector.push("KeyX");
        detector.push("ArrowUp");
        let hits: Vec<bool> = KONAMI_SEQUENCE.iter().map(|c| detector.push(c)).collect();
        assert_eq!(hits.iter().filter(|hit| **hit).count(), 1);
        assert!(hits[9]);
    }

    #[test]
    fn test_wrong_order_never_matches() {
        let mut detector = KonamiDetector::new();
        let hits = KONAMI_SEQUENCE
            .iter()
            .rev()
            .any(|c| detector.push(c));
        assert!(!hits);
    }
}
