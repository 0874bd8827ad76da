//! Decorative animations as explicit step machines.
//!
//! Each machine reports the delay before its next step; the caller owns the
//! clock. Tests drive them by calling `step` in a loop.

pub const TYPING_START_DELAY_MS: u32 = 1000;
pub const TYPING_CHAR_DELAY_MS: u32 = 100;
pub const TYPING_CURSOR_LINGER_MS: u32 = 500;
pub const TYPING_CURSOR: &str = "2px solid var(--color-primary)";

pub const COUNTER_DURATION_MS: u32 = 2000;
pub const COUNTER_FRAME_MS: u32 = 16;

/// Intersection settings for the reveal and counter observers
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const COUNTER_THRESHOLD: f64 = 0.5;

/// Styles of a section before and after it scrolls into view
pub const REVEAL_HIDDEN_OPACITY: &str = "0";
pub const REVEAL_HIDDEN_TRANSFORM: &str = "translateY(20px)";
pub const REVEAL_TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";
pub const REVEAL_SHOWN_OPACITY: &str = "1";
pub const REVEAL_SHOWN_TRANSFORM: &str = "translateY(0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingPhase {
    Pending,
    Typing,
    Lingering,
    Done,
}

/// One rendered frame of the typing effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub cursor_visible: bool,
    /// Delay before the next `step`, `None` once finished
    pub next_delay_ms: Option<u32>,
}

/// Types a heading out one character at a time
#[derive(Debug, Clone)]
pub struct TypingAnimation {
    chars: Vec<char>,
    typed: usize,
    phase: TypingPhase,
}

impl TypingAnimation {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            typed: 0,
            phase: TypingPhase::Pending,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    /// Frame to render before the first step: empty text with the cursor shown
    pub fn initial(&self) -> TypingFrame {
        TypingFrame {
            text: String::new(),
            cursor_visible: true,
            next_delay_ms: Some(TYPING_START_DELAY_MS),
        }
    }

    fn frame(&self) -> TypingFrame {
        let next_delay_ms = match self.phase {
            TypingPhase::Pending => Some(TYPING_START_DELAY_MS),
            TypingPhase::Typing => Some(TYPING_CHAR_DELAY_MS),
            TypingPhase::Lingering => Some(TYPING_CURSOR_LINGER_MS),
            TypingPhase::Done => None,
        };
        TypingFrame {
            text: self.chars[..self.typed].iter().collect(),
            cursor_visible: self.phase != TypingPhase::Done,
            next_delay_ms,
        }
    }

    /// Advances one step and returns the frame to render
    pub fn step(&mut self) -> TypingFrame {
        match self.phase {
            TypingPhase::Pending | TypingPhase::Typing => {
                if self.typed < self.chars.len() {
                    self.typed += 1;
                    self.phase = TypingPhase::Typing;
                } else {
                    self.phase = TypingPhase::Lingering;
                }
            }
            TypingPhase::Lingering => self.phase = TypingPhase::Done,
            TypingPhase::Done => {}
        }
        self.frame()
    }

    /// Runs to completion and returns the final frame
    pub fn fast_forward(&mut self) -> TypingFrame {
        let mut frame = self.frame();
        while self.phase != TypingPhase::Done {
            frame = self.step();
        }
        frame
    }
}

/// Counts a stat up from zero to the number in its label
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    suffix: String,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    /// Parses a label such as `"50+"`: the digits give the target, every other
    /// character is kept as suffix. Labels without digits are not animated.
    pub fn from_label(label: &str) -> Option<Self> {
        let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
        let target = digits.parse::<u64>().ok()?;
        let suffix: String = label.chars().filter(|c| !c.is_ascii_digit()).collect();
        let frames = f64::from(COUNTER_DURATION_MS) / f64::from(COUNTER_FRAME_MS);
        Some(Self {
            target,
            suffix,
            increment: target as f64 / frames,
            current: 0.0,
            finished: false,
        })
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advances one frame and returns the label to display
    pub fn step(&mut self) -> String {
        if !self.finished {
            self.current += self.increment;
            if self.current >= self.target as f64 {
                self.current = self.target as f64;
                self.finished = true;
            }
        }
        format!("{}{}", self.current.floor() as u64, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_sequence() {
        let mut typing = TypingAnimation::new("Hi");
        assert_eq!(typing.initial().next_delay_ms, Some(1000));
        assert_eq!(typing.initial().text, "");

        let first = typing.step();
        assert_eq!(first.text, "H");
        assert!(first.cursor_visible);
        assert_eq!(first.next_delay_ms, Some(100));

        assert_eq!(typing.step().text, "Hi");

        let linger = typing.step();
        assert_eq!(linger.text, "Hi");
        assert_eq!(linger.next_delay_ms, Some(500));
        assert!(linger.cursor_visible);

        let done = typing.step();
        assert!(!done.cursor_visible);
        assert_eq!(done.next_delay_ms, None);
        assert_eq!(typing.phase(), TypingPhase::Done);
    }

    #[test]
    fn test_typing_handles_multibyte_text() {
        let mut typing = TypingAnimation::new("Héllo 👋");
        assert_eq!(typing.step().text, "H");
        assert_eq!(typing.step().text, "Hé");
        let last = typing.fast_forward();
        assert_eq!(last.text, "Héllo 👋");
        assert!(!last.cursor_visible);
    }

    #[test]
    fn test_typing_empty_text_finishes() {
        let mut typing = TypingAnimation::new("");
        assert_eq!(typing.step().next_delay_ms, Some(TYPING_CURSOR_LINGER_MS));
        assert_eq!(typing.step().next_delay_ms, None);
    }

    #[test]
    fn test_counter_reaches_target_with_suffix() {
        let mut counter = CounterAnimation::from_label("50+").unwrap();
        assert_eq!(counter.target(), 50);

        let first = counter.step();
        assert_eq!(first, "0+");

        let mut frames = 1;
        let mut last = first;
        while !counter.is_finished() {
            last = counter.step();
            frames += 1;
        }
        assert_eq!(last, "50+");
        // 2000 ms at 16 ms per frame, give or take float rounding
        assert!((125..=126).contains(&frames), "took {frames} frames");
        // further steps are stable
        assert_eq!(counter.step(), "50+");
    }

    #[test]
    fn test_counter_without_digits_is_skipped() {
        assert!(CounterAnimation::from_label("many").is_none());
    }

    #[test]
    fn test_counter_keeps_all_non_digits() {
        let mut counter = CounterAnimation::from_label("3 yrs").unwrap();
        while !counter.is_finished() {
            counter.step();
        }
        assert_eq!(counter.step(), "3 yrs");
    }
}
