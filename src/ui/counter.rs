//! Years-counter animation.

use std::time::Duration;

use crate::config::{COUNTER_STEP_DELAY, COUNTER_VISIBILITY_THRESHOLD, DEFAULT_COUNTER_TARGET};

/// Leading integer of `text`, read the way `parseInt` without a radix does:
/// leading whitespace and one sign are accepted, a `0x` prefix switches to
/// hexadecimal, and parsing stops at the first non-digit.
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -value } else { value })
}

/// Counts from 1 up to the target, one step per interval, once.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    started: bool,
    finished: bool,
    next: i64,
    text: Option<String>,
}

impl CounterAnimation {
    /// `data_target` is the element's `data-target` attribute. Missing,
    /// unparseable and zero targets use the default.
    pub fn new(data_target: Option<&str>) -> Self {
        let target = data_target
            .and_then(parse_int_prefix)
            .filter(|t| *t != 0)
            .unwrap_or(i64::from(DEFAULT_COUNTER_TARGET));
        Self {
            target,
            started: false,
            finished: false,
            next: 1,
            text: None,
        }
    }

    /// Reports the visible fraction of the counter. Returns the delay to the
    /// first step the one time the animation starts.
    pub fn on_visibility(&mut self, ratio: f64) -> Option<Duration> {
        if self.started || ratio < COUNTER_VISIBILITY_THRESHOLD {
            return None;
        }
        self.started = true;
        Some(COUNTER_STEP_DELAY)
    }

    /// Shows the next number. Returns the delay to the following step, or
    /// `None` once the target has been shown.
    pub fn step(&mut self) -> Option<Duration> {
        if !self.started || self.finished {
            return None;
        }
        self.text = Some(self.next.to_string());
        if self.next >= self.target {
            self.finished = true;
            return None;
        }
        self.next += 1;
        Some(COUNTER_STEP_DELAY)
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Number shown, `None` before the first step.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
