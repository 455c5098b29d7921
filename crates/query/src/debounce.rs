//! Search-as-you-type debouncing.
//!
//! Each keystroke replaces the pending term and restarts the quiet period.
//! Only the latest term is ever released, so the last keystroke always wins.

use std::time::{Duration, Instant};

use crate::config::QueryConfig;

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    interval: Duration,
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    term: String,
    due: Instant,
}

impl SearchDebouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(config.search_debounce)
    }

    /// Record a keystroke at `now`.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            term: term.into(),
            due: now + self.interval,
        });
    }

    /// When the pending term becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending term if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.due <= now => self.pending.take().map(|p| p.term),
            _ => None,
        }
    }

    /// Drop the pending term (e.g. the search box was closed).
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::from_config(&QueryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_released_before_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("r", start);

        assert!(debouncer.poll(start + Duration::from_millis(499)).is_none());
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)).as_deref(),
            Some("r")
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn each_keystroke_restarts_the_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(500));
        debouncer.input("r", start);
        debouncer.input("ri", start + Duration::from_millis(300));
        debouncer.input("rin", start + Duration::from_millis(600));

        assert!(debouncer.poll(start + Duration::from_millis(900)).is_none());
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(1100))
        );
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(1100)).as_deref(),
            Some("rin")
        );
    }

    #[test]
    fn only_the_last_term_is_released() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(10));
        for (i, term) in ["g", "go", "gol", "gold"].iter().enumerate() {
            debouncer.input(*term, start + Duration::from_millis(i as u64));
        }

        let late = start + Duration::from_secs(1);
        assert_eq!(debouncer.poll(late).as_deref(), Some("gold"));
        assert!(debouncer.poll(late).is_none());
    }

    #[test]
    fn cancel_drops_pending_term() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("halo", start);
        debouncer.cancel();
        assert!(debouncer.poll(start + Duration::from_secs(5)).is_none());
    }
}
