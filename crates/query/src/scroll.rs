use crate::config::QueryConfig;

/// Decides when a scrolled list is close enough to its end to load the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTrigger {
    threshold_px: u32,
}

impl ScrollTrigger {
    pub fn new(threshold_px: u32) -> Self {
        Self { threshold_px }
    }

    pub fn from_config(config: &QueryConfig) -> Self {
        Self::new(config.scroll_threshold_px)
    }

    /// `remaining_px` is the distance between the viewport bottom and the last item.
    pub fn should_load_more(&self, remaining_px: u32, has_more: bool, busy: bool) -> bool {
        !busy && has_more && remaining_px <= self.threshold_px
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::from_config(&QueryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_within_threshold() {
        let trigger = ScrollTrigger::default();
        assert!(trigger.should_load_more(100, true, false));
        assert!(trigger.should_load_more(0, true, false));
        assert!(!trigger.should_load_more(101, true, false));
    }

    #[test]
    fn never_fires_while_busy_or_exhausted() {
        let trigger = ScrollTrigger::new(500);
        assert!(!trigger.should_load_more(0, true, true));
        assert!(!trigger.should_load_more(0, false, false));
    }
}
