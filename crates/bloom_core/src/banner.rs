use std::time::{Duration, Instant};

/// How long a freshly generated insight stays on screen.
pub const INSIGHT_WINDOW: Duration = Duration::from_secs(5);

/// Visibility window for the most recent creation insight.
///
/// Showing a new insight cancels the pending hide of the previous one, so the
/// newest insight always gets the full window.
#[derive(Debug, Default, Clone)]
pub struct InsightBanner {
    pending: Option<Pending>,
}

#[derive(Debug, Clone)]
struct Pending {
    text: String,
    hide_at: Instant,
}

impl InsightBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: &str, now: Instant) {
        self.pending = Some(Pending {
            text: text.to_string(),
            hide_at: now + INSIGHT_WINDOW,
        });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// The insight to display at `now`, if its window is still open.
    pub fn visible(&self, now: Instant) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|pending| now < pending.hide_at)
            .map(|pending| pending.text.as_str())
    }

    /// Drops an expired insight; returns whether it was hidden by this call.
    pub fn expire(&mut self, now: Instant) -> bool {
        let expired = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.hide_at);
        if expired {
            self.pending = None;
        }
        expired
    }
}
