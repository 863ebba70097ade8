use crate::view::{PageView, Theme};
use bloom_core::banner::InsightBanner;
use bloom_core::error::AppError;
use bloom_core::insight;
use bloom_core::model::Task;
use bloom_core::storage::KeyValueStore;
use bloom_core::task_store::TaskStore;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use std::time::Instant;

/// One process's handle on the task store, plus the cosmetic state around it.
///
/// The ambient insight is resampled on startup, after every effective
/// mutation, and on explicit request. Rendering never resamples it.
pub struct Session<S: KeyValueStore, R: Rng = StdRng> {
    store: TaskStore<S>,
    rng: R,
    banner: InsightBanner,
    ambient: String,
    theme: Theme,
}

impl<S: KeyValueStore, R: Rng> Session<S, R> {
    pub fn start(store: TaskStore<S>, mut rng: R) -> Self {
        let ambient = insight::ambient_insight(store.tasks(), &mut rng);
        Self {
            store,
            rng,
            banner: InsightBanner::new(),
            ambient,
            theme: Theme::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn ambient(&self) -> &str {
        &self.ambient
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn add(&mut self, raw_text: &str, now: Instant) -> Result<Option<Task>, AppError> {
        let added = self.store.add_task(raw_text, &mut self.rng)?;
        if let Some(task) = added.as_ref() {
            if let Some(suggestion) = task.ai_suggestion.as_deref() {
                self.banner.show(suggestion, now);
            }
            self.refresh_insight();
        }
        Ok(added)
    }

    pub fn toggle(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        let toggled = self.store.toggle_task(id.trim())?;
        if toggled.is_some() {
            self.refresh_insight();
        }
        Ok(toggled)
    }

    pub fn delete(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        let removed = self.store.delete_task(id.trim())?;
        if removed.is_some() {
            self.refresh_insight();
        }
        Ok(removed)
    }

    pub fn refresh_insight(&mut self) -> &str {
        self.ambient = insight::ambient_insight(self.store.tasks(), &mut self.rng);
        &self.ambient
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Hides the creation insight once its window has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.banner.expire(now) {
            debug!("event=insight_hidden module=session");
        }
    }

    pub fn page(&self, now: Instant) -> PageView<'_> {
        PageView {
            tasks: self.store.tasks(),
            counts: self.store.counts(),
            banner: self.banner.visible(now),
            ambient: &self.ambient,
            theme: self.theme,
        }
    }
}
