use crate::error::AppError;
use crate::insight;
use crate::model::{Priority, Task, TaskCounts};
use crate::storage::KeyValueStore;
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;
use time::OffsetDateTime;

/// The one durable slot holding the serialized collection.
pub const STORAGE_KEY: &str = "todos";

/// Sole owner of the task collection.
///
/// Tasks are kept newest first. Every effective mutation rewrites the whole
/// collection into [`STORAGE_KEY`] before returning.
#[derive(Debug)]
pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: Vec<Task>,
    last_id: i128,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the persisted collection, or starts empty when the slot is unset.
    ///
    /// # Errors
    /// - `invalid_data` when the stored value is not a well-formed task array
    ///   or repeats an id. The slot is left as it was.
    /// - `io_error` when the slot cannot be read.
    pub fn initialize(storage: S) -> Result<Self, AppError> {
        let tasks = match storage.get(STORAGE_KEY)? {
            Some(content) => deserialize_tasks(&content)?,
            None => Vec::new(),
        };
        info!("event=store_loaded module=store tasks={}", tasks.len());
        let last_id = tasks
            .iter()
            .filter_map(|task| task.id.parse::<i128>().ok())
            .max()
            .unwrap_or(0);

        Ok(Self {
            storage,
            tasks,
            last_id,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Prepends a new task holding `raw_text` as typed.
    ///
    /// Returns `Ok(None)` without touching anything when the text is blank
    /// once trimmed.
    pub fn add_task<R: Rng + ?Sized>(
        &mut self,
        raw_text: &str,
        rng: &mut R,
    ) -> Result<Option<Task>, AppError> {
        if raw_text.trim().is_empty() {
            debug!("event=add_rejected module=store reason=blank_text");
            return Ok(None);
        }

        let task = Task {
            id: self.next_id(),
            text: raw_text.to_string(),
            completed: false,
            priority: Priority::Medium,
            ai_suggestion: Some(insight::creation_insight(rng).to_string()),
        };
        self.tasks.insert(0, task.clone());
        info!("event=task_added module=store id={}", task.id);

        self.persist()?;
        Ok(Some(task))
    }

    /// Flips completion of the task with `id`; `Ok(None)` when there is none.
    pub fn toggle_task(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_missing module=store op=toggle id={id}");
            return Ok(None);
        };

        task.completed = !task.completed;
        let updated = task.clone();
        info!(
            "event=task_toggled module=store id={} completed={}",
            updated.id, updated.completed
        );

        self.persist()?;
        Ok(Some(updated))
    }

    /// Removes the task with `id`, keeping the order of the rest.
    pub fn delete_task(&mut self, id: &str) -> Result<Option<Task>, AppError> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_missing module=store op=delete id={id}");
            return Ok(None);
        };

        let removed = self.tasks.remove(index);
        info!("event=task_deleted module=store id={}", removed.id);

        self.persist()?;
        Ok(Some(removed))
    }

    /// Overwrites the storage slot with the full collection.
    pub fn persist(&mut self) -> Result<(), AppError> {
        let content = serialize_tasks(&self.tasks)?;
        self.storage.set(STORAGE_KEY, &content)?;
        debug!(
            "event=store_persisted module=store tasks={} bytes={}",
            self.tasks.len(),
            content.len()
        );
        Ok(())
    }

    // Millisecond clock, kept above every id issued or loaded so far.
    fn next_id(&mut self) -> String {
        let now_millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let mut candidate = now_millis.max(self.last_id + 1);
        while self.contains_id(&candidate.to_string()) {
            candidate += 1;
        }
        self.last_id = candidate;
        candidate.to_string()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.tasks.iter().any(|task| task.id == id)
    }
}

pub fn serialize_tasks(tasks: &[Task]) -> Result<String, AppError> {
    serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))
}

pub fn deserialize_tasks(content: &str) -> Result<Vec<Task>, AppError> {
    let tasks: Vec<Task> = serde_json::from_str(content)
        .map_err(|err| AppError::invalid_data(format!("stored tasks are malformed: {err}")))?;
    ensure_unique_ids(&tasks)?;
    Ok(tasks)
}

fn ensure_unique_ids(tasks: &[Task]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(tasks.len());
    match tasks.iter().find(|task| !seen.insert(task.id.as_str())) {
        Some(task) => Err(AppError::invalid_data(format!(
            "stored tasks repeat id {}",
            task.id
        ))),
        None => Ok(()),
    }
}
