use serde::{Deserialize, Serialize};

/// A single user-entered item.
///
/// Serialized with the field names of the stored layout: `id`, `text`,
/// `completed`, `priority` and the optional `aiSuggestion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(
        rename = "aiSuggestion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_suggestion: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Counters shown next to the list, always derived from the live collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            active: tasks.len() - completed,
            completed,
            total: tasks.len(),
        }
    }
}
