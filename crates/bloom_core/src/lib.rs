pub mod banner;
pub mod config;
pub mod error;
pub mod insight;
pub mod logging;
pub mod model;
pub mod storage;
pub mod task_store;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Priority, Task, TaskCounts};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: "1734652800000".to_string(),
            text: "demo".to_string(),
            completed: false,
            priority: Priority::default(),
            ai_suggestion: None,
        };

        assert_eq!(task.id, "1734652800000");
        assert_eq!(task.text, "demo");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.priority.label(), "medium");
        assert_eq!(task.ai_suggestion, None);
    }

    #[test]
    fn counts_split_active_and_completed() {
        let task = |id: &str, completed| Task {
            id: id.to_string(),
            text: id.to_string(),
            completed,
            priority: Priority::Medium,
            ai_suggestion: None,
        };
        let counts = TaskCounts::of(&[task("a", false), task("b", true), task("c", false)]);

        assert_eq!(counts.active, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.total, 3);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_data("stored tasks are malformed");
        assert_eq!(err.code(), "invalid_data");
        assert_eq!(err.to_string(), "invalid_data - stored tasks are malformed");
    }
}
