//! Canned "insights": cosmetic strings with no bearing on task data.
//!
//! Both pools are fixed. Sampling is uniform and takes the random source from
//! the caller, so nothing here holds state.

use crate::model::{Task, TaskCounts};
use rand::Rng;

/// Attached to a task when it is created, never resampled afterwards.
pub const CREATION_INSIGHTS: [&str; 10] = [
    "Remember to take breaks and hydrate! 💧",
    "You're doing amazing! Keep going! ✨",
    "Break this task into smaller steps for easier progress",
    "Consider setting a timer for focused work sessions",
    "Don't forget to celebrate your small wins! 🎉",
    "Maybe delegate this if you're feeling overwhelmed",
    "Schedule this for your most productive time of day",
    "You've got this! One step at a time 💪",
    "Consider pairing this with something you enjoy",
    "Remember: progress over perfection! 🌸",
];

pub const AMBIENT_POOL_SIZE: usize = 5;

pub fn creation_insight<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CREATION_INSIGHTS[rng.gen_range(0..CREATION_INSIGHTS.len())]
}

/// Every ambient insight the given counters can produce.
pub fn ambient_pool(counts: TaskCounts) -> [String; AMBIENT_POOL_SIZE] {
    [
        format!("You have {} tasks to conquer today! 🌟", counts.active),
        format!(
            "You've completed {} tasks! You're unstoppable! 💫",
            counts.completed
        ),
        "Focus on one task at a time - you've got this! 💪".to_string(),
        "Your productivity is inspiring! Keep shining! ✨".to_string(),
        "Remember to take care of yourself while being productive 💖".to_string(),
    ]
}

/// Samples the ambient pool against a snapshot of the collection.
pub fn ambient_insight<R: Rng + ?Sized>(tasks: &[Task], rng: &mut R) -> String {
    let index = rng.gen_range(0..AMBIENT_POOL_SIZE);
    let [active, completed, focus, inspiring, self_care] = ambient_pool(TaskCounts::of(tasks));
    match index {
        0 => active,
        1 => completed,
        2 => focus,
        3 => inspiring,
        _ => self_care,
    }
}
