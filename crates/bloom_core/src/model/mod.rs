mod task;

pub use task::{Priority, Task, TaskCounts};
