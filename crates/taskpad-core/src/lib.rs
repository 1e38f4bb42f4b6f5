pub mod task;

pub use task::{CreateTask, Status, Task, UpdateTask};
