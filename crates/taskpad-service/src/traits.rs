use async_trait::async_trait;
use taskpad_core::task::{CreateTask, Task, UpdateTask};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Abstraction over the remote task collection.
///
/// The TUI programs against this trait; `HttpService` is the production
/// implementation. The server owns persistence, id assignment, and
/// timestamping, so mutations return `()` and callers re-fetch the list.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>, ServiceError>;
    async fn create_task(&self, input: &CreateTask) -> Result<(), ServiceError>;
    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<(), ServiceError>;
    /// Full-record replace, used to toggle `status` while leaving every
    /// other field as-is.
    async fn replace_task(&self, task: &Task) -> Result<(), ServiceError>;
    async fn delete_task(&self, id: i64) -> Result<(), ServiceError>;
}
