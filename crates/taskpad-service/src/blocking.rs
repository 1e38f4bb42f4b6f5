use taskpad_core::task::{CreateTask, Task, UpdateTask};
use tokio::runtime::Runtime;

use crate::{HttpService, ServiceError, TaskService};

/// Blocking wrapper around the async `HttpService`.
///
/// Creates an internal tokio runtime and uses `block_on()` for each call.
/// Designed for sync callers like the TUI event loop.
pub struct BlockingHttpService {
    inner: HttpService,
    rt: Runtime,
}

impl BlockingHttpService {
    pub fn new(base_url: &str) -> Self {
        Self {
            inner: HttpService::new(base_url),
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn with_api_key(base_url: &str, key: String) -> Self {
        Self {
            inner: HttpService::with_api_key(base_url, key),
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.rt.block_on(self.inner.list_tasks())
    }

    pub fn create_task(&self, input: &CreateTask) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.create_task(input))
    }

    pub fn update_task(&self, id: i64, update: &UpdateTask) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.update_task(id, update))
    }

    pub fn replace_task(&self, task: &Task) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.replace_task(task))
    }

    pub fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.delete_task(id))
    }
}
