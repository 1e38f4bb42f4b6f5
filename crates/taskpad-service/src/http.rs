use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use taskpad_core::task::{CreateTask, Task, UpdateTask};

use crate::{ServiceError, TaskService};

/// Async HTTP client for the remote task collection.
///
/// The base URL addresses the collection itself: GET/POST go to it
/// directly, PUT/DELETE append `/{id}`.
pub struct HttpService {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

impl HttpService {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            api_key: None,
        }
    }

    pub fn with_api_key(base_url: &str, key: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
            api_key: Some(key),
        }
    }

    /// Every request carries the fixed content type and, when configured,
    /// the static API key.
    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("Content-Type", "application/json");
        match &self.api_key {
            Some(key) => builder.header("X-API-Key", key.as_str()),
            None => builder,
        }
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, ServiceError> {
        builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            ServiceError::Internal(e.to_string())
        })
    }
}

async fn expect_success(resp: reqwest::Response) -> Result<(), ServiceError> {
    if resp.status().is_success() {
        Ok(())
    } else {
        Err(parse_error(resp).await)
    }
}

async fn parse_error(resp: reqwest::Response) -> ServiceError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"].as_str().map(String::from))
        .unwrap_or(body);
    tracing::warn!(status = %status, error = %msg, "server rejected request");

    if status == StatusCode::NOT_FOUND {
        ServiceError::NotFound(msg)
    } else if status == StatusCode::BAD_REQUEST {
        ServiceError::InvalidInput(msg)
    } else {
        ServiceError::Internal(msg)
    }
}

#[async_trait]
impl TaskService for HttpService {
    async fn list_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        let builder = self.with_headers(self.client.get(&self.base_url));
        let resp = self.send(builder).await?;
        if resp.status().is_success() {
            resp.json::<Vec<Task>>()
                .await
                .map_err(|e| ServiceError::Internal(format!("json decode: {e}")))
        } else {
            Err(parse_error(resp).await)
        }
    }

    async fn create_task(&self, input: &CreateTask) -> Result<(), ServiceError> {
        let builder = self
            .with_headers(self.client.post(&self.base_url))
            .json(input);
        expect_success(self.send(builder).await?).await
    }

    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<(), ServiceError> {
        let builder = self
            .with_headers(self.client.put(self.item_url(id)))
            .json(update);
        expect_success(self.send(builder).await?).await
    }

    async fn replace_task(&self, task: &Task) -> Result<(), ServiceError> {
        let builder = self
            .with_headers(self.client.put(self.item_url(task.id)))
            .json(task);
        expect_success(self.send(builder).await?).await
    }

    async fn delete_task(&self, id: i64) -> Result<(), ServiceError> {
        let builder = self.with_headers(self.client.delete(self.item_url(id)));
        expect_success(self.send(builder).await?).await
    }
}
