//! Data client for the backend CRUD surface. One request/response
//! round-trip per operation, no retries; list reads fail soft through
//! the normalization helpers in `taskdeck_core::api`.

use gloo::net::http::{Request, Response};
use serde::Serialize;
use serde_json::Value;
use taskdeck_core::api::{
    ApiError, CategoryPayload, ListShape, TaskPayload, categories_from_response,
    error_message_from_body, tasks_from_response,
};
use taskdeck_core::category::Category;
use taskdeck_core::task::Task;
use tracing::{info, warn};

use crate::logger::UiLogger;

#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    logger: UiLogger,
}

impl ApiClient {
    pub fn new(base_url: &str, logger: UiLogger) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            logger,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let body = self.read_json("/tasks").await?;
        let (tasks, shape) = tasks_from_response(body);
        self.record_list_outcome("task", tasks.len(), shape);
        Ok(tasks)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.read_json("/categories").await?;
        let (categories, shape) = categories_from_response(body);
        self.record_list_outcome("category", categories.len(), shape);
        Ok(categories)
    }

    pub async fn create_task(&self, payload: &TaskPayload) -> Result<(), ApiError> {
        self.write(Request::post(&self.url("/tasks")), payload).await?;
        self.logger.info(format!("created task \"{}\"", payload.title));
        Ok(())
    }

    pub async fn update_task(&self, id: &str, payload: &TaskPayload) -> Result<(), ApiError> {
        let url = self.url(&format!("/tasks/{id}"));
        self.write(Request::put(&url), payload).await?;
        self.logger.info(format!("updated task {id}"));
        Ok(())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/tasks/{id}"));
        let response = Request::delete(&url)
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        Self::ensure_success(response).await?;
        self.logger.info(format!("deleted task {id}"));
        Ok(())
    }

    pub async fn create_category(&self, name: &str, color: &str) -> Result<(), ApiError> {
        let payload = CategoryPayload {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.write(Request::post(&self.url("/categories")), &payload)
            .await?;
        self.logger.info(format!("created category \"{name}\""));
        Ok(())
    }

    /// GET that only distinguishes transport/status failures; a success
    /// body that is not JSON degrades to `Null` so the list
    /// normalization can treat it as a malformed shape.
    async fn read_json(&self, path: &str) -> Result<Value, ApiError> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await.unwrap_or(Value::Null))
    }

    /// Sends a JSON write and discards the echoed entity: every
    /// mutation is followed by a full reload, so the response body is
    /// never the source of truth.
    async fn write<B: Serialize>(
        &self,
        builder: gloo::net::http::RequestBuilder,
        body: &B,
    ) -> Result<(), ApiError> {
        let request = builder
            .json(body)
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        if response.ok() {
            return Ok(response);
        }
        let code = response.status();
        let message = response
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(error_message_from_body);
        Err(ApiError::Status { code, message })
    }

    fn record_list_outcome(&self, kind: &str, len: usize, shape: ListShape) {
        match shape {
            ListShape::WellFormed => {
                info!(kind, len, "list loaded");
                self.logger.info(format!("loaded {len} {kind} entries"));
            }
            ListShape::Malformed => {
                warn!(kind, len, "list response was malformed; degraded to what survived");
                self.logger
                    .warn(format!("{kind} list response was malformed; showing {len} entries"));
            }
        }
    }
}

/// Invokes a host-shell command (window chrome). Errors are returned as
/// plain strings the way every shell boundary in this app reports them.
pub async fn invoke_shell(cmd: &str) -> Result<(), String> {
    tauri_wasm::invoke(cmd)
        .await
        .map(|_| ())
        .map_err(|error| format!("invoke error: {error:?}"))
}
