//! HTTP client for the task board REST API.
//!
//! Thin typed wrapper over reqwest. Any non-2xx status is an error
//! regardless of the response body; there are no retries.

use std::collections::HashMap;

use chrono::NaiveDate;
use color_eyre::Result;
use url::Url;

use super::task::{DateCount, NewTask, Task};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the given base URL (e.g. `http://localhost:5000/api`).
    /// This does not open a connection.
    pub fn new<S: AsRef<str>>(base: S) -> Result<Self> {
        let base = Url::parse(base.as_ref().trim_end_matches('/'))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    /// `GET /todos?date=YYYY-MM-DD`
    pub async fn list_tasks(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let url = format!("{}?date={}", self.endpoint("todos"), date.format("%Y-%m-%d"));
        let tasks = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(tasks)
    }

    /// `GET /todos/dates`
    pub async fn date_counts(&self) -> Result<HashMap<NaiveDate, DateCount>> {
        let url = self.endpoint("todos/dates");
        let counts = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(counts)
    }

    /// `POST /todos`
    pub async fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        let url = self.endpoint("todos");
        let task = self
            .http
            .post(url)
            .json(new_task)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(task)
    }

    /// `PUT /todos/{id}` with `{"completed": ...}`
    pub async fn set_completed(&self, id: i64, completed: bool) -> Result<Task> {
        let url = self.endpoint(&format!("todos/{id}"));
        let task = self
            .http
            .put(url)
            .json(&serde_json::json!({ "completed": completed }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(task)
    }

    /// `DELETE /todos/{id}`
    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let url = self.endpoint(&format!("todos/{id}"));
        self.http
            .delete(url)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
