//! Bridge between the synchronous event loop and the async HTTP client.
//!
//! A background thread owns a current-thread tokio runtime. The UI sends
//! [`ApiRequest`]s over an unbounded channel; each request is spawned as its
//! own task, so in-flight requests overlap freely and responses arrive in
//! whatever order the server answers. The UI drains [`ApiResponse`]s once
//! per tick. Nothing is cancelled or retried.

use std::collections::HashMap;
use std::sync::mpsc;

use chrono::NaiveDate;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

use super::client::ApiClient;
use super::task::{DateCount, NewTask, Task};

#[derive(Debug, Clone)]
pub enum ApiRequest {
    ListTasks(NaiveDate),
    ListDateCounts,
    Create(NewTask),
    SetCompleted { id: i64, completed: bool },
    Delete(i64),
}

#[derive(Debug)]
pub enum ApiResponse {
    Tasks(Result<Vec<Task>>),
    DateCounts(Result<HashMap<NaiveDate, DateCount>>),
    Created(Result<Task>),
    Updated(Result<Task>),
    Deleted(Result<()>),
}

/// Start the worker thread. Dropping the request sender shuts it down once
/// in-flight requests have settled.
pub fn spawn(api: ApiClient) -> Result<(UnboundedSender<ApiRequest>, mpsc::Receiver<ApiResponse>)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (req_tx, mut req_rx) = tokio::sync::mpsc::unbounded_channel::<ApiRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<ApiResponse>();

    std::thread::spawn(move || {
        runtime.block_on(async move {
            while let Some(request) = req_rx.recv().await {
                let api = api.clone();
                let resp_tx = resp_tx.clone();
                tokio::spawn(async move {
                    // The receiver may be gone during shutdown.
                    let _ = resp_tx.send(perform(&api, request).await);
                });
            }
        });
    });

    Ok((req_tx, resp_rx))
}

async fn perform(api: &ApiClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::ListTasks(date) => ApiResponse::Tasks(api.list_tasks(date).await),
        ApiRequest::ListDateCounts => ApiResponse::DateCounts(api.date_counts().await),
        ApiRequest::Create(new_task) => ApiResponse::Created(api.create_task(&new_task).await),
        ApiRequest::SetCompleted { id, completed } => {
            ApiResponse::Updated(api.set_completed(id, completed).await)
        }
        ApiRequest::Delete(id) => ApiResponse::Deleted(api.delete_task(id).await),
    }
}
