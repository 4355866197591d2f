pub mod client;
pub mod task;
pub mod worker;

pub use client::ApiClient;
pub use task::{DateCount, NewTask, Task};
pub use worker::{ApiRequest, ApiResponse};
