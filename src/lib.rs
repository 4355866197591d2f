/// Typed model and HTTP client for the task board REST API, plus the
/// worker-thread bridge used by the TUI event loop.
pub mod api;
/// Task board controller: UI state and the request/response state machine.
pub mod app;
/// Presentational widgets derived from controller state.
pub mod components;
/// Config file handling (API base URL).
pub mod config;
/// Shared widget styles.
pub mod theme;
