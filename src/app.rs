use std::collections::HashMap;
use std::sync::mpsc;

use chrono::{Datelike, Local, NaiveDate};
use tokio::sync::mpsc::UnboundedSender;

use crate::api::{ApiRequest, ApiResponse, DateCount, NewTask, Task};
use crate::components::task_form::TaskFormState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// Transient one-line message shown in the status bar, cleared on the
/// next keypress.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: &str) -> Self {
        Self { kind: NoticeKind::Success, text: text.to_string() }
    }

    fn warning(text: &str) -> Self {
        Self { kind: NoticeKind::Warning, text: text.to_string() }
    }

    fn error(text: &str) -> Self {
        Self { kind: NoticeKind::Error, text: text.to_string() }
    }
}

/// Task board state. Every mutation goes through the API worker; after a
/// successful mutation both canonical views (tasks for the selected date,
/// per-date counts) are re-fetched rather than patched locally.
pub struct App {
    pub running: bool,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub tasks: Vec<Task>,
    pub date_counts: HashMap<NaiveDate, DateCount>,
    pub selected_task: usize,
    pub loading: bool,
    pub form_state: Option<TaskFormState>,
    pub notice: Option<Notice>,
    pub show_help: bool,
    requests: UnboundedSender<ApiRequest>,
    responses: mpsc::Receiver<ApiResponse>,
}

impl App {
    pub fn new(
        requests: UnboundedSender<ApiRequest>,
        responses: mpsc::Receiver<ApiResponse>,
    ) -> Self {
        let today = Local::now().date_naive();

        let mut app = Self {
            running: true,
            selected_date: today,
            today,
            tasks: Vec::new(),
            date_counts: HashMap::new(),
            selected_task: 0,
            loading: false,
            form_state: None,
            notice: None,
            show_help: false,
            requests,
            responses,
        };

        app.load_tasks();
        app.load_date_counts();
        app
    }

    /// Apply any responses the worker has delivered since the last tick.
    /// Responses are applied in arrival order; a later fetch simply
    /// overwrites the effect of an earlier one.
    pub fn drain_responses(&mut self) {
        while let Ok(response) = self.responses.try_recv() {
            self.apply(response);
        }
    }

    pub fn apply(&mut self, response: ApiResponse) {
        match response {
            ApiResponse::Tasks(Ok(tasks)) => {
                self.tasks = tasks;
                self.selected_task = self
                    .selected_task
                    .min(self.tasks.len().saturating_sub(1));
                self.loading = false;
            }
            ApiResponse::Tasks(Err(err)) => {
                // Prior list stays on screen.
                log::warn!("task fetch failed: {err}");
                self.loading = false;
                self.notice = Some(Notice::error("Failed to load tasks. Is the server running?"));
            }
            ApiResponse::DateCounts(Ok(counts)) => {
                self.date_counts = counts;
            }
            ApiResponse::DateCounts(Err(err)) => {
                // Badge refresh is non-critical: log, don't bother the user.
                log::warn!("date count fetch failed: {err}");
            }
            ApiResponse::Created(Ok(_)) => {
                self.form_state = None;
                self.notice = Some(Notice::success("Task added"));
                self.refresh();
            }
            ApiResponse::Created(Err(err)) => {
                log::warn!("task create failed: {err}");
                self.notice = Some(Notice::error("Failed to add task"));
            }
            ApiResponse::Updated(Ok(_)) => {
                self.refresh();
            }
            ApiResponse::Updated(Err(err)) => {
                log::warn!("task update failed: {err}");
                self.notice = Some(Notice::error("Failed to update task"));
            }
            ApiResponse::Deleted(Ok(())) => {
                self.notice = Some(Notice::success("Task deleted"));
                self.refresh();
            }
            ApiResponse::Deleted(Err(err)) => {
                log::warn!("task delete failed: {err}");
                self.notice = Some(Notice::error("Failed to delete task"));
            }
        }
    }

    pub fn load_tasks(&mut self) {
        self.loading = true;
        self.send(ApiRequest::ListTasks(self.selected_date));
    }

    pub fn load_date_counts(&mut self) {
        self.send(ApiRequest::ListDateCounts);
    }

    /// Re-fetch both canonical views.
    pub fn refresh(&mut self) {
        self.load_tasks();
        self.load_date_counts();
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
        self.selected_task = 0;
        self.load_tasks();
    }

    pub fn next_day(&mut self) {
        self.select_date(self.selected_date.succ_opt().unwrap_or(self.selected_date));
    }

    pub fn prev_day(&mut self) {
        self.select_date(self.selected_date.pred_opt().unwrap_or(self.selected_date));
    }

    pub fn next_month(&mut self) {
        let month = self.selected_date.month();
        let year = self.selected_date.year();
        let (new_year, new_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let day = self
            .selected_date
            .day()
            .min(days_in_month(new_year, new_month));
        if let Some(date) = NaiveDate::from_ymd_opt(new_year, new_month, day) {
            self.select_date(date);
        }
    }

    pub fn prev_month(&mut self) {
        let month = self.selected_date.month();
        let year = self.selected_date.year();
        let (new_year, new_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        let day = self
            .selected_date
            .day()
            .min(days_in_month(new_year, new_month));
        if let Some(date) = NaiveDate::from_ymd_opt(new_year, new_month, day) {
            self.select_date(date);
        }
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.select_date(self.today);
    }

    pub fn select_next_task(&mut self) {
        if !self.tasks.is_empty() && self.selected_task + 1 < self.tasks.len() {
            self.selected_task += 1;
        }
    }

    pub fn select_prev_task(&mut self) {
        self.selected_task = self.selected_task.saturating_sub(1);
    }

    pub fn open_task_form(&mut self) {
        self.form_state = Some(TaskFormState::new(self.selected_date));
    }

    pub fn close_task_form(&mut self) {
        self.form_state = None;
    }

    /// Validate and submit the add-task form. Whitespace-only text is
    /// rejected locally without any request; the modal closes only once
    /// the server confirms the create.
    pub fn submit_task_form(&mut self) {
        let Some(form) = &self.form_state else {
            return;
        };
        let text = form.text.trim().to_string();
        if text.is_empty() {
            self.notice = Some(Notice::warning("Please enter a task description"));
            return;
        }
        let date = form.date;
        self.send(ApiRequest::Create(NewTask {
            text,
            date,
            completed: false,
        }));
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = &mut self.form_state {
            form.input_char(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.form_state {
            form.backspace();
        }
    }

    /// Flip the completion state of the selected task on the server.
    /// No optimistic update: the list changes on the next fetch.
    pub fn toggle_selected(&mut self) {
        if let Some(task) = self.tasks.get(self.selected_task) {
            self.send(ApiRequest::SetCompleted {
                id: task.id,
                completed: !task.completed,
            });
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(task) = self.tasks.get(self.selected_task) {
            self.send(ApiRequest::Delete(task.id));
        }
    }

    fn send(&self, request: ApiRequest) {
        if self.requests.send(request).is_err() {
            log::warn!("api worker is gone, dropping request");
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap()
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    .num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn test_app() -> (App, UnboundedReceiver<ApiRequest>, mpsc::Sender<ApiResponse>) {
        let (req_tx, req_rx) = tokio::sync::mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        (App::new(req_tx, resp_rx), req_rx, resp_tx)
    }

    fn drain(rx: &mut UnboundedReceiver<ApiRequest>) -> Vec<ApiRequest> {
        let mut requests = Vec::new();
        while let Ok(request) = rx.try_recv() {
            requests.push(request);
        }
        requests
    }

    fn task(id: i64, text: &str, date: NaiveDate, completed: bool) -> Task {
        Task {
            id,
            text: text.to_string(),
            date,
            completed,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn startup_fetches_both_views() {
        let (app, mut req_rx, _resp_tx) = test_app();
        let requests = drain(&mut req_rx);
        assert!(matches!(requests[0], ApiRequest::ListTasks(d) if d == app.selected_date));
        assert!(matches!(requests[1], ApiRequest::ListDateCounts));
        assert!(app.loading);
    }

    #[test]
    fn select_date_fetches_tasks_only() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);

        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        app.select_date(date);

        let requests = drain(&mut req_rx);
        assert_eq!(requests.len(), 1);
        assert!(matches!(requests[0], ApiRequest::ListTasks(d) if d == date));
        assert!(app.loading);
    }

    #[test]
    fn empty_task_list_is_not_an_error() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);

        app.apply(ApiResponse::Tasks(Ok(Vec::new())));
        assert!(app.tasks.is_empty());
        assert!(!app.loading);
        assert!(app.notice.is_none());
    }

    #[test]
    fn failed_task_fetch_keeps_prior_list() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        app.apply(ApiResponse::Tasks(Ok(vec![task(1, "Buy milk", date, false)])));

        app.apply(ApiResponse::Tasks(Err(eyre!("connection refused"))));

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].text, "Buy milk");
        assert!(!app.loading);
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn count_fetch_failure_is_silent() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);

        app.apply(ApiResponse::DateCounts(Err(eyre!("connection refused"))));
        assert!(app.notice.is_none());
    }

    #[test]
    fn whitespace_only_add_sends_no_request() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);

        app.open_task_form();
        for c in "   ".chars() {
            app.form_input_char(c);
        }
        app.submit_task_form();

        assert!(drain(&mut req_rx).is_empty());
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Warning);
        assert!(app.form_state.is_some());
    }

    #[test]
    fn add_task_trims_text_and_creates_incomplete() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);

        app.open_task_form();
        for c in "  Buy milk ".chars() {
            app.form_input_char(c);
        }
        app.submit_task_form();

        let requests = drain(&mut req_rx);
        assert_eq!(requests.len(), 1);
        match &requests[0] {
            ApiRequest::Create(new_task) => {
                assert_eq!(new_task.text, "Buy milk");
                assert_eq!(new_task.date, app.selected_date);
                assert!(!new_task.completed);
            }
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[test]
    fn successful_add_closes_modal_and_refetches_both() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        app.open_task_form();
        for c in "Buy milk".chars() {
            app.form_input_char(c);
        }
        app.submit_task_form();
        drain(&mut req_rx);

        app.apply(ApiResponse::Created(Ok(task(
            1,
            "Buy milk",
            app.selected_date,
            false,
        ))));

        assert!(app.form_state.is_none());
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Success);
        let requests = drain(&mut req_rx);
        assert!(matches!(requests[0], ApiRequest::ListTasks(_)));
        assert!(matches!(requests[1], ApiRequest::ListDateCounts));
    }

    #[test]
    fn failed_add_keeps_modal_open() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        app.open_task_form();
        for c in "Buy milk".chars() {
            app.form_input_char(c);
        }
        app.submit_task_form();
        drain(&mut req_rx);

        app.apply(ApiResponse::Created(Err(eyre!("500"))));

        let form = app.form_state.as_ref().unwrap();
        assert_eq!(form.text, "Buy milk");
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Error);
        assert!(drain(&mut req_rx).is_empty());
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        let date = app.selected_date;
        app.apply(ApiResponse::Tasks(Ok(vec![task(1, "Buy milk", date, false)])));

        app.toggle_selected();
        let requests = drain(&mut req_rx);
        assert!(matches!(
            requests[0],
            ApiRequest::SetCompleted { id: 1, completed: true }
        ));

        // Server applies the update; the refetched list comes back.
        app.apply(ApiResponse::Tasks(Ok(vec![task(1, "Buy milk", date, true)])));
        app.toggle_selected();
        let requests = drain(&mut req_rx);
        assert!(matches!(
            requests[0],
            ApiRequest::SetCompleted { id: 1, completed: false }
        ));
    }

    #[test]
    fn delete_targets_selected_task() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        let date = app.selected_date;
        app.apply(ApiResponse::Tasks(Ok(vec![
            task(1, "Buy milk", date, false),
            task(2, "Water plants", date, false),
        ])));
        app.select_next_task();

        app.delete_selected();
        let requests = drain(&mut req_rx);
        assert!(matches!(requests[0], ApiRequest::Delete(2)));

        app.apply(ApiResponse::Deleted(Ok(())));
        assert_eq!(app.notice.as_ref().unwrap().kind, NoticeKind::Success);
        let requests = drain(&mut req_rx);
        assert!(matches!(requests[0], ApiRequest::ListTasks(_)));
        assert!(matches!(requests[1], ApiRequest::ListDateCounts));
    }

    #[test]
    fn selection_clamps_when_list_shrinks() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        let date = app.selected_date;
        app.apply(ApiResponse::Tasks(Ok(vec![
            task(1, "a", date, false),
            task(2, "b", date, false),
            task(3, "c", date, false),
        ])));
        app.select_next_task();
        app.select_next_task();
        assert_eq!(app.selected_task, 2);

        app.apply(ApiResponse::Tasks(Ok(vec![task(1, "a", date, false)])));
        assert_eq!(app.selected_task, 0);
    }

    #[test]
    fn later_response_wins_over_earlier_one() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);
        let date = app.selected_date;

        app.apply(ApiResponse::Tasks(Ok(vec![task(1, "stale", date, false)])));
        app.apply(ApiResponse::Tasks(Ok(vec![task(2, "fresh", date, false)])));

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].text, "fresh");
    }

    #[test]
    fn month_navigation_clamps_day() {
        let (mut app, mut req_rx, _resp_tx) = test_app();
        drain(&mut req_rx);

        app.select_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        app.next_month();
        // 2024 is a leap year.
        assert_eq!(app.selected_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        app.prev_month();
        assert_eq!(app.selected_date, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
    }
}
