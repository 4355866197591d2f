use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A to-do item bound to a single calendar date. Owned by the server;
/// the copy held here is stale until the next fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub date: NaiveDate,
    pub completed: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body for `POST /todos`.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub text: String,
    pub date: NaiveDate,
    pub completed: bool,
}

/// Per-date tallies from `GET /todos/dates`. The calendar badge shows
/// `incomplete`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DateCount {
    pub total: u32,
    pub incomplete: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_parses_server_json() {
        let json = r#"{
            "id": 7,
            "text": "Buy milk",
            "completed": false,
            "date": "2024-06-01",
            "createdAt": "2024-06-01T08:15:30.123456",
            "updatedAt": null
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert!(task.created_at.is_some());
        assert!(task.updated_at.is_none());
    }

    #[test]
    fn new_task_serializes_wire_fields() {
        let body = NewTask {
            text: "Water plants".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
            completed: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "Water plants");
        assert_eq!(json["date"], "2024-06-02");
        assert_eq!(json["completed"], false);
    }
}
